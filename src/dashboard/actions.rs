// Action dispatcher
//
// Turns the five user commands into StatsClient calls and interprets the
// results. Each action goes idle -> in-flight -> settled and back to idle,
// emitting exactly one notification on the way:
//
//   begin()    local validation, marks the action in flight
//   perform()  the network call (runs in a spawned task)
//   settle()   updates command-local UI, pushes the notification
//
// Splitting the network call out keeps begin/settle synchronous, so they run
// on the UI loop that owns the state while perform() runs elsewhere.

use super::charts::ChartSeriesManager;
use super::notifications::{Clock, NotificationId, NotificationQueue, Severity};
use crate::client::{AccuracyReport, FetchError, SimulationCommand, StatsClient, UserCheck};
use std::collections::HashMap;

/// A user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    TestAlgorithms,
    CheckUser(String),
}

impl Command {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Start => ActionKind::Start,
            Self::Stop => ActionKind::Stop,
            Self::Reset => ActionKind::Reset,
            Self::TestAlgorithms => ActionKind::Test,
            Self::CheckUser(_) => ActionKind::CheckUser,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Start,
    Stop,
    Reset,
    Test,
    CheckUser,
}

impl ActionKind {
    /// Generic message for a failed command
    fn failure_message(&self) -> &'static str {
        match self {
            Self::Start => "Failed to start simulation",
            Self::Stop => "Failed to stop simulation",
            Self::Reset => "Failed to reset simulation",
            Self::Test => "Failed to test algorithms",
            Self::CheckUser => "Failed to check user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    Idle,
    InFlight,
}

/// Raw result of `perform`, handed back to the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Simulation {
        command: SimulationCommand,
        result: Result<(), FetchError>,
    },
    Test(Result<AccuracyReport, FetchError>),
    CheckUser(Result<UserCheck, FetchError>),
}

impl ActionOutcome {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Simulation { command, .. } => match command {
                SimulationCommand::Start => ActionKind::Start,
                SimulationCommand::Stop => ActionKind::Stop,
                SimulationCommand::Reset => ActionKind::Reset,
            },
            Self::Test(_) => ActionKind::Test,
            Self::CheckUser(_) => ActionKind::CheckUser,
        }
    }
}

/// Mutually exclusive display states of a membership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipVerdict {
    NotFound,
    Found,
    /// Filter says present, exact lookup says absent
    FalsePositive,
}

impl MembershipVerdict {
    pub fn classify(check: &UserCheck) -> Self {
        match (check.bloom_result, check.is_false_positive) {
            (false, _) => Self::NotFound,
            (true, true) => Self::FalsePositive,
            (true, false) => Self::Found,
        }
    }
}

/// Contents of the membership-check panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipCheck {
    pub user: String,
    pub verdict: MembershipVerdict,
    pub exact_result: bool,
}

impl MembershipCheck {
    pub fn from_check(check: &UserCheck) -> Self {
        Self {
            user: check.user.clone(),
            verdict: MembershipVerdict::classify(check),
            exact_result: check.exact_result,
        }
    }

    pub fn headline(&self) -> String {
        match self.verdict {
            MembershipVerdict::NotFound => format!("\"{}\" NOT found in Bloom Filter", self.user),
            MembershipVerdict::Found => format!("✓ \"{}\" found in Bloom Filter", self.user),
            MembershipVerdict::FalsePositive => format!(
                "⚠ FALSE POSITIVE: \"{}\" found in Bloom Filter, but not in the real data",
                self.user
            ),
        }
    }

    pub fn exact_line(&self) -> &'static str {
        if self.exact_result {
            "Exact lookup: Found"
        } else {
            "Exact lookup: Not found"
        }
    }
}

/// What happened when an action settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub kind: ActionKind,
    pub ok: bool,
    pub notification: NotificationId,
    /// Caller should issue an out-of-cycle snapshot fetch now
    pub refresh: bool,
}

/// Tracks in-flight actions and interprets their results
#[derive(Debug, Default)]
pub struct ActionDispatcher {
    in_flight: HashMap<ActionKind, usize>,
    membership: Option<MembershipCheck>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, kind: ActionKind) -> ActionPhase {
        match self.in_flight.get(&kind) {
            Some(n) if *n > 0 => ActionPhase::InFlight,
            _ => ActionPhase::Idle,
        }
    }

    /// Latest membership-check result, if any
    pub fn membership(&self) -> Option<&MembershipCheck> {
        self.membership.as_ref()
    }

    /// Validate a command and mark it in flight
    ///
    /// Returns the command to `perform`, or `None` when it was rejected
    /// locally (a warning has then been pushed and no request must be made).
    pub fn begin<C: Clock>(
        &mut self,
        command: Command,
        notifications: &mut NotificationQueue<C>,
    ) -> Option<Command> {
        let command = match command {
            Command::CheckUser(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    notifications.push("Please enter a username", Severity::Warning);
                    return None;
                }
                Command::CheckUser(trimmed.to_string())
            }
            other => other,
        };

        *self.in_flight.entry(command.kind()).or_insert(0) += 1;
        tracing::debug!("Action {:?} in flight", command.kind());
        Some(command)
    }

    /// Issue the network call for a command accepted by `begin`
    pub async fn perform(client: &StatsClient, command: Command) -> ActionOutcome {
        let simulation = |command: SimulationCommand| async move {
            ActionOutcome::Simulation {
                command,
                result: client.send_command(command).await,
            }
        };

        match command {
            Command::Start => simulation(SimulationCommand::Start).await,
            Command::Stop => simulation(SimulationCommand::Stop).await,
            Command::Reset => simulation(SimulationCommand::Reset).await,
            Command::TestAlgorithms => ActionOutcome::Test(client.test_algorithms().await),
            Command::CheckUser(name) => ActionOutcome::CheckUser(client.check_user(&name).await),
        }
    }

    /// Interpret a finished action: update command-local UI and notify once
    pub fn settle<C: Clock>(
        &mut self,
        outcome: ActionOutcome,
        charts: &mut ChartSeriesManager,
        notifications: &mut NotificationQueue<C>,
    ) -> Settlement {
        let kind = outcome.kind();
        if let Some(n) = self.in_flight.get_mut(&kind) {
            *n = n.saturating_sub(1);
        }

        let (ok, message, severity) = match outcome {
            ActionOutcome::Simulation { command, result } => match (command, result) {
                (SimulationCommand::Start, Ok(())) => {
                    (true, "Simulation started!".to_string(), Severity::Success)
                }
                (SimulationCommand::Stop, Ok(())) => {
                    (true, "Simulation stopped!".to_string(), Severity::Info)
                }
                (SimulationCommand::Reset, Ok(())) => {
                    (true, "Simulation reset!".to_string(), Severity::Warning)
                }
                (_, Err(e)) => failure(kind, &e),
            },
            ActionOutcome::Test(Ok(report)) => {
                charts.apply_accuracy(&report);
                (true, test_message(&report), Severity::Info)
            }
            ActionOutcome::Test(Err(e)) => failure(kind, &e),
            ActionOutcome::CheckUser(Ok(check)) => {
                let panel = MembershipCheck::from_check(&check);
                let message = panel.headline();
                self.membership = Some(panel);
                (true, message, Severity::Info)
            }
            ActionOutcome::CheckUser(Err(e)) if e.is_local() => (
                false,
                "Please enter a username".to_string(),
                Severity::Warning,
            ),
            ActionOutcome::CheckUser(Err(e)) => failure(kind, &e),
        };

        let notification = notifications.push(message, severity);

        Settlement {
            kind,
            ok,
            notification,
            refresh: ok && kind == ActionKind::Reset,
        }
    }
}

fn failure(kind: ActionKind, error: &FetchError) -> (bool, String, Severity) {
    tracing::warn!("{:?} failed ({}): {}", kind, error.kind(), error);
    (false, kind.failure_message().to_string(), Severity::Error)
}

fn test_message(report: &AccuracyReport) -> String {
    let mut message = format!(
        "Bloom Filter: {}% | HyperLogLog error: {}%",
        report.bloom_accuracy, report.hll_error_pct
    );
    if let (Some(estimate), Some(actual)) = (report.hll_estimate, report.hll_actual) {
        message.push_str(&format!(" ({} of {})", estimate, actual));
    }
    message
}
