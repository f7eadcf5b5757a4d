// Events that flow from background fetch tasks back to the dashboard loop
//
// Network calls run in spawned tasks so a slow backend never blocks input
// handling or rendering. Each task reports its result through an mpsc channel
// as one of these events; the loop that owns the dashboard state is the only
// place results are applied.

use crate::client::{FetchError, Snapshot};
use crate::dashboard::actions::ActionOutcome;
use crate::dashboard::scheduler::PollSource;

/// Capacity of the event channel between fetch tasks and the UI loop
pub const EVENT_BUFFER: usize = 256;

#[derive(Debug)]
pub enum DashEvent {
    /// A snapshot fetch finished, successfully or not
    SnapshotFetched {
        /// Sequence number stamped when the request was issued
        seq: u64,
        source: PollSource,
        result: Result<Snapshot, FetchError>,
    },

    /// A user command's network call finished
    ActionSettled(ActionOutcome),
}
