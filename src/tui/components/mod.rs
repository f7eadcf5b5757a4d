// Components module - UI building blocks
//
// Shell components take the whole App:
// - Title bar: app name, backend URL, simulation badge, clock
// - Status bar: snapshot freshness and key hints
// - Membership panel: username input and last verdict
//
// Data panels are unit structs taking only the data they draw and the theme.

pub mod algorithms_panel;
pub mod charts_panel;
pub mod formatters;
pub mod logs_panel;
pub mod membership_panel;
pub mod posts_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;
pub mod trending_panel;

pub use algorithms_panel::AlgorithmsPanel;
pub use charts_panel::ChartsPanel;
pub use logs_panel::LogsPanel;
pub use posts_panel::PostsPanel;
pub use toast::Toast;
pub use trending_panel::TrendingPanel;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the membership panel (convenience wrapper)
pub fn render_membership(f: &mut Frame, area: Rect, app: &App) {
    membership_panel::render(f, area, app);
}
