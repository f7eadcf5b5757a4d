// Theme support for the TUI
//
// Color palettes selected by name from the config file.
// "auto" uses the terminal's ANSI palette, named themes use true color (RGB).

use crate::dashboard::notifications::Severity;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Names accepted by `Theme::by_name`
pub const THEME_NAMES: [&str; 5] = ["auto", "dracula", "nord", "gruvbox", "light"];

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub border_type: BorderType,

    // ─── Severity Colors ─────────────────────────────────────
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,

    // ─── Chart Colors ────────────────────────────────────────
    pub chart_users: Color,
    pub chart_posts: Color,
    /// Gauge fill, muted for white text contrast
    pub gauge_fill: Color,
}

impl Theme {
    /// Load theme by name; unknown names fall back to "auto"
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            "light" => Self::light(),
            "auto" => Self::auto(),
            other => {
                tracing::warn!(
                    "Unknown theme '{}', using auto (available: {})",
                    other,
                    THEME_NAMES.join(", ")
                );
                Self::auto()
            }
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::White,
            highlight: Color::Yellow,
            status_bar: Color::Green,
            border_type: BorderType::Plain,
            success: Color::Green,
            info: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,
            chart_users: Color::Cyan,
            chart_posts: Color::Magenta,
            gauge_fill: Color::Rgb(0x00, 0x64, 0x00), // muted green
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            background: Color::Rgb(0x28, 0x2a, 0x36),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            muted: Color::Rgb(0x62, 0x72, 0xa4),       // comment
            title: Color::Rgb(0x8b, 0xe9, 0xfd),       // cyan
            border: Color::Rgb(0x62, 0x72, 0xa4),      // comment
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),   // yellow
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),  // green
            border_type: BorderType::Rounded,
            success: Color::Rgb(0x50, 0xfa, 0x7b),     // green
            info: Color::Rgb(0x8b, 0xe9, 0xfd),        // cyan
            warning: Color::Rgb(0xff, 0xb8, 0x6c),     // orange
            error: Color::Rgb(0xff, 0x55, 0x55),       // red
            chart_users: Color::Rgb(0xbd, 0x93, 0xf9), // purple
            chart_posts: Color::Rgb(0xff, 0x79, 0xc6), // pink
            gauge_fill: Color::Rgb(0x28, 0x7d, 0x3d),  // muted green
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::Rgb(0x2e, 0x34, 0x40),
            foreground: Color::Rgb(0xd8, 0xde, 0xe9),
            muted: Color::Rgb(0x4c, 0x56, 0x6a),       // polar night
            title: Color::Rgb(0x88, 0xc0, 0xd0),       // frost cyan
            border: Color::Rgb(0x4c, 0x56, 0x6a),      // polar night
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),   // aurora yellow
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),  // aurora green
            border_type: BorderType::Rounded,
            success: Color::Rgb(0xa3, 0xbe, 0x8c),     // aurora green
            info: Color::Rgb(0x81, 0xa1, 0xc1),        // frost blue
            warning: Color::Rgb(0xd0, 0x87, 0x70),     // aurora orange
            error: Color::Rgb(0xbf, 0x61, 0x6a),       // aurora red
            chart_users: Color::Rgb(0x88, 0xc0, 0xd0), // frost cyan
            chart_posts: Color::Rgb(0xb4, 0x8e, 0xad), // aurora purple
            gauge_fill: Color::Rgb(0x51, 0x5f, 0x46),  // muted green
        }
    }

    /// Gruvbox theme - https://github.com/morhetz/gruvbox
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            background: Color::Rgb(0x28, 0x28, 0x28),
            foreground: Color::Rgb(0xeb, 0xdb, 0xb2),
            muted: Color::Rgb(0x92, 0x83, 0x74),       // gray
            title: Color::Rgb(0x83, 0xa5, 0x98),       // aqua
            border: Color::Rgb(0x92, 0x83, 0x74),      // gray
            highlight: Color::Rgb(0xfa, 0xbd, 0x2f),   // yellow
            status_bar: Color::Rgb(0xb8, 0xbb, 0x26),  // green
            border_type: BorderType::Plain,
            success: Color::Rgb(0xb8, 0xbb, 0x26),     // green
            info: Color::Rgb(0x83, 0xa5, 0x98),        // aqua
            warning: Color::Rgb(0xfe, 0x80, 0x19),     // orange
            error: Color::Rgb(0xfb, 0x49, 0x34),       // red
            chart_users: Color::Rgb(0x83, 0xa5, 0x98), // aqua
            chart_posts: Color::Rgb(0xd3, 0x86, 0x9b), // purple
            gauge_fill: Color::Rgb(0x5c, 0x5d, 0x13),  // muted green
        }
    }

    /// Light theme for bright terminals
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::Rgb(0xfa, 0xfa, 0xfa),
            foreground: Color::Rgb(0x38, 0x3a, 0x42),
            muted: Color::Rgb(0xa0, 0xa1, 0xa7),
            title: Color::Rgb(0x01, 0x84, 0xbc),
            border: Color::Rgb(0xa0, 0xa1, 0xa7),
            highlight: Color::Rgb(0xc1, 0x84, 0x01),
            status_bar: Color::Rgb(0x50, 0xa1, 0x4f),
            border_type: BorderType::Rounded,
            success: Color::Rgb(0x50, 0xa1, 0x4f),
            info: Color::Rgb(0x40, 0x78, 0xf2),
            warning: Color::Rgb(0xc1, 0x84, 0x01),
            error: Color::Rgb(0xe4, 0x56, 0x49),
            chart_users: Color::Rgb(0x40, 0x78, 0xf2),
            chart_posts: Color::Rgb(0xa6, 0x26, 0xa4),
            gauge_fill: Color::Rgb(0x9c, 0xc9, 0x9b),
        }
    }

    /// Accent color for a notification severity
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}
