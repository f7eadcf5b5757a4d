/// Width breakpoints for layout decisions.
///
/// Render code asks these questions instead of comparing widths directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: split pane
    Compact,
    /// 60-99 cols: half screen
    Normal,
    /// 100+ cols: full terminal
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Panels in the list row: the algorithms panel only fits when wide
    pub fn list_columns(&self) -> usize {
        if self.at_least(Breakpoint::Wide) {
            3
        } else {
            2
        }
    }

    /// Accuracy gauges sit beside the time series when wide, below otherwise
    pub fn gauges_beside_charts(&self) -> bool {
        self.at_least(Breakpoint::Wide)
    }
}
