// Charts panel
//
// Three side-by-side widgets fed by the chart series manager:
// users over time (line), posts over time (bars) and algorithm accuracy
// (one gauge per slot).

use super::formatters::format_compact_number;
use crate::dashboard::charts::{ChartSeriesManager, ChartWindow, ACCURACY_LABELS};
use crate::theme::Theme;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType,
        Paragraph,
    },
    Frame,
};

const WAITING: &str = "Waiting for data…";

pub struct ChartsPanel;

impl ChartsPanel {
    pub fn render(frame: &mut Frame, area: Rect, charts: &ChartSeriesManager, theme: &Theme) {
        let bp = Breakpoint::from_width(area.width);

        // Narrow terminals stack the accuracy gauges under the time series
        let (series_area, accuracy_area) = if bp.gauges_beside_charts() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(area);
            (cols[0], cols[1])
        } else {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(6), Constraint::Length(9)])
                .split(area);
            (rows[0], rows[1])
        };

        let series = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(series_area);

        Self::render_users(frame, series[0], charts.users(), theme);
        Self::render_posts(frame, series[1], charts.posts(), theme);
        Self::render_accuracy(frame, accuracy_area, charts.accuracy(), theme);
    }

    fn block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(title)
    }

    fn render_waiting(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
        let placeholder = Paragraph::new(WAITING)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted))
            .block(Self::block(title, theme));
        frame.render_widget(placeholder, area);
    }

    fn render_users(frame: &mut Frame, area: Rect, window: &ChartWindow, theme: &Theme) {
        const TITLE: &str = " Unique Users ";
        if window.is_empty() {
            Self::render_waiting(frame, area, TITLE, theme);
            return;
        }

        let points = line_points(window);
        let x_max = (window.len().saturating_sub(1)).max(1) as f64;
        let y_max = y_ceiling(window.max());

        let x_labels: Vec<Span> = match (window.labels.first(), window.labels.last()) {
            (Some(first), Some(last)) if window.len() > 1 => {
                vec![Span::from(first.as_str()), Span::from(last.as_str())]
            }
            (Some(only), _) => vec![Span::from(only.as_str())],
            _ => Vec::new(),
        };

        let dataset = Dataset::default()
            .name("users")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.chart_users))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(Self::block(TITLE, theme))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(theme.muted))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(theme.muted))
                    .bounds([0.0, y_max])
                    .labels(vec![
                        Span::from("0"),
                        Span::from(format_compact_number(y_max as u64)),
                    ]),
            );

        frame.render_widget(chart, area);
    }

    fn render_posts(frame: &mut Frame, area: Rect, window: &ChartWindow, theme: &Theme) {
        const TITLE: &str = " Total Posts ";
        if window.is_empty() {
            Self::render_waiting(frame, area, TITLE, theme);
            return;
        }

        let bars: Vec<Bar> = window
            .labels
            .iter()
            .zip(&window.values)
            .map(|(label, value)| {
                Bar::default()
                    .label(Line::from(short_time(label)))
                    .value(*value)
                    .text_value(format_compact_number(*value))
                    .style(Style::default().fg(theme.chart_posts))
            })
            .collect();

        let chart = BarChart::default()
            .block(Self::block(TITLE, theme))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width(area.width, window.len()))
            .bar_gap(1)
            .max(window.max().max(1))
            .value_style(
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().fg(theme.foreground));

        frame.render_widget(chart, area);
    }

    fn render_accuracy(frame: &mut Frame, area: Rect, accuracy: [f64; 3], theme: &Theme) {
        let outer = Self::block(" Algorithm Accuracy ", theme);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(inner);

        for ((label, value), row) in ACCURACY_LABELS.iter().zip(accuracy).zip(rows.iter()) {
            let gauge = Gauge::default()
                .block(Block::default().title(format!(" {} ", label)))
                .gauge_style(Style::default().fg(theme.gauge_fill))
                .ratio(gauge_ratio(value))
                .label(format!("{:.1}%", value));
            frame.render_widget(gauge, *row);
        }
    }
}

/// Points for the line chart, x = position in the window
fn line_points(window: &ChartWindow) -> Vec<(f64, f64)> {
    window
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v as f64))
        .collect()
}

/// Y-axis upper bound with a little headroom, never zero
fn y_ceiling(max: u64) -> f64 {
    max.saturating_add(max / 10).max(1) as f64
}

/// Percentage to gauge ratio; gauges reject anything outside [0, 1]
fn gauge_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Fit `count` bars (with one-column gaps) into a bordered panel
fn bar_width(panel_width: u16, count: usize) -> u16 {
    let inner = panel_width.saturating_sub(2) as usize;
    let per_bar = inner / count.max(1);
    per_bar.saturating_sub(1).clamp(1, 8) as u16
}

/// "HH:MM:SS" to "MM:SS" so labels fit under narrow bars
fn short_time(label: &str) -> String {
    match label.split_once(':') {
        Some((_, rest)) if rest.len() == 5 => rest.to_string(),
        _ => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MetricPoint;
    use ratatui::{backend::TestBackend, Terminal};

    fn metrics(n: u64) -> Vec<MetricPoint> {
        (0..n)
            .map(|i| MetricPoint {
                time_label: format!("10:00:{:02}", i),
                unique_users: i * 3,
                total_posts: i,
                online_users: None,
            })
            .collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn gauge_ratio_is_always_valid() {
        assert_eq!(gauge_ratio(98.5), 0.985);
        assert_eq!(gauge_ratio(150.0), 1.0);
        assert_eq!(gauge_ratio(-3.0), 0.0);
        assert_eq!(gauge_ratio(f64::NAN), 0.0);
    }

    #[test]
    fn bar_width_fits_panel() {
        assert_eq!(bar_width(42, 10), 3);
        assert_eq!(bar_width(200, 2), 8);
        assert_eq!(bar_width(4, 10), 1);
        assert_eq!(bar_width(20, 0), 8);
    }

    #[test]
    fn y_ceiling_never_collapses() {
        assert_eq!(y_ceiling(0), 1.0);
        assert_eq!(y_ceiling(10), 11.0);
        assert_eq!(y_ceiling(3), 3.0);
    }

    #[test]
    fn short_time_drops_hours() {
        assert_eq!(short_time("12:34:56"), "34:56");
        assert_eq!(short_time("now"), "now");
    }

    #[test]
    fn empty_windows_show_waiting_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(120, 16)).unwrap();
        let charts = ChartSeriesManager::new();
        terminal
            .draw(|f| ChartsPanel::render(f, f.area(), &charts, &Theme::default()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Waiting for data"));
        assert!(text.contains("99.0%"));
        assert!(text.contains("Count-Min Sketch"));
    }

    #[test]
    fn populated_windows_render_without_panic() {
        let mut charts = ChartSeriesManager::new();
        charts.update_from_metrics(&metrics(20));

        for (w, h) in [(160, 20), (70, 24), (30, 12)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal
                .draw(|f| ChartsPanel::render(f, f.area(), &charts, &Theme::default()))
                .unwrap();
        }

        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();
        terminal
            .draw(|f| ChartsPanel::render(f, f.area(), &charts, &Theme::default()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Unique Users"));
    }
}
