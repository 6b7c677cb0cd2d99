use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};
use reelmeter_models::AppState;
use reelmeter_utils::{Progress, format_duration};

use crate::{ACCENT_COLOR, MUTED_COLOR, SUCCESS_COLOR};

pub fn draw_progress(f: &mut Frame, area: Rect, progress: &Progress, state: AppState) {
    let border_color = if state == AppState::Calculating {
        ACCENT_COLOR
    } else {
        MUTED_COLOR
    };
    let block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Time info
        ])
        .split(inner);

    let gauge_color = if progress.is_complete { SUCCESS_COLOR } else { ACCENT_COLOR };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(gauge_color).bg(Color::Rgb(40, 40, 40)))
        .ratio(progress.fraction.clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress.percentage()))
        .use_unicode(true);
    f.render_widget(gauge, chunks[0]);

    if state == AppState::Calculating {
        let elapsed = progress.elapsed().as_secs_f64();
        let time_info = match progress.eta() {
            Some(eta) => format!(
                "Elapsed: {} | ETA: {}",
                format_duration(elapsed),
                format_duration(eta.as_secs_f64())
            ),
            None => format!("Elapsed: {}", format_duration(elapsed)),
        };

        let time_line = Paragraph::new(Line::from(Span::styled(
            time_info,
            Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center);
        f.render_widget(time_line, chunks[1]);
    }
}
