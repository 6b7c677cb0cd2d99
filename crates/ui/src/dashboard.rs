use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use reelmeter_app::App;
use reelmeter_models::{AggregateResult, InputMode};
use reelmeter_utils::{format_bytes, format_duration};

use crate::{ACCENT_COLOR, MUTED_COLOR, WARNING_COLOR, progress};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Folder
            Constraint::Length(4), // Progress
            Constraint::Min(0),    // Results
        ])
        .split(area);

    draw_folder(f, chunks[0], app);
    progress::draw_progress(f, chunks[1], &app.progress, app.state);
    draw_results(f, chunks[2], app);
}

fn draw_folder(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let content = if editing {
        Line::from(vec![
            Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(WARNING_COLOR).add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        let style = if app.selected_folder.is_some() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(MUTED_COLOR).add_modifier(Modifier::ITALIC)
        };
        Line::from(Span::styled(app.folder_label(), style))
    };

    let title = format!(" Folder (.{} files) ", app.settings.extension);
    let border = if editing { WARNING_COLOR } else { MUTED_COLOR };

    let folder = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(folder, area);
}

fn draw_results(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(MUTED_COLOR));

    let lines = match &app.last_result {
        Some(result) => result_lines(result),
        None => app
            .result_text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray))))
            .collect(),
    };

    let results = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(results, area);
}

fn result_lines(result: &AggregateResult) -> Vec<Line<'static>> {
    let label = Style::default().fg(MUTED_COLOR);
    let value = Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total Time:  ", label),
            Span::styled(format!("{:.2} hours", result.total_hours()), value),
            Span::styled(
                format!(" ({})", format_duration(result.total_seconds)),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Total Size:  ", label),
            Span::styled(format_bytes(result.total_bytes), value),
        ]),
        Line::from(vec![
            Span::styled("Files:       ", label),
            Span::styled(result.file_count.to_string(), value),
        ]),
    ];

    if result.has_unreadable() {
        lines.push(Line::from(vec![
            Span::styled("Unreadable:  ", label),
            Span::styled(
                format!("{} (counted as 0s)", result.unreadable_files),
                Style::default().fg(WARNING_COLOR),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Finished at {}", result.finished_at.format("%H:%M:%S")),
        Style::default().fg(MUTED_COLOR).add_modifier(Modifier::ITALIC),
    )));
    lines
}
