use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use reelmeter_app::App;
use reelmeter_models::{AppState, InputMode, MessageLevel};

mod dashboard;
mod progress;

const ACCENT_COLOR: Color = Color::Rgb(139, 233, 253);
const SUCCESS_COLOR: Color = Color::Rgb(80, 250, 123);
const WARNING_COLOR: Color = Color::Rgb(255, 184, 108);
const ERROR_COLOR: Color = Color::Rgb(255, 85, 85);
const MUTED_COLOR: Color = Color::Rgb(98, 114, 164);

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    dashboard::draw(f, chunks[1], app);
    draw_status_bar(f, chunks[2], app);

    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let (icon, label, color) = match app.state {
        AppState::Idle => ("⏸", "Idle", MUTED_COLOR),
        AppState::Calculating => ("⟳", "Calculating...", ACCENT_COLOR),
        AppState::Done => ("✔", "Done", SUCCESS_COLOR),
    };

    let title = Line::from(vec![
        Span::styled("🎬 reelmeter", Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD)),
        Span::styled(
            "  total running time of your video folders",
            Style::default().fg(MUTED_COLOR).add_modifier(Modifier::ITALIC),
        ),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(MUTED_COLOR))
            .title_top(
                Line::from(Span::styled(
                    format!(" {icon} {label} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            ),
    );

    f.render_widget(header, area);
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let shortcuts = match app.input_mode {
        InputMode::Editing => "Enter:Confirm | Esc:Cancel",
        InputMode::Normal => "e:Folder | s:Start | w:Save | ?:Help | q:Quit",
    };

    let left = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 60, 60))),
        );

    let center_content = match &app.message {
        Some((level, text)) => {
            let (icon, color) = match level {
                MessageLevel::Info => ("ℹ ", SUCCESS_COLOR),
                MessageLevel::Warning => ("⚠ ", WARNING_COLOR),
                MessageLevel::Error => ("❌ ", ERROR_COLOR),
            };
            Line::from(vec![
                Span::styled(icon, Style::default().fg(color)),
                Span::styled(text.as_str(), Style::default().fg(color)),
            ])
        }
        None if app.is_calculating() => Line::from(vec![
            Span::styled(
                "⟳ ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled("Calculating...", Style::default().fg(Color::Blue)),
        ]),
        None => Line::from(Span::styled("Ready", Style::default().fg(Color::Rgb(100, 100, 100)))),
    };

    let center = Paragraph::new(center_content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(60, 60, 60))),
    );

    f.render_widget(left, chunks[0]);
    f.render_widget(center, chunks[1]);
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        Line::from(""),
        section("📁 Folder"),
        Line::from("  e / i         - Edit the folder path"),
        Line::from("  Enter         - Confirm the typed path"),
        Line::from("  Esc           - Cancel editing"),
        Line::from("  w             - Save folder as the default"),
        Line::from(""),
        section("⏱  Calculation"),
        Line::from("  s / Enter     - Start calculating"),
        Line::from(""),
        section("🎯 General"),
        Line::from("  ? / F1        - Toggle this help"),
        Line::from("  q / Esc       - Quit"),
        Line::from("  Ctrl+C        - Force quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close this help",
            Style::default()
                .fg(Color::Rgb(150, 150, 150))
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));

    f.render_widget(help, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
