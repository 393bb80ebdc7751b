//! Shared UI components (status bar, banner, help overlay, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode};
use crate::notify::{Banner, Severity};

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::EditCount => "INPUT",
        InputMode::Normal => "LIST",
        InputMode::Modal => "MODAL",
    };
    let loading = if app.is_loading() { "  loading…" } else { "" };
    let msg = format!(
        "mode: {mode}  users:{}  show:{}  rows/page:{}{loading}  | Tab: input/list; m: name; Enter: open; ?: help; q: quit",
        app.store.len(),
        app.display_mode.as_select_value(),
        app.rows_per_page,
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Render the transient banner, colored by severity.
pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState, banner: &Banner) {
    let color = match banner.severity {
        Severity::Info => app.theme.info,
        Severity::Danger => app.theme.danger,
    };
    let p = Paragraph::new(banner.message.clone())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn key_line<'a>(label: &'a str, keys: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(label),
        Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
    ])
}

/// Render the help overlay with usage information and key tips.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(2)).max(8);
    let rect = centered_rect(width, height, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = vec![
        Line::from(Span::styled("Generate", bold)),
        key_line("Focus the count box: ", "Tab / i"),
        key_line("Fetch that many users (0-1000): ", "Enter"),
        key_line("Back to the list: ", "Tab / Esc"),
        Line::raw(""),
        Line::from(Span::styled("List", bold)),
        key_line("Move: ", "Up/Down, j/k, PageUp/PageDown, Home/End"),
        key_line("Toggle first/last name: ", "m"),
        key_line("Open user: ", "Enter or double-click"),
        key_line("Quit: ", "q / Ctrl+c"),
        Line::raw(""),
        Line::from(Span::styled("User view", bold)),
        key_line("Edit / Delete: ", "e / d (or Left/Right + Enter)"),
        key_line("Close: ", "Esc"),
        Line::raw(""),
        Line::from(Span::styled("Edit form", bold)),
        key_line("Next / previous field: ", "Down, Tab / Up, Shift+Tab"),
        key_line("Clear field: ", "Ctrl+u"),
        key_line("Save / Cancel: ", "Enter / Esc"),
        Line::raw("Fields left empty keep their current value."),
        Line::raw(""),
        key_line("Close help: ", "Esc / Enter / ?"),
    ];

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
