pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let banner_height = if app.notifier.current().is_some() { 3 } else { 0 };
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(banner_height),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    render_header(f, root[0], app);
    if let Some(banner) = app.notifier.current() {
        components::render_banner(f, root[1], app, banner);
    }
    users::render_users_table(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

/// Count input box on the left, display-mode selector on the right.
fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(28)].as_ref())
        .split(area);

    let editing = app.input_mode == InputMode::EditCount;
    let input_border = if editing { app.theme.highlight_fg } else { app.theme.border };
    let mut spans = vec![Span::raw(app.count_input.clone())];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(app.theme.highlight_fg)));
    } else if app.count_input.is_empty() {
        spans.push(Span::styled(
            "press Tab to enter a count",
            Style::default().fg(app.theme.muted),
        ));
    }
    let input = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg))
        .block(
            Block::default()
                .title("How many users? (0-1000, Enter)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(input_border)),
        );
    f.render_widget(input, cols[0]);

    let mode = Paragraph::new(Line::from(vec![
        Span::styled(
            app.display_mode.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (m)", Style::default().fg(app.theme.muted)),
    ]))
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg))
    .block(
        Block::default()
            .title("Show")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(mode, cols[1]);
}

fn render_modal(f: &mut Frame, area: Rect, app: &mut AppState) {
    if let Some(state) = app.modal.clone() {
        match &state {
            ModalState::Detail { .. } => users::render_detail_modal(f, area, app, &state),
            ModalState::Edit(form) => users::render_edit_modal(f, area, app, form),
            ModalState::Help { scroll } => components::render_help_modal(f, area, app, *scroll),
        }
    }
}
