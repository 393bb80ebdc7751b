use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing::{debug, info};

use crate::api::{RandomUserClient, UserRecord};
use crate::app::keymap::KeyAction;
use crate::app::{AppState, FetchTicket, InputMode, ModalState};
use crate::error::GenerateError;
use crate::ui;
use crate::ui::users::DETAIL_ACTIONS;

/// What the loop should do after a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Fetch(FetchTicket),
    Quit,
}

/// Result of one fetch, tagged with the ticket it answers.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: std::result::Result<Vec<UserRecord>, GenerateError>,
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &Handle,
    client: RandomUserClient,
    mut app: AppState,
) -> Result<()> {
    let (tx, mut rx) = unbounded_channel::<FetchOutcome>();
    info!(api = client.base_url(), "event loop started");

    loop {
        let now = Instant::now();
        app.tick(now);
        while let Ok(outcome) = rx.try_recv() {
            app.apply_fetch(outcome.seq, outcome.result, now);
        }

        terminal
            .draw(|f| ui::render(f, &mut app))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(100)).context("poll terminal events")? {
            continue;
        }
        let flow = match event::read().context("read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(&mut app, key, Instant::now())
            }
            Event::Mouse(mouse) => {
                handle_mouse(&mut app, mouse, Instant::now());
                Flow::Continue
            }
            _ => Flow::Continue,
        };
        match flow {
            Flow::Continue => {}
            Flow::Fetch(ticket) => spawn_fetch(runtime, &client, ticket, tx.clone()),
            Flow::Quit => break,
        }
    }

    app.notifier.cancel();
    info!(uptime_secs = app.started_at.elapsed().as_secs(), "event loop finished");
    Ok(())
}

fn spawn_fetch(
    runtime: &Handle,
    client: &RandomUserClient,
    ticket: FetchTicket,
    tx: UnboundedSender<FetchOutcome>,
) {
    let client = client.clone();
    runtime.spawn(async move {
        let result = client.fetch_users(ticket.count).await;
        // The receiver is gone only once the loop has exited.
        let _ = tx.send(FetchOutcome {
            seq: ticket.seq,
            result,
        });
    });
}

/// Dispatch one key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Flow {
    match app.input_mode {
        InputMode::EditCount => handle_count_key(app, key, now),
        InputMode::Normal => handle_list_key(app, key),
        InputMode::Modal => {
            handle_modal_key(app, key);
            Flow::Continue
        }
    }
}

fn handle_count_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Flow::Quit,
            KeyCode::Char('u') => {
                app.count_input.clear();
                Flow::Continue
            }
            _ => Flow::Continue,
        };
    }
    match key.code {
        KeyCode::Enter => match app.submit_count(now) {
            Some(ticket) => Flow::Fetch(ticket),
            None => Flow::Continue,
        },
        KeyCode::Esc | KeyCode::Tab => {
            app.input_mode = InputMode::Normal;
            Flow::Continue
        }
        KeyCode::Backspace => {
            app.count_input.pop();
            Flow::Continue
        }
        KeyCode::Char(c) => {
            app.count_input.push(c);
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    let page = app.rows_per_page.max(1) as isize;
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::FocusInput => app.input_mode = InputMode::EditCount,
        KeyAction::ToggleDisplayMode => app.set_display_mode(app.display_mode.toggled()),
        KeyAction::OpenDetail => {
            app.activate_row(app.cursor);
        }
        KeyAction::OpenHelp => app.open_help(),
        KeyAction::MoveUp => app.move_cursor(-1),
        KeyAction::MoveDown => app.move_cursor(1),
        KeyAction::PageUp => app.move_cursor(-page),
        KeyAction::PageDown => app.move_cursor(page),
        KeyAction::MoveTop => app.cursor = 0,
        KeyAction::MoveBottom => app.cursor_to_end(),
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) {
    match &mut app.modal {
        Some(ModalState::Detail { selected }) => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_overlay(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                *selected = selected.checked_sub(1).unwrap_or(DETAIL_ACTIONS.len() - 1);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                *selected = (*selected + 1) % DETAIL_ACTIONS.len();
            }
            KeyCode::Char('e') => app.begin_edit(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
            KeyCode::Enter => match *selected {
                0 => app.begin_edit(),
                1 => app.delete_selected(),
                _ => app.close_overlay(),
            },
            _ => {}
        },
        Some(ModalState::Edit(form)) => {
            let last = form.values.len().saturating_sub(1);
            match key.code {
                KeyCode::Esc => app.cancel_edit(),
                KeyCode::Enter => {
                    let patch = form.to_patch();
                    debug!(?patch, "submitting edit form");
                    app.submit_edit(&patch);
                }
                KeyCode::Up | KeyCode::BackTab => {
                    form.selected = form.selected.checked_sub(1).unwrap_or(last);
                }
                KeyCode::Down | KeyCode::Tab => {
                    form.selected = if form.selected >= last { 0 } else { form.selected + 1 };
                }
                KeyCode::Backspace => {
                    if let Some(v) = form.value_mut() {
                        v.pop();
                    }
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(v) = form.value_mut() {
                        v.clear();
                    }
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(v) = form.value_mut() {
                        v.push(c);
                    }
                }
                _ => {}
            }
        }
        Some(ModalState::Help { scroll }) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_overlay()
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        None => app.close_overlay(),
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent, now: Instant) {
    if app.input_mode == InputMode::Modal {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = ui::users::row_at(app, mouse.row) {
                app.input_mode = InputMode::Normal;
                app.click_row(index, now);
            }
        }
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        MouseEventKind::ScrollDown => app.move_cursor(1),
        _ => {}
    }
}
