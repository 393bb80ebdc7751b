//! Controller operations: the only write surface of [`AppState`].
//!
//! Each method runs to completion within one event-handler turn. The single
//! suspension point (the network fetch) is outside: `submit_count` hands out a
//! [`FetchTicket`], the event loop performs the request, and the result comes
//! back through `apply_fetch`.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::{AppState, EditForm, InputMode, ModalState};
use crate::api::UserRecord;
use crate::error::GenerateError;
use crate::format::DisplayMode;
use crate::notify::Severity;
use crate::store::UserPatch;
use crate::ui::users::project_rows;
use crate::validate::validate_count;

/// Informational banner for a zero count.
pub const NO_USERS_MESSAGE: &str = "No users to generate.";

/// Two clicks on the same row within this window open the detail view.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// A fetch the event loop should perform on behalf of the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub count: u32,
}

impl AppState {
    /// Rebuild the visible rows from the store.
    pub fn render_rows(&mut self) {
        self.rows = project_rows(self.store.users(), self.display_mode);
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    /// Clear the list display and show a banner.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.rows.clear();
        self.notifier.notify(message, severity, now);
    }

    /// Expire the banner if due.
    pub fn tick(&mut self, now: Instant) {
        self.notifier.tick(now);
    }

    /// Handle the generate action for the current count input.
    ///
    /// Returns a ticket when a fetch must be made. Invalid input shows a
    /// danger banner; zero empties the store and shows an info banner. In both
    /// cases no fetch is issued.
    pub fn submit_count(&mut self, now: Instant) -> Option<FetchTicket> {
        let count = match validate_count(&self.count_input) {
            Ok(c) => c,
            Err(e) => {
                warn!(input = %self.count_input, kind = e.kind(), "rejected count");
                self.notify(e.to_string(), Severity::Danger, now);
                return None;
            }
        };

        // Any earlier in-flight request is superseded from here on.
        self.request_seq += 1;
        self.pending_request = None;
        self.store.clear();
        self.selected_user = None;
        self.cursor = 0;
        self.render_rows();

        if count == 0 {
            self.notify(NO_USERS_MESSAGE, Severity::Info, now);
            return None;
        }

        let ticket = FetchTicket {
            seq: self.request_seq,
            count,
        };
        self.pending_request = Some(ticket.seq);
        info!(seq = ticket.seq, count, "generating users");
        Some(ticket)
    }

    /// Apply the outcome of a fetch. Results of superseded requests are dropped.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<Vec<UserRecord>, GenerateError>,
        now: Instant,
    ) {
        if self.pending_request != Some(seq) {
            debug!(seq, latest = self.request_seq, "discarding stale response");
            return;
        }
        self.pending_request = None;
        match result {
            Ok(users) => {
                self.store.replace_all(users);
                self.cursor = 0;
                self.render_rows();
            }
            Err(e) => {
                warn!(seq, kind = e.kind(), "generate failed");
                self.notify(e.to_string(), Severity::Danger, now);
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Switch the name column. Re-renders only when there is something to show.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        if !self.store.is_empty() {
            self.render_rows();
        }
    }

    /// Open the detail view on `index`. Invalid indices are ignored.
    pub fn open_detail(&mut self, index: usize) -> bool {
        if self.store.get(index).is_none() {
            return false;
        }
        self.selected_user = Some(index);
        self.cursor = index;
        self.modal = Some(ModalState::Detail { selected: 0 });
        self.input_mode = InputMode::Modal;
        true
    }

    /// Open the detail view from a visible list row. Rows hidden behind a
    /// banner cannot be activated.
    pub fn activate_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.open_detail(index)
    }

    /// Remove the selected record and close the detail view.
    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected_user else {
            return;
        };
        if self.store.remove_at(index).is_some() {
            info!(index, "deleted user");
            self.render_rows();
        }
        self.close_overlay();
    }

    /// Replace the detail view with an edit form prefilled from the selected record.
    pub fn begin_edit(&mut self) {
        let form = match self.selected_user.and_then(|i| self.store.get(i)) {
            Some(user) => EditForm::for_user(user),
            None => return,
        };
        self.modal = Some(ModalState::Edit(form));
        self.input_mode = InputMode::Modal;
    }

    /// Write `patch` into the selected record and re-open its detail view.
    pub fn submit_edit(&mut self, patch: &UserPatch) {
        let Some(index) = self.selected_user else {
            return;
        };
        if self.store.update_at(index, patch) {
            info!(index, "edited user");
            self.render_rows();
        }
        self.open_detail(index);
    }

    /// Leave the edit form without applying anything.
    pub fn cancel_edit(&mut self) {
        match self.selected_user {
            Some(index) => {
                self.open_detail(index);
            }
            None => self.close_overlay(),
        }
    }

    /// Close any overlay and clear the selection.
    pub fn close_overlay(&mut self) {
        self.modal = None;
        self.selected_user = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn open_help(&mut self) {
        self.modal = Some(ModalState::Help { scroll: 0 });
        self.input_mode = InputMode::Modal;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.rows.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    /// Register a click on a list row; a second click on the same row in
    /// quick succession opens it.
    pub fn click_row(&mut self, index: usize, now: Instant) {
        if index >= self.rows.len() {
            self.last_click = None;
            return;
        }
        self.cursor = index;
        let double = matches!(
            self.last_click,
            Some((at, row)) if row == index && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
        );
        if double {
            self.last_click = None;
            self.activate_row(index);
        } else {
            self.last_click = Some((now, index));
        }
    }
}
