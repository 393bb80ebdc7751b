//! In-memory store of loaded user records.
//!
//! Records are identified only by their current position. The store is
//! replaced wholesale on every successful generate and mutated in place by the
//! detail editor.

use tracing::debug;

use crate::api::UserRecord;

/// Field overrides collected by the edit form. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first: Option<String>,
    pub last: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cell: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
}

impl UserPatch {
    /// Map an edited value to an override: empty or whitespace-only means "unchanged".
    pub fn field(value: &str) -> Option<String> {
        if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Write every present override into `user`.
    pub fn apply(&self, user: &mut UserRecord) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                target.clone_from(v);
            }
        }
        set(&mut user.name.first, &self.first);
        set(&mut user.name.last, &self.last);
        set(&mut user.email, &self.email);
        set(&mut user.phone, &self.phone);
        set(&mut user.cell, &self.cell);
        set(&mut user.dob.date, &self.dob);
        set(&mut user.gender, &self.gender);
        set(&mut user.location.street.number, &self.street_number);
        set(&mut user.location.street.name, &self.street_name);
        set(&mut user.location.city, &self.city);
        set(&mut user.location.state, &self.state);
        set(&mut user.location.country, &self.country);
        set(&mut user.location.postcode, &self.postcode);
    }
}

#[derive(Clone, Debug, Default)]
pub struct UserStore {
    users: Vec<UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all records and keep `users` in the order received.
    pub fn replace_all(&mut self, users: Vec<UserRecord>) {
        debug!(count = users.len(), "replacing user store");
        self.users = users;
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }

    /// Remove the record at `index`, shifting later records down. Out of bounds is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<UserRecord> {
        if index >= self.users.len() {
            return None;
        }
        debug!(index, "removing user");
        Some(self.users.remove(index))
    }

    /// Apply `patch` to the record at `index`. Returns false when out of bounds.
    pub fn update_at(&mut self, index: usize, patch: &UserPatch) -> bool {
        match self.users.get_mut(index) {
            Some(user) => {
                debug!(index, "updating user");
                patch.apply(user);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&UserRecord> {
        self.users.get(index)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }
}
