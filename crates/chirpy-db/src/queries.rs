use tracing::debug;

use crate::models::{ChirpRow, DbStructure, UserRow};
use crate::{Database, DbError, Result};

impl Database {
    // -- Chirps --

    /// Body must already be validated; the store does not re-check it.
    pub fn create_chirp(&self, body: &str) -> Result<ChirpRow> {
        let chirp = self.with_state_mut(|state| {
            let id = state.next_chirp_id();
            let chirp = ChirpRow {
                id,
                body: body.to_string(),
            };
            state.chirps.insert(id, chirp.clone());
            Ok(chirp)
        })?;

        debug!("Created chirp {}", chirp.id);
        Ok(chirp)
    }

    /// All chirps, ascending by id.
    pub fn get_chirps(&self) -> Result<Vec<ChirpRow>> {
        self.with_state(|state| Ok(state.chirps.values().cloned().collect()))
    }

    pub fn get_chirp(&self, id: u32) -> Result<ChirpRow> {
        self.with_state(|state| {
            state
                .chirps
                .get(&id)
                .cloned()
                .ok_or_else(|| DbError::not_found("chirp", id))
        })
    }

    // -- Users --

    pub fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRow> {
        let unique = self.options().unique_emails;
        let user = self.with_state_mut(|state| {
            if unique && email_owner(state, email).is_some() {
                return Err(DbError::EmailTaken(email.to_string()));
            }

            let id = state.next_user_id();
            let user = UserRow {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            };
            state.users.insert(id, user.clone());
            Ok(user)
        })?;

        debug!("Created user {}", user.id);
        Ok(user)
    }

    /// Exact, case-sensitive match. When emails are not unique the lowest id wins.
    pub fn find_user_by_email(&self, email: &str) -> Result<UserRow> {
        self.with_state(|state| {
            email_owner(state, email)
                .cloned()
                .ok_or_else(|| DbError::not_found("user", email))
        })
    }

    pub fn find_user_by_id(&self, id: u32) -> Result<UserRow> {
        self.with_state(|state| {
            state
                .users
                .get(&id)
                .cloned()
                .ok_or_else(|| DbError::not_found("user", id))
        })
    }

    /// Replace email and password hash of an existing user.
    pub fn update_user(&self, id: u32, email: &str, password_hash: &str) -> Result<UserRow> {
        let unique = self.options().unique_emails;
        let user = self.with_state_mut(|state| {
            if unique && email_owner(state, email).is_some_and(|owner| owner.id != id) {
                return Err(DbError::EmailTaken(email.to_string()));
            }

            let user = state
                .users
                .get_mut(&id)
                .ok_or_else(|| DbError::not_found("user", id))?;
            user.email = email.to_string();
            user.password_hash = password_hash.to_string();
            Ok(user.clone())
        })?;

        debug!("Updated user {}", user.id);
        Ok(user)
    }
}

fn email_owner<'a>(state: &'a DbStructure, email: &str) -> Option<&'a UserRow> {
    state.users.values().find(|u| u.email == email)
}
