//! Domain service for users
//!
//! Thin business layer over the record store. It is the only owner of the
//! store; the gRPC layer reaches records through it.

use tracing::debug;
use users_sdk::User;

use super::error::DomainError;
use super::store::UserStore;

/// Domain service that creates and looks up users.
#[derive(Default)]
pub struct Service {
    store: UserStore,
}

impl Service {
    /// Create a service with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: UserStore::new(),
        }
    }

    /// Create a user under the next sequential id.
    pub fn create_user(&self, name: &str, email: &str) -> User {
        let user = self.store.put(name, email);
        debug!(user_id = %user.id, "user stored");
        user
    }

    /// Get a user by id.
    ///
    /// # Errors
    /// Returns [`DomainError::UserNotFound`] if the id is unknown.
    pub fn get_user(&self, id: &str) -> Result<User, DomainError> {
        let result = self.store.get(id);
        if result.is_err() {
            debug!(user_id = %id, "user lookup missed");
        }
        result
    }

    /// Number of users currently stored.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.store.len()
    }
}
