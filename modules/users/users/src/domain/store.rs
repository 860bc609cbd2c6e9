//! In-memory user record store.
//!
//! The map and the id counter live behind one reader/writer lock: lookups
//! share the lock, an insert holds it exclusively for the whole
//! mint-store-increment step, so no reader ever sees a half-applied insert and
//! ids are handed out in a single total order.

use std::collections::HashMap;

use parking_lot::RwLock;
use users_sdk::User;

use super::error::DomainError;

/// Prefix of every minted user id.
pub const ID_PREFIX: &str = "user-";

struct StoreState {
    users: HashMap<String, User>,
    next_id: u64,
}

/// Process-lifetime storage for user records
pub struct UserStore {
    state: RwLock<StoreState>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store a new record under the next sequential id and return it.
    pub fn put(&self, name: impl Into<String>, email: impl Into<String>) -> User {
        let mut state = self.state.write();

        let id = format!("{ID_PREFIX}{}", state.next_id);
        state.next_id += 1;

        let user = User {
            id: id.clone(),
            name: name.into(),
            email: email.into(),
        };
        state.users.insert(id, user.clone());
        user
    }

    /// Look a record up by id.
    ///
    /// # Errors
    /// Returns [`DomainError::UserNotFound`] if no record has this id.
    pub fn get(&self, id: &str) -> Result<User, DomainError> {
        self.state
            .read()
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
