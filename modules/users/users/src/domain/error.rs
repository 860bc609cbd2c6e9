use thiserror::Error;

/// Domain-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("user {id} not found")]
    UserNotFound { id: String },
}

impl DomainError {
    #[must_use]
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }
}
