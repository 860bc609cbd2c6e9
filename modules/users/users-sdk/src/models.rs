//! User record as seen by consumers of the users service.

use crate::proto::{CreateUserResponse, GetUserResponse};

/// A stored user.
///
/// `id` is assigned by the users service and never changes; `name` and
/// `email` are opaque caller-supplied strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for CreateUserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<User> for GetUserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<CreateUserResponse> for User {
    fn from(resp: CreateUserResponse) -> Self {
        Self {
            id: resp.user_id,
            name: resp.name,
            email: resp.email,
        }
    }
}

impl From<GetUserResponse> for User {
    fn from(resp: GetUserResponse) -> Self {
        Self {
            id: resp.user_id,
            name: resp.name,
            email: resp.email,
        }
    }
}
