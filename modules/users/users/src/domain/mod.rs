//! Domain layer for users module
//!
//! Contains the record store and the business logic on top of it.

pub mod error;
pub mod service;
pub mod store;

pub use error::DomainError;
pub use service::Service;
pub use store::UserStore;
