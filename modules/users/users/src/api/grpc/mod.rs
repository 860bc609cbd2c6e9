//! gRPC transport for the users module

mod server;

pub use server::UsersServiceImpl;
