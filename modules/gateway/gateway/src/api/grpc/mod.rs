mod server;

pub use server::GatewayServiceImpl;
