pub mod messages;
pub mod server;
pub mod service;
pub mod session;
