pub mod config;
pub mod constants;
pub mod gesture;
pub mod logging;
pub mod replay;
pub mod session;
