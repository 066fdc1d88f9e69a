//! Session driver
//!
//! Owns the gateway connection on its own task and feeds every frame to the
//! dispatcher.

mod address;
mod session_driver;

pub use address::GatewayAddress;
pub use session_driver::SessionDriver;
