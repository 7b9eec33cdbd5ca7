pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod id;
pub mod io;
pub mod log;
pub mod registry;
pub mod relay;
pub mod store;

pub use error::{RelayError, Result};
pub use relay::Relay;
