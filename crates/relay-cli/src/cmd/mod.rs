pub mod action;
pub mod logs;
pub mod server;
pub mod trigger;
