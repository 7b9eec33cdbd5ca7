use relay_core::config::Config;
use relay_core::Relay;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            relay: Arc::new(Relay::open(config)),
            static_dir: config.static_dir.clone(),
        }
    }
}
