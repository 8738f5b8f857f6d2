use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::Config, monitor::ThrottleState};

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub throttle: Arc<Mutex<ThrottleState>>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            throttle: Arc::new(Mutex::new(ThrottleState::default())),
        }
    }
}
