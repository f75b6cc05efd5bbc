use std::sync::Arc;

use crate::config::Config;

/// 所有请求共享的只读状态
pub struct AppState {
    pub debug: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            debug: config.debug,
        }
    }
}

pub type SharedState = Arc<AppState>;
