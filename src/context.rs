use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::VersionControlService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
}

impl AppContext {
    pub fn new(config: AppConfig, version_control: Arc<dyn VersionControlService>) -> Self {
        Self {
            config,
            version_control,
        }
    }
}
