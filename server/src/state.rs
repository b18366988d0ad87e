use std::sync::Arc;

use appraisal_intake::{Config, IntakePipeline};

/// State shared by all handlers. Nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<IntakePipeline>,
    pub max_file_bytes: u64,
}

impl AppState {
    pub fn new(pipeline: IntakePipeline, max_file_bytes: u64) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            max_file_bytes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(IntakePipeline::from_config(config), config.max_file_bytes)
    }
}
