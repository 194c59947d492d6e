use std::sync::Arc;

use service::jobs::JobService;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub jobs: Arc<JobService>,
}

impl ServerState {
    pub fn new(jobs: JobService) -> Self {
        Self { jobs: Arc::new(jobs) }
    }
}
