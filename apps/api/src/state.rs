use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generation backend. Default: the AI gateway client; tests inject a fake.
    pub generator: Arc<dyn TextGenerator>,
}
