use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::infra::assistant::HttpAssistant;
use crate::infra::http::ApiClient;
use crate::infra::tickets::HttpTicketStore;
use crate::services::{TicketAssistant, TicketStore};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn TicketStore>,
    pub assistant: Arc<dyn TicketAssistant>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn TicketStore>,
        assistant: Arc<dyn TicketAssistant>,
    ) -> Self {
        Self {
            config,
            store,
            assistant,
        }
    }

    /// Wires both service seams to the configured HTTP origin.
    pub fn connect(config: AppConfig) -> AppResult<Self> {
        let api = ApiClient::new(config.api_base_url.clone(), config.request_timeout)?;
        tracing::debug!(base_url = api.base_url(), "ticket service configured");
        let store = Arc::new(HttpTicketStore::new(api.clone()));
        let assistant = Arc::new(HttpAssistant::new(api));
        Ok(Self::new(config, store, assistant))
    }
}
