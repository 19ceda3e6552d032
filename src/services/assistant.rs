use async_trait::async_trait;

use crate::domain::ticket::Suggestion;
use crate::error::AppResult;

/// AI endpoints of the ticket service. Everything returned here is advisory.
#[async_trait]
pub trait TicketAssistant: Send + Sync {
    async fn classify(&self, description: &str) -> AppResult<Suggestion>;
    async fn suggest_solution(&self, description: &str) -> AppResult<String>;
}
