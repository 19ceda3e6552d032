use async_trait::async_trait;
use serde::Serialize;

use crate::domain::filter::FilterCriteria;
use crate::domain::stats::TicketStats;
use crate::domain::ticket::{NewTicket, Status, Ticket, TicketId};
use crate::error::AppResult;
use crate::infra::http::ApiClient;
use crate::services::TicketStore;

const TICKETS_PATH: &str = "/tickets/";
const STATS_PATH: &str = "/tickets/stats/";

pub struct HttpTicketStore {
    api: ApiClient,
}

impl HttpTicketStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn ticket_path(id: TicketId) -> String {
        format!("{TICKETS_PATH}{id}/")
    }
}

#[async_trait]
impl TicketStore for HttpTicketStore {
    async fn list_tickets(&self, criteria: &FilterCriteria) -> AppResult<Vec<Ticket>> {
        self.api.get(TICKETS_PATH, &criteria.query_pairs()).await
    }

    async fn create_ticket(&self, ticket: NewTicket) -> AppResult<Ticket> {
        let created: Ticket = self.api.post(TICKETS_PATH, &ticket).await?;
        tracing::info!(id = %created.id, "ticket created");
        Ok(created)
    }

    async fn update_status(&self, id: TicketId, status: Status) -> AppResult<Ticket> {
        let updated: Ticket = self
            .api
            .patch(&Self::ticket_path(id), &StatusPatch { status })
            .await?;
        tracing::info!(%id, %status, "ticket status updated");
        Ok(updated)
    }

    async fn stats(&self) -> AppResult<TicketStats> {
        self.api.get(STATS_PATH, &[]).await
    }
}

#[derive(Serialize)]
struct StatusPatch {
    status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::{Category, Priority};

    #[test]
    fn builds_ticket_path() {
        assert_eq!(HttpTicketStore::ticket_path(TicketId(42)), "/tickets/42/");
    }

    #[test]
    fn serializes_status_patch() {
        let body = serde_json::to_value(StatusPatch {
            status: Status::InProgress,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": "in_progress" }));
    }

    #[test]
    fn serializes_create_payload() {
        let body = serde_json::to_value(NewTicket {
            title: "Refund".to_string(),
            description: "Charged twice".to_string(),
            category: Category::Billing,
            priority: Priority::High,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "title": "Refund",
                "description": "Charged twice",
                "category": "billing",
                "priority": "high",
            })
        );
    }
}
