use async_trait::async_trait;

use crate::domain::filter::FilterCriteria;
use crate::domain::stats::TicketStats;
use crate::domain::ticket::{NewTicket, Status, Ticket, TicketId};
use crate::error::AppResult;

/// Persistence side of the ticket service. The service owns every ticket; the
/// client only asks it to list, create, or patch them.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn list_tickets(&self, criteria: &FilterCriteria) -> AppResult<Vec<Ticket>>;
    async fn create_ticket(&self, ticket: NewTicket) -> AppResult<Ticket>;
    async fn update_status(&self, id: TicketId, status: Status) -> AppResult<Ticket>;
    async fn stats(&self) -> AppResult<TicketStats>;
}
