use crate::domain::filter::{FilterCriteria, FilterField};
use crate::domain::insight::AiInsight;
use crate::domain::ticket::{Status, Ticket, TicketId};
use crate::error::AppResult;
use crate::services::{TicketAssistant, TicketStore};

/// A list fetch that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub criteria: FilterCriteria,
}

/// A status change the service accepted, plus the outcome of the list
/// re-read that follows it.
#[derive(Debug)]
pub struct StatusChange {
    pub ticket: Ticket,
    pub refreshed: AppResult<()>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionRequest {
    pub seq: u64,
    pub description: String,
}

/// Filtered snapshot of the service's tickets plus the AI insight panel.
///
/// Every fetch and solution request is numbered when issued. A response is
/// applied only if nothing issued after it has been applied already, so a slow
/// early request can never overwrite the answer to a later one.
#[derive(Debug, Default)]
pub struct TicketListView {
    criteria: FilterCriteria,
    tickets: Vec<Ticket>,
    active_insight: Option<AiInsight>,
    insight_loading: bool,
    issued_fetch: u64,
    applied_fetch: u64,
    issued_solution: u64,
}

impl TicketListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn find(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    pub fn active_insight(&self) -> Option<&AiInsight> {
        self.active_insight.as_ref()
    }

    pub fn insight_loading(&self) -> bool {
        self.insight_loading
    }

    /// Whether the "ask AI" control accepts a new request.
    pub fn solution_enabled(&self) -> bool {
        !self.insight_loading
    }

    /// Returns true when the criteria changed and the list needs a re-fetch.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        self.criteria.set(field, value)
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.criteria.is_unconstrained() {
            return false;
        }
        self.criteria = FilterCriteria::default();
        true
    }

    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.issued_fetch += 1;
        FetchRequest {
            seq: self.issued_fetch,
            criteria: self.criteria.clone(),
        }
    }

    /// Replaces the snapshot with a fetch result. Returns `Ok(false)` when the
    /// response was stale and dropped. A failed fetch leaves the snapshot as
    /// it was.
    pub fn apply_fetch(&mut self, seq: u64, result: AppResult<Vec<Ticket>>) -> AppResult<bool> {
        if seq <= self.applied_fetch {
            tracing::debug!(seq, applied = self.applied_fetch, "dropping stale ticket list");
            return Ok(false);
        }
        let tickets = result?;
        self.applied_fetch = seq;
        self.tickets = tickets;
        Ok(true)
    }

    pub async fn refresh(&mut self, store: &dyn TicketStore) -> AppResult<()> {
        let request = self.begin_fetch();
        let result = store.list_tickets(&request.criteria).await;
        self.apply_fetch(request.seq, result).map(|_| ())
    }

    /// Patches the status, then re-reads the filtered list. The local copy is
    /// never edited in place, so a ticket that no longer matches the filters
    /// drops out of view. Only a rejected patch is an error here; a failed
    /// re-read is reported in [`StatusChange::refreshed`].
    pub async fn update_status(
        &mut self,
        store: &dyn TicketStore,
        id: TicketId,
        status: Status,
    ) -> AppResult<StatusChange> {
        let ticket = store.update_status(id, status).await?;
        let refreshed = self.refresh(store).await;
        Ok(StatusChange { ticket, refreshed })
    }

    /// Starts a solution lookup, superseding any lookup still pending.
    pub fn begin_solution(&mut self, description: impl Into<String>) -> SolutionRequest {
        self.issued_solution += 1;
        self.insight_loading = true;
        self.active_insight = None;
        SolutionRequest {
            seq: self.issued_solution,
            description: description.into(),
        }
    }

    /// Shows the answer to the newest lookup. Answers to superseded lookups
    /// are dropped and `false` is returned.
    pub fn complete_solution(&mut self, seq: u64, result: AppResult<String>) -> bool {
        if seq != self.issued_solution {
            tracing::debug!(seq, latest = self.issued_solution, "dropping superseded solution");
            return false;
        }
        self.insight_loading = false;
        self.active_insight = Some(match result {
            Ok(solution) => AiInsight::Solution(solution),
            Err(err) => {
                tracing::warn!(error = %err, "solution lookup failed");
                AiInsight::solution_fallback()
            }
        });
        true
    }

    pub async fn request_solution(
        &mut self,
        assistant: &dyn TicketAssistant,
        description: impl Into<String>,
    ) -> Option<&AiInsight> {
        let request = self.begin_solution(description);
        let result = assistant.suggest_solution(&request.description).await;
        self.complete_solution(request.seq, result);
        self.active_insight.as_ref()
    }

    pub fn dismiss_insight(&mut self) {
        self.active_insight = None;
    }
}
