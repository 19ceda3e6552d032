use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;

use crate::domain::filter::FilterCriteria;
use crate::domain::stats::TicketStats;
use crate::domain::ticket::{NewTicket, Status, Suggestion, Ticket, TicketId};
use crate::error::{AppError, AppResult};
use crate::services::{TicketAssistant, TicketStore};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(FilterCriteria),
    Create(NewTicket),
    UpdateStatus(TicketId, Status),
    Stats,
    Classify(String),
    SuggestSolution(String),
}

/// In-memory ticket service that filters the way the real one does and
/// records every call it receives.
#[derive(Default)]
pub struct FakeTicketService {
    calls: Mutex<Vec<Call>>,
    tickets: Mutex<Vec<Ticket>>,
    stats: Mutex<Option<TicketStats>>,
    classifications: Mutex<VecDeque<AppResult<Suggestion>>>,
    solutions: Mutex<VecDeque<AppResult<String>>>,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_stats: AtomicBool,
}

pub fn server_error() -> AppError {
    AppError::Api {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".to_string(),
    }
}

pub fn ticket(id: u64, title: &str, status: Status) -> Ticket {
    Ticket {
        id: TicketId(id),
        title: title.to_string(),
        description: format!("{title} description"),
        category: Default::default(),
        priority: Default::default(),
        status,
        created_at: Utc::now(),
    }
}

impl FakeTicketService {
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let service = Self::default();
        *service.tickets.lock().unwrap() = tickets;
        service
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(*c)).count()
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets.lock().unwrap().clone()
    }

    pub fn set_stats(&self, stats: TicketStats) {
        *self.stats.lock().unwrap() = Some(stats);
    }

    pub fn push_classification(&self, result: AppResult<Suggestion>) {
        self.classifications.lock().unwrap().push_back(result);
    }

    pub fn push_solution(&self, result: AppResult<String>) {
        self.solutions.lock().unwrap().push_back(result);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn matches(ticket: &Ticket, criteria: &FilterCriteria) -> bool {
        let search = criteria.search.to_lowercase();
        (criteria.status.is_empty() || ticket.status.as_str() == criteria.status)
            && (criteria.priority.is_empty() || ticket.priority.as_str() == criteria.priority)
            && (criteria.category.is_empty() || ticket.category.as_str() == criteria.category)
            && (search.is_empty()
                || ticket.title.to_lowercase().contains(&search)
                || ticket.description.to_lowercase().contains(&search))
    }
}

#[async_trait]
impl TicketStore for FakeTicketService {
    async fn list_tickets(&self, criteria: &FilterCriteria) -> AppResult<Vec<Ticket>> {
        self.record(Call::List(criteria.clone()));
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|ticket| Self::matches(ticket, criteria))
            .cloned()
            .collect())
    }

    async fn create_ticket(&self, new_ticket: NewTicket) -> AppResult<Ticket> {
        self.record(Call::Create(new_ticket.clone()));
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let mut tickets = self.tickets.lock().unwrap();
        let created = Ticket {
            id: TicketId(tickets.len() as u64 + 1),
            title: new_ticket.title,
            description: new_ticket.description,
            category: new_ticket.category,
            priority: new_ticket.priority,
            status: Status::Open,
            created_at: Utc::now(),
        };
        tickets.insert(0, created.clone());
        Ok(created)
    }

    async fn update_status(&self, id: TicketId, status: Status) -> AppResult<Ticket> {
        self.record(Call::UpdateStatus(id, status));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or_else(|| AppError::Api {
                status: StatusCode::NOT_FOUND,
                body: "not found".to_string(),
            })?;
        ticket.status = status;
        Ok(ticket.clone())
    }

    async fn stats(&self) -> AppResult<TicketStats> {
        self.record(Call::Stats);
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let scripted = self.stats.lock().unwrap().clone();
        Ok(scripted.unwrap_or_else(|| {
            let tickets = self.tickets.lock().unwrap();
            TicketStats {
                total_tickets: tickets.len() as u64,
                open_tickets: tickets.iter().filter(|t| t.status == Status::Open).count() as u64,
                ..TicketStats::default()
            }
        }))
    }
}

#[async_trait]
impl TicketAssistant for FakeTicketService {
    async fn classify(&self, description: &str) -> AppResult<Suggestion> {
        self.record(Call::Classify(description.to_string()));
        self.classifications
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Suggestion::default()))
    }

    async fn suggest_solution(&self, description: &str) -> AppResult<String> {
        self.record(Call::SuggestSolution(description.to_string()));
        self.solutions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Restart the service.".to_string()))
    }
}
