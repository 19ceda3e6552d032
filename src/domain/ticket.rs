use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    General,
    Technical,
    Billing,
    Account,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Technical,
        Category::Billing,
        Category::Account,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Technical => "technical",
            Category::Billing => "billing",
            Category::Account => "account",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "general" => Some(Category::General),
            "technical" => Some(Category::Technical),
            "billing" => Some(Category::Billing),
            "account" => Some(Category::Account),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "open" => Some(Status::Open),
            "in_progress" => Some(Status::InProgress),
            "resolved" => Some(Status::Resolved),
            "closed" => Some(Status::Closed),
            _ => None,
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Category, Priority, Status);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub u64);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A ticket as the service reports it. The client only ever reads these or
/// asks the service to change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

/// User-entered text of a ticket that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
}

impl TicketDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }
}

/// Category and priority attached to a draft under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub category: Category,
    pub priority: Priority,
}

impl Classification {
    pub fn new(category: Category, priority: Priority) -> Self {
        Self { category, priority }
    }

    /// Fills whatever the classifier left out with `general`/`medium`.
    pub fn from_suggestion(suggestion: &Suggestion) -> Self {
        Self::new(
            suggestion.category.unwrap_or_default(),
            suggestion.priority.unwrap_or_default(),
        )
    }
}

/// Raw classifier output; either field may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Suggestion {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}

impl NewTicket {
    pub fn from_draft(draft: &TicketDraft, classification: Classification) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: classification.category,
            priority: classification.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_values() {
        assert_eq!(Status::from_str("in_progress"), Some(Status::InProgress));
        assert_eq!(Status::from_str("In-Progress"), Some(Status::InProgress));
        assert_eq!(Status::from_str("CLOSED"), Some(Status::Closed));
        assert_eq!(Status::from_str("pending"), None);
    }

    #[test]
    fn suggestion_defaults_missing_fields() {
        let classification = Classification::from_suggestion(&Suggestion {
            category: Some(Category::Billing),
            priority: None,
        });
        assert_eq!(classification.category, Category::Billing);
        assert_eq!(classification.priority, Priority::Medium);

        let empty = Classification::from_suggestion(&Suggestion::default());
        assert_eq!(empty, Classification::new(Category::General, Priority::Medium));
    }

    #[test]
    fn deserializes_service_ticket() {
        let json = r#"{
            "id": 7,
            "title": "Login broken",
            "description": "Cannot log in since today",
            "category": "account",
            "priority": "high",
            "status": "in_progress",
            "created_at": "2025-03-01T09:30:00.123456Z"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, TicketId(7));
        assert_eq!(ticket.category, Category::Account);
        assert_eq!(ticket.status, Status::InProgress);
    }

    #[test]
    fn draft_requires_title_and_description() {
        assert!(!TicketDraft::new("", "body").is_complete());
        assert!(!TicketDraft::new("title", "   ").is_complete());
        assert!(TicketDraft::new("title", "body").is_complete());
    }
}
