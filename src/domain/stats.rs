use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::ticket::{Category, Priority};

/// Aggregate counters reported by the service. Anything the service leaves out
/// reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TicketStats {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub avg_tickets_per_day: f64,
    pub priority_breakdown: BTreeMap<String, u64>,
    pub category_breakdown: BTreeMap<String, u64>,
}

impl TicketStats {
    pub fn priority_count(&self, priority: Priority) -> u64 {
        self.priority_breakdown
            .get(priority.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn category_count(&self, category: Category) -> u64 {
        self.category_breakdown
            .get(category.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn critical(&self) -> u64 {
        self.priority_count(Priority::Critical)
    }
}
