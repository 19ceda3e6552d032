//! Plain-text rendering of the dashboard widgets.

use std::fmt::Write as _;

use crate::domain::insight::AiInsight;
use crate::domain::stats::TicketStats;
use crate::domain::ticket::{Category, Ticket};
use crate::workflow::draft::{DraftAction, DraftState, DraftWorkflow};
use crate::workflow::stats::StatsPanel;
use crate::workflow::ticket_list::TicketListView;

const DESCRIPTION_PREVIEW: usize = 120;

pub fn stats_panel(panel: &StatsPanel) -> String {
    let Some(cards) = panel.cards() else {
        return "Loading stats...".to_string();
    };
    cards
        .iter()
        .map(|card| format!("{}: {}", card.title, card.value))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn category_breakdown(stats: &TicketStats) -> String {
    Category::ALL
        .iter()
        .map(|category| format!("{category}: {}", stats.category_count(*category)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn ticket_list(view: &TicketListView) -> String {
    let mut out = String::new();
    let pairs = view.criteria().query_pairs();
    if !pairs.is_empty() {
        let filters = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "Filters: {filters}");
    }
    out.push_str(&tickets(view.tickets()));

    if view.insight_loading() {
        out.push_str("\nAI is thinking...");
    } else if let Some(insight) = view.active_insight() {
        out.push('\n');
        out.push_str(&self::insight(insight));
    }
    out
}

pub fn tickets(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "No tickets match.".to_string();
    }
    tickets
        .iter()
        .map(ticket)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ticket(ticket: &Ticket) -> String {
    format!(
        "#{:<4} [{}] {} ({})\n      {} | {} | {}",
        ticket.id,
        ticket.priority.as_str().to_uppercase(),
        ticket.title,
        ticket.status,
        ticket.category,
        ticket.created_at.format("%Y-%m-%d"),
        preview(&ticket.description),
    )
}

pub fn insight(insight: &AiInsight) -> String {
    match insight {
        AiInsight::Solution(text) => format!("AI Suggestion: {text}"),
        AiInsight::Classification(classification) => format!(
            "AI Insights: category {}, priority {}",
            classification.category, classification.priority
        ),
    }
}

pub fn draft(workflow: &DraftWorkflow) -> String {
    let mut out = String::new();
    match workflow.state() {
        DraftState::Edit { draft, retained } => {
            let _ = writeln!(out, "Draft New Ticket");
            let _ = writeln!(out, "  Subject: {}", draft.title);
            let _ = write!(out, "  Description: {}", draft.description);
            if retained.is_some() {
                out.push_str("\n  (earlier review kept; `review` to return to it)");
            }
        }
        DraftState::Review {
            draft,
            classification,
        } => {
            let _ = writeln!(out, "Review \"{}\"", draft.title);
            let _ = write!(out, "  {}", insight(&AiInsight::Classification(*classification)));
        }
    }
    match workflow.pending() {
        Some(DraftAction::Analyze) => out.push_str("\n  Processing..."),
        Some(DraftAction::Submit) => out.push_str("\n  Submitting..."),
        None => {}
    }
    out
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= DESCRIPTION_PREVIEW {
        return single_line;
    }
    let cut: String = single_line.chars().take(DESCRIPTION_PREVIEW).collect();
    format!("{}...", cut.trim_end())
}
