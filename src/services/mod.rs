pub mod assistant;
#[cfg(test)]
pub mod fake;
pub mod ticket_store;

pub use assistant::TicketAssistant;
pub use ticket_store::TicketStore;
