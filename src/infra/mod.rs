pub mod assistant;
pub mod http;
pub mod tickets;
