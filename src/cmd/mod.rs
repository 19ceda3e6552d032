pub mod config;
pub mod dashboard;
pub mod prompt;
pub mod stats;
pub mod ticket;
