pub mod filter;
pub mod insight;
pub mod stats;
pub mod ticket;
