pub mod draft;
pub mod stats;
pub mod ticket_list;
