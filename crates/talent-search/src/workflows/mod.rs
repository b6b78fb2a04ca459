pub mod candidates;
pub mod search;
