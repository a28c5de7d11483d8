pub mod listing;
pub mod parse;
