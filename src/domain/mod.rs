pub mod catalog;
pub mod export;
