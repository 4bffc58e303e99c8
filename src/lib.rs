pub mod args;
pub mod entry;
pub mod errors;
pub mod filter;
pub mod loader;
pub mod reader;
pub mod report;
pub mod store;
