// Public modules
pub mod config;
pub mod converter;
pub mod dictionary;
pub mod error;
pub mod output;
pub mod properties;
pub mod scanner;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{BulkResult, BulkSummary, ItemError, ItemOutcome};
