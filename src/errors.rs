//! Unified error types and result handling.
//!
//! The pure computations in [`crate::core`] never fail; only parsing, form
//! validation and the binary's file I/O produce these errors.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Filesystem failure while reading a config or snapshot file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot payload was not valid JSON for the expected shape
    #[error("Snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file was not valid TOML for the expected shape
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// A filter criterion (category or sort key) could not be parsed
    #[error("Invalid filter value: '{value}'")]
    InvalidFilter {
        /// The rejected raw value
        value: String,
    },

    /// Budget amount is not a positive finite number
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Budget month/year outside the accepted range
    #[error("Invalid budget period: {month}/{year}")]
    InvalidPeriod {
        /// Month as given (1-12 expected)
        month: i64,
        /// Year as given (four digits expected)
        year: i64,
    },

    /// A budget already exists for this category and period
    #[error("A budget for category {category_id} already exists for {month}/{year}")]
    DuplicateBudget {
        /// Category the budget caps
        category_id: i64,
        /// Month of the colliding budget
        month: u32,
        /// Year of the colliding budget
        year: i32,
    },

    /// No receipt with the given id in the current list
    #[error("Receipt not found: {id}")]
    ReceiptNotFound {
        /// Missing receipt id
        id: i64,
    },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
