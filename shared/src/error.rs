//! # Error Handling
//!
//! Every enhancement on the page is optional decoration, so nothing here is
//! fatal. Errors exist so that a rejected DOM call or a bad configuration
//! block can be reported through `log` and the remaining behaviors can still
//! run.
//!
//! ## Error Categories
//!
//! - [`Dom`](Error::Dom) - the page refused an operation (element creation,
//!   style write, listener registration)
//! - [`Config`](Error::Config) - configuration parsed but failed validation
//! - [`ConfigParse`](Error::ConfigParse) - configuration block is not valid JSON
//!
//! ## Usage Example
//!
//! ```rust
//! use shared::error::{Error, Result};
//!
//! fn check_margin(margin: f64) -> Result<()> {
//!     if !(0.0..50.0).contains(&margin) {
//!         return Err(Error::Config(format!("margin {margin} out of range")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_margin(10.0).is_ok());
//! assert!(check_margin(60.0).is_err());
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A DOM operation was rejected by the host page.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Configuration is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::Dom`] naming the operation that failed.
    pub fn dom(operation: &str, detail: impl std::fmt::Display) -> Self {
        Error::Dom(format!("{operation}: {detail}"))
    }
}
