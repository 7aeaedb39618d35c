//! Error types for the formtree core library
//!
//! Binding and validation never fail with an `Error`: malformed payloads are
//! tolerated and rule failures are reported through [`ErrorSet`]. The only
//! fallible operation in this crate is form definition itself.
//!
//! [`ErrorSet`]: crate::validation::ErrorSet

use thiserror::Error;

/// Main error type for formtree operations
#[derive(Error, Debug)]
pub enum Error {
    /// Form definition errors caught at build time
    #[error("Schema definition error: {message}")]
    Schema { message: String },
}

impl Error {
    /// Create a schema definition error
    pub fn schema<M: Into<String>>(message: M) -> Self {
        Error::Schema {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
