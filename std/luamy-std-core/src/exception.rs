//!
//! Binding Error Taxonomy
//!
//! Every failure raised into a script is a `BindingError`. Each variant has a
//! stable exception type ID and kind name so hosts can tell them apart
//! without parsing messages.
//!
//! Exception Type IDs:
//! - 0: Unknown
//! - 1: ConnectionError
//! - 2: NotConnectedError
//! - 3: QueryError
//! - 4: InvalidResultError
//!

use thiserror::Error;

/// Exception type IDs for binding errors
pub const EXCEPTION_TYPE_UNKNOWN: i64 = 0;
pub const EXCEPTION_TYPE_CONNECTION_ERROR: i64 = 1;
pub const EXCEPTION_TYPE_NOT_CONNECTED_ERROR: i64 = 2;
pub const EXCEPTION_TYPE_QUERY_ERROR: i64 = 3;
pub const EXCEPTION_TYPE_INVALID_RESULT_ERROR: i64 = 4;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    /// Session establishment failed; carries the driver's text
    #[error("MySQL connection error: {0}")]
    Connection(String),

    #[error("Connection not established")]
    NotConnected,

    /// A native call on an open session reported failure
    #[error("MySQL {operation} error: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid result object")]
    InvalidResult,
}

impl BindingError {
    pub fn query(operation: &'static str, message: impl Into<String>) -> Self {
        BindingError::Query {
            operation,
            message: message.into(),
        }
    }

    pub fn type_id(&self) -> i64 {
        match self {
            BindingError::Connection(_) => EXCEPTION_TYPE_CONNECTION_ERROR,
            BindingError::NotConnected => EXCEPTION_TYPE_NOT_CONNECTED_ERROR,
            BindingError::Query { .. } => EXCEPTION_TYPE_QUERY_ERROR,
            BindingError::InvalidResult => EXCEPTION_TYPE_INVALID_RESULT_ERROR,
        }
    }

    pub fn type_name(&self) -> &'static str {
        exception_type_name(self.type_id())
    }
}

/// Kind name for an exception type ID
pub fn exception_type_name(type_id: i64) -> &'static str {
    match type_id {
        EXCEPTION_TYPE_CONNECTION_ERROR => "ConnectionError",
        EXCEPTION_TYPE_NOT_CONNECTED_ERROR => "NotConnectedError",
        EXCEPTION_TYPE_QUERY_ERROR => "QueryError",
        EXCEPTION_TYPE_INVALID_RESULT_ERROR => "InvalidResultError",
        _ => "UnknownError",
    }
}
