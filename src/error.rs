//! Error types for db-doc.
//!
//! Every failure in the pipeline is terminal. The variants carry enough
//! context (the failing operation and the underlying cause) to diagnose the
//! problem from a single log line.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Query failed: {operation}: {message}")]
    Query {
        operation: String,
        message: String,
        /// e.g., "42S02" for unknown table
        sql_state: Option<String>,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a query error with optional SQL state.
    pub fn query(
        operation: impl Into<String>,
        message: impl Into<String>,
        sql_state: Option<String>,
    ) -> Self {
        Self::Query {
            operation: operation.into(),
            message: message.into(),
            sql_state,
        }
    }

    /// Create a write error for the given output path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Attach the failing operation to a query error produced by a driver conversion.
    pub fn during(self, operation: impl Into<String>) -> Self {
        match self {
            Self::Query {
                message, sql_state, ..
            } => Self::Query {
                operation: operation.into(),
                message,
                sql_state,
            },
            other => other,
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// Process exit code for this error. Configuration problems use 2, like clap usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            _ => 1,
        }
    }
}

/// Pick a suggestion from the driver error text.
pub(crate) fn connection_suggestion(error: &sqlx::Error) -> String {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") {
        return "Check that the MySQL server is running and accessible".to_string();
    }

    if error_str.contains("access denied") || error_str.contains("password") {
        return "Verify the username and password in the DSN".to_string();
    }

    if error_str.contains("unknown database") {
        return "Check that the database in the DSN exists (usually information_schema)"
            .to_string();
    }

    if error_str.contains("tls") || error_str.contains("ssl") {
        return "Check TLS/SSL configuration or try disabling it".to_string();
    }

    "Verify the DSN format: user:pass@tcp(host:3306)/information_schema".to_string()
}

/// Convert sqlx errors to DocError.
///
/// Errors that mean the session is unusable become `Connection`; everything
/// else is reported as a failed query. Callers attach the operation name with
/// [`DocError::during`].
impl From<sqlx::Error> for DocError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => DocError::connection(
                msg.to_string(),
                "Check the DSN format and credentials",
            ),
            sqlx::Error::Io(ref io_err) => DocError::connection(
                format!("I/O error: {}", io_err),
                connection_suggestion(&err),
            ),
            sqlx::Error::Tls(tls_err) => DocError::connection(
                format!("TLS error: {}", tls_err),
                "Verify TLS configuration and certificates",
            ),
            sqlx::Error::PoolTimedOut => DocError::connection(
                "Timed out waiting for a database connection",
                "Check network connectivity and database server status",
            ),
            sqlx::Error::PoolClosed => {
                DocError::connection("Connection pool is closed", "Run the tool again")
            }
            sqlx::Error::Protocol(msg) => DocError::connection(
                format!("Protocol error: {}", msg),
                "Check database server compatibility",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DocError::query("query", db_err.message(), code)
            }
            sqlx::Error::ColumnNotFound(col) => {
                DocError::query("query", format!("Column not found: {}", col), None)
            }
            sqlx::Error::ColumnDecode { index, source } => DocError::query(
                "query",
                format!("Failed to decode column {}: {}", index, source),
                None,
            ),
            other => DocError::query("query", other.to_string(), None),
        }
    }
}

/// Result type alias for db-doc operations.
pub type DocResult<T> = Result<T, DocError>;
