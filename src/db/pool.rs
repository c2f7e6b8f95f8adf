//! Connection setup.
//!
//! Builds driver options from a parsed [`DataSource`] and opens a pool capped
//! at a single connection, so the process holds one session and queries run
//! one at a time.

use crate::config::{Address, DataSource, NativeDsn};
use crate::error::{DocError, DocResult, connection_suggestion};
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Translate a data source into MySQL connect options.
pub fn connect_options(data_source: &DataSource) -> DocResult<MySqlConnectOptions> {
    match data_source {
        DataSource::Url(url) => MySqlConnectOptions::from_str(url.as_str()).map_err(|e| {
            DocError::config(format!("Invalid MySQL connection URL: {}", e))
        }),
        DataSource::Native(dsn) => Ok(native_options(dsn)),
    }
}

fn native_options(dsn: &NativeDsn) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new();

    options = match &dsn.address {
        Address::Tcp { host, port } => options.host(host).port(*port),
        Address::Unix(path) => options.socket(path),
    };

    // An empty user keeps the driver default.
    if !dsn.username.is_empty() {
        options = options.username(&dsn.username);
    }
    if let Some(password) = &dsn.password {
        options = options.password(password);
    }
    if let Some(database) = &dsn.database {
        options = options.database(database);
    }
    if let Some(charset) = &dsn.charset {
        options = options.charset(charset);
    }
    if let Some(collation) = &dsn.collation {
        options = options.collation(collation);
    }

    for param in &dsn.ignored_params {
        warn!(param = %param, "Ignoring unsupported DSN parameter");
    }

    options
}

/// Open the single-connection pool used for the whole run.
///
/// `connect_timeout` bounds the initial connection attempt.
pub async fn open_pool(
    data_source: &DataSource,
    connect_timeout: Duration,
) -> DocResult<MySqlPool> {
    let options = connect_options(data_source)?;

    info!(
        dsn = %data_source.masked(),
        timeout_secs = connect_timeout.as_secs(),
        "Connecting to database"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
            DocError::connection(format!("Failed to connect: {}", e), connection_suggestion(&e))
        })?;

    debug!("Connection established");
    Ok(pool)
}

/// Read the server version for the startup log. Not fatal when it fails.
pub async fn server_version(pool: &MySqlPool) -> Option<String> {
    match sqlx::query_scalar::<_, String>("SELECT VERSION()")
        .fetch_one(pool)
        .await
    {
        Ok(version) => {
            debug!(version = %version, "Got server version");
            Some(version)
        }
        Err(e) => {
            warn!(error = %e, "Failed to get server version");
            None
        }
    }
}
