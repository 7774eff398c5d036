//! Database checks shared by the readiness probe and error mapping

use std::time::{Duration, Instant};

use sqlx::PgPool;

/// Sanitize database error messages to prevent information leakage
pub fn sanitize_db_error(error: &sqlx::Error) -> String {
    match error {
        sqlx::Error::Configuration(_) => "Database configuration error".to_string(),
        sqlx::Error::Database(_) => "Database operation error".to_string(),
        sqlx::Error::Io(_) => "Database connection error".to_string(),
        sqlx::Error::Tls(_) => "Database TLS error".to_string(),
        sqlx::Error::Protocol(_) => "Database protocol error".to_string(),
        sqlx::Error::RowNotFound => "Record not found".to_string(),
        sqlx::Error::TypeNotFound { .. } => "Database type error".to_string(),
        sqlx::Error::ColumnIndexOutOfBounds { .. } => "Database column error".to_string(),
        sqlx::Error::ColumnNotFound(_) => "Database column error".to_string(),
        sqlx::Error::ColumnDecode { .. } => "Database decode error".to_string(),
        sqlx::Error::Decode(_) => "Database decode error".to_string(),
        sqlx::Error::PoolTimedOut => "Database pool timeout".to_string(),
        sqlx::Error::PoolClosed => "Database pool closed".to_string(),
        sqlx::Error::WorkerCrashed => "Database worker error".to_string(),
        _ => "Database error".to_string(),
    }
}

/// Outcome of a database ping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseStatus {
    Connected(Duration),
    Disconnected(String),
    TimedOut,
}

/// Ping the database, giving up after `timeout`
pub async fn check_database_connectivity(pool: &PgPool, timeout: Duration) -> DatabaseStatus {
    let start = Instant::now();

    match tokio::time::timeout(
        timeout,
        sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool),
    )
    .await
    {
        Ok(Ok(_)) => DatabaseStatus::Connected(start.elapsed()),
        Ok(Err(e)) => DatabaseStatus::Disconnected(sanitize_db_error(&e)),
        Err(_) => DatabaseStatus::TimedOut,
    }
}
