use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api::router::AppState;
use crate::application::{ports::ReportExecutor, use_cases::RunReportUseCase};
use crate::config::Config;
use crate::infrastructure::persistence::PostgresReportExecutor;

const CONNECT_RETRIES: u32 = 3;

/// Application builder for dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    executor: Option<Arc<dyn ReportExecutor>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            executor: None,
        }
    }

    /// Initialize database connection pool with retry logic
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = CONNECT_RETRIES;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay, retries, e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize the report executor on the connected pool
    pub fn with_infrastructure(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;

        let executor: Arc<dyn ReportExecutor> = Arc::new(PostgresReportExecutor::new(pool.clone()));
        self.executor = Some(executor);

        info!("Infrastructure layer initialized");
        Ok(self)
    }

    /// Use a different executor, e.g. a stub in tests
    pub fn with_executor(mut self, executor: Arc<dyn ReportExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Use an existing pool instead of connecting
    pub fn with_pool(mut self, pool: sqlx::PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Build application state
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let pool = self.pool.ok_or("Database pool not initialized")?;
        let executor = self.executor.ok_or("Report executor not initialized")?;

        let report_use_case = Arc::new(RunReportUseCase::new(executor));

        info!("Application layer initialized");

        Ok(AppState {
            pool: Arc::new(pool),
            report_use_case,
            config: self.config,
        })
    }
}
