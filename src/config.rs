#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Origins allowed outside development; empty means any
    pub allowed_origins: Vec<String>,
    pub environment: String,
    // Database connection pool settings
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub db_idle_timeout_secs: u64,
    pub db_max_lifetime_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| postgres_url(&lookup)),
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| {
                format!("0.0.0.0:{}", lookup("PORT").unwrap_or_else(|| "8080".to_string()))
            }),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5173".to_string())
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string())
                .to_lowercase(),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(20),
            db_min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(2),
            db_acquire_timeout_secs: parse_var(&lookup, "DB_ACQUIRE_TIMEOUT_SECS").unwrap_or(30),
            db_idle_timeout_secs: parse_var(&lookup, "DB_IDLE_TIMEOUT_SECS").unwrap_or(600), // 10 minutes
            db_max_lifetime_secs: parse_var(&lookup, "DB_MAX_LIFETIME_SECS").unwrap_or(1800), // 30 minutes
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err("DATABASE_URL must start with postgres:// or postgresql://".to_string());
        }

        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        if self.db_min_connections > self.db_max_connections {
            return Err("DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".to_string());
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).and_then(|s| s.parse().ok())
}

// Assembled from the discrete POSTGRES_* variables when DATABASE_URL is unset
fn postgres_url<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

    format!(
        "postgres://{}:{}@{}:{}/{}",
        var("POSTGRES_USER", "postgres"),
        var("POSTGRES_PASSWORD", "postgres"),
        var("POSTGRES_HOST", "localhost"),
        var("POSTGRES_PORT", "5432"),
        var("POSTGRES_DB", "scheduling"),
    )
}
