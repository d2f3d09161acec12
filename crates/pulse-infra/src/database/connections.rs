use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post/user database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_MIN_CONNECTIONS`.
    /// Returns `None` when no database URL is set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;

        Some(Self {
            url,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: std::env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            connect_timeout: Duration::from_secs(10),
        })
    }
}

/// Owned handle to the connection pool.
///
/// Opened once at service start, handed to the stores, and closed explicitly
/// at shutdown.
#[cfg(feature = "postgres")]
pub struct DatabaseHandle {
    pub main: DbConn,
}

#[cfg(feature = "postgres")]
impl DatabaseHandle {
    /// Open the connection pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {}..{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self { main })
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(self) -> Result<(), DbErr> {
        self.main.close().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
