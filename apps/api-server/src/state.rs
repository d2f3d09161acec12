//! Application state - shared across all handlers.

use std::sync::Arc;

use pulse_core::PostService;
use pulse_core::ports::{Clock, PostStore, UserRepository};
use pulse_infra::{DatabaseConfig, InMemoryPostStore, InMemoryUserRepository, SystemClock};

#[cfg(feature = "postgres")]
use pulse_infra::{DatabaseHandle, PostgresPostStore, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserRepository>,
}

/// Resources released after the HTTP server has stopped.
#[derive(Default)]
pub struct Shutdown {
    #[cfg(feature = "postgres")]
    db: Option<DatabaseHandle>,
}

impl Shutdown {
    pub async fn run(self) {
        #[cfg(feature = "postgres")]
        {
            if let Some(db) = self.db {
                if let Err(e) = db.close().await {
                    tracing::error!("Failed to close database connection: {}", e);
                }
            }
        }
    }
}

impl AppState {
    /// State backed by in-memory stores.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let store: Arc<dyn PostStore> = Arc::new(InMemoryPostStore::new());
        Self {
            posts: Arc::new(PostService::new(store, clock)),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }

    /// Build the application state with appropriate implementations.
    ///
    /// Without a database URL the server runs on in-memory stores. A configured
    /// database that cannot be reached is a startup error.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> std::io::Result<(Self, Shutdown)> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok((Self::in_memory(clock), Shutdown::default()));
        };

        Self::connect(config, clock).await
    }

    #[cfg(feature = "postgres")]
    async fn connect(
        config: &DatabaseConfig,
        clock: Arc<dyn Clock>,
    ) -> std::io::Result<(Self, Shutdown)> {
        let db = DatabaseHandle::connect(config).await.map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            std::io::Error::other(e.to_string())
        })?;

        let store: Arc<dyn PostStore> = Arc::new(PostgresPostStore::new(db.main.clone()));
        let state = Self {
            posts: Arc::new(PostService::new(store, clock)),
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
        };

        tracing::info!("Application state initialized");
        Ok((state, Shutdown { db: Some(db) }))
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(
        _config: &DatabaseConfig,
        clock: Arc<dyn Clock>,
    ) -> std::io::Result<(Self, Shutdown)> {
        tracing::warn!(
            "Built without postgres feature - ignoring DATABASE_URL, using in-memory stores"
        );
        Ok((Self::in_memory(clock), Shutdown::default()))
    }
}
