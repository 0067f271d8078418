//! Database connection pool management
//!
//! `DatabasePool` wraps a SQLx MySQL pool. `LazyDatabase` defers creating it
//! until the first query: concurrent first callers await one shared
//! connection attempt, and a failed attempt leaves the handle empty so the
//! next caller retries.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use log::LevelFilter;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool, Row,
};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};

use sf_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx MySQL connection pool
    pool: MySqlPool,
    /// Configuration used to create this pool
    config: DatabaseConfig,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `config` - Database configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Database pool or error
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            "Creating database connection pool with max_connections: {}",
            config.max_connections
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(
                LevelFilter::Warn,
                Duration::from_millis(config.slow_query_threshold),
            );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool, config })
    }

    /// Get a reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Configuration this pool was created with
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Apply pending schema migrations from `infra/migrations`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Check if the database connection is healthy
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if `SELECT 1` answered 1
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        tracing::debug!("Performing database health check");

        let row = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                InfrastructureError::Database(e)
            })?;

        let value: i64 = row.try_get(0).unwrap_or(0);
        if value == 1 {
            Ok(true)
        } else {
            tracing::warn!("Database health check returned unexpected value: {}", value);
            Ok(false)
        }
    }

    /// Get connection pool statistics
    pub fn get_statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}

/// Connection pool statistics
#[derive(Debug, Clone, Copy)]
pub struct PoolStatistics {
    /// Current number of connections (active + idle)
    pub connections: u32,
    /// Number of idle connections
    pub idle_connections: usize,
    /// Maximum allowed connections
    pub max_connections: u32,
}

type ConnectAttempt = Shared<BoxFuture<'static, Result<DatabasePool, Arc<InfrastructureError>>>>;

/// Upper bound on how long a health probe waits for the store
const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Memoised, lazily connected database handle shared by all repositories
pub struct LazyDatabase {
    config: DatabaseConfig,
    pool: OnceCell<DatabasePool>,
    /// In-flight connection attempt and its generation
    pending: Mutex<Option<(u64, ConnectAttempt)>>,
    generation: AtomicU64,
}

impl LazyDatabase {
    /// Create a handle; nothing connects until the first `pool()` call
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
            pending: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// The connected pool, connecting and migrating on first use.
    ///
    /// Concurrent callers await the same pending attempt and all see its
    /// outcome. A failed attempt is forgotten so the next call starts afresh.
    pub async fn pool(&self) -> Result<&DatabasePool, InfrastructureError> {
        if let Some(pool) = self.pool.get() {
            return Ok(pool);
        }

        let (generation, attempt) = self.current_attempt().await;
        let outcome = attempt.await;
        self.clear_attempt(generation).await;

        match outcome {
            Ok(pool) => Ok(self.pool.get_or_init(|| async move { pool }).await),
            Err(e) => {
                tracing::warn!(error = %e, "Database connection attempt failed, will retry on next use");
                Err(InfrastructureError::Connect(e))
            }
        }
    }

    /// Join the in-flight attempt or start a new one
    async fn current_attempt(&self) -> (u64, ConnectAttempt) {
        let mut pending = self.pending.lock().await;
        if let Some((generation, attempt)) = pending.as_ref() {
            return (*generation, attempt.clone());
        }

        let config = self.config.clone();
        let attempt = async move {
            let pool = DatabasePool::new(config).await.map_err(Arc::new)?;
            pool.run_migrations().await.map_err(Arc::new)?;
            Ok::<_, Arc<InfrastructureError>>(pool)
        }
        .boxed()
        .shared();

        // Drive the attempt even if every caller stops waiting
        tokio::spawn(attempt.clone());

        let generation = self.generation.fetch_add(1, Ordering::SeqCst);
        *pending = Some((generation, attempt.clone()));
        (generation, attempt)
    }

    async fn clear_attempt(&self, generation: u64) {
        let mut pending = self.pending.lock().await;
        if matches!(pending.as_ref(), Some((current, _)) if *current == generation) {
            *pending = None;
        }
    }

    /// Whether a pool has been successfully created
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Run `SELECT 1`, connecting if needed.
    ///
    /// Gives up after a short timeout so callers get an answer during an
    /// outage; the connection attempt itself keeps running.
    pub async fn health_check(&self) -> bool {
        let probe = async {
            match self.pool().await {
                Ok(pool) => pool.health_check().await.unwrap_or(false),
                Err(_) => false,
            }
        };

        tokio::time::timeout(HEALTH_PROBE_TIMEOUT, probe)
            .await
            .unwrap_or_else(|_| {
                tracing::warn!("Database health probe timed out");
                false
            })
    }

    /// Close the pool if one was created
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
        }
    }
}
