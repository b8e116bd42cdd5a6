//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use crate::db::repository::{RepoError, RepoResult};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service backed by a file, with WAL mode
    pub async fn new(db_path: &str) -> RepoResult<Self> {
        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| RepoError::Database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {e}")))?;

        // busy_timeout: 写冲突时等待 5s 而非立即失败
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory database for tests.
    ///
    /// Named shared-cache database: a plain `:memory:` connection is its
    /// own database, so pooled connections would each see an empty store.
    /// The name is unique per call; the pinned min connection keeps the
    /// database alive for the pool's lifetime.
    pub async fn open_in_memory() -> RepoResult<Self> {
        static MEM_DB_SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = MEM_DB_SEQ.fetch_add(1, Ordering::Relaxed);

        let options = SqliteConnectOptions::from_str(&format!(
            "sqlite:file:order_store_mem_{seq}?mode=memory&cache=shared"
        ))
        .map_err(|e| RepoError::Database(format!("Invalid connect options: {e}")))?
        .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open in-memory database: {e}")))?;

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> RepoResult<()> {
        // Run migrations (ignore previously applied but now removed migrations)
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(pool)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
