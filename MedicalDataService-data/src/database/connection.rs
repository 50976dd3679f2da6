//! Database connection management for the Medical Data Service.
//!
//! A single SQLite pool is initialized once at process start and shared
//! through a `OnceCell`. When initialization fails (unwritable path, broken
//! file) the repository layer degrades to its in-memory storage instead of
//! failing startup.

use std::env;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use super::migrations;
use super::DatabaseError;

/// Global database pool used throughout the application
static DB_POOL: OnceCell<DatabasePool> = OnceCell::new();

/// Database connection pool. SQLite is the only supported backend.
#[derive(Debug, Clone)]
pub enum DatabasePool {
    /// SQLite connection pool
    SQLite(Arc<r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>>),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub sqlite_path: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: "./data/medical-data.db".to_string(),
            pool_size: 5,
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    pub fn from_env() -> Self {
        let sqlite_path = env::var("DB_SQLITE_PATH")
            .unwrap_or_else(|_| "./data/medical-data.db".to_string());

        let pool_size = env::var("DB_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(20);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        info!(
            "Database configuration: path={}, pool_size={}, max_connections={}, timeout={}s",
            sqlite_path, pool_size, max_connections, timeout_seconds
        );

        DatabaseConfig {
            sqlite_path,
            pool_size,
            max_connections,
            timeout_seconds,
        }
    }
}

/// Initialize the global database connection pool and run migrations.
///
/// Returns an error when the pool is already initialized or the SQLite file
/// cannot be opened; callers may continue without a pool, in which case the
/// repository serves from in-memory storage.
pub fn initialize_database_pool() -> Result<(), DatabaseError> {
    if DB_POOL.get().is_some() {
        return Err(DatabaseError::ConfigError(
            "Database pool is already initialized".to_string(),
        ));
    }

    let config = DatabaseConfig::from_env();
    let pool = initialize_sqlite_pool(&config)?;

    DB_POOL
        .set(pool)
        .map_err(|_| DatabaseError::ConfigError("Database pool is already initialized".to_string()))?;

    run_migrations()
}

/// Get the database connection pool
pub fn get_db_pool() -> Result<DatabasePool, DatabaseError> {
    DB_POOL
        .get()
        .cloned()
        .ok_or_else(|| DatabaseError::ConnectionError("Database pool is not initialized".to_string()))
}

/// Initialize the SQLite connection pool
fn initialize_sqlite_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    use rusqlite::OpenFlags;
    use std::fs;
    use std::path::Path;

    info!("Initializing SQLite database at: {}", config.sqlite_path);

    // Create the parent directory if it doesn't exist
    if let Some(parent) = Path::new(&config.sqlite_path).parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::ConnectionError(format!(
                    "Failed to create database directory {:?}: {}",
                    parent, e
                ))
            })?;
        }
    }

    let manager = r2d2_sqlite::SqliteConnectionManager::file(&config.sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

    let pool = r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.pool_size))
        .connection_timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .build(manager)
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    Ok(DatabasePool::SQLite(Arc::new(pool)))
}

/// Run database migrations on the initialized pool
fn run_migrations() -> Result<(), DatabaseError> {
    let pool = get_db_pool()?;

    match pool {
        DatabasePool::SQLite(pool) => {
            let conn = pool
                .get()
                .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
            migrations::run_sqlite_migrations(&conn).map_err(DatabaseError::MigrationError)
        }
    }
}
