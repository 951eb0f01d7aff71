//! Connection pool utilities

use crate::error::{FolioError, FolioResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Default maximum number of pooled connections.
pub const DEFAULT_POOL_SIZE: usize = 16;

/// Create a connection pool from a database URL.
///
/// Connections are opened lazily on first checkout, so this only fails when
/// the URL itself cannot be parsed.
///
/// # Example
///
/// ```ignore
/// let pool = folio::create_pool("postgres://localhost/portfolio_v3")?;
/// let client = pool.get().await?;
/// ```
pub fn create_pool(database_url: &str) -> FolioResult<Pool> {
    create_pool_with_config(database_url, DEFAULT_POOL_SIZE)
}

/// Create a connection pool with a custom maximum size.
pub fn create_pool_with_config(database_url: &str, max_size: usize) -> FolioResult<Pool> {
    let pg_config: tokio_postgres::Config = database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| FolioError::Connection(e.to_string()))?;

    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, manager_config);
    Pool::builder(mgr)
        .max_size(max_size)
        .build()
        .map_err(|e| FolioError::Pool(e.to_string()))
}
