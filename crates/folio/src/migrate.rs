//! Embedded schema migrations via [`refinery`].
//!
//! The SQL files live in `crates/folio/migrations` and are compiled into the
//! binary, so a deployed server can bring an empty database up to date on start.
//!
//! # Example
//! ```ignore
//! let pool = folio::create_pool(&database_url)?;
//! let report = folio::migrate::run_pool(&pool).await?;
//! ```

use crate::error::FolioResult;

pub use refinery::Report;

mod embedded {
    refinery::embed_migrations!("./migrations");
}

/// Run all pending migrations on a single PostgreSQL connection.
pub async fn run(client: &mut tokio_postgres::Client) -> FolioResult<Report> {
    Ok(embedded::migrations::runner().run_async(client).await?)
}

/// Acquire a connection from a pool and run pending migrations on it.
#[cfg(feature = "pool")]
pub async fn run_pool(pool: &deadpool_postgres::Pool) -> FolioResult<Report> {
    let mut client = pool.get().await?;
    run(&mut client).await
}
