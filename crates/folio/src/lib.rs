//! # folio
//!
//! Data access for the portfolio backend: projects and contact messages stored
//! in PostgreSQL.
//!
//! ## Layers
//!
//! - **Field mapping**: [`FieldMap`] translates external (camelCase) field names to
//!   storage columns; unmapped names pass through.
//! - **Statement fragments**: [`sql`] turns a [`PartialRecord`] into a `SET` clause or
//!   `INSERT` column/placeholder lists, and a batch of [`PositionUpdate`]s into a single
//!   reorder statement. Values are always bound, never interpolated.
//! - **Record accessors**: [`Projects`] and [`Messages`] implement [`RecordAccessor`]
//!   on top of the fragments, with per-entity required fields, defaults and not-found
//!   handling.
//!
//! ```ignore
//! use folio::prelude::*;
//!
//! let client = pool.get().await?;
//! let patch = PartialRecord::new().with("liveUrl", "https://folio.dev");
//! let project = Projects.update(&client, 3, &patch).await?;
//!
//! let err = Projects.get_by_id(&client, -1).await.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! ```

pub mod client;
pub mod error;
pub mod field_map;
pub mod ident;
pub mod model;
pub mod prelude;
pub mod query;
pub mod record;
pub mod row;
pub mod sql;
pub mod value;

pub use client::GenericClient;
pub use error::{ErrorKind, FolioError, FolioResult};
pub use field_map::FieldMap;
pub use model::{
    DEFAULT_IMAGE_URL, Deleted, Message, Messages, Project, Projects, RecordAccessor, parse_id,
};
pub use query::{Query, query};
pub use record::{PartialRecord, PositionUpdate};
pub use row::{FromRow, RowExt};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "validate")]
pub mod validate;

#[cfg(feature = "migrate")]
pub mod migrate;
