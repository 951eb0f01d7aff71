//! Convenient imports for typical `folio` usage.
//!
//! ```ignore
//! use folio::prelude::*;
//! ```

pub use crate::{
    ErrorKind, FieldMap, FolioError, FolioResult, GenericClient, Messages, PartialRecord,
    PositionUpdate, Projects, RecordAccessor, Value,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
