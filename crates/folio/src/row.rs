//! Row mapping traits

use crate::error::{FolioError, FolioResult};
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
///
/// Accessors alias storage columns to their external names in `RETURNING` /
/// `SELECT` lists, so implementations read columns by external name.
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> FolioResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning FolioError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> FolioResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> FolioResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| FolioError::decode(column, e.to_string()))
    }
}
