//! Statement fragment builders.
//!
//! These turn a [`PartialRecord`] (or a batch of [`PositionUpdate`]s) into SQL
//! fragments with `$1, $2, ...` placeholders plus the values to bind, in
//! placeholder order. Values are never interpolated into the SQL text.
//!
//! # Example
//!
//! ```ignore
//! use folio::{FieldMap, PartialRecord, sql};
//!
//! const FIELDS: FieldMap = FieldMap::new(&[("imageUrl", "image_url")]);
//!
//! let record = PartialRecord::new().with("name", "Folio").with("imageUrl", "a.png");
//! let set = sql::build_set_clause(&record, &FIELDS)?;
//! assert_eq!(set.set_clause, r#""name"=$1, "image_url"=$2"#);
//!
//! let sql = format!(
//!     "UPDATE projects SET {} WHERE id = ${}",
//!     set.set_clause,
//!     set.next_placeholder()
//! );
//! ```


use crate::error::{FolioError, FolioResult};
use crate::field_map::FieldMap;
use crate::ident;
use crate::record::{PartialRecord, PositionUpdate};
use crate::value::Value;
use std::fmt::Write;

/// `"column"=$n, ...` plus the values bound to each placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    pub set_clause: String,
    pub values: Vec<Value>,
}

impl SetClause {
    /// The first placeholder index not used by this clause.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Column list and matching placeholder list for an `INSERT`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertClause {
    pub columns: String,
    pub placeholders: String,
    pub values: Vec<Value>,
}

/// A complete multi-row `position` update plus its interleaved values.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkPositionUpdate {
    pub statement: String,
    pub values: Vec<i32>,
}

/// Build the `SET` clause of a partial update.
///
/// Columns are emitted quoted, in the record's key order, each bound to the
/// next placeholder starting from `$1`.
pub fn build_set_clause(record: &PartialRecord, fields: &FieldMap) -> FolioResult<SetClause> {
    if record.is_empty() {
        return Err(FolioError::invalid_argument("No data."));
    }

    let mut set_clause = String::new();
    let mut values = Vec::with_capacity(record.len());
    for (i, (field, value)) in record.iter().enumerate() {
        if i > 0 {
            set_clause.push_str(", ");
        }
        ident::write_quoted(fields.resolve(field), &mut set_clause)?;
        // Writing into a String cannot fail.
        let _ = write!(set_clause, "=${}", i + 1);
        values.push(value.clone());
    }

    Ok(SetClause { set_clause, values })
}

/// Build the column and placeholder lists of a partial insert.
pub fn build_insert_clause(record: &PartialRecord, fields: &FieldMap) -> FolioResult<InsertClause> {
    if record.is_empty() {
        return Err(FolioError::invalid_argument("No data."));
    }

    let columns = record
        .keys()
        .map(|field| ident::plain(fields.resolve(field)))
        .collect::<FolioResult<Vec<_>>>()?
        .join(", ");
    let placeholders = (1..=record.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let values = record.iter().map(|(_, v)| v.clone()).collect();

    Ok(InsertClause {
        columns,
        placeholders,
        values,
    })
}

/// Build a single statement that reassigns `position` for every listed project.
///
/// Each update contributes one `($2k-1, $2k)` tuple and two values, in
/// `(id, position)` order. The `VALUES` columns are untyped, so both sides are
/// cast to `integer` in the statement.
pub fn build_bulk_position_update(updates: &[PositionUpdate]) -> FolioResult<BulkPositionUpdate> {
    if updates.is_empty() {
        return Err(FolioError::invalid_argument("No data."));
    }

    let mut statement =
        String::from("UPDATE projects AS p SET position = v.position::integer from (VALUES");
    let mut values = Vec::with_capacity(updates.len() * 2);
    for (k, update) in updates.iter().enumerate() {
        if k > 0 {
            statement.push_str(", ");
        }
        let _ = write!(statement, "(${}, ${})", 2 * k + 1, 2 * k + 2);
        values.push(update.id);
        values.push(update.position);
    }
    statement.push_str(") AS v(id, position) WHERE v.id::integer = p.id");

    Ok(BulkPositionUpdate { statement, values })
}
