//! Record accessors.
//!
//! [`Projects`] and [`Messages`] implement [`RecordAccessor`] over the shared
//! statement plumbing in [`Table`]: every call validates its input first, then
//! issues exactly one statement and maps the returned rows back to the
//! external (camelCase) representation.
//!
//! # Example
//! ```ignore
//! use folio::{PartialRecord, Projects, RecordAccessor};
//!
//! let client = pool.get().await?;
//! let project = Projects
//!     .create(&client, &PartialRecord::new()
//!         .with("name", "Folio")
//!         .with("description", "This site")
//!         .with("tags", r#"["rust"]"#)
//!         .with("thoughts", "Fun")
//!         .with("githubUrl", "github.com/me/folio"))
//!     .await?;
//! Projects.delete(&client, project.id).await?;
//! ```

mod message;
mod project;

pub use message::{Message, Messages};
pub use project::{DEFAULT_IMAGE_URL, Project, Projects};

use crate::client::GenericClient;
use crate::error::{FolioError, FolioResult};
use crate::field_map::FieldMap;
use crate::query::query;
use crate::record::PartialRecord;
use crate::row::FromRow;
use crate::sql;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Operations shared by every record type.
///
/// Identifiers are the storage's serial keys; `0` stands for "no id" and is
/// rejected as invalid input. All methods accept any [`GenericClient`], so they
/// compose inside a caller-managed transaction.
pub trait RecordAccessor {
    type Record: FromRow + Send;

    /// Insert a record and return the stored row, including generated fields.
    fn create<C: GenericClient>(
        &self,
        conn: &C,
        record: &PartialRecord,
    ) -> impl Future<Output = FolioResult<Self::Record>> + Send;

    fn get_all<C: GenericClient>(
        &self,
        conn: &C,
    ) -> impl Future<Output = FolioResult<Vec<Self::Record>>> + Send;

    fn get_by_id<C: GenericClient>(
        &self,
        conn: &C,
        id: i32,
    ) -> impl Future<Output = FolioResult<Self::Record>> + Send;

    /// Apply a partial update to one row.
    fn update<C: GenericClient>(
        &self,
        conn: &C,
        id: i32,
        record: &PartialRecord,
    ) -> impl Future<Output = FolioResult<Self::Record>> + Send;

    fn delete<C: GenericClient>(
        &self,
        conn: &C,
        id: i32,
    ) -> impl Future<Output = FolioResult<Deleted>> + Send;
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub msg: String,
}

impl Default for Deleted {
    fn default() -> Self {
        Self {
            msg: "Deleted.".to_string(),
        }
    }
}

/// Parse a transport-supplied identifier.
pub fn parse_id(raw: &str) -> FolioResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| FolioError::invalid_argument("Invalid input type."))
}

pub(crate) fn require_id(id: i32, message: &str) -> FolioResult<i32> {
    if id == 0 {
        return Err(FolioError::invalid_argument(message));
    }
    Ok(id)
}

/// Static description of a table and its external shape.
#[derive(Debug)]
pub(crate) struct Table {
    /// Singular name used in messages ("No project: 7") and tags.
    pub entity: &'static str,
    pub name: &'static str,
    pub fields: FieldMap,
    /// Storage columns returned by every statement.
    pub columns: &'static [&'static str],
    /// External fields a caller may write.
    pub writable: &'static [&'static str],
    pub order_by: &'static str,
}

impl Table {
    /// `col AS "external", ...`, optionally qualified with a table alias.
    pub fn select_list(&self, alias: Option<&str>) -> String {
        self.columns
            .iter()
            .map(|column| {
                let external = self.fields.external_name(column);
                match alias {
                    Some(alias) => format!(r#"{alias}.{column} AS "{external}""#),
                    None => format!(r#"{column} AS "{external}""#),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn tag(&self, op: &str) -> String {
        format!("{}.{op}", self.name)
    }

    fn not_found(&self, id: i32) -> FolioError {
        FolioError::not_found(format!("No {}: {id}", self.entity))
    }

    /// Reject fields outside `allowed`.
    pub fn check_fields(&self, record: &PartialRecord, allowed: &[&str]) -> FolioResult<()> {
        match record.keys().find(|field| !allowed.contains(field)) {
            Some(field) => Err(FolioError::invalid_argument(format!(
                "Unknown {} field '{field}'.",
                self.entity
            ))),
            None => Ok(()),
        }
    }

    /// Every required field must be present and, if text, non-empty.
    pub fn check_required(&self, record: &PartialRecord, required: &[&str]) -> FolioResult<()> {
        let complete = required
            .iter()
            .all(|field| record.get(field).is_some_and(|v| !v.is_blank()));
        if complete {
            Ok(())
        } else {
            Err(FolioError::invalid_argument("Missing data."))
        }
    }

    pub async fn insert<T: FromRow>(
        &self,
        conn: &impl GenericClient,
        record: &PartialRecord,
    ) -> FolioResult<T> {
        let insert = sql::build_insert_clause(record, &self.fields)?;
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.name,
            insert.columns,
            insert.placeholders,
            self.select_list(None)
        );

        query(sql)
            .tag(self.tag("create"))
            .bind_all(insert.values)
            .fetch_one_as(conn)
            .await
    }

    pub async fn select_all<T: FromRow>(&self, conn: &impl GenericClient) -> FolioResult<Vec<T>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            self.select_list(None),
            self.name,
            self.order_by
        );
        query(sql).tag(self.tag("get_all")).fetch_all_as(conn).await
    }

    pub async fn select_by_id<T: FromRow>(
        &self,
        conn: &impl GenericClient,
        id: i32,
    ) -> FolioResult<T> {
        require_id(id, "No input.")?;
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            self.select_list(None),
            self.name
        );
        query(sql)
            .tag(self.tag("get_by_id"))
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn update_by_id<T: FromRow>(
        &self,
        conn: &impl GenericClient,
        op: &str,
        id: i32,
        record: &PartialRecord,
    ) -> FolioResult<T> {
        let set = sql::build_set_clause(record, &self.fields)?;
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
            self.name,
            set.set_clause,
            set.next_placeholder(),
            self.select_list(None)
        );

        query(sql)
            .tag(self.tag(op))
            .bind_all(set.values)
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn delete_by_id(&self, conn: &impl GenericClient, id: i32) -> FolioResult<Deleted> {
        require_id(id, "No input.")?;
        let sql = format!("DELETE FROM {} WHERE id = $1", self.name);
        let removed = query(sql)
            .tag(self.tag("delete"))
            .bind(id)
            .execute(conn)
            .await?;
        if removed == 0 {
            return Err(self.not_found(id));
        }
        Ok(Deleted::default())
    }
}

#[cfg(test)]
mod tests;
