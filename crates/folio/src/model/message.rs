//! Contact-form messages and their accessor.

use super::{Deleted, RecordAccessor, Table, require_id};
use crate::client::GenericClient;
use crate::error::{FolioError, FolioResult};
use crate::field_map::FieldMap;
use crate::record::PartialRecord;
use crate::row::{FromRow, RowExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Fields a visitor supplies; everything else is assigned by storage.
const CONTACT_FIELDS: &[&str] = &["name", "email", "message"];

const TABLE: Table = Table {
    entity: "message",
    name: "messages",
    fields: FieldMap::new(&[("isArchived", "is_archived")]),
    columns: &["id", "name", "email", "message", "received", "is_archived"],
    writable: &["name", "email", "message", "isArchived"],
    order_by: "received, id",
};

/// A contact-form message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub received: DateTime<Utc>,
    pub is_archived: bool,
}

impl FromRow for Message {
    fn from_row(row: &Row) -> FolioResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            email: row.try_get_column("email")?,
            message: row.try_get_column("message")?,
            received: row.try_get_column("received")?,
            is_archived: row.try_get_column("isArchived")?,
        })
    }
}

/// Accessor for the `messages` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages;

impl RecordAccessor for Messages {
    type Record = Message;

    async fn create<C: GenericClient>(
        &self,
        conn: &C,
        record: &PartialRecord,
    ) -> FolioResult<Message> {
        if record.is_empty() {
            return Err(FolioError::invalid_argument("No data."));
        }
        TABLE.check_fields(record, CONTACT_FIELDS)?;
        TABLE.check_required(record, CONTACT_FIELDS)?;
        TABLE.insert(conn, record).await
    }

    async fn get_all<C: GenericClient>(&self, conn: &C) -> FolioResult<Vec<Message>> {
        TABLE.select_all(conn).await
    }

    async fn get_by_id<C: GenericClient>(&self, conn: &C, id: i32) -> FolioResult<Message> {
        TABLE.select_by_id(conn, id).await
    }

    async fn update<C: GenericClient>(
        &self,
        conn: &C,
        id: i32,
        record: &PartialRecord,
    ) -> FolioResult<Message> {
        require_id(id, "Missing input.")?;
        TABLE.check_fields(record, TABLE.writable)?;
        TABLE.update_by_id(conn, "update", id, record).await
    }

    async fn delete<C: GenericClient>(&self, conn: &C, id: i32) -> FolioResult<Deleted> {
        TABLE.delete_by_id(conn, id).await
    }
}

impl Messages {
    /// Archive (`Some(true)` / `None`) or un-archive (`Some(false)`) a message.
    pub async fn toggle_archive<C: GenericClient>(
        &self,
        conn: &C,
        id: i32,
        archived: Option<bool>,
    ) -> FolioResult<Message> {
        require_id(id, "No id provided.")?;
        let archived = archived.unwrap_or(true);
        let record = PartialRecord::new().with("isArchived", archived);
        TABLE.update_by_id(conn, "toggle_archive", id, &record).await
    }
}
