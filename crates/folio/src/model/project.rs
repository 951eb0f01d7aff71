//! Portfolio projects and their accessor.

use super::{Deleted, RecordAccessor, Table, require_id};
use crate::client::GenericClient;
use crate::error::{FolioError, FolioResult};
use crate::field_map::FieldMap;
use crate::query::query;
use crate::record::{PartialRecord, PositionUpdate};
use crate::row::{FromRow, RowExt};
use crate::sql;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio_postgres::Row;

/// Image shown for projects created without an `imageUrl`.
pub const DEFAULT_IMAGE_URL: &str = concat!(
    "https://images.unsplash.com/photo-1614469723922-c043ad9fd036",
    "?ixlib=rb-1.2.1&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8",
    "&auto=format&fit=crop&w=2709&q=80",
);

const REQUIRED: &[&str] = &["name", "description", "tags", "thoughts", "githubUrl"];

const TABLE: Table = Table {
    entity: "project",
    name: "projects",
    fields: FieldMap::new(&[
        ("imageUrl", "image_url"),
        ("githubUrl", "github_url"),
        ("liveUrl", "live_url"),
    ]),
    columns: &[
        "id",
        "name",
        "description",
        "tags",
        "thoughts",
        "image_url",
        "github_url",
        "live_url",
        "position",
    ],
    writable: &[
        "name",
        "description",
        "tags",
        "thoughts",
        "imageUrl",
        "githubUrl",
        "liveUrl",
        "position",
    ],
    order_by: "position NULLS LAST, id",
};

/// A portfolio project, in its external shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// JSON-encoded list of tags; opaque to storage.
    pub tags: String,
    pub thoughts: String,
    pub image_url: String,
    pub github_url: String,
    pub live_url: Option<String>,
    pub position: Option<i32>,
}

impl FromRow for Project {
    fn from_row(row: &Row) -> FolioResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            tags: row.try_get_column("tags")?,
            thoughts: row.try_get_column("thoughts")?,
            image_url: row.try_get_column("imageUrl")?,
            github_url: row.try_get_column("githubUrl")?,
            live_url: row.try_get_column("liveUrl")?,
            position: row.try_get_column("position")?,
        })
    }
}

/// Accessor for the `projects` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projects;

impl RecordAccessor for Projects {
    type Record = Project;

    async fn create<C: GenericClient>(
        &self,
        conn: &C,
        record: &PartialRecord,
    ) -> FolioResult<Project> {
        if record.is_empty() {
            return Err(FolioError::invalid_argument("No data."));
        }
        TABLE.check_fields(record, TABLE.writable)?;
        TABLE.check_required(record, REQUIRED)?;

        let mut record = record.clone();
        if !record.contains("imageUrl") {
            record.set("imageUrl", DEFAULT_IMAGE_URL);
        }
        TABLE.insert(conn, &record).await
    }

    async fn get_all<C: GenericClient>(&self, conn: &C) -> FolioResult<Vec<Project>> {
        TABLE.select_all(conn).await
    }

    async fn get_by_id<C: GenericClient>(&self, conn: &C, id: i32) -> FolioResult<Project> {
        TABLE.select_by_id(conn, id).await
    }

    async fn update<C: GenericClient>(
        &self,
        conn: &C,
        id: i32,
        record: &PartialRecord,
    ) -> FolioResult<Project> {
        require_id(id, "Missing input.")?;
        TABLE.check_fields(record, TABLE.writable)?;
        TABLE.update_by_id(conn, "update", id, record).await
    }

    async fn delete<C: GenericClient>(&self, conn: &C, id: i32) -> FolioResult<Deleted> {
        TABLE.delete_by_id(conn, id).await
    }
}

impl Projects {
    /// Reassign `position` for a batch of projects in one statement.
    ///
    /// The batch is applied only if every id exists; otherwise nothing changes
    /// and the call fails with `InvalidArgument`. Returns the updated projects
    /// ordered by their new position.
    pub async fn update_positions<C: GenericClient>(
        &self,
        conn: &C,
        updates: &[PositionUpdate],
    ) -> FolioResult<Vec<Project>> {
        let bulk = sql::build_bulk_position_update(updates)?;

        let ids: Vec<i32> = updates.iter().map(|u| u.id).collect();
        if ids.iter().collect::<HashSet<_>>().len() != ids.len() {
            return Err(FolioError::invalid_argument("Duplicate project id(s)."));
        }

        let ids_param = bulk.values.len() + 1;
        let sql = format!(
            "WITH updated AS ({} \
             AND (SELECT COUNT(*) FROM projects WHERE id = ANY(${ids_param}::integer[])) = ${} \
             RETURNING {}) \
             SELECT * FROM updated ORDER BY position NULLS LAST, id",
            bulk.statement,
            ids_param + 1,
            TABLE.select_list(Some("p")),
        );

        let expected = ids.len() as i64;
        // VALUES columns are untyped and resolve to text; the statement casts them back.
        let projects: Vec<Project> = query(sql)
            .tag("projects.update_positions")
            .bind_all(bulk.values.iter().map(i32::to_string))
            .bind(ids)
            .bind(expected)
            .fetch_all_as(conn)
            .await?;

        if projects.is_empty() {
            return Err(FolioError::invalid_argument("Invalid project id(s)."));
        }
        Ok(projects)
    }
}
