//! `/projects`: portfolio entries and their display order.

use super::body;
use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use folio::{PartialRecord, PositionUpdate, Projects, RecordAccessor, Value, parse_id};
use serde::Deserialize;
use serde::de::{self, Deserializer};
use serde_json::{Value as JsonValue, json};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create).patch(update))
        .route("/positions", patch(update_positions))
        .route("/:id", get(show).delete(remove))
}

/// Project fields as the client sends them; `tags` arrives as a list.
///
/// A field is either absent or carries a value. Columns are never cleared, so
/// an explicit `null` is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectFields {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub thoughts: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub github_url: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub live_url: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub position: Option<i32>,
}

fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(de::Error::custom(
            "cannot be null; omit the field to leave the value unchanged",
        )),
    }
}

impl ProjectFields {
    /// Only fields the client supplied end up in the record.
    pub fn into_record(self) -> ApiResult<PartialRecord> {
        let tags = self
            .tags
            .map(|tags| serde_json::to_string(&tags))
            .transpose()
            .map_err(|e| ApiError::bad_request(format!("Invalid tags: {e}")))?;

        let fields: [(&str, Option<Value>); 8] = [
            ("name", self.name.map(Value::from)),
            ("description", self.description.map(Value::from)),
            ("tags", tags.map(Value::from)),
            ("thoughts", self.thoughts.map(Value::from)),
            ("imageUrl", self.image_url.map(Value::from)),
            ("githubUrl", self.github_url.map(Value::from)),
            ("liveUrl", self.live_url.map(Value::from)),
            ("position", self.position.map(Value::from)),
        ];
        Ok(fields
            .into_iter()
            .filter_map(|(field, value)| Some((field, value?)))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProject {
    pub id: i32,
    pub project: ProjectFields,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePositions {
    pub positions: JsonValue,
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProjectFields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let record = body(payload)?.into_record()?;
    let conn = state.pool.get().await?;
    let project = Projects.create(&conn, &record).await?;
    Ok((StatusCode::CREATED, Json(json!({ "project": project }))))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<JsonValue>> {
    let conn = state.pool.get().await?;
    let projects = Projects.get_all(&conn).await?;
    Ok(Json(json!({ "projects": projects })))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    let id = parse_id(&id)?;
    let conn = state.pool.get().await?;
    let project = Projects.get_by_id(&conn, id).await?;
    Ok(Json(json!({ "project": project })))
}

async fn update(
    State(state): State<AppState>,
    payload: Result<Json<UpdateProject>, JsonRejection>,
) -> ApiResult<Json<JsonValue>> {
    let UpdateProject { id, project } = body(payload)?;
    let record = project.into_record()?;
    let conn = state.pool.get().await?;
    let project = Projects.update(&conn, id, &record).await?;
    Ok(Json(json!({ "project": project })))
}

async fn update_positions(
    State(state): State<AppState>,
    payload: Result<Json<UpdatePositions>, JsonRejection>,
) -> ApiResult<Json<JsonValue>> {
    let updates = PositionUpdate::parse_batch(&body(payload)?.positions)?;
    let conn = state.pool.get().await?;
    let projects = Projects.update_positions(&conn, &updates).await?;
    Ok(Json(json!({ "projects": projects })))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    let id = parse_id(&id)?;
    let conn = state.pool.get().await?;
    let deleted = Projects.delete(&conn, id).await?;
    Ok(Json(json!({ "msg": deleted.msg })))
}
