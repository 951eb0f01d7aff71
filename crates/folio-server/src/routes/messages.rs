//! `/messages`: contact-form submissions and their archive flag.

use super::body;
use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use folio::{Messages, PartialRecord, RecordAccessor, Value, parse_id};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", patch(toggle_archive).delete(remove))
}

/// Build the record for a new message, checking the address before any I/O.
///
/// The remaining field checks happen in [`Messages::create`].
pub fn contact_record(payload: JsonValue) -> ApiResult<PartialRecord> {
    let record = PartialRecord::from_json(payload)?;
    if let Some(email) = record.get("email").and_then(Value::as_str)
        && !folio::validate::is_email(email)
    {
        return Err(ApiError::bad_request("Invalid email address."));
    }
    Ok(record)
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveRequest {
    pub archive: Option<bool>,
}

impl ArchiveRequest {
    /// An empty body means "archive".
    pub fn from_body(bytes: &[u8]) -> ApiResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map_err(|e| ApiError::bad_request(e.to_string()))
    }
}

/// The CAPTCHA is checked before the body is validated.
async fn create(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let mut payload = body(payload)?;
    let token = payload
        .as_object_mut()
        .and_then(|fields| fields.remove("token"));
    if !state.recaptcha.verify(token.as_ref().and_then(JsonValue::as_str)).await {
        return Err(ApiError::Bot);
    }

    let record = contact_record(payload)?;

    let conn = state.pool.get().await?;
    let message = Messages.create(&conn, &record).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": message }))))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<JsonValue>> {
    let conn = state.pool.get().await?;
    let messages = Messages.get_all(&conn).await?;
    Ok(Json(json!({ "messages": messages })))
}

async fn toggle_archive(
    State(state): State<AppState>,
    Path(id): Path<String>,
    bytes: Bytes,
) -> ApiResult<Json<JsonValue>> {
    let id = parse_id(&id)?;
    let request = ArchiveRequest::from_body(&bytes)?;
    let conn = state.pool.get().await?;
    let message = Messages.toggle_archive(&conn, id, request.archive).await?;
    Ok(Json(json!({ "message": message })))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    let id = parse_id(&id)?;
    let conn = state.pool.get().await?;
    let deleted = Messages.delete(&conn, id).await?;
    Ok(Json(json!({ "msg": deleted.msg })))
}
