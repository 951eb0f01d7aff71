//! HTTP handlers, one module per resource.

pub mod messages;
pub mod projects;

use crate::error::ApiResult;
use axum::Json;
use axum::extract::rejection::JsonRejection;

/// Unwrap a JSON body, turning extractor rejections into 400s.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    let Json(body) = payload?;
    Ok(body)
}
