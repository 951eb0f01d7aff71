//! Router assembly and shared handler state.

use crate::error::ApiError;
use crate::recaptcha::Recaptcha;
use crate::routes;
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use deadpool_postgres::Pool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
    pub recaptcha: Arc<Recaptcha>,
}

impl AppState {
    pub fn new(pool: Pool, recaptcha: Recaptcha) -> Self {
        Self {
            pool,
            recaptcha: Arc::new(recaptcha),
        }
    }
}

/// Hardening headers set on every response, including errors.
fn security_headers() -> [(HeaderName, &'static str); 4] {
    [
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::REFERRER_POLICY, "no-referrer"),
        (
            header::CONTENT_SECURITY_POLICY,
            "default-src 'self'; frame-ancestors 'self'; object-src 'none'",
        ),
    ]
}

pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .nest("/projects", routes::projects::router())
        .nest("/messages", routes::messages::router())
        .fallback(endpoint_not_found)
        .layer(cors);
    for (name, value) in security_headers() {
        app = app.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }
    app.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn endpoint_not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found.".into())
}
