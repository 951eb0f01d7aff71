//! End-to-end request flows through the router and a real database.
//!
//! Runs only when `DATABASE_URL` is set. Each test migrates a private schema,
//! points a small pool at it through `search_path` and drops it afterwards.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use folio_server::{AppState, Recaptcha, router};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_postgres::NoTls;
use tower::ServiceExt;

const SCHEMA_SQL: [&str; 2] = [
    include_str!("../../folio/migrations/V1__create_tables.sql"),
    include_str!("../../folio/migrations/V2__add_project_position.sql"),
];

struct Scratch {
    admin: tokio_postgres::Client,
    schema: String,
    app: Router,
}

impl Scratch {
    async fn drop_schema(self) {
        self.admin
            .batch_execute(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .await
            .unwrap();
    }
}

async fn try_connect() -> Option<Scratch> {
    static NEXT: AtomicUsize = AtomicUsize::new(0);

    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (admin, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });

    let schema = format!(
        "folio_flow_{}_{}",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    );
    admin
        .batch_execute(&format!("CREATE SCHEMA {schema}; SET search_path TO {schema};"))
        .await
        .unwrap();
    for sql in SCHEMA_SQL {
        admin.batch_execute(sql).await.unwrap();
    }

    let mut pg_config: tokio_postgres::Config = database_url.parse().unwrap();
    pg_config.options(&format!("-c search_path={schema}"));
    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );
    let pool = Pool::builder(manager).max_size(2).build().unwrap();
    let app = router(
        AppState::new(pool, Recaptcha::bypass()),
        HeaderValue::from_static("http://localhost:3001"),
    );

    Some(Scratch { admin, schema, app })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn project(n: i64) -> Value {
    json!({
        "name": format!("Project{n}"),
        "description": format!("This is a website I built, {n}."),
        "tags": ["node", "express", "react"],
        "thoughts": "This was a cool project.",
        "githubUrl": "github.com",
        "position": n,
    })
}

#[tokio::test]
async fn project_flow() {
    let Some(scratch) = try_connect().await else {
        return;
    };
    let app = &scratch.app;

    let (status, body) = send(app, Method::POST, "/projects", Some(project(1))).await;
    assert_eq!(status, StatusCode::CREATED);
    let first = body["project"]["id"].as_i64().unwrap();
    assert_eq!(body["project"]["name"], "Project1");
    assert_eq!(body["project"]["tags"], r#"["node","express","react"]"#);
    assert_eq!(body["project"]["liveUrl"], Value::Null);

    let (status, body) = send(app, Method::POST, "/projects", Some(project(2))).await;
    assert_eq!(status, StatusCode::CREATED);
    let second = body["project"]["id"].as_i64().unwrap();

    let positions = json!({
        "positions": [
            { "id": first, "position": 2 },
            { "id": second, "position": "1" },
        ]
    });
    let (status, body) = send(app, Method::PATCH, "/projects/positions", Some(positions)).await;
    assert_eq!(status, StatusCode::OK);
    let order: Vec<_> = body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["id"].as_i64().unwrap(), p["position"].as_i64().unwrap()))
        .collect();
    assert_eq!(order, [(second, 1), (first, 2)]);

    let patch = json!({ "id": first, "project": { "liveUrl": "folio.dev" } });
    let (status, body) = send(app, Method::PATCH, "/projects", Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["liveUrl"], "folio.dev");
    assert_eq!(body["project"]["name"], "Project1");

    let (status, body) = send(app, Method::GET, "/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"][0]["id"], second);

    let uri = format!("/projects/{first}");
    let (status, body) = send(app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Deleted." }));

    let (status, body) = send(app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["status"], 404);

    let (status, _) = send(app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    scratch.drop_schema().await;
}

#[tokio::test]
async fn reorder_with_unknown_id_is_rejected() {
    let Some(scratch) = try_connect().await else {
        return;
    };
    let app = &scratch.app;

    let (_, body) = send(app, Method::POST, "/projects", Some(project(1))).await;
    let id = body["project"]["id"].as_i64().unwrap();

    let positions = json!({
        "positions": [
            { "id": id, "position": 7 },
            { "id": -1, "position": 8 },
        ]
    });
    let (status, body) = send(app, Method::PATCH, "/projects/positions", Some(positions)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": { "message": "Invalid project id(s).", "status": 400 } })
    );

    let (_, body) = send(app, Method::GET, &format!("/projects/{id}"), None).await;
    assert_eq!(body["project"]["position"], 1);

    scratch.drop_schema().await;
}

#[tokio::test]
async fn message_flow() {
    let Some(scratch) = try_connect().await else {
        return;
    };
    let app = &scratch.app;

    let message = json!({
        "name": "Jo",
        "email": "jo@example.com",
        "message": "Hello there!",
        "token": "ignored in tests",
    });
    let (status, body) = send(app, Method::POST, "/messages", Some(message)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["message"]["id"].as_i64().unwrap();
    assert_eq!(body["message"]["isArchived"], false);
    assert_eq!(body["message"]["email"], "jo@example.com");

    let uri = format!("/messages/{id}");
    let (status, body) = send(app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["isArchived"], true);

    let unarchive = json!({ "archive": false });
    let (status, body) = send(app, Method::PATCH, &uri, Some(unarchive)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["isArchived"], false);

    let (status, body) = send(app, Method::GET, "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Deleted." }));

    let (status, _) = send(app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    scratch.drop_schema().await;
}

#[tokio::test]
async fn message_missing_fields_is_400() {
    let Some(scratch) = try_connect().await else {
        return;
    };

    let message = json!({ "name": "Jo", "token": "ignored in tests" });
    let (status, body) = send(&scratch.app, Method::POST, "/messages", Some(message)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing data.");

    scratch.drop_schema().await;
}
