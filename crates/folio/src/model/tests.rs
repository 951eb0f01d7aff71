use super::*;
use crate::record::PositionUpdate;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A client that fails every round trip, so any error other than its own
/// proves validation ran before storage was touched.
struct OfflineClient;

impl GenericClient for OfflineClient {
    async fn query(&self, _sql: &str, _params: &[&(dyn ToSql + Sync)]) -> FolioResult<Vec<Row>> {
        Err(FolioError::Connection("offline".into()))
    }

    async fn execute(&self, _sql: &str, _params: &[&(dyn ToSql + Sync)]) -> FolioResult<u64> {
        Err(FolioError::Connection("offline".into()))
    }
}

fn complete_project() -> PartialRecord {
    PartialRecord::new()
        .with("name", "Testerino Testerson")
        .with("description", "me@email.com")
        .with("tags", "Testing, testing...")
        .with("thoughts", "This was a cool project!")
        .with("githubUrl", "github.com")
}

fn assert_invalid(result: FolioResult<impl std::fmt::Debug>, message: &str) {
    match result {
        Err(FolioError::InvalidArgument(m)) => assert_eq!(m, message),
        other => panic!("expected InvalidArgument({message:?}), got {other:?}"),
    }
}

#[test]
fn parse_id_accepts_integers() {
    assert_eq!(parse_id("42").unwrap(), 42);
    assert_eq!(parse_id("-1").unwrap(), -1);
    assert_eq!(parse_id(" 7 ").unwrap(), 7);
}

#[test]
fn parse_id_rejects_non_numeric() {
    for raw in ["bananas", "", "1.5", "99999999999"] {
        assert!(parse_id(raw).unwrap_err().is_invalid_argument(), "{raw}");
    }
}

#[test]
fn select_list_aliases_external_names() {
    let table = Table {
        entity: "project",
        name: "projects",
        fields: FieldMap::new(&[("imageUrl", "image_url")]),
        columns: &["id", "image_url"],
        writable: &[],
        order_by: "id",
    };
    assert_eq!(
        table.select_list(None),
        r#"id AS "id", image_url AS "imageUrl""#
    );
    assert_eq!(
        table.select_list(Some("p")),
        r#"p.id AS "id", p.image_url AS "imageUrl""#
    );
}

#[test]
fn deleted_marker() {
    assert_eq!(
        serde_json::to_value(Deleted::default()).unwrap(),
        serde_json::json!({ "msg": "Deleted." })
    );
}

#[tokio::test]
async fn project_create_rejects_empty_record() {
    assert_invalid(Projects.create(&OfflineClient, &PartialRecord::new()).await, "No data.");
}

#[tokio::test]
async fn project_create_rejects_missing_required_field() {
    let record = PartialRecord::new().with("name", "The best website in the world");
    assert_invalid(Projects.create(&OfflineClient, &record).await, "Missing data.");

    let mut record = complete_project();
    record.set("githubUrl", "");
    assert_invalid(Projects.create(&OfflineClient, &record).await, "Missing data.");
}

#[tokio::test]
async fn project_create_rejects_unknown_field() {
    let record = complete_project().with("id", 5);
    let err = Projects.create(&OfflineClient, &record).await.unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn project_create_reaches_storage_when_valid() {
    let err = Projects.create(&OfflineClient, &complete_project()).await.unwrap_err();
    assert!(matches!(err, FolioError::Connection(_)));
}

#[tokio::test]
async fn get_by_id_rejects_absent_id() {
    assert_invalid(Projects.get_by_id(&OfflineClient, 0).await, "No input.");
    assert_invalid(Messages.get_by_id(&OfflineClient, 0).await, "No input.");
}

#[tokio::test]
async fn update_rejects_missing_input() {
    let record = PartialRecord::new().with("description", "x");
    assert_invalid(Projects.update(&OfflineClient, 0, &record).await, "Missing input.");
    assert_invalid(
        Projects.update(&OfflineClient, 3, &PartialRecord::new()).await,
        "No data.",
    );
    assert_invalid(
        Messages.update(&OfflineClient, 3, &PartialRecord::new()).await,
        "No data.",
    );
}

#[tokio::test]
async fn update_rejects_unknown_field() {
    let record = PartialRecord::new().with("received", "yesterday");
    let err = Messages.update(&OfflineClient, 3, &record).await.unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn update_positions_rejects_empty_and_duplicates() {
    assert_invalid(Projects.update_positions(&OfflineClient, &[]).await, "No data.");

    let updates = [PositionUpdate::new(1, 2), PositionUpdate::new(1, 3)];
    assert_invalid(
        Projects.update_positions(&OfflineClient, &updates).await,
        "Duplicate project id(s).",
    );
}

#[tokio::test]
async fn message_create_accepts_only_contact_fields() {
    let record = PartialRecord::new()
        .with("name", "Jo")
        .with("email", "jo@example.com")
        .with("message", "Hi!")
        .with("isArchived", true);
    let err = Messages.create(&OfflineClient, &record).await.unwrap_err();
    assert!(err.is_invalid_argument());

    let record = PartialRecord::new()
        .with("name", "Jo")
        .with("email", "jo@example.com");
    assert_invalid(Messages.create(&OfflineClient, &record).await, "Missing data.");
}

#[tokio::test]
async fn toggle_archive_rejects_absent_id() {
    assert_invalid(
        Messages.toggle_archive(&OfflineClient, 0, None).await,
        "No id provided.",
    );
}

#[tokio::test]
async fn delete_rejects_absent_id() {
    assert_invalid(Projects.delete(&OfflineClient, 0).await, "No input.");
    assert_invalid(Messages.delete(&OfflineClient, 0).await, "No input.");
}
