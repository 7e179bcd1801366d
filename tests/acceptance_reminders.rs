use std::sync::Arc;

use axum::Router;
use axum::body::to_bytes;
use reminder_api::application::reminder_service::ReminderServiceImpl;
use reminder_api::application::store::Store;
use reminder_api::http::routes::reminders;
use reminder_api::http::routing;
use reminder_api::infrastructure::json_file::JsonFilePersister;
use serde_json::json;
use tempfile::TempDir;

async fn app_with_data_dir() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let app = app_at(dir.path().join("reminders.json")).await;
    (app, dir)
}

async fn app_at(path: std::path::PathBuf) -> Router {
    let store = Arc::new(Store::new(JsonFilePersister::new(path)));
    store.load().await.unwrap();
    let service = ReminderServiceImpl::new(store);
    routing::app(reminders::router(reminders::AppState { service }))
}

#[tokio::test]
async fn acceptance_create_get_complete_delete() {
    let (app, _dir) = app_with_data_dir().await;

    // create
    let res = request(&app, "POST", "/api/reminders", Some(json!({ "title": "Buy milk" }))).await;
    assert_eq!(res.status(), 201);
    let body = body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Buy milk");
    assert_eq!(body["data"]["description"], "");
    assert_eq!(body["data"]["priority"], "medium");
    assert_eq!(body["data"]["completed"], false);
    assert!(body["data"]["dueDate"].is_null());
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // get returns the identical record
    let res = request(&app, "GET", &format!("/api/reminders/{id}"), None).await;
    assert_eq!(res.status(), 200);
    let fetched = body_json(res).await;
    assert_eq!(fetched["data"], body["data"]);

    // mark complete
    let res = request(&app, "PATCH", &format!("/api/reminders/{id}/complete"), None).await;
    assert_eq!(res.status(), 200);
    let completed = body_json(res).await;
    assert_eq!(completed["data"]["completed"], true);

    // delete returns the final record value
    let res = request(&app, "DELETE", &format!("/api/reminders/{id}"), None).await;
    assert_eq!(res.status(), 200);
    let deleted = body_json(res).await;
    assert_eq!(deleted["data"]["completed"], true);
    assert_eq!(deleted["data"]["title"], "Buy milk");

    // gone
    let res = request(&app, "GET", &format!("/api/reminders/{id}"), None).await;
    assert_eq!(res.status(), 404);
    let missing = body_json(res).await;
    assert_eq!(missing["success"], false);
    assert_eq!(missing["error"], "Reminder not found");
}

#[tokio::test]
async fn create_requires_a_title() {
    let (app, _dir) = app_with_data_dir().await;

    let res = request(&app, "POST", "/api/reminders", Some(json!({ "description": "no title" }))).await;
    assert_eq!(res.status(), 400);
    let body = body_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Title is required");

    let res = request(&app, "GET", "/api/reminders", None).await;
    let body = body_json(res).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn update_is_partial_and_null_clears_due_date() {
    let (app, _dir) = app_with_data_dir().await;

    let res = request(
        &app,
        "POST",
        "/api/reminders",
        Some(json!({
            "title": "Dentist",
            "description": "checkup",
            "dueDate": "2026-09-01T12:00:00Z",
            "priority": "high"
        })),
    )
    .await;
    assert_eq!(res.status(), 201);
    let created = body_json(res).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // only priority changes
    let res = request(&app, "PUT", &format!("/api/reminders/{id}"), Some(json!({ "priority": "low" }))).await;
    assert_eq!(res.status(), 200);
    let body = body_json(res).await;
    assert_eq!(body["data"]["priority"], "low");
    assert_eq!(body["data"]["title"], "Dentist");
    assert_eq!(body["data"]["description"], "checkup");
    assert_eq!(body["data"]["dueDate"], "2026-09-01T12:00:00Z");
    assert_eq!(body["data"]["createdAt"], created["data"]["createdAt"]);

    // explicit null clears the date
    let res = request(&app, "PUT", &format!("/api/reminders/{id}"), Some(json!({ "dueDate": null }))).await;
    assert_eq!(res.status(), 200);
    let body = body_json(res).await;
    assert!(body["data"]["dueDate"].is_null());
}

#[tokio::test]
async fn create_accepts_url_encoded_form() {
    let (app, _dir) = app_with_data_dir().await;

    let res = form_request(&app, "POST", "/api/reminders", "title=Call%20mom&priority=high").await;
    assert_eq!(res.status(), 201);
    let body = body_json(res).await;
    assert_eq!(body["data"]["title"], "Call mom");
    assert_eq!(body["data"]["priority"], "high");
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let (app, _dir) = app_with_data_dir().await;

    let res = request(&app, "GET", "/api/reminders/not-a-uuid", None).await;
    assert_eq!(res.status(), 404);

    let missing = uuid::Uuid::new_v4();
    for (method, path) in [
        ("GET", format!("/api/reminders/{missing}")),
        ("DELETE", format!("/api/reminders/{missing}")),
        ("PATCH", format!("/api/reminders/{missing}/complete")),
    ] {
        let res = request(&app, method, &path, None).await;
        assert_eq!(res.status(), 404, "{method} {path}");
    }

    let res = request(&app, "PUT", &format!("/api/reminders/{missing}"), Some(json!({ "title": "x" }))).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn collection_survives_restart_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.json");

    let app = app_at(path.clone()).await;
    for title in ["first", "second"] {
        let res = request(&app, "POST", "/api/reminders", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 201);
    }

    // fresh store over the same file, as after a process restart
    let reopened = app_at(path).await;
    let res = request(&reopened, "GET", "/api/reminders", None).await;
    let body = body_json(res).await;
    let titles: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["first", "second"]);
}

#[tokio::test]
async fn failed_persist_returns_500_and_keeps_memory_consistent() {
    let (app, dir) = app_with_data_dir().await;

    let res = request(&app, "POST", "/api/reminders", Some(json!({ "title": "kept" }))).await;
    assert_eq!(res.status(), 201);

    // make every subsequent file write fail
    drop(dir);

    let res = request(&app, "POST", "/api/reminders", Some(json!({ "title": "lost" }))).await;
    assert_eq!(res.status(), 500);
    let body = body_json(res).await;
    assert_eq!(body["success"], false);

    // the rolled-back create is not visible
    let res = request(&app, "GET", "/api/reminders", None).await;
    let body = body_json(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "kept");
}

#[tokio::test]
async fn health_reports_service_and_version() {
    let (app, _dir) = app_with_data_dir().await;

    let res = request(&app, "GET", "/api/health", None).await;
    assert_eq!(res.status(), 200);
    let body = body_json(res).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "Reminder API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

async fn request(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<serde_json::Value>,
) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(path);
    let req = match body {
        Some(json) => req
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn form_request(
    app: &Router,
    method: &str,
    path: &str,
    body: &str,
) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> serde_json::Value {
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
