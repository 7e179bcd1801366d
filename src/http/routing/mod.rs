use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;

pub fn app(reminders: Router) -> Router {
    let api = Router::new().route("/health", get(health)).merge(reminders);
    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "service": "Reminder API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
