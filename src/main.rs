use std::net::SocketAddr;
use std::sync::Arc;

use reminder_api::application::reminder_service::ReminderServiceImpl;
use reminder_api::application::store::Store;
use reminder_api::http::routes::reminders;
use reminder_api::http::routing;
use reminder_api::infrastructure::json_file::JsonFilePersister;
use tracing_subscriber::EnvFilter;

const DATA_FILE: &str = "reminders.json";
const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let store = Arc::new(Store::new(JsonFilePersister::new(DATA_FILE)));
    // A corrupt data file aborts startup here rather than being overwritten.
    let count = store.load().await?;
    tracing::info!(count, data_file = DATA_FILE, "loaded reminders");

    let service = ReminderServiceImpl::new(store);
    let reminders_router = reminders::router(reminders::AppState { service });
    let router = routing::app(reminders_router);

    let port = match std::env::var("PORT") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
