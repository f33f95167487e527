use std::sync::Arc;

use product_api::config::Config;
use product_api::error::AppError;
use product_api::logging::init_logging;
use product_api::server::{AppState, create_app};
use product_api::store::mysql::MySqlProductStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config)?;

    tracing::info!("Starting product API service");

    let store = MySqlProductStore::connect(&config.database)?;
    // The pool is lazy, so a down database does not kill the process;
    // requests fail individually until it comes back.
    if let Err(err) = store.sync_schema().await {
        tracing::error!(error = %err, "initial table sync failed, continuing without it");
    }

    let state = AppState {
        config: config.clone(),
        store: Arc::new(store),
    };

    let app = create_app(state).await?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", &addr);

    axum::serve(listener, app).await?;
    Ok(())
}
