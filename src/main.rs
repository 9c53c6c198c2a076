use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;

use feedback_insights::api::{self, AppState};
use feedback_insights::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let lexicon = config.load_lexicon()?;
    info!(
        "Tone thresholds: positive > {}, negative < {}; max {} items per request",
        config.thresholds.positive, config.thresholds.negative, config.max_items
    );

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(lexicon, config));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
