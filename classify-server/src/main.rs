use clap::Parser;
use classify_server::{init_logging, load_recognizer, router, AppState, Settings};
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();
    let settings = Settings::parse();

    let recognizer = load_recognizer(&settings)?;
    let app = router(AppState::new(recognizer, settings.labels.clone()));

    info!("listening on {}", settings.addr);
    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
