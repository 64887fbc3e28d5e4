use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use consulta::analysis::engine::AnalysisEngine;
use consulta::analysis::knowledge::KnowledgeBase;
use consulta::api::router::api_router;
use consulta::config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let kb = match std::env::var(config::KNOWLEDGE_ENV) {
        Ok(path) => {
            tracing::info!(path, "Loading knowledge registry from file");
            KnowledgeBase::load(Path::new(&path))?
        }
        Err(_) => KnowledgeBase::respiratory(),
    };
    tracing::info!(
        diseases = kb.diseases().len(),
        categories = kb.categories().len(),
        "Knowledge registry ready"
    );

    let engine = Arc::new(AnalysisEngine::new(kb));
    let app = api_router(engine);

    let addr = config::default_bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
