use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use items_api::config::Config;
use items_api::render::LatexRenderer;
use items_api::routes::build_router;
use items_api::skill_scoring::{KeywordLineScorer, SkillVocabulary};
use items_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Items API v{}", env!("CARGO_PKG_VERSION"));

    // Line scorer for lines stored without category scores
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => {
            info!("Loading skill vocabulary from {}", path.display());
            SkillVocabulary::from_path(path)?
        }
        None => SkillVocabulary::builtin(),
    };
    let scorer = Arc::new(KeywordLineScorer::new(vocabulary));

    let page_config = config.page_config();
    info!(
        "Layout page config: {:?} {}pt ({:.1}em text width)",
        page_config.font, page_config.font_size_pt, page_config.text_width_em
    );
    let renderer = Arc::new(LatexRenderer::new(page_config));

    let state = AppState {
        config: config.clone(),
        renderer,
        scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
