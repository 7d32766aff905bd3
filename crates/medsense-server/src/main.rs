//! MedSense — symptom-mapping, risk-scoring, RAG chat server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod sessions;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("MEDSENSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = medsense_core::MedSenseConfig::from_env(&data_dir);
    config
        .data_paths
        .validate()
        .map_err(|e| anyhow::anyhow!("startup failed: {}", e))?;
    let port = config.port;

    // Static reference data. Any failure here is fatal.
    let vocabulary = medsense_nlp::SymptomVocabulary::load(&config.data_paths.vocabulary_file)
        .map_err(|e| anyhow::anyhow!("startup failed: {}", e))?;
    let mapper = medsense_nlp::SymptomMapper::new(
        vocabulary,
        Arc::new(medsense_nlp::SuffixLemmatizer::new()),
    );

    // Embedder and LLM share the same key; without one the server runs
    // fully offline (hashing embedder, stubbed replies).
    let api_key = config.gemini_api_key.clone();
    let embedder = medsense_infer::create_embedder(api_key.as_deref());
    let llm = medsense_chat::LlmClient::from_api_key(api_key.as_deref());

    // Index construction embeds every document over blocking HTTP, so it
    // runs off the async executor.
    let docs_dir = config.data_paths.docs_dir.clone();
    let retrieval = tokio::task::spawn_blocking(move || {
        medsense_retrieval::RetrievalEngine::open(&docs_dir, embedder)
    })
    .await?
    .map_err(|e| anyhow::anyhow!("startup failed: {}", e))?;

    let state = Arc::new(AppState::new(config, mapper, retrieval, llm));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MedSense server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
