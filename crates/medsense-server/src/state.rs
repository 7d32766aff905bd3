//! Shared application state.
//!
//! Every service is constructed once at startup by `main` and injected
//! here; nothing in the request path mutates them. Sessions are the only
//! mutable state and live behind their own lock.

use std::sync::Arc;

use medsense_chat::LlmClient;
use medsense_core::MedSenseConfig;
use medsense_nlp::SymptomMapper;
use medsense_retrieval::RetrievalEngine;

use crate::sessions::SessionStore;

pub struct AppState {
    pub config: MedSenseConfig,
    pub mapper: Arc<SymptomMapper>,
    pub retrieval: Arc<RetrievalEngine>,
    pub llm: LlmClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: MedSenseConfig,
        mapper: SymptomMapper,
        retrieval: RetrievalEngine,
        llm: LlmClient,
    ) -> Self {
        Self {
            config,
            mapper: Arc::new(mapper),
            retrieval: Arc::new(retrieval),
            llm,
            sessions: SessionStore::default(),
        }
    }
}
