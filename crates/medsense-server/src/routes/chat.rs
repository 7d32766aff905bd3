//! Chat routes — the full per-request pipeline.
//!
//! `POST /chat` runs mapping, risk scoring, and retrieval, assembles the
//! prompt, calls the LLM, and records both turns in the session.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use medsense_chat::{build_prompt, extract_json, personalize};
use medsense_nlp::SymptomMatch;
use medsense_risk::RiskAssessment;

use crate::sessions::Profile;
use crate::state::AppState;

/// Number of reference documents supplied to the prompt.
const RAG_TOP_K: usize = 3;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub user_message: String,
    pub age: Option<i64>,
    pub lifestyle: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/history/{sid}", get(history))
        .route("/clear/{sid}", delete(clear))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    state.sessions.expire_idle();

    let sid = match req.session_id.filter(|sid| state.sessions.exists(sid)) {
        Some(sid) => sid,
        None => state.sessions.create(Profile {
            age: req.age,
            lifestyle: req.lifestyle,
        }),
    };

    state.sessions.append(&sid, "user", json!(req.user_message.clone()));

    // Query embedding is a blocking HTTP call, so the core pipeline
    // runs off the async executor.
    let mapper = state.mapper.clone();
    let retrieval = state.retrieval.clone();
    let user_message = req.user_message.clone();
    let pipeline = tokio::task::spawn_blocking(move || {
        let matches = mapper.map(&user_message);
        let risk = medsense_risk::compute(&matches);
        let query: Vec<&str> = matches.iter().map(|m| m.symptom.as_str()).collect();
        let docs = retrieval.query(&query.join(", "), RAG_TOP_K);
        (matches, risk, docs)
    })
    .await;

    let (matches, risk, docs): (Vec<SymptomMatch>, RiskAssessment, Vec<String>) = match pipeline {
        Ok(outputs) => outputs,
        Err(e) => {
            error!("pipeline task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal pipeline failure" })),
            );
        }
    };

    let transcript = state.sessions.transcript(&sid);
    let prompt = build_prompt(&transcript, &req.user_message, &matches, &risk, &docs);

    let reply = match state.llm.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!("LLM call failed: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("language model unavailable: {}", e) })),
            );
        }
    };

    let structured = extract_json(&reply);
    let personalization = personalize(&risk);

    state.sessions.append(&sid, "assistant", structured.clone());

    (
        StatusCode::OK,
        Json(json!({
            "session_id": sid,
            "mapped_symptoms": matches,
            "risk": risk,
            "rag_docs_found": docs.len(),
            "assistant_structured": structured,
            "personalization": personalization,
        })),
    )
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
) -> impl IntoResponse {
    match state.sessions.get(&sid) {
        Some(session) => (StatusCode::OK, Json(json!(session))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "No such session" })),
        ),
    }
}

async fn clear(State(state): State<Arc<AppState>>, Path(sid): Path<String>) -> impl IntoResponse {
    state.sessions.remove(&sid);
    Json(json!({ "cleared": true }))
}
