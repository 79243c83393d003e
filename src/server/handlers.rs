//! Route handlers.
//!
//! Engine and repository calls do blocking SQLite I/O and run on the
//! blocking thread pool. Body rejections are reported as JSON 400s.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{Span, debug, instrument};

use super::ApiError;
use super::routes::AppState;
use crate::games::wordchain::{
    BotMoveRequest, BotMoveResponse, CheckWordRequest, CheckWordResponse, ExchangeOutcome,
    LanguageMode, Word,
};

/// Body of `POST /api/dict`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddWordRequest {
    text: String,
    #[serde(alias = "mode")]
    lang: LanguageMode,
}

/// Body of `PUT /api/dict/{text}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertWordRequest {
    #[serde(alias = "mode")]
    lang: LanguageMode,
}

async fn blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ApiError::internal(format!("Worker task failed: {}", e)))?
}

pub async fn root() -> &'static str {
    "Word Chain API is ready!"
}

#[instrument(skip_all, fields(mode = tracing::field::Empty))]
pub async fn check_word(
    State(state): State<AppState>,
    body: Result<Json<CheckWordRequest>, JsonRejection>,
) -> Result<Json<CheckWordResponse>, ApiError> {
    let Json(request) = body?;
    Span::current().record("mode", request.mode.as_db_str());
    let response = blocking(move || Ok(state.orchestrator().check_word(&request)?)).await?;
    debug!(legal = response.legal, "Checked word");
    Ok(Json(response))
}

#[instrument(skip_all, fields(mode = tracing::field::Empty))]
pub async fn bot_answer(
    State(state): State<AppState>,
    body: Result<Json<BotMoveRequest>, JsonRejection>,
) -> Result<Json<BotMoveResponse>, ApiError> {
    let Json(request) = body?;
    Span::current().record("mode", request.mode.as_db_str());
    let response = blocking(move || {
        let mut rng = state.request_rng();
        Ok(state.orchestrator().bot_answer(&request, &mut rng)?)
    })
    .await?;
    Ok(Json(response))
}

#[instrument(skip_all, fields(mode = tracing::field::Empty))]
pub async fn play_turn(
    State(state): State<AppState>,
    body: Result<Json<CheckWordRequest>, JsonRejection>,
) -> Result<Json<ExchangeOutcome>, ApiError> {
    let Json(request) = body?;
    Span::current().record("mode", request.mode.as_db_str());
    let outcome = blocking(move || {
        let mut rng = state.request_rng();
        Ok(state.orchestrator().play_exchange(&request, &mut rng)?)
    })
    .await?;
    Ok(Json(outcome))
}

#[instrument(skip(state))]
pub async fn get_word(
    State(state): State<AppState>,
    Path(text): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let row = blocking(move || Ok(state.repository().get_word(&text)?)).await?;
    match row {
        Some(row) => Ok(Json(json!({ "found": true, "data": row }))),
        None => Err(ApiError::not_found("This word is not in the dictionary yet")),
    }
}

#[instrument(skip_all, fields(text = tracing::field::Empty, lang = tracing::field::Empty))]
pub async fn add_word(
    State(state): State<AppState>,
    body: Result<Json<AddWordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(request) = body?;
    Span::current()
        .record("text", request.text.as_str())
        .record("lang", request.lang.as_db_str());
    let word = Word::new(&request.text, request.lang);
    if word.is_empty() {
        return Err(ApiError::bad_request("Missing word text"));
    }

    let stored = word.clone();
    let row = blocking(move || Ok(state.repository().add_word(&stored)?)).await?;
    match row {
        Some(row) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": format!("Added \"{}\"", word),
                "data": row,
            })),
        )),
        None => Err(ApiError::bad_request("This word already exists")),
    }
}

#[instrument(skip(state, body), fields(lang = tracing::field::Empty))]
pub async fn upsert_word(
    State(state): State<AppState>,
    Path(text): Path<String>,
    body: Result<Json<UpsertWordRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = body?;
    Span::current().record("lang", request.lang.as_db_str());
    let word = Word::new(&text, request.lang);
    let stored = word.clone();
    let row = blocking(move || Ok(state.repository().upsert_word(&stored)?)).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Saved \"{}\" to the dictionary", word),
        "data": row,
    })))
}

#[instrument(skip(state))]
pub async fn delete_word(
    State(state): State<AppState>,
    Path(text): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let target = text.clone();
    let deleted = blocking(move || Ok(state.repository().delete_word(&target)?)).await?;
    if deleted {
        Ok(Json(json!({
            "success": true,
            "message": format!("Deleted \"{}\" from the dictionary", text.trim().to_lowercase()),
        })))
    } else {
        Err(ApiError::not_found("No such word to delete"))
    }
}
