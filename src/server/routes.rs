//! Router construction and server startup.

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::handlers;
use crate::config::AppConfig;
use crate::db::LexiconRepository;
use crate::games::wordchain::{BotPolicy, TurnOrchestrator};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    repository: LexiconRepository,
    policy: BotPolicy,
    rng_seed: Option<u64>,
}

impl AppState {
    /// Creates handler state.
    pub fn new(repository: LexiconRepository, policy: BotPolicy, rng_seed: Option<u64>) -> Self {
        Self {
            repository,
            policy,
            rng_seed,
        }
    }

    /// Returns the lexicon repository.
    pub fn repository(&self) -> &LexiconRepository {
        &self.repository
    }

    /// Builds an orchestrator over the repository for one request.
    pub fn orchestrator(&self) -> TurnOrchestrator<LexiconRepository> {
        TurnOrchestrator::new(self.repository.clone(), self.policy)
    }

    /// Random source for one request: seeded when configured, else fresh
    /// entropy.
    pub fn request_rng(&self) -> ChaCha8Rng {
        match self.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Builds the full router.
///
/// Any origin may call the API, so a browser client served elsewhere works.
pub fn build_router(state: AppState) -> Router {
    let game = Router::new()
        .route("/check", post(handlers::check_word))
        .route("/bot-answer", post(handlers::bot_answer))
        .route("/turn", post(handlers::play_turn));

    let dict = Router::new()
        .route("/", post(handlers::add_word))
        .route(
            "/{text}",
            get(handlers::get_word)
                .put(handlers::upsert_word)
                .delete(handlers::delete_word),
        );

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/game", game)
        .nest("/api/dict", dict)
        .layer(middleware::from_fn(log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    let status = response.status();
    if status.is_server_error() {
        warn!(%method, %uri, %status, "Request failed");
    } else {
        info!(%method, %uri, %status, "Request handled");
    }
    response
}

/// Opens the lexicon, applies migrations and serves the API until the
/// process is stopped.
///
/// # Errors
///
/// Returns an error if the database cannot be prepared or the listener
/// cannot bind.
#[instrument(skip(config), fields(host = %config.server().host(), port = config.server().port()))]
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let repository = LexiconRepository::open(config.database().path().clone())?;
    let state = AppState::new(repository, config.bot().policy(), *config.bot().seed());
    let app = build_router(state);

    let addr = (config.server().host().as_str(), *config.server().port());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Word Chain API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
