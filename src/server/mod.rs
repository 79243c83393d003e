//! REST API over the word chain engine and the lexicon.

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::{AppState, build_router, serve};
