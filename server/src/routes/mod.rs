//! Router and request handlers.
//!
//! - `form`: the intake page
//! - `case`: case submission
//! - `health`: liveness probe

pub mod case;
pub mod form;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use appraisal_intake::MAX_PHOTOS;

use crate::state::AppState;

/// Multipart overhead allowed on top of the file payloads.
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let body_limit = body_limit(state.max_file_bytes);

    Router::new()
        .route("/", get(form::index))
        .route("/health", get(health::health))
        .route("/api/case/create", post(case::create_case))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Largest acceptable request: one tax document plus the maximum number of
/// photos, each at the per-file limit.
pub fn body_limit(max_file_bytes: u64) -> usize {
    let files = (MAX_PHOTOS as u64 + 1).saturating_mul(max_file_bytes);
    usize::try_from(files.saturating_add(FORM_OVERHEAD_BYTES)).unwrap_or(usize::MAX)
}
