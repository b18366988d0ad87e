//! HTTP surface for appraisal intake.
//!
//! - `routes`: router and request handlers (form page, case submission)
//! - `state`: shared application state built from config
//! - `error`: mapping of intake errors onto HTTP responses
//! - `logging`: tracing subscriber bootstrap

pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

pub use error::{ApiError, ServerError};
pub use routes::router;
pub use state::AppState;
