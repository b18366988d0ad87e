use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::error::ServerError;

pub const LOG_ENV: &str = "INTAKE_LOG";
pub const LOG_FORMAT_ENV: &str = "INTAKE_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. `log` records are forwarded into
/// tracing so both macro families end up in the same output.
pub fn init_tracing() -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer().json().with_current_span(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    tracing_log::LogTracer::init().map_err(|e| ServerError::Logging(e.to_string()))?;

    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ServerError::Logging(e.to_string()))?;

    Ok(())
}
