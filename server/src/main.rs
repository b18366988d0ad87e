use std::process::ExitCode;

use log::info;
use tokio::net::TcpListener;

use appraisal_intake::config::resolve_config;
use appraisal_intake_server::{logging, router, AppState, ServerError};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = logging::init_tracing() {
        eprintln!("{}", e);
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "appraisal intake server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    info!(
        "Starting Appraisal Intake v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = resolve_config()?;
    tracing::info!(
        bind = %config.bind_address,
        backend = ?config.drive.backend,
        scratch = %config.scratch_directory.display(),
        max_file_bytes = config.max_file_bytes,
        "configuration loaded"
    );

    let state = AppState::from_config(&config);
    let app = router(state);

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| ServerError::Bind {
            addr: config.bind_address.clone(),
            source: e,
        })?;

    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
