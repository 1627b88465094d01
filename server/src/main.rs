use std::error::Error;
use std::future::pending;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use balance_ledger_application::infrastructure_config::Config;
use server::bootstrap::{router::create_router, state::AppState};
use server::config_loader;
use server::observability::{startup_info::print_api_info, tracing::setup_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let config = config_loader::load_config()?;
    setup_logging(&config)?;

    info!(
        backend = ?config.store.backend,
        default_balance = config.ledger.default_balance,
        "Starting balance ledger"
    );

    if let Err(e) = run(config).await {
        error!("Ledger server stopped with an error: {}", e);
        return Err(e);
    }

    info!("Ledger server shut down cleanly");
    Ok(())
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let address = config.server_address();
    let app = create_router(AppState::new(config.clone())?);

    let listener = TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);
    print_api_info(&config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn wait_for_terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut terminate) => {
            terminate.recv().await;
        }
        Err(e) => {
            warn!("SIGTERM handler unavailable, relying on Ctrl+C: {}", e);
            pending::<()>().await;
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Ctrl+C handler unavailable: {}", e);
            pending::<()>().await;
        }
    };

    let reason = tokio::select! {
        () = ctrl_c => "Ctrl+C",
        () = wait_for_terminate() => "SIGTERM",
    };
    info!("Received {}, draining in-flight requests", reason);
}
