//! Veridian concierge CLI and REST API entry point.
//!
//! Binary name: `concierge`
//!
//! Parses CLI arguments, loads `config.toml`, then dispatches to the
//! requested command or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use concierge_core::chat::WidgetRegistry;
use concierge_infra::paths::resolve_data_dir;
use concierge_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,concierge=debug,concierge_core=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "concierge", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(resolve_data_dir(), |config| {
        if let Commands::Chat { delay_ms: Some(ms) } = &cli.command {
            config.widget.thinking_delay_ms = *ms;
        }
    })
    .await;
    tracing::debug!(data_dir = %state.data_dir.display(), "App state ready");

    match cli.command {
        Commands::Chat { .. } => {
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Commands::Ask { text } => {
            cli::ask::ask(&state, &text.join(" "), cli.json, cli.quiet)?;
        }

        Commands::Rules => {
            cli::rules::list_rules(&state, cli.json)?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Concierge API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, "REST API started");

            let registry = state.registry.clone();
            let reaper = WidgetRegistry::spawn_reaper(&registry);
            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if let Some(reaper) = reaper {
                reaper.abort();
            }
            tracing::info!(live_sessions = registry.len(), "REST API stopped");
            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
