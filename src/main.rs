use anyhow::Context;
use clap::Parser;
use covidchart::{cli::Args, config::Config, router, services::pipeline::ChartPipeline, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server_port = port;
    }
    let config = Arc::new(config);

    let pipeline =
        Arc::new(ChartPipeline::new(&config).context("Failed to initialize chart pipeline")?);

    if !args.is_server_mode() {
        if args.dump_table {
            let table = pipeline.per_capita_table().await?;
            println!("{}", serde_json::to_string_pretty(&table)?);
        } else {
            println!("{}", pipeline.chart_json().await?);
        }
        return Ok(());
    }

    info!(
        "Charting {} countries from {}",
        config.countries.len(),
        config.cases_url
    );

    let app = router(AppState {
        config: config.clone(),
        pipeline,
    });

    let listener = TcpListener::bind(&format!("0.0.0.0:{}", config.server_port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.server_port))?;

    info!("Server listening on http://0.0.0.0:{}", config.server_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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

    info!("Signal received, starting graceful shutdown");
}
