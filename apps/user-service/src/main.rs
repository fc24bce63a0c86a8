use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::body::Body;
use axum::http::Request;
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use users::domain::service::Service;
use users::infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmUsersRepository};

mod security;

/// user-service - minimal user management REST API
#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "user-service - minimal user management REST API")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging(&logging_config);
    tracing::info!("user-service starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database URL not configured"))?;

    tracing::info!("Connecting to database: {}", db_config.url);
    let mut opts = ConnectOptions::new(db_config.url.clone());
    if let Some(max_conns) = db_config.max_conns {
        opts.max_connections(max_conns);
    }
    let db = Database::connect(opts).await?;
    Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmUsersRepository::new(db));
    let service = Arc::new(Service::new(repo));
    let policy = security::from_config(&config.security);

    let app = users::api::rest::routes::router(service)
        .layer(axum::middleware::from_fn_with_state(
            policy,
            security::enforce,
        ))
        .layer(create_trace_layer());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

/// Per-request tracing span with method and path.
#[allow(clippy::type_complexity)]
fn create_trace_layer() -> tower_http::trace::TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> tracing::Span + Clone,
> {
    use tower_http::trace::TraceLayer;

    TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            uri = %req.uri().path(),
        )
    })
}
