use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use quiz_stats::api::state::AppState;
use quiz_stats::config::AppConfig;
use quiz_stats::db::{self, Repository};
use quiz_stats::models::GameFilter;

#[derive(Parser)]
#[command(name = "quiz-stats")]
#[command(about = "Read-only analytics API over a trivia results database")]
#[command(version)]
struct Cli {
    /// Path to the TOML secrets file
    #[arg(long, default_value = "./secrets.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address; overrides the [server] section
        #[arg(long)]
        host: Option<String>,

        /// Port number; overrides the [server] section
        #[arg(long)]
        port: Option<u16>,
    },

    /// Check database connectivity and print summary counts
    CheckDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config_path = std::path::Path::new(&cli.config);
    let (config, config_found) = if config_path.exists() {
        (AppConfig::from_file(config_path)?, true)
    } else {
        (AppConfig::default(), false)
    };

    // RUST_LOG wins, then --log-level, then the config file.
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let fmt_layer = if cli.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    tracing::info!("Starting quiz-stats v{}", env!("CARGO_PKG_VERSION"));
    if !config_found {
        tracing::warn!(
            "Config file {} not found, using defaults (set DATABASE_URL to connect)",
            cli.config
        );
    }

    let pool = db::connect(&config.database_url(), config.database.max_connections).await?;
    let repo = Repository::new(pool);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(repo, config);
            let app = quiz_stats::api::build_router(state);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::CheckDb => {
            let teams = repo.list_teams().await?;
            let summary = repo.summary_stats(&GameFilter::default()).await?;

            println!("teams:          {}", teams.len());
            println!("games:          {}", summary.total_games);
            match summary.latest_game_date {
                Some(date) => println!("latest game:    {}", date),
                None => println!("latest game:    (none)"),
            }
            match summary.avg_teams_per_game {
                Some(avg) => println!("avg teams/game: {:.1}", avg),
                None => println!("avg teams/game: (none)"),
            }
        }
    }

    Ok(())
}
