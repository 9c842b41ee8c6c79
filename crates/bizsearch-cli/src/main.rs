use std::process::ExitCode;

use bizsearch_client::QueryClient;
use bizsearch_core::constants::ZIP_DEFAULT;
use bizsearch_core::{AppConfig, SortDir, SortField, FATAL_NOTICE};
use bizsearch_db::PoolConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod favorites;
mod render;
mod search;
mod shell;

#[derive(Debug, Parser)]
#[command(name = "bizsearch")]
#[command(about = "Search businesses by zip code, radius and category")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one business search and print the results page
    Search {
        /// 5-digit or ZIP+4 code to search around
        #[arg(long, default_value = ZIP_DEFAULT)]
        zip: String,
        /// Search radius in miles (1-25)
        #[arg(long, default_value_t = 1)]
        miles: u32,
        /// Category title (must name exactly one category); empty searches every
        /// category, omitted searches restaurants
        #[arg(long)]
        category: Option<String>,
        /// Result offset
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Sort field: distance, name, location or favorite
        #[arg(long, default_value = "distance")]
        sort: SortField,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "asc")]
        dir: SortDir,
    },
    /// List categories whose title starts with a prefix
    Suggest {
        /// Prefix to look up
        query: String,
    },
    /// Manage the local favorites list
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Interactive search session (the default)
    Shell,
}

#[derive(Debug, Subcommand)]
enum FavoritesCommands {
    /// List stored favorite ids
    List,
    /// Add a business id
    Add { business_id: String },
    /// Remove a business id
    Remove { business_id: String },
    /// Fetch and print the favorited businesses
    Show {
        #[arg(long, default_value = "name")]
        sort: SortField,
        #[arg(long, default_value = "asc")]
        dir: SortDir,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = bizsearch_core::load_app_config_from_env();
    init_tracing(config.as_ref().map_or("info", |c| c.log_level.as_str()));

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "fatal error");
            eprintln!("{FATAL_NOTICE}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    tracing::debug!(env = %config.env, api_base_url = %config.api_base_url, "starting bizsearch");

    match cli.command {
        Some(Commands::Suggest { query }) => {
            let client = build_client(config)?;
            search::run_suggest(&client, &query).await
        }
        Some(Commands::Search {
            zip,
            miles,
            category,
            offset,
            sort,
            dir,
        }) => {
            let client = build_client(config)?;
            let pool = connect_store(config).await?;
            let opts = search::SearchOptions {
                zip,
                miles,
                category,
                offset,
                sort,
                dir,
            };
            search::run_search(&client, &pool, opts).await
        }
        Some(Commands::Favorites { command }) => {
            let pool = connect_store(config).await?;
            match command {
                FavoritesCommands::List => favorites::run_favorites_list(&pool).await,
                FavoritesCommands::Add { business_id } => {
                    favorites::run_favorites_add(&pool, &business_id).await
                }
                FavoritesCommands::Remove { business_id } => {
                    favorites::run_favorites_remove(&pool, &business_id).await
                }
                FavoritesCommands::Show { sort, dir } => {
                    let client = build_client(config)?;
                    favorites::run_favorites_show(&client, &pool, sort, dir).await
                }
            }
        }
        Some(Commands::Shell) | None => {
            let client = build_client(config)?;
            let pool = connect_store(config).await?;
            shell::run_shell(&client, &pool).await
        }
    }
}

fn build_client(config: &AppConfig) -> anyhow::Result<QueryClient> {
    QueryClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build query client: {e}"))
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool =
        bizsearch_db::connect_pool(&config.database_url, PoolConfig::from_app_config(config))
            .await?;
    let applied = bizsearch_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied favorites store migrations");
    }
    Ok(pool)
}
