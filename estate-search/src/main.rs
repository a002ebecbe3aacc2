use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use estate_search::{
    config::read_config,
    domain::search::{
        model::ChatModel, repository::SqliteRecordStore, PropertyRecord, SearchService,
    },
};

#[derive(Parser)]
#[command(name = "estate-search", about = "Search property listings in plain language")]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract filters from the query and print matching listings as JSON
    Search {
        /// Free-text query, e.g. "casa en achumani por 280k con jardin"
        query: String,
    },
    /// Print the prompt that would be sent to the model
    Prompt { query: String },
    /// Load listings from a JSON array into the store
    Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,estate_search=debug,llm_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opts = Opts::parse();
    let settings = read_config().context("Failed to read configuration")?;
    let prompt = settings.search.prompt_builder()?;

    match opts.command {
        Command::Prompt { query } => {
            println!("{}", prompt.build(&query));
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let records: Vec<PropertyRecord> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            let store = SqliteRecordStore::connect(&settings.database).await?;
            let inserted = store.insert_records(&records).await?;
            let total = store.count().await?;
            tracing::info!(inserted, total, "Imported listings");
        }
        Command::Search { query } => {
            let model = ChatModel::from_settings(&settings.model)?;
            tracing::info!(
                provider = %settings.model.provider,
                model = model.model_name(),
                "Using language model"
            );

            let store = SqliteRecordStore::connect(&settings.database).await?;
            let service = SearchService::new(model, store, prompt);

            let outcome = service.search(&query).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
