use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use allrecipes_parser::{server, RecipeParser, ServiceConfig};

#[derive(Parser)]
#[command(name = "allrecipes-parser", version, about = "Extract recipes from allrecipes.com")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one recipe and print it as JSON
    Get {
        /// Recipe id (e.g. 231495) or full allrecipes URL
        id: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve GET /api/recipe/{id}
    Serve {
        /// Listen address; overrides configuration
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = ServiceConfig::load().context("failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Command::Get { id, pretty } => {
            let parser = RecipeParser::from_config(&config)?;
            let recipe = parser
                .extract(&id)
                .await
                .with_context(|| format!("failed to extract recipe {id}"))?;
            let json = if pretty {
                serde_json::to_string_pretty(&recipe)?
            } else {
                serde_json::to_string(&recipe)?
            };
            println!("{json}");
        }
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            server::run_server(config).await?;
        }
    }

    Ok(())
}
