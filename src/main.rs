use clap::{Parser, Subcommand};
use log::{error, info};
use serde::Serialize;

use idlix_resolver::{
    api,
    config::{DEFAULT_BASE_URL, SiteConfig},
};

#[derive(Debug, Parser)]
#[command(name = "idlix-resolver", version, about = "Scrapes listings and resolves playable stream urls")]
struct Args {
    /// Site root
    #[arg(long, env = "IDLIX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Latest items
    Latest {
        #[arg(long, default_value_t = 1)]
        page: u16,
    },
    /// Search by title
    Search {
        #[arg(long)]
        query: String,
    },
    /// Item details
    Detail {
        /// Item id, with or without the `movie:` prefix
        #[arg(long)]
        url: String,
    },
    /// Playable url of an item
    Stream {
        /// Item id, with or without the `movie:` prefix
        #[arg(long)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = SiteConfig::default().with_base_url(&args.base_url);

    info!("running {:?}", args.command);

    match args.command {
        Command::Latest { page } => {
            let items = api::load_latest(config, page).await.unwrap_or_else(|err| {
                error!("failed to load latest: {err}");
                vec![]
            });
            print_json(&items)
        }
        Command::Search { query } => {
            let items = api::search(config, &query).await.unwrap_or_else(|err| {
                error!("failed to search: {err}");
                vec![]
            });
            print_json(&items)
        }
        Command::Detail { url } => {
            let details = api::get_content_details(config, &url)
                .await
                .unwrap_or_else(|err| {
                    error!("failed to load details: {err}");
                    None
                });
            print_json(&details)
        }
        Command::Stream { url } => print_json(&api::resolve_stream(config, &url).await),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
