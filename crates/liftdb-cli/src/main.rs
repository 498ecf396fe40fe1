use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "liftdb-cli")]
#[command(about = "Ski lift inventory crawler for liftblog.com")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the blog and print one ski area record per line.
    Crawl {
        /// Restrict the crawl to one country root.
        #[arg(long)]
        country: Option<String>,
    },
    /// Classify one lift type string and print its structured form.
    Classify { text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = liftdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Crawl { country } => run_crawl(&config, country.as_deref()).await,
        Commands::Classify { text } => run_classify(&text),
    }
}

async fn run_crawl(config: &liftdb_core::AppConfig, country: Option<&str>) -> anyhow::Result<()> {
    let countries: Vec<&str> = match country {
        Some(slug) => {
            if !liftdb_core::COUNTRY_SLUGS.contains(&slug) {
                anyhow::bail!(
                    "unknown country '{slug}'; known roots: {}",
                    liftdb_core::COUNTRY_SLUGS.join(", ")
                );
            }
            vec![slug]
        }
        None => liftdb_core::COUNTRY_SLUGS.to_vec(),
    };

    let wp = liftdb_wp::WordPressClient::new(config.request_timeout_secs)?;
    let pages = liftdb_scraper::PageClient::new(config.request_timeout_secs, &config.user_agent)?;
    let crawler = liftdb_scraper::Crawler::new(wp, pages);

    let mut serialize_error: Option<serde_json::Error> = None;
    let emitted = crawler
        .run(&countries, |area| {
            tracing::info!(
                ski_area = %area.name,
                lifts = area.feature_count(),
                "ski area assembled"
            );
            match serde_json::to_string(&area) {
                Ok(line) => println!("{line}"),
                Err(e) => serialize_error = Some(e),
            }
        })
        .await?;
    if let Some(e) = serialize_error {
        return Err(e.into());
    }

    tracing::info!(emitted, "crawl complete");
    Ok(())
}

fn run_classify(text: &str) -> anyhow::Result<()> {
    match liftdb_scraper::classify_lift_type(text)? {
        Some(class) => println!("{}", serde_json::to_string(&class)?),
        None => println!("no structured representation for: {text}"),
    }
    Ok(())
}
