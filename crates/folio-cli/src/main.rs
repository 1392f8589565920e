use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_client::{HtmlExtractor, ReqwestFetcher};
use folio_core::models::PageSummary;
use folio_core::traits::{Extractor, Fetcher};
use folio_core::SummaryService;

#[derive(Parser)]
#[command(name = "folio", version, about = "Summarize a web page: title, headings, links, images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page over HTTP and print its summary as JSON
    Scrape {
        /// Target URL to summarize
        #[arg(short, long)]
        url: String,

        /// Fetch timeout in seconds
        #[arg(short, long, env = "FOLIO_FETCH_TIMEOUT_SECS", default_value_t = 30)]
        timeout_secs: u64,

        /// Refuse URLs that resolve to private or reserved addresses
        #[arg(
            long,
            env = "FOLIO_BLOCK_PRIVATE_URLS",
            action = ArgAction::SetTrue,
            value_parser = BoolishValueParser::new()
        )]
        block_private_urls: bool,
    },

    /// Summarize a local HTML file (use `-` for stdin)
    Extract {
        /// Path to the HTML document
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout is reserved for the JSON summary
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio_core=info,folio_client=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let summary = match cli.command {
        Commands::Scrape {
            url,
            timeout_secs,
            block_private_urls,
        } => {
            anyhow::ensure!(timeout_secs > 0, "--timeout-secs must be at least 1");
            let fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(timeout_secs))
                .context("Failed to create HTTP client")?;
            let fetcher = if block_private_urls {
                fetcher.block_private_urls()
            } else {
                fetcher
            };
            let service = SummaryService::new(fetcher, HtmlExtractor::new()?);
            cmd_scrape(&service, &url).await?
        }
        Commands::Extract { file } => {
            let html = read_document(&file)?;
            cmd_extract(&HtmlExtractor::new()?, &html)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

async fn cmd_scrape<F, E>(service: &SummaryService<F, E>, url: &str) -> Result<PageSummary>
where
    F: Fetcher,
    E: Extractor,
{
    service
        .summarize(url)
        .await
        .with_context(|| format!("Failed to summarize {url}"))
}

fn cmd_extract<E: Extractor>(extractor: &E, html: &str) -> Result<PageSummary> {
    tracing::info!("Extracting from {} bytes of HTML", html.len());
    extractor
        .extract(html)
        .context("Failed to extract summary")
}

/// Read an HTML document from a file, or from stdin when the path is `-`.
fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from stdin")?;
        return Ok(html);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file: {}", path.display()))
}
