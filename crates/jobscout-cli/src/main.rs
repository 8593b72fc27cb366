use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jobscout_client::ReqwestFetcher;
use jobscout_core::crawl::{CrawlConfig, CrawlOrchestrator};
use jobscout_core::lexicon::IndicatorLexicon;
use jobscout_core::{config, report};

#[derive(Parser)]
#[command(name = "jobscout", version, about = "Find job postings matching your keywords")]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every configured site and write a report
    Scrape {
        /// Output file (defaults to job_results/job_results_<timestamp>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of links to follow per site
        #[arg(long, default_value_t = 10)]
        max_links: usize,

        /// Path to the site list
        #[arg(long, default_value = "sites.txt")]
        sites: PathBuf,

        /// Path to the keyword list
        #[arg(long, default_value = "keywords.txt")]
        keywords: PathBuf,
    },

    /// Add a site to the crawl list
    AddSite {
        /// Absolute URL of the site
        url: String,

        /// Path to the site list
        #[arg(long, default_value = "sites.txt")]
        sites: PathBuf,
    },

    /// Remove a site from the crawl list
    RemoveSite {
        /// Absolute URL of the site
        url: String,

        /// Path to the site list
        #[arg(long, default_value = "sites.txt")]
        sites: PathBuf,
    },

    /// List configured sites
    ListSites {
        /// Path to the site list
        #[arg(long, default_value = "sites.txt")]
        sites: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scrape {
            output,
            max_links,
            sites,
            keywords,
        } => cmd_scrape(output, max_links, &sites, &keywords).await?,
        Commands::AddSite { url, sites } => {
            if config::add_site(&sites, &url)? {
                println!("Added site: {url}");
            } else {
                println!("Site already exists: {url}");
            }
        }
        Commands::RemoveSite { url, sites } => {
            if config::remove_site(&sites, &url)? {
                println!("Removed site: {url}");
            } else {
                println!("Site not found: {url}");
            }
        }
        Commands::ListSites { sites } => {
            let sites = config::load_sites(&sites)?;
            if sites.is_empty() {
                println!("No sites configured.");
            } else {
                println!("Configured sites:");
                for (i, site) in sites.iter().enumerate() {
                    println!("{}. {site}", i + 1);
                }
            }
        }
    }

    Ok(())
}

async fn cmd_scrape(
    output: Option<PathBuf>,
    max_links: usize,
    sites_path: &PathBuf,
    keywords_path: &PathBuf,
) -> Result<()> {
    let sites = config::load_sites(sites_path).context("failed to load site list")?;
    let keywords = config::load_keywords(keywords_path).context("failed to load keyword list")?;

    if sites.is_empty() {
        tracing::warn!(
            path = %sites_path.display(),
            "no sites configured, add one with `jobscout add-site <URL>`"
        );
    }
    if keywords.is_empty() {
        tracing::warn!(path = %keywords_path.display(), "no keywords configured");
    }

    let jobs = if sites.is_empty() || keywords.is_empty() {
        Vec::new()
    } else {
        let fetcher = ReqwestFetcher::new().context("failed to build HTTP client")?;
        let config = CrawlConfig {
            max_links_per_site: max_links,
            ..CrawlConfig::default()
        };
        let orchestrator = CrawlOrchestrator::new(fetcher, IndicatorLexicon::default(), config);
        orchestrator.crawl_all(&sites, &keywords).await
    };

    let path = output.unwrap_or_else(report::default_report_path);
    report::write_report(&jobs, &path).context("failed to write report")?;

    println!("Scraping complete! Found {} jobs.", jobs.len());
    println!("Results saved to: {}", path.display());

    Ok(())
}
