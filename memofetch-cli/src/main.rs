//! Memofetch CLI
//!
//! Command-line front end for the memoizing HTTP fetch helper.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use memofetch_client::{ClientConfig, HttpClient};

/// Memofetch - memoizing HTTP fetch helper
#[derive(Parser)]
#[command(name = "memofetch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a page and print its body
    Get {
        /// URL to fetch
        url: String,

        /// Request header in "Name: Value" form, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// User name for HTTP basic auth
        #[arg(long, env = "MEMOFETCH_USER")]
        user: Option<String>,

        /// Password for HTTP basic auth
        #[arg(long, env = "MEMOFETCH_PASS")]
        pass: Option<String>,

        /// Bypass the caches for this fetch
        #[arg(long)]
        no_cache: bool,

        /// Client configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print cache statistics to stderr after the fetch
        #[arg(long)]
        stats: bool,
    },

    /// Request headers only and print them
    Head {
        /// URL to probe
        url: String,

        /// Request header in "Name: Value" form, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },

    /// Send a POST request and print the response body
    Post {
        /// URL to post to
        url: String,

        /// Request body
        #[arg(short, long)]
        data: String,

        /// Content-Type of the body
        #[arg(long, default_value = "application/x-www-form-urlencoded")]
        content_type: String,

        /// Request header in "Name: Value" form, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "memofetch=debug,info"
    } else {
        "memofetch=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Get {
            url,
            headers,
            user,
            pass,
            no_cache,
            config,
            stats,
        } => cmd_get(&url, &headers, user, pass, no_cache, config.as_deref(), stats).await,
        Commands::Head { url, headers } => cmd_head(&url, &headers).await,
        Commands::Post {
            url,
            data,
            content_type,
            headers,
        } => cmd_post(&url, &data, &content_type, &headers).await,
    }
}

/// Download a page and print its body
async fn cmd_get(
    url: &str,
    headers: &[String],
    user: Option<String>,
    pass: Option<String>,
    no_cache: bool,
    config: Option<&Path>,
    stats: bool,
) -> Result<()> {
    let mut client_config = match config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::new(),
    };
    if no_cache {
        client_config = client_config.no_cache();
    }

    let client = HttpClient::with_config(client_config)?;
    let request_headers = parse_headers(headers)?;

    let body = match (user, pass) {
        (Some(user), Some(pass)) => {
            client
                .get_with_auth(url, request_headers.as_ref(), &user, &pass)
                .await?
        }
        (None, None) => client.get(url, request_headers.as_ref()).await?,
        _ => bail!("--user and --pass must be given together"),
    };
    println!("{body}");

    if stats {
        if let Some(stats) = client.page_cache_stats() {
            eprintln!(
                "{} {} entries, {} hits, {} misses",
                format!("[{}]", stats.name).cyan(),
                stats.total_entries,
                stats.hits,
                stats.misses
            );
        }
    }
    Ok(())
}

/// Request headers only and print them
async fn cmd_head(url: &str, headers: &[String]) -> Result<()> {
    let client = HttpClient::new()?;
    let request_headers = parse_headers(headers)?;
    let response_headers = client.head(url, request_headers.as_ref()).await?;

    let mut names: Vec<_> = response_headers.keys().collect();
    names.sort();
    for name in names {
        for value in &response_headers[name] {
            println!("{}: {}", name.cyan(), value);
        }
    }
    Ok(())
}

/// Send a POST request and print the response body
async fn cmd_post(url: &str, data: &str, content_type: &str, headers: &[String]) -> Result<()> {
    let client = HttpClient::new()?;
    let mut request_headers = parse_headers(headers)?.unwrap_or_default();
    request_headers
        .entry("Content-Type".to_string())
        .or_insert_with(|| content_type.to_string());

    let body = client
        .post(url, Some(&request_headers), data.as_bytes().to_vec())
        .await?;
    println!("{body}");
    Ok(())
}

/// Parses repeated "Name: Value" header arguments.
fn parse_headers(raw: &[String]) -> Result<Option<HashMap<String, String>>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let mut headers = HashMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once(':')
            .with_context(|| format!("invalid header '{entry}', expected 'Name: Value'"))?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(Some(headers))
}
