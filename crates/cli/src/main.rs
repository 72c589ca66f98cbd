use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Method;
use tracing_subscriber::EnvFilter;
use verdant_api::{MOST_POPULAR_PATH, MOST_SUSTAINABLE_PATH, ProductCatalog, VerdantClient};
use verdant_types::Product;
use verdant_util::{AppConfig, ConfigOverrides, redact_sensitive};

/// Environment variable overriding the TUI log file location.
const LOG_FILE_ENV: &str = "VERDANT_LOG_FILE";

/// Browse the Verdant product catalog.
///
/// Without a subcommand the terminal UI starts.
#[derive(Parser, Debug)]
#[command(name = "verdant", version, about)]
struct Cli {
    /// Backend base URL, e.g. http://127.0.0.1:3000
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    token: Option<String>,

    /// Theme id (dracula, nord, ansi256)
    #[arg(long)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one of the home-screen product lists as JSON
    Products {
        #[arg(value_enum)]
        list: ProductList,

        /// Print the request that would be sent instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ProductList {
    Popular,
    Sustainable,
}

impl ProductList {
    fn path(self) -> &'static str {
        match self {
            ProductList::Popular => MOST_POPULAR_PATH,
            ProductList::Sustainable => MOST_SUSTAINABLE_PATH,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let tui_mode = cli.command.is_none();
    init_tracing(tui_mode)?;

    let config = AppConfig::load()?.with_overrides(ConfigOverrides {
        base_url: cli.base_url,
        auth_token: cli.token,
        theme: cli.theme,
    });

    match cli.command {
        None => verdant_tui::run(config).await,
        Some(Command::Products { list, dry_run }) => run_products(&config, list, dry_run).await,
    }
}

/// Log to a file while the TUI owns the terminal, to stderr otherwise.
fn init_tracing(tui_mode: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tui_mode {
        let log_path = log_file_path();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("failed to open log file {}", log_path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

fn log_file_path() -> PathBuf {
    if let Some(path) = std::env::var(LOG_FILE_ENV).ok().filter(|p| !p.trim().is_empty()) {
        return verdant_util::expand_tilde(&path);
    }
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verdant")
        .join("verdant.log")
}

async fn run_products(config: &AppConfig, list: ProductList, dry_run: bool) -> Result<()> {
    let client = verdant_tui::build_client(config)?;

    if dry_run {
        let out = describe_request(&client, list)?;
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let products: Vec<Product> = match list {
        ProductList::Popular => client.most_popular().await?,
        ProductList::Sustainable => client.most_sustainable().await?.into_iter().map(Product::from).collect(),
    };
    tracing::debug!(count = products.len(), ?list, "fetched products");
    println!("{}", serde_json::to_string_pretty(&products)?);
    Ok(())
}

/// JSON description of the request for `list`, with secrets redacted.
fn describe_request(client: &VerdantClient, list: ProductList) -> Result<serde_json::Value> {
    let req = client.request(Method::GET, list.path()).build()?;
    let mut headers_out = serde_json::Map::new();
    for (name, value) in req.headers().iter() {
        let val = value.to_str().unwrap_or("");
        let line = format!("{}: {}", name.as_str(), val);
        let redacted = redact_sensitive(&line);
        let out_val = redacted.split_once(':').map(|(_, v)| v.trim()).unwrap_or("").to_string();
        headers_out.insert(name.as_str().to_string(), serde_json::Value::String(out_val));
    }
    Ok(serde_json::json!({
        "method": req.method().to_string(),
        "url": req.url().to_string(),
        "headers": headers_out,
    }))
}
