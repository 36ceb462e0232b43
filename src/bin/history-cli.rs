use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "history-cli")]
#[command(about = "Client for the wallet transaction history service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recent transactions for a wallet address
    Fetch {
        address: String,
        /// Print only the number of records instead of the full body
        #[arg(long)]
        count: bool,
    },
    /// List result files written by the service
    Saved {
        #[arg(short, long, default_value = "responses")]
        dir: PathBuf,
        /// Only show files for this address
        #[arg(short, long)]
        address: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { address, count } => {
            let url = transactions_url(&cli.url, &address)?;
            let client = reqwest::Client::builder().build()?;
            let res = client.get(url).send().await?;
            print_response(res, count).await?;
        }
        Commands::Saved { dir, address } => {
            list_saved(&dir, address.as_deref())?;
        }
    }

    Ok(())
}

/// Endpoint URL for `address`, with the address encoded as one path segment.
fn transactions_url(base: &str, address: &str) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("Not a base URL: {}", base))?
        .pop_if_empty()
        .push("transactions")
        .push(address);
    Ok(url)
}

async fn print_response(res: reqwest::Response, count_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    if count_only {
        let n = json["transactions"].as_array().map(Vec::len).unwrap_or(0);
        println!("{}", json["message"].as_str().unwrap_or_default());
        println!("{} transactions", n);
    } else {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

fn list_saved(dir: &Path, address: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json"))
        .filter(|name| match address {
            Some(a) => name.starts_with(&format!("{}_", a)),
            None => true,
        })
        .collect();
    names.sort();

    if names.is_empty() {
        eprintln!("No result files in {}", dir.display());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
