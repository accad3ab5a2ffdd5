use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

use tour_site::lifecycle::{remove_paths, DEFAULT_CLEANUP_PATHS};

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Management CLI for the tour site", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000", env = "SITE_URL")]
    url: String,

    #[arg(short, long, default_value = "", env = "ADMIN_API_KEY", hide_env_values = true)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check site status
    Status,
    /// List FAQs in display order
    Faqs,
    /// Publish a new FAQ
    AddFaq {
        #[arg(long)]
        question: String,
        /// HTML allowed; sanitized on display
        #[arg(long)]
        answer: String,
        #[arg(long)]
        order: Option<i32>,
    },
    /// Ask search engines to re-read the sitemap
    Ping,
    /// Remove generated artifact directories
    Cleanup {
        /// Directory the paths are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Report what would be removed without removing it
        #[arg(long)]
        dry_run: bool,
        /// Paths to remove (default: .cache, tmp, dist)
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Cleanup { root, dry_run, paths } = &cli.command {
        let paths = if paths.is_empty() {
            DEFAULT_CLEANUP_PATHS.iter().map(PathBuf::from).collect()
        } else {
            paths.clone()
        };
        let report = remove_paths(root, &paths, *dry_run)?;
        let verb = if report.dry_run { "Would remove" } else { "Removed" };
        for path in &report.removed {
            println!("{} {}", verb, path.display());
        }
        for path in &report.missing {
            println!("Not found {}", path.display());
        }
        return Ok(());
    }

    let client = reqwest::Client::new();
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Status => {
            client
                .get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Faqs => {
            client
                .get(format!("{}/admin/faqs", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::AddFaq { question, answer, order } => {
            client
                .post(format!("{}/admin/faqs", cli.url))
                .headers(headers)
                .json(&json!({ "question": question, "answer": answer, "order": order }))
                .send()
                .await?
        }
        Commands::Ping => {
            client
                .get(format!("{}/api/webhooks/ping-search", cli.url))
                .send()
                .await?
        }
        Commands::Cleanup { .. } => return Ok(()),
    };
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: site returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
