//! litellm-budget: status line for LiteLLM key budgets
//!
//! Prints one line describing the current key's spend, or a short
//! classified error. Intended to be run by a status-line host that pipes
//! session data on stdin.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use litellm_budget::{BudgetCache, BudgetStatus, Credentials, ErrorSummary, Settings};
use serde::Serialize;
use tracing::debug;

/// LiteLLM budget status line
#[derive(Parser)]
#[command(name = "litellm-budget")]
#[command(version = litellm_budget::PKG_VERSION)]
#[command(about = "Print the spend and budget of a LiteLLM API key")]
struct Args {
    /// Proxy base URL (default: $ANTHROPIC_BASE_URL, then $LITELLM_PROXY_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token (default: $ANTHROPIC_AUTH_TOKEN, then $LITELLM_PROXY_API_KEY)
    #[arg(long)]
    token: Option<String>,

    /// Config file (default: ~/.config/litellm-budget/config.toml if present)
    #[arg(short, long, env = "LITELLM_BUDGET_CONFIG")]
    config: Option<PathBuf>,

    /// Emit JSON instead of a text line
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum JsonOutput {
    Ok(BudgetStatus),
    Error {
        #[serde(flatten)]
        summary: ErrorSummary,
        detail: String,
    },
}

fn print_error(
    summary: ErrorSummary,
    detail: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let out = JsonOutput::Error { summary, detail };
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing on stderr (default: warn; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    // Status-line hosts send session data we don't use; drain it so they
    // never block on a full pipe.
    let mut stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut discard = Vec::new();
        let _ = stdin.read_to_end(&mut discard);
    }

    let settings = Settings::load(args.config.as_deref())?;

    let credentials = match Credentials::resolve(args.token, args.base_url, &settings, |key| {
        std::env::var(key).ok()
    }) {
        Ok(creds) => creds,
        Err(e) => return print_error(ErrorSummary::from(&e), e.to_string(), args.json),
    };
    debug!(base_url = %credentials.base_url, "resolved credentials");

    let cache = BudgetCache::builder()
        .settings(&settings)
        .base_url(credentials.base_url.as_str())
        .build()?;

    match cache.get(&credentials.token).await {
        Ok(info) => {
            let status = BudgetStatus::from_key_info(&info, chrono::Utc::now());
            if args.json {
                println!("{}", serde_json::to_string(&JsonOutput::Ok(status))?);
            } else {
                println!("{status}");
            }
            Ok(())
        }
        Err(e) => print_error(ErrorSummary::from(&e), e.to_string(), args.json),
    }
}
