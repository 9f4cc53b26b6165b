//! CLI tool for inspecting affiliate-redirect decisions.
//!
//! Runs the same redirect pipeline as the server, without HTTP, so link
//! handling can be checked from a terminal before deploying a registry or
//! credentials change.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a link (prompts when the URL is omitted)
//! cargo run --bin linkctl -- resolve "https://www.zalando.de/foo?utm_source=x"
//!
//! # Skip shortlink expansion, print JSON
//! cargo run --bin linkctl -- resolve "https://amzn.to/3xyz" --no-expand --json
//!
//! # List the effective partner registry
//! cargo run --bin linkctl -- partners
//!
//! # Validate configuration
//! cargo run --bin linkctl -- config check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `affiliate_redirect::config`); a `.env` file is
//! loaded when present.

use affiliate_redirect::application::services::Resolution;
use affiliate_redirect::config::{self, Config};
use affiliate_redirect::domain::affiliate::is_valid_merchant_id;
use affiliate_redirect::domain::entities::Network;
use affiliate_redirect::error::AppError;
use affiliate_redirect::server::{build_redirect_service, load_registry};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

/// CLI tool for affiliate-redirect.
#[derive(Parser)]
#[command(name = "linkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve a link the way the redirect endpoint would
    Resolve {
        /// Target URL (prompted for when omitted)
        url: Option<String>,

        /// Do not follow brand shortlinks
        #[arg(long)]
        no_expand: bool,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// List partner domains and shortlink rules
    Partners,

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration, then print a masked summary
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = match cli.command {
        Commands::Config { .. } => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .without_time()
        .init();

    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Resolve {
            url,
            no_expand,
            json,
        } => resolve(&config, url, no_expand, json).await?,
        Commands::Partners => list_partners(&config)?,
        Commands::Config { action } => match action {
            ConfigAction::Check => check_config(&config),
        },
    }

    Ok(())
}

/// Runs the redirect pipeline for one URL and prints the decision.
async fn resolve(config: &Config, url: Option<String>, no_expand: bool, json: bool) -> Result<()> {
    let target = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Target URL").interact_text()?,
    };

    let mut service = build_redirect_service(config)?;
    if no_expand {
        service = service.without_expansion();
    }

    let result = service.resolve(&target).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&decision_json(&result))?);
    } else {
        print_decision(&target, &result);
    }

    Ok(())
}

fn decision_json(result: &Result<Resolution, AppError>) -> serde_json::Value {
    match result {
        Ok(r) => serde_json::json!({
            "ok": true,
            "status": 302,
            "location": r.location,
            "host": r.host,
            "network": r.network.map_or("none", |n| n.as_str()),
            "is_affiliate": r.is_affiliate,
            "expanded": r.expanded,
        }),
        Err(e) => serde_json::json!({
            "ok": false,
            "status": e.status().as_u16(),
            "reason": e.reason(),
            "host": e.host().unwrap_or_default(),
        }),
    }
}

fn print_decision(target: &str, result: &Result<Resolution, AppError>) {
    println!("{}", "🔗 Redirect decision".bright_blue().bold());
    println!();
    println!("  Input:    {}", target.cyan());

    match result {
        Ok(r) => {
            let network = r.network.map_or("none", |n| n.as_str());
            println!("  Host:     {}", r.host.cyan());
            println!("  Network:  {}", network.bright_white());
            println!(
                "  Tracked:  {}",
                if r.is_affiliate {
                    "yes".green()
                } else {
                    "no (passthrough)".yellow()
                }
            );
            if r.expanded {
                println!("  Expanded: {}", "yes".green());
            }
            println!();
            println!("{} {}", "302 →".green().bold(), r.location.bright_yellow());
        }
        Err(e) => {
            if let Some(host) = e.host() {
                println!("  Host:     {}", host.cyan());
            }
            println!();
            println!(
                "{} {} ({})",
                format!("❌ {}", e.status().as_u16()).red().bold(),
                e.reason().red(),
                e
            );
        }
    }
}

/// Prints the effective registry.
fn list_partners(config: &Config) -> Result<()> {
    let registry = load_registry(config)?;

    println!("{}", "🏬 Partner registry".bright_blue().bold());
    println!(
        "  Source: {}",
        config.partners_file.as_deref().unwrap_or("built-in").dimmed()
    );
    println!();

    println!(
        "{:<30} {:<8} {}",
        "DOMAIN".bright_white().bold(),
        "NETWORK".bright_white().bold(),
        "MERCHANT".bright_white().bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for entry in registry.partners() {
        let merchant = match &entry.network {
            Network::Awin { mid } if is_valid_merchant_id(mid) => mid.green(),
            Network::Awin { mid } => format!("{} (invalid, passthrough)", mid).yellow(),
            Network::Cj | Network::Amazon => "-".dimmed(),
        };
        println!(
            "{:<30} {:<8} {}",
            entry.domain.cyan(),
            entry.network.kind().as_str(),
            merchant
        );
    }

    println!();
    println!(
        "{}",
        "Amazon marketplaces (amazon.de, amazon.com, amazon.co.uk, ...) always classify as amazon."
            .dimmed()
    );

    println!();
    println!("{}", "Shortlinks:".bright_white().bold());
    if registry.shortlinks().is_empty() {
        println!("  {}", "none".dimmed());
    }
    for rule in registry.shortlinks() {
        println!(
            "  {} → {}",
            rule.short_domain.cyan(),
            rule.brand_root.bright_white()
        );
    }

    Ok(())
}

/// Prints the masked configuration summary.
fn check_config(config: &Config) {
    config.print_summary();
    println!();
    println!("{}", "✅ Configuration is valid".green().bold());
}
