use std::{path::PathBuf, sync::Arc};

use clap::{ArgGroup, Parser};
use osprey::{
    config::{load_config, load_proxies, AppConfig},
    core::{
        engine::Engine,
        error::OspreyError,
        governor::{Governor, GovernorConfig},
    },
    modules::recon::{email, now_ts, phone, username},
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "osprey",
    version,
    about = "OSINT existence probing: username / phone / email (ethical use only)",
    group(ArgGroup::new("subject").required(true).multiple(true))
)]
struct Cli {
    /// Username to check across the platform catalog
    #[arg(short = 'u', long, group = "subject")]
    username: Option<String>,
    /// Phone number to check (international format recommended)
    #[arg(short = 'p', long, group = "subject")]
    phone: Option<String>,
    /// Email to check for breaches (requires a HIBP API key)
    #[arg(short = 'e', long, group = "subject")]
    email: Option<String>,
    /// HaveIBeenPwned API key
    #[arg(long)]
    hibp_key: Option<String>,
    /// Max concurrent probe workers
    #[arg(long, default_value_t = 15)]
    workers: usize,
    /// Min random delay between requests (seconds)
    #[arg(long, default_value_t = 0.3)]
    min_delay: f64,
    /// Max random delay between requests (seconds)
    #[arg(long, default_value_t = 1.5)]
    max_delay: f64,
    /// Request timeout (seconds)
    #[arg(long, default_value_t = 15)]
    timeout: u64,
    /// File with proxy URLs (one per line) for rotation
    #[arg(long)]
    proxies_file: Option<PathBuf>,
    /// TOML file overriding the built-in platform/messaging catalogs
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Output JSON file (default stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("[!] Unexpected error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "osprey=debug,info" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // logs go to stderr so the JSON report owns stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> Result<(), OspreyError> {
    let cfg = load_config(cli.catalog.as_deref())?;
    let proxies = cli
        .proxies_file
        .as_deref()
        .map(load_proxies)
        .unwrap_or_default();

    let governor_cfg = GovernorConfig {
        workers: cli.workers.max(1),
        min_delay_secs: cli.min_delay,
        max_delay_secs: cli.max_delay,
        timeout_secs: cli.timeout,
    };
    let governor = Arc::new(Governor::new(proxies, &governor_cfg));
    let engine = Engine::new(&governor_cfg, cfg.user_agent.clone(), governor);

    let started = now_ts();
    let args = args_echo(&cli);

    let investigation = investigate(&cli, &engine, &cfg);
    tokio::pin!(investigation);
    let results = tokio::select! {
        results = &mut investigation => results,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n[!] Interrupted by user");
            std::process::exit(130);
        }
    };

    let aggregated = serde_json::json!({
        "meta": {
            "started": started,
            "finished": now_ts(),
            "args": args,
        },
        "results": results,
    });
    let rendered = serde_json::to_string_pretty(&aggregated)?;

    match &cli.output {
        Some(path) => match std::fs::write(path, &rendered) {
            Ok(()) => println!("[+] Results written to {}", path.display()),
            Err(err) => {
                eprintln!("[!] Could not write {}: {err}", path.display());
                println!("{rendered}");
            }
        },
        None => println!("{rendered}"),
    }

    Ok(())
}

async fn investigate(
    cli: &Cli,
    engine: &Engine,
    cfg: &AppConfig,
) -> serde_json::Map<String, serde_json::Value> {
    let mut results = serde_json::Map::new();

    if let Some(subject) = &cli.username {
        tracing::info!(username = %subject, "checking username");
        let report = username::check_username(engine, &cfg.platforms, subject).await;
        results.insert("username_check".to_string(), to_value(&report));
    }

    if let Some(subject) = &cli.phone {
        tracing::info!(phone = %subject, "checking phone");
        let report = phone::check_phone(engine, &cfg.messaging, subject).await;
        results.insert("phone_check".to_string(), to_value(&report));
    }

    if let Some(subject) = &cli.email {
        tracing::info!(email = %subject, "checking email breaches");
        let report = email::check_email_breaches(engine, subject, cli.hibp_key.as_deref()).await;
        results.insert("email_breaches".to_string(), to_value(&report));
    }

    results
}

fn to_value<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

fn args_echo(cli: &Cli) -> serde_json::Value {
    serde_json::json!({
        "username": cli.username,
        "phone": cli.phone,
        "email": cli.email,
        "hibp_key": cli.hibp_key.as_ref().map(|_| "<redacted>"),
        "workers": cli.workers,
        "min_delay": cli.min_delay,
        "max_delay": cli.max_delay,
        "timeout": cli.timeout,
        "proxies_file": cli.proxies_file.as_ref().map(|p| p.display().to_string()),
        "catalog": cli.catalog.as_ref().map(|p| p.display().to_string()),
        "output": cli.output.as_ref().map(|p| p.display().to_string()),
        "verbose": cli.verbose,
    })
}
