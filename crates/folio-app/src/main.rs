//! folio headless driver.
//!
//! Replays a scripted session against the page controller and prints the
//! final page snapshot as JSON.
//!
//! Usage:
//!   folio-app                          run the built-in demo session
//!   folio-app session.toml             replay a session file
//!   folio-app --content page.toml      use other portfolio content
//!   folio-app --config folio.toml      override configuration
//!
//! The config path may also come from the `FOLIO_CONFIG` env var.

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};

use folio_core::Portfolio;
use folio_core::config::FolioConfig;

use scenario::Scenario;

struct Args {
    scenario: Option<PathBuf>,
    content: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        scenario: None,
        content: None,
        config: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--content" => {
                let path = iter.next().context("--content needs a path")?;
                args.content = Some(PathBuf::from(path));
            },
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            },
            other if other.starts_with("--") => anyhow::bail!("unknown option {other}"),
            other => args.scenario = Some(PathBuf::from(other)),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    // Resolve config from CLI arg, FOLIO_CONFIG env var, or defaults.
    let config_path = args
        .config
        .or_else(|| std::env::var_os("FOLIO_CONFIG").map(PathBuf::from));
    let config = match config_path {
        Some(path) => FolioConfig::from_path(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FolioConfig::default(),
    };

    let portfolio = match &args.content {
        Some(path) => Portfolio::from_path(path)
            .with_context(|| format!("loading content {}", path.display()))?,
        None => Portfolio::builtin()?,
    };

    let scenario = match &args.scenario {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading session {}", path.display()))?;
            Scenario::from_toml_str(&text)?
        },
        None => Scenario::demo()?,
    };
    log::info!(
        "Replaying session '{}' ({} steps) for {}",
        scenario.name,
        scenario.steps.len(),
        portfolio.owner
    );

    let snapshot = scenario.run(portfolio, &config)?;
    println!("{}", snapshot.to_json_pretty()?);
    Ok(())
}
