//! Listing Sniper — Entry Point
//!
//! Watches the Coinbase Exchange product list and places a limit buy on
//! every newly listed pair. Runs until interrupted.
//!
//! Wiring sequence:
//! 1. Parse CLI (budget + keys file, optional settings file)
//! 2. Allocate this session's log file and init tracing (stdout + file)
//! 3. Load optional config.toml + validate
//! 4. Load API keys and build the signed REST client
//! 5. Seed the listing monitor (fee rate + initial catalog)
//! 6. Poll until Ctrl-C

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, warn};

use listing_sniper::adapters::coinbase::{
  CoinbaseAuth, CoinbaseClient, CoinbaseClientConfig, CoinbaseGateway,
};
use listing_sniper::adapters::logging::{init_logging, session_log_path, TracingSink};
use listing_sniper::config::loader::{load_config, load_credentials};
use listing_sniper::config::AppConfig;
use listing_sniper::ports::MessageSink;
use listing_sniper::usecases::{ListingMonitor, MonitorConfig};

/// Buys newly listed Coinbase pairs as soon as they appear.
#[derive(Debug, Parser)]
#[command(name = "listing-sniper", version, about)]
struct Cli {
  /// Amount in settlement currency to spend on each new listing.
  #[arg(short = 'd', long = "amount_to_trade_usd")]
  amount_to_trade_usd: Decimal,

  /// Path to the JSON file with the Coinbase API keys.
  #[arg(long = "coinbase_api_keys_file", visible_alias = "coinbase_api")]
  coinbase_api_keys_file: PathBuf,

  /// Optional TOML settings file (endpoints, markup, pacing).
  #[arg(long)]
  config: Option<PathBuf>,

  /// Directory for session log files.
  #[arg(long, default_value = "saved_data")]
  log_dir: PathBuf,

  /// Log level (trace, debug, info, warn, error).
  #[arg(short, long, default_value = "info")]
  log_level: String,
}

/// Rewrite the historical single-dash `-coinbase_api` flag into the
/// `--coinbase_api` form clap understands.
fn normalize_legacy_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
  args
    .into_iter()
    .map(|arg| match arg.to_str() {
      Some(s) if s == "-coinbase_api" || s.starts_with("-coinbase_api=") => {
        OsString::from(format!("-{s}"))
      }
      _ => arg,
    })
    .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  // ── 1. CLI ──────────────────────────────────────────────
  let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));
  anyhow::ensure!(
    cli.amount_to_trade_usd > Decimal::ZERO,
    "amount_to_trade_usd must be positive, got {}",
    cli.amount_to_trade_usd
  );

  // ── 2. Session log + tracing ────────────────────────────
  let log_path = session_log_path(&cli.log_dir)
    .with_context(|| format!("Failed to prepare log directory {}", cli.log_dir.display()))?;
  init_logging(&cli.log_level, &log_path)?;

  info!(
    version = env!("CARGO_PKG_VERSION"),
    log_file = %log_path.display(),
    "Starting listing sniper"
  );

  // ── 3. Settings ─────────────────────────────────────────
  let config = match &cli.config {
    Some(path) => load_config(path).context("Failed to load configuration")?,
    None => AppConfig::default(),
  };

  let sink = Arc::new(TracingSink);
  sink.emit(&format!("Info: Amount to trade - {}.", cli.amount_to_trade_usd));

  // ── 4. Credentials + REST client ────────────────────────
  let credentials = load_credentials(&cli.coinbase_api_keys_file)
    .context("Failed to load Coinbase API keys")?;
  let auth = CoinbaseAuth::new(&credentials).context("Invalid Coinbase API secret")?;
  let client = CoinbaseClient::new(
    auth,
    CoinbaseClientConfig {
      base_url: config.api.rest_url.clone(),
      timeout: config.api.timeout(),
    },
  )
  .context("Failed to create Coinbase client")?;
  let gateway = Arc::new(CoinbaseGateway::new(
    client,
    config.trading.settlement_currency.clone(),
  ));
  sink.emit("Set up Coinbase Pro API");

  // ── 5. Seed monitor ─────────────────────────────────────
  let monitor = ListingMonitor::start(
    gateway,
    Arc::clone(&sink),
    MonitorConfig::new(&config, cli.amount_to_trade_usd),
  )
  .await
  .context("Failed to fetch fee rate or initial product list")?;

  // ── 6. Poll until interrupted ───────────────────────────
  tokio::select! {
    () = monitor.run() => {}
    signal = tokio::signal::ctrl_c() => {
      signal.context("Failed to listen for Ctrl-C")?;
      warn!("Interrupted; orders already submitted are left on the book");
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(normalize_legacy_flags(args.iter().map(OsString::from)))
  }

  #[test]
  fn test_legacy_flags_parse() {
    let cli = parse(&["listing-sniper", "-d", "10", "-coinbase_api", "keys.json"]).unwrap();
    assert_eq!(cli.amount_to_trade_usd, Decimal::TEN);
    assert_eq!(cli.coinbase_api_keys_file, PathBuf::from("keys.json"));
    assert_eq!(cli.log_dir, PathBuf::from("saved_data"));
  }

  #[test]
  fn test_long_flags_parse() {
    let cli = parse(&[
      "listing-sniper",
      "--amount_to_trade_usd",
      "25.5",
      "--coinbase_api_keys_file=keys.json",
      "--log-dir",
      "/tmp/logs",
    ])
    .unwrap();
    assert_eq!(cli.amount_to_trade_usd.to_string(), "25.5");
    assert_eq!(cli.log_dir, PathBuf::from("/tmp/logs"));
  }

  #[test]
  fn test_both_flags_required() {
    assert!(parse(&["listing-sniper", "-d", "10"]).is_err());
    assert!(parse(&["listing-sniper", "-coinbase_api", "keys.json"]).is_err());
  }

  #[test]
  fn test_non_numeric_amount_rejected() {
    assert!(parse(&["listing-sniper", "-d", "ten", "-coinbase_api", "k"]).is_err());
  }

  #[test]
  fn test_normalize_leaves_other_args_alone() {
    let out = normalize_legacy_flags(["a", "-d", "-coinbase_api=x"].map(OsString::from));
    assert_eq!(out, ["a", "-d", "--coinbase_api=x"].map(OsString::from));
  }
}
