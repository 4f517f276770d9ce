//! paramram — entry point.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use paramram::{Aggregator, ScanConfig};
use paramram_cli::{print_parameters, read_urls, resolve_output_path, save_parameters};

#[derive(Parser)]
#[command(
    name = "paramram",
    about = "Harvest candidate HTTP parameter names from the URLs on stdin",
    version
)]
struct Cli {
    /// Save results to the output file instead of printing them.
    #[arg(short, long)]
    save: bool,

    /// Output file used with --save (default: $PARAMRAM_OUTPUT or ~/database/parameters.txt).
    #[arg(short, long)]
    output: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = paramram::config::DEFAULT_TIMEOUT_MS)]
    timeout: u64,

    /// Largest response body accepted, in bytes; bigger pages and bundles are skipped.
    #[arg(long, default_value_t = paramram::config::DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Number of URLs scanned concurrently.
    #[arg(short, long, default_value_t = paramram::config::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Number of linked scripts/stylesheets fetched concurrently per page.
    #[arg(long, default_value_t = paramram::config::DEFAULT_RESOURCE_CONCURRENCY)]
    resource_concurrency: usize,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            timeout_ms: self.timeout,
            concurrency: self.concurrency,
            resource_concurrency: self.resource_concurrency,
            max_body_bytes: self.max_body_bytes,
        }
        .normalized()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   paramram completions bash > ~/.local/share/bash-completion/completions/paramram
    ///   paramram completions zsh > ~/.zfunc/_paramram
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "paramram", &mut std::io::stdout());
        return Ok(());
    }

    let config = cli.scan_config();

    let urls = read_urls(std::io::stdin().lock()).context("reading URLs from stdin")?;
    let aggregator = Aggregator::new(&config)?;
    let report = aggregator.run(&urls).await;

    for failure in &report.failures {
        eprintln!("could not process URL {}: {}", failure.url, failure.error);
    }

    if cli.save {
        let path = resolve_output_path(cli.output.as_deref());
        save_parameters(&path, &report.parameters)?;
    } else {
        print_parameters(&mut std::io::stdout().lock(), &report.parameters)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags_match_scan_config() {
        let cli = Cli::try_parse_from(["paramram"]).unwrap();
        assert_eq!(cli.scan_config(), ScanConfig::default());
    }

    #[test]
    fn test_max_body_bytes_flag() {
        let cli = Cli::try_parse_from(["paramram", "--max-body-bytes", "20000000", "-c", "0"]).unwrap();
        let config = cli.scan_config();
        assert_eq!(config.max_body_bytes, 20_000_000);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout_ms, paramram::config::DEFAULT_TIMEOUT_MS);
    }
}
