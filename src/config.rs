// src/config.rs
//! Command line options and logging setup.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::dispatcher::FailurePolicy;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Report memory, cpu, partitions, network interfaces and docker containers.
///
/// Options go before the selectors; everything after the first selector is
/// treated as a selector. Run with -h for the selector list.
#[derive(Debug, Parser)]
#[command(
    name = "sysdiag",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Keep running the remaining collectors when one fails and report every
    /// failure at the end.
    #[arg(long)]
    pub keep_going: bool,

    /// Docker CLI used to list containers.
    #[arg(long, env = "SYSDIAG_DOCKER", default_value = "docker", value_name = "PATH")]
    pub docker_bin: String,

    /// Tracing filter directive, e.g. "sysdiag=debug". Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER", value_parser = parse_log_filter)]
    pub log_filter: Option<String>,

    /// Selectors (-vm, -cp, -pp, -ni, -c) and utility flags (-h/-help, -a/-all).
    #[arg(
        value_name = "SELECTOR",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub selectors: Vec<String>,
}

impl Cli {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        }
    }

    /// Resolves the log filter: flag first, then RUST_LOG, then the default.
    pub fn env_filter(&self) -> EnvFilter {
        self.log_filter
            .as_deref()
            .map(EnvFilter::new)
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

/// Rejects directives tracing would silently drop.
fn parse_log_filter(raw: &str) -> Result<String, String> {
    EnvFilter::try_new(raw)
        .map(|_| raw.to_string())
        .map_err(|e| format!("invalid log filter: {e}"))
}

/// Function to install the stderr tracing subscriber.
pub fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(cli.env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
