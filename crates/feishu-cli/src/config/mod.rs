//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── credentials: CredentialsConfig # App id, secret, account id, domain
//! ├── probe: ProbeConfig             # Cache TTL, probe timeout
//! └── http: ReqwestConfig            # HTTP timeout, user agent, base URL
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! feishu-probe --app-id cli_abc --app-secret s3cret --repeat 2
//!
//! # Or via environment variables
//! FEISHU_APP_ID=cli_abc FEISHU_APP_SECRET=s3cret feishu-probe --force
//! ```

mod credentials;

use std::process;

use clap::Parser;
pub use credentials::CredentialsConfig;
use feishu_probe::{ProbeConfig, ProbeOptions};
use feishu_reqwest::ReqwestConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "feishu-probe")]
#[command(about = "Check that a Feishu/Lark bot account is reachable")]
#[command(version)]
pub struct Cli {
    /// Bot account credentials.
    #[clap(flatten)]
    pub credentials: CredentialsConfig,

    /// Probe cache and timeout configuration.
    #[clap(flatten)]
    pub probe: ProbeConfig,

    /// HTTP client configuration.
    #[clap(flatten)]
    pub http: ReqwestConfig,

    /// Ignore cached outcomes and always ask the platform.
    #[arg(long)]
    pub force: bool,

    /// Number of probes to run through the same cache.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr; stdout carries the probe results.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Returns the per-call probe options.
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions { force: self.force }
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        self.credentials.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            cache_ttl_secs = self.probe.cache_ttl,
            probe_timeout_secs = self.probe.effective_timeout().as_secs(),
            http_timeout_secs = self.http.effective_timeout().as_secs(),
            base_url = self.http.base_url.as_ref().map(|url| url.as_str()),
            force = self.force,
            repeat = self.repeat,
            "Probe configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
