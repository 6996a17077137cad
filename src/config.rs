use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line configuration. Every option can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Action script CSV file (`action,target,value`)
    pub script: PathBuf,

    /// Base URL of the store REST API. Without it, an in-memory demo backend is used.
    #[arg(long, env = "STOREFRONT_API_URL")]
    pub api_url: Option<String>,

    /// Base URL of the ViaCEP-compatible postal lookup service.
    /// Defaults to the public ViaCEP when `--api-url` is set.
    #[arg(long, env = "STOREFRONT_POSTAL_URL")]
    pub postal_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "STOREFRONT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// How long notifications stay visible, in milliseconds
    #[arg(long, env = "STOREFRONT_NOTICE_TTL_MS", default_value_t = 3000)]
    pub notice_ttl_ms: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}
