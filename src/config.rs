// Configuration loading
// Defaults, then an optional config.toml, then APP_* environment variables

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::inventory::generator::DEFAULT_INVENTORY_SIZE;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // Number of synthetic listings generated at startup
    pub inventory_size: usize,
    // Fixed seed for a reproducible catalog
    pub inventory_seed: Option<u64>,
    // Base URL of an external inventory API; listing queries are proxied there when set
    pub upstream_url: Option<String>,
    pub upstream_timeout_ms: u64,
    pub ping_message: String,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            .set_default("server_address", DEFAULT_SERVER_ADDRESS)?
            .set_default("inventory_size", DEFAULT_INVENTORY_SIZE as i64)?
            .set_default("upstream_timeout_ms", DEFAULT_UPSTREAM_TIMEOUT_MS as i64)?
            .set_default("ping_message", "ping")?
            .add_source(File::with_name("config").required(false))
            // e.g. APP_INVENTORY_SIZE, APP_UPSTREAM_URL
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// Upstream base URL, ignoring a blank value.
    pub fn upstream(&self) -> Option<&str> {
        self.upstream_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            inventory_size: DEFAULT_INVENTORY_SIZE,
            inventory_seed: None,
            upstream_url: None,
            upstream_timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
            ping_message: "ping".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_upstream_is_treated_as_unset() {
        let mut settings = Settings::default();
        assert_eq!(settings.upstream(), None);

        settings.upstream_url = Some("   ".into());
        assert_eq!(settings.upstream(), None);

        settings.upstream_url = Some(" http://inventory.local/api ".into());
        assert_eq!(settings.upstream(), Some("http://inventory.local/api"));
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.inventory_size, 50_000);
        assert_eq!(settings.upstream_timeout(), Duration::from_secs(3));
    }
}
