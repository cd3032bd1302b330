//! Page-layer configuration.

use std::time::Duration;

use storefront_client::ConfigError;

/// How long a notification stays up before removing itself.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    pub notification_ttl: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

impl PageConfig {
    /// Read `STOREFRONT_NOTIFICATION_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup("STOREFRONT_NOTIFICATION_MS") {
            let ms = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "STOREFRONT_NOTIFICATION_MS",
                expected: "a non-negative integer",
                value: raw.clone(),
            })?;
            config.notification_ttl = Duration::from_millis(ms);
        }
        Ok(config)
    }
}
