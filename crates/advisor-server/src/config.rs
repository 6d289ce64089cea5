//! Server Configuration
//!
//! Everything comes from the environment (optionally via `.env`).

use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Sessions untouched for this long are ended
    pub session_ttl: Duration,

    /// How often idle sessions are swept
    pub sweep_interval: Duration,
}

impl ServerConfig {
    /// Read `BIND_ADDR`, `SESSION_TTL_SECS` and `SESSION_SWEEP_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into());
        let session_ttl = secs(&lookup, "SESSION_TTL_SECS", 1800)?;
        let sweep_interval = secs(&lookup, "SESSION_SWEEP_SECS", 60)?;

        Ok(Self {
            bind_addr,
            session_ttl,
            sweep_interval,
        })
    }
}

/// Positive whole seconds, or `default` when unset
fn secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration> {
    let Some(raw) = lookup(key) else {
        return Ok(Duration::from_secs(default));
    };

    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds, got '{raw}'"))?;
    anyhow::ensure!(value > 0, "{key} must be greater than zero");

    Ok(Duration::from_secs(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_session_timing() {
        let config = ServerConfig::from_lookup(|k| match k {
            "SESSION_TTL_SECS" => Some("120".into()),
            "SESSION_SWEEP_SECS" => Some(" 10 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.session_ttl, Duration::from_secs(120));
        assert_eq!(config.sweep_interval, Duration::from_secs(10));

        assert!(ServerConfig::from_lookup(|k| (k == "SESSION_TTL_SECS").then(|| "soon".into())).is_err());
        assert!(ServerConfig::from_lookup(|k| (k == "SESSION_SWEEP_SECS").then(|| "0".into())).is_err());
    }
}
