use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_RELAY_PATH: &str = "/api/webhook";
const DEFAULT_WIDGET_PAGE: &str = "/try-it-out";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 8000;

/// Paths mounted by the router itself; the relay must not shadow them.
const RESERVED_PATHS: [&str; 2] = ["/health", "/api/v1"];

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Third-party webhook that receives relayed submissions.
    pub upstream_webhook_url: String,
    /// Path the relay is mounted on.
    pub relay_path: String,
    pub upstream_timeout: Duration,
    /// Page reported in `meta.page` of submissions.
    pub widget_page: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_webhook_url = lookup("UPSTREAM_WEBHOOK_URL")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'UPSTREAM_WEBHOOK_URL' is not set")?;

        let relay_path = lookup("RELAY_PATH").unwrap_or_else(|| DEFAULT_RELAY_PATH.to_string());
        validate_relay_path(&relay_path)?;

        let timeout_ms = match lookup("UPSTREAM_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_MS must be a whole number of milliseconds")?,
            None => DEFAULT_UPSTREAM_TIMEOUT_MS,
        };

        Ok(Config {
            upstream_webhook_url,
            relay_path,
            upstream_timeout: Duration::from_millis(timeout_ms),
            widget_page: lookup("WIDGET_PAGE").unwrap_or_else(|| DEFAULT_WIDGET_PAGE.to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn validate_relay_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        bail!("RELAY_PATH must start with '/', got '{path}'");
    }
    if path.split('/').any(|seg| seg.starts_with(':') || seg.starts_with('*')) {
        bail!("RELAY_PATH must be a literal path without ':' or '*' segments, got '{path}'");
    }
    let normalized = path.trim_end_matches('/');
    for reserved in RESERVED_PATHS {
        if normalized == reserved || normalized.starts_with(&format!("{reserved}/")) {
            bail!("RELAY_PATH '{path}' collides with the built-in route '{reserved}'");
        }
    }
    Ok(())
}

#[cfg(test)]
impl Config {
    pub fn for_tests(upstream_webhook_url: &str, upstream_timeout: Duration) -> Self {
        Config {
            upstream_webhook_url: upstream_webhook_url.to_string(),
            relay_path: DEFAULT_RELAY_PATH.to_string(),
            upstream_timeout,
            widget_page: DEFAULT_WIDGET_PAGE.to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup_from(&[("UPSTREAM_WEBHOOK_URL", "https://hooks.test/x")]))
                .unwrap();
        assert_eq!(config.relay_path, "/api/webhook");
        assert_eq!(config.upstream_timeout, Duration::from_millis(8000));
        assert_eq!(config.widget_page, "/try-it-out");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_upstream_fails() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_WEBHOOK_URL"));
    }

    #[test]
    fn test_blank_upstream_fails() {
        assert!(Config::from_lookup(lookup_from(&[("UPSTREAM_WEBHOOK_URL", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("UPSTREAM_WEBHOOK_URL", "https://hooks.test/x"),
            ("RELAY_PATH", "/hooks/lead"),
            ("UPSTREAM_TIMEOUT_MS", "2500"),
            ("WIDGET_PAGE", "/pricing"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.relay_path, "/hooks/lead");
        assert_eq!(config.upstream_timeout, Duration::from_millis(2500));
        assert_eq!(config.widget_page, "/pricing");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_relative_relay_path_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("UPSTREAM_WEBHOOK_URL", "https://hooks.test/x"),
            ("RELAY_PATH", "api/webhook"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("RELAY_PATH"));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        assert!(Config::from_lookup(lookup_from(&[
            ("UPSTREAM_WEBHOOK_URL", "https://hooks.test/x"),
            ("UPSTREAM_TIMEOUT_MS", "soon"),
        ]))
        .is_err());
    }

    #[test]
    fn test_relay_path_colliding_with_builtin_routes_rejected() {
        for path in ["/health", "/api/v1/assessment", "/api/v1", "/api/v1/contact/gate/"] {
            let err = Config::from_lookup(lookup_from(&[
                ("UPSTREAM_WEBHOOK_URL", "https://hooks.test/x"),
                ("RELAY_PATH", path),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains("collides"), "{path}: {err}");
        }
    }

    #[test]
    fn test_parameterised_relay_path_rejected() {
        for path in ["/hooks/:id", "/hooks/*rest"] {
            let err = Config::from_lookup(lookup_from(&[
                ("UPSTREAM_WEBHOOK_URL", "https://hooks.test/x"),
                ("RELAY_PATH", path),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains("literal path"), "{path}: {err}");
        }
    }

    #[test]
    fn test_relay_path_sharing_api_prefix_allowed() {
        let config = Config::from_lookup(lookup_from(&[
            ("UPSTREAM_WEBHOOK_URL", "https://hooks.test/x"),
            ("RELAY_PATH", "/api/v1-hooks"),
        ]))
        .unwrap();
        assert_eq!(config.relay_path, "/api/v1-hooks");
    }
}
