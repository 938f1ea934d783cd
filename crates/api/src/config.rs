use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Default bind port.
const DEFAULT_PORT: u16 = 8080;
/// Default access token lifetime in hours.
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
/// Upper bound on the access token lifetime: one year.
const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 365;
/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Startup configuration failure. Fatal: `main` logs it and exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Selects log formatting and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Debug,
    Release,
    Test,
}

impl RunMode {
    /// Read `RUN_MODE`, falling back to [`RunMode::Debug`] when unset or unknown.
    ///
    /// Used before the full config is loaded so tracing can be installed first.
    pub fn from_env() -> Self {
        std::env::var("RUN_MODE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(RunMode::Debug),
            "release" => Ok(RunMode::Release),
            "test" => Ok(RunMode::Test),
            other => Err(format!("expected debug, release or test, got '{other}'")),
        }
    }
}

/// Connection settings for the hosted remote store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    pub run_mode: RunMode,
    pub store: StoreConfig,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Required | Default                  |
    /// |------------------------|----------|--------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`                |
    /// | `PORT`                 | no       | `8080`                   |
    /// | `RUN_MODE`             | no       | `debug`                  |
    /// | `SUPABASE_URL`         | **yes**  | --                       |
    /// | `SUPABASE_KEY`         | **yes**  | --                       |
    /// | `JWT_SECRET`           | **yes**  | --                       |
    /// | `JWT_EXPIRY_HOURS`     | no       | `24` (max `8760`)        |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let host = optional("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", optional("PORT"), DEFAULT_PORT)?;
        let run_mode = parse_or("RUN_MODE", optional("RUN_MODE"), RunMode::default())?;

        let store = StoreConfig {
            url: required("SUPABASE_URL")?,
            key: required("SUPABASE_KEY")?,
        };

        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            expiry_hours: parse_or(
                "JWT_EXPIRY_HOURS",
                optional("JWT_EXPIRY_HOURS"),
                DEFAULT_JWT_EXPIRY_HOURS,
            )?,
        };
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&jwt.expiry_hours) {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_HOURS",
                value: jwt.expiry_hours.to_string(),
                reason: format!("must be between 1 and {MAX_JWT_EXPIRY_HOURS}"),
            });
        }

        let cors_origins: Vec<String> = optional("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            optional("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Self {
            host,
            port,
            run_mode,
            store,
            cors_origins,
            request_timeout_secs,
            jwt,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_KEY", "service-key"),
        ("JWT_SECRET", "jwt-secret"),
    ];

    #[test]
    fn defaults_apply_when_only_required_vars_set() {
        let config = ServerConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.run_mode, RunMode::Debug);
        assert_eq!(config.store.url, "https://project.supabase.co");
        assert_eq!(config.jwt.expiry_hours, 24);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "9000"),
            ("RUN_MODE", "Release"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("JWT_EXPIRY_HOURS", "2"),
        ]);
        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.run_mode, RunMode::Release);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.jwt.expiry_hours, 2);
    }

    #[test]
    fn missing_store_url_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&REQUIRED[1..])).unwrap_err();
        assert_matches!(err, ConfigError::Missing("SUPABASE_URL"));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[2] = ("JWT_SECRET", "   ");
        let err = ServerConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_matches!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn invalid_port_names_the_variable() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = ServerConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "PORT", ref value, .. } if value == "eighty");
    }

    #[test]
    fn unknown_run_mode_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("RUN_MODE", "staging"));
        let err = ServerConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "RUN_MODE", .. });
    }

    #[test]
    fn expiry_hours_must_be_within_bounds() {
        for raw in ["0", "-3", "8761", "9223372036854775807"] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push(("JWT_EXPIRY_HOURS", raw));
            let err = ServerConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert_matches!(err, ConfigError::Invalid { var: "JWT_EXPIRY_HOURS", .. }, "{raw}");
        }

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("JWT_EXPIRY_HOURS", "8760"));
        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.jwt.expires_in_secs(), 8760 * 3600);
    }
}
