// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Base64-encoded symmetric signing key (>= 32 bytes) | Required |
//! | `JWT_TTL_SECONDS` | Token lifetime in seconds | `3600` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `PUBLIC_PATHS` | Comma-separated path prefixes exempt from enforcement | `/health` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_USERS` | Directory seeding, `subject=authority\|authority;...` | Unset |

use std::env;

use thiserror::Error;

use crate::auth::token::SigningKey;

/// Configuration loading failure. Fails startup, never a request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Logging output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base64-encoded signing secret; decode with [`Config::signing_key`]
    jwt_secret: String,
    pub token_ttl_seconds: i64,
    pub public_paths: Vec<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_seconds = match lookup("JWT_TTL_SECONDS") {
            Some(raw) => raw.parse::<i64>().ok().filter(|ttl| *ttl > 0).ok_or_else(|| {
                ConfigError::Invalid {
                    var: "JWT_TTL_SECONDS",
                    reason: format!("expected a positive number of seconds, got {raw:?}"),
                }
            })?,
            None => 3600,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("expected a port number, got {raw:?}"),
            })?,
            None => 8080,
        };

        let public_paths = lookup("PUBLIC_PATHS")
            .unwrap_or_else(|| "/health".to_string())
            .split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_owned)
            .collect();

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    reason: format!("expected \"json\" or \"pretty\", got {other:?}"),
                })
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            jwt_secret,
            token_ttl_seconds,
            public_paths,
            log_format,
        })
    }

    /// Decode the configured signing secret.
    pub fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        SigningKey::from_base64(&self.jwt_secret).map_err(|err| ConfigError::Invalid {
            var: "JWT_SECRET",
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64ct::{Base64, Encoding};
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| value.to_string())
    }

    fn secret() -> String {
        Base64::encode_string(&[42u8; 32])
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let secret = secret();
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", &secret)])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_seconds, 3600);
        assert_eq!(config.public_paths, vec!["/health"]);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.signing_key().is_ok());
    }

    #[test]
    fn missing_secret_fails() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn invalid_secret_fails_at_key_decoding() {
        let config =
            Config::from_lookup(lookup_from(&[("JWT_SECRET", "!!not base64!!")])).unwrap();
        assert!(matches!(
            config.signing_key(),
            Err(ConfigError::Invalid { var: "JWT_SECRET", .. })
        ));
    }

    #[test]
    fn ttl_must_be_a_positive_number() {
        let secret = secret();
        for bad in ["0", "-5", "soon"] {
            let result = Config::from_lookup(lookup_from(&[
                ("JWT_SECRET", &secret),
                ("JWT_TTL_SECONDS", bad),
            ]));
            assert!(matches!(
                result,
                Err(ConfigError::Invalid { var: "JWT_TTL_SECONDS", .. })
            ));
        }
    }

    #[test]
    fn public_paths_are_split_and_trimmed() {
        let secret = secret();
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", &secret),
            ("PUBLIC_PATHS", "/health, /v1/auth ,"),
        ]))
        .unwrap();
        assert_eq!(config.public_paths, vec!["/health", "/v1/auth"]);
    }

    #[test]
    fn unknown_log_format_fails() {
        let secret = secret();
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", &secret),
            ("LOG_FORMAT", "xml"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { var: "LOG_FORMAT", .. })
        ));
    }
}
