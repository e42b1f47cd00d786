//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TRIPBOARD_*` environment variables or a
//! configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use pagination::{PageLimits, PageRequestError};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Startup settings for the tripboard server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRIPBOARD")]
pub struct AppSettings {
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Permit a throwaway session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`; on unless set to `false`.
    pub cookie_secure: Option<bool>,
    /// Feed page size when the client sends none.
    pub default_page_size: Option<u32>,
    /// Largest feed page size a client may request.
    pub max_page_size: Option<u32>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

/// Settings that parse but cannot be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid page size limits: {0}")]
    PageLimits(#[from] PageRequestError),
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Feed page limits, falling back to 12 and 100.
    pub fn page_limits(&self) -> Result<PageLimits, SettingsError> {
        let defaults = PageLimits::default();
        let limits = PageLimits::new(
            self.default_page_size.unwrap_or(defaults.default_size()),
            self.max_page_size.unwrap_or(defaults.max_size()),
        )?;
        Ok(limits)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Whether the session cookie carries `Secure`.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 8] = [
        "TRIPBOARD_DATABASE_URL",
        "TRIPBOARD_BIND_ADDR",
        "TRIPBOARD_SESSION_KEY_FILE",
        "TRIPBOARD_SESSION_ALLOW_EPHEMERAL",
        "TRIPBOARD_COOKIE_SECURE",
        "TRIPBOARD_DEFAULT_PAGE_SIZE",
        "TRIPBOARD_MAX_PAGE_SIZE",
        "TRIPBOARD_POOL_MAX_SIZE",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> AppSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        AppSettings::load_from_iter([OsString::from("tripboard")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let settings = load_with(&[]);

        assert!(settings.database_url.is_none());
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(!settings.session_allow_ephemeral);
        assert!(settings.cookie_secure());
        let limits = settings.page_limits().expect("limits");
        assert_eq!((limits.default_size(), limits.max_size()), (12, 100));
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("TRIPBOARD_DATABASE_URL", "postgres://localhost/tripboard"),
            ("TRIPBOARD_BIND_ADDR", "127.0.0.1:9090"),
            ("TRIPBOARD_COOKIE_SECURE", "false"),
            ("TRIPBOARD_DEFAULT_PAGE_SIZE", "20"),
            ("TRIPBOARD_MAX_PAGE_SIZE", "50"),
            ("TRIPBOARD_POOL_MAX_SIZE", "4"),
        ]);

        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/tripboard")
        );
        assert_eq!(
            settings.bind_addr().expect("bind addr").port(),
            9090
        );
        assert!(!settings.cookie_secure());
        let limits = settings.page_limits().expect("limits");
        assert_eq!((limits.default_size(), limits.max_size()), (20, 50));
        assert_eq!(settings.pool_max_size(), 4);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = load_with(&[("TRIPBOARD_BIND_ADDR", "localhost")]);

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    fn default_page_size_above_max_is_rejected() {
        let settings = load_with(&[
            ("TRIPBOARD_DEFAULT_PAGE_SIZE", "200"),
            ("TRIPBOARD_MAX_PAGE_SIZE", "100"),
        ]);

        assert!(matches!(
            settings.page_limits(),
            Err(SettingsError::PageLimits(_))
        ));
    }
}
