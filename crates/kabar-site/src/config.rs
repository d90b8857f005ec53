//! Application configuration loaded from TOML.
//!
//! The config file is selected by the `APP_ENV` environment variable:
//! `config/config.{env}.toml`, defaulting to the `dev` environment. A
//! missing file yields an empty config and the built-in defaults.

use kabar_core::error::Error;
use std::{env, fs, net::SocketAddr, path::Path};
use toml::{Table, Value};

/// Which store backend the site talks to.
#[derive(Debug, Clone)]
pub(crate) enum StoreBackend {
    /// The in-process memory backend, loaded with the seed dataset.
    Memory,
    /// A remote CMS over REST.
    Http {
        /// Base URL of the CMS.
        base_url: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub(crate) struct SiteConfig {
    env: String,
    config: Table,
}

impl SiteConfig {
    /// Loads the config file for the current environment.
    pub(crate) fn load() -> Result<Self, Error> {
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_owned());
        let path = format!("config/config.{env}.toml");
        let config = if Path::new(&path).exists() {
            let content = fs::read_to_string(&path)
                .map_err(|err| Error::with_source(format!("failed to read `{path}`"), err))?;
            match content.parse::<Value>() {
                Ok(Value::Table(table)) => table,
                Ok(_) => return Err(Error::new(format!("`{path}` should be a table"))),
                Err(err) => {
                    return Err(Error::with_source(format!("failed to parse `{path}`"), err));
                }
            }
        } else {
            tracing::warn!(%path, "config file not found, using defaults");
            Table::new()
        };
        Ok(Self { env, config })
    }

    /// Returns the environment name.
    #[inline]
    pub(crate) fn env(&self) -> &str {
        &self.env
    }

    /// Returns the listener address of the main server.
    pub(crate) fn listener(&self) -> SocketAddr {
        let main = self.config.get_table("main");
        let host = main
            .and_then(|t| t.get_str("host"))
            .unwrap_or("127.0.0.1");
        let port = main.and_then(|t| t.get_u16("port")).unwrap_or(6080);
        format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], port)))
    }

    /// Returns the configured store backend.
    pub(crate) fn store_backend(&self) -> Result<StoreBackend, Error> {
        let store = self.config.get_table("store");
        match store.and_then(|t| t.get_str("backend")).unwrap_or("memory") {
            "memory" => Ok(StoreBackend::Memory),
            "http" => {
                let base_url = store
                    .and_then(|t| t.get_str("base-url"))
                    .ok_or_else(|| Error::new("the `store.base-url` field should be specified"))?;
                Ok(StoreBackend::Http {
                    base_url: base_url.to_owned(),
                })
            }
            other => Err(Error::new(format!("unknown store backend `{other}`"))),
        }
    }

    /// Returns the number of articles per listing page.
    pub(crate) fn page_size(&self) -> u64 {
        self.config
            .get_table("site")
            .and_then(|t| t.get_u64("page-size"))
            .unwrap_or(12)
    }

    /// Returns the canonical base URL used in the sitemap.
    pub(crate) fn site_url(&self) -> String {
        self.config
            .get_table("site")
            .and_then(|t| t.get_str("base-url"))
            .unwrap_or("https://ppidk-timtengka.org")
            .trim_end_matches('/')
            .to_owned()
    }

    /// Returns the `[tracing]` config table.
    #[inline]
    pub(crate) fn tracing_table(&self) -> Option<&Table> {
        self.config.get_table("tracing")
    }
}

/// Extension trait for [`Table`] accessors.
pub(crate) trait TomlTableExt {
    /// Extracts the string corresponding to the key.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Extracts the integer corresponding to the key as `u16`.
    fn get_u16(&self, key: &str) -> Option<u16>;

    /// Extracts the integer corresponding to the key as `u64`.
    fn get_u64(&self, key: &str) -> Option<u64>;

    /// Extracts the boolean corresponding to the key.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Extracts the table corresponding to the key.
    fn get_table(&self, key: &str) -> Option<&Table>;
}

impl TomlTableExt for Table {
    #[inline]
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key)
            .and_then(|v| v.as_integer())
            .and_then(|n| u16::try_from(n).ok())
    }

    #[inline]
    fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key)
            .and_then(|v| v.as_integer())
            .and_then(|n| u64::try_from(n).ok())
    }

    #[inline]
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    #[inline]
    fn get_table(&self, key: &str) -> Option<&Table> {
        self.get(key).and_then(|v| v.as_table())
    }
}
