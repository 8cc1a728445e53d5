//! Configuration loading and representation.

use anyhow::{Context, bail};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Runtime configuration for the catalog service, read from the environment.
///
/// | variable | meaning | default |
/// |----------|---------|---------|
/// | `DATABASE_URL` | Postgres URL; unset selects the in-memory store | unset |
/// | `RECORDSHOP_CACHE` | `on`/`off` (`true`/`false`/`1`/`0`) | `on` |
/// | `RECORDSHOP_DB_MAX_CONNECTIONS` | pool size | `5` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub database_url: Option<String>,
    pub cache_enabled: bool,
    pub db_max_connections: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            cache_enabled: true,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (lets tests avoid the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let cache_enabled = match lookup("RECORDSHOP_CACHE") {
            Some(raw) => parse_switch(&raw).context("invalid RECORDSHOP_CACHE")?,
            None => true,
        };

        let db_max_connections = match lookup("RECORDSHOP_DB_MAX_CONNECTIONS") {
            Some(raw) => {
                let n: u32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid RECORDSHOP_DB_MAX_CONNECTIONS '{raw}'"))?;
                if n == 0 {
                    bail!("RECORDSHOP_DB_MAX_CONNECTIONS must be at least 1");
                }
                n
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            cache_enabled,
            db_max_connections,
        })
    }
}

fn parse_switch(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        other => bail!("expected on/off, got '{other}'"),
    }
}
