// Runtime configuration, read from the environment (after `.env` is loaded).
//
// APP_NAME      name used in alert headers (default "blogApp")
// DATABASE_URL  SQLite file path or URL (default "data/blog.db")

use anyhow::bail;

const DEFAULT_APP_NAME: &str = "blogApp";
const DEFAULT_DATABASE_URL: &str = "data/blog.db";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests don't have to touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let app_name = lookup("APP_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        // It ends up inside a header name.
        if !app_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!("APP_NAME may only contain ASCII letters, digits, '-' and '_': {app_name:?}");
        }

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Ok(Self {
            app_name,
            database_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.app_name, "blogApp");
        assert_eq!(config.database_url, "data/blog.db");
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_NAME", "journal"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert_eq!(config.app_name, "journal");
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn app_name_must_fit_in_a_header() {
        assert!(AppConfig::from_lookup(lookup(&[("APP_NAME", "my blog")])).is_err());
    }
}
