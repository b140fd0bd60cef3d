//! Configuration for the marketplace service module

use crate::contract::DateFilterPolicy;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `MARKETPLACE_DATABASE_URL`
pub const ENV_PREFIX: &str = "MARKETPLACE_";

/// Keys read from the environment; other `MARKETPLACE_*` variables are ignored
const ENV_KEYS: &[&str] = &[
    "database_url",
    "date_filter_policy",
    "date_format",
    "default_page_size",
    "max_page_size",
];

/// Marketplace service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SeaORM connection string (postgres:// or sqlite:)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// What to do with date bounds that fail to parse
    #[serde(default)]
    pub date_filter_policy: DateFilterPolicy,

    /// chrono format for date bounds in listing filters
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Page size used when a listing request gives none
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound on any listing page
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            date_filter_policy: DateFilterPolicy::default(),
            date_format: default_date_format(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl Config {
    /// Defaults, then the YAML file (if given), then `MARKETPLACE_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
            .extract()
    }
}

fn default_database_url() -> String {
    "sqlite::memory:".to_owned()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_owned()
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load(None)?;
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.date_filter_policy, DateFilterPolicy::Lenient);
            assert_eq!(cfg.date_format, "%Y-%m-%d");
            Ok(())
        });
    }

    #[test]
    fn test_yaml_then_env_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "marketplace.yaml",
                r#"
database_url: "sqlite://market.db?mode=rwc"
date_filter_policy: strict
default_page_size: 25
"#,
            )?;
            jail.set_env("MARKETPLACE_DEFAULT_PAGE_SIZE", "10");

            let cfg = Config::load(Some(Path::new("marketplace.yaml")))?;
            assert_eq!(cfg.database_url, "sqlite://market.db?mode=rwc");
            assert_eq!(cfg.date_filter_policy, DateFilterPolicy::Strict);
            assert_eq!(cfg.default_page_size, 10);
            assert_eq!(cfg.max_page_size, 500);
            Ok(())
        });
    }

    #[test]
    fn test_unrelated_env_vars_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("MARKETPLACE_HOME", "/opt/marketplace");
            jail.set_env("MARKETPLACE_LOG", "debug");
            jail.set_env("MARKETPLACE_MAX_PAGE_SIZE", "200");

            let cfg = Config::load(None)?;
            assert_eq!(cfg.max_page_size, 200);
            assert_eq!(cfg.database_url, "sqlite::memory:");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_key_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("marketplace.yaml", "retention_days: 30\n")?;
            assert!(Config::load(Some(Path::new("marketplace.yaml"))).is_err());
            Ok(())
        });
    }
}
