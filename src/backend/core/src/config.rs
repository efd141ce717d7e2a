//! Configuration management.
//!
//! Values come from an optional file plus `MAILVAULT__*` environment
//! variables, e.g. `MAILVAULT__ROUTING__LOGIN_PATH=/signin`.

use serde::Deserialize;

use crate::telemetry::LoggingConfig;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the navigation guard sends callers it turns away
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Redirect target for unauthenticated callers
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Redirect target when a role is not admitted to a route
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            fallback_path: default_fallback_path(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_fallback_path() -> String {
    "/dashboard".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("MAILVAULT").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from a file, with environment overrides.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MAILVAULT").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Redirect targets must be absolute in-app paths.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, path) in [
            ("routing.login_path", &self.routing.login_path),
            ("routing.fallback_path", &self.routing.fallback_path),
        ] {
            if !path.starts_with('/') {
                anyhow::bail!("{} must start with '/', got {:?}", name, path);
            }
        }
        Ok(())
    }
}
