//! Scoring configuration loaded from an optional TOML file layered with
//! `CONVICTION__*` environment overrides.
//!
//! Nested keys use a double underscore, e.g.
//! `CONVICTION__THRESHOLDS__MANIPULATION_VLR_MIN=0.6`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use conviction_core::config::ScoringConfig;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "CONVICTION";

/// Default config location: `<config_dir>/conviction/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("conviction").join("config.toml"))
}

/// Load and validate the effective configuration.
///
/// An explicit `path` must exist. The default path is used only if present.
pub fn load(path: Option<&Path>) -> Result<ScoringConfig> {
    load_with_env(path, Environment::with_prefix(ENV_PREFIX))
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<ScoringConfig> {
    let mut builder = Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        None => {
            if let Some(default) = default_config_path() {
                builder = builder
                    .add_source(File::from(default).format(FileFormat::Toml).required(false));
            }
        }
    }

    let settings = builder
        .add_source(env.separator("__").try_parsing(true))
        .build()
        .context("Failed to read configuration")?;

    let config: ScoringConfig = settings
        .try_deserialize()
        .context("Failed to parse configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Render a configuration as TOML.
pub fn to_toml(config: &ScoringConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = toml_file("[thresholds]\nmanipulation_vlr_min = 0.6\n");
        let config = load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.thresholds.manipulation_vlr_min, 0.6);
        let defaults = ScoringConfig::default();
        assert_eq!(config.modifiers, defaults.modifiers);
        assert_eq!(config.age_decay, defaults.age_decay);
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[recommendation]\nstrong_buy = 90.0\n");
        let vars = env(&[("CONVICTION__RECOMMENDATION__STRONG_BUY", "95")]);
        let config = load_with_env(Some(file.path()), vars).unwrap();
        assert_eq!(config.recommendation.strong_buy, 95.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_with_env(Some(&path), no_env()).is_err());
    }

    #[test]
    fn invalid_values_rejected() {
        let file = toml_file("[modifiers]\nsmart_money_surge = 0.4\n");
        let err = load_with_env(Some(file.path()), no_env()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid configuration"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let file = toml_file("[thresholds]\nnot_a_threshold = 0.5\n");
        assert!(load_with_env(Some(file.path()), no_env()).is_err());
    }

    #[test]
    fn rendered_toml_loads_back() {
        let rendered = to_toml(&ScoringConfig::default()).unwrap();
        let file = toml_file(&rendered);
        let config = load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config, ScoringConfig::default());
    }
}
