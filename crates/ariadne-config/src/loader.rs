//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading routing
//! configuration from multiple sources: defaults, files, and environment
//! variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::config::{ModeKind, RoutingConfig};
use crate::error::ConfigError;

/// Routing configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables (scalar settings only)
///
/// Route and namespace lists come from code or the file; environment
/// variables can only override scalar settings such as the mode.
///
/// # Example
///
/// ```no_run
/// use ariadne_config::ConfigLoader;
///
/// # fn main() -> Result<(), ariadne_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_file("routes.toml")?
///     .with_env_prefix("ARIADNE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: RoutingConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RoutingConfig::default(),
            env_prefix: None,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports TOML (`.toml`) and JSON (`.json`); the format is determined
    /// by the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file does not exist, cannot be read,
    /// contains invalid TOML/JSON, or contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        self.config = Self::parse_file(&content, path)?;
        tracing::debug!(path = %path.display(), "routing configuration file loaded");
        Ok(self)
    }

    /// Loads configuration from an optional file.
    ///
    /// If the file exists, loads it; otherwise keeps the current layer
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Loads configuration from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or `format` is not `"toml"`
    /// or `"json"`.
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        Ok(self)
    }

    /// Sets the environment variable prefix for overrides.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`. For example, with
    /// prefix "ARIADNE":
    /// - `ARIADNE__MODE__KIND=path_rewrite`
    /// - `ARIADNE__MODE__BASE_PATH=/app`
    /// - `ARIADNE__IMPLICIT=false`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Finalizes and returns the loaded configuration.
    ///
    /// Applies environment overrides (if a prefix was set) and validates
    /// the result: every pattern must compile and every method constraint
    /// must parse.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be applied or the final
    /// configuration fails validation.
    pub fn load(mut self) -> Result<RoutingConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Finalizes without validation.
    ///
    /// Use this to inspect or modify the configuration before validating
    /// it yourself.
    #[must_use]
    pub fn load_unvalidated(self) -> RoutingConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<RoutingConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let env_vars: HashMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::EnvOverride {
                var: key.to_string(),
                reason: "invalid key format".to_string(),
            })?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["IMPLICIT"] => {
                self.config.implicit = parse_bool(value).ok_or_else(|| ConfigError::EnvOverride {
                    var: key.to_string(),
                    reason: "expected boolean".to_string(),
                })?;
            }
            ["MODE", "KIND"] => {
                self.config.mode.kind = match value.to_lowercase().as_str() {
                    "query_param" => ModeKind::QueryParam,
                    "path_rewrite" => ModeKind::PathRewrite,
                    "argument_vector" => ModeKind::ArgumentVector,
                    _ => {
                        return Err(ConfigError::EnvOverride {
                            var: key.to_string(),
                            reason: "expected 'query_param', 'path_rewrite', or 'argument_vector'"
                                .to_string(),
                        })
                    }
                };
            }
            ["MODE", "BASE"] => {
                self.config.mode.base = value.to_string();
            }
            ["MODE", "ROUTE_PARAM"] => {
                self.config.mode.route_param = value.to_string();
            }
            ["MODE", "BASE_PATH"] => {
                self.config.mode.base_path = value.to_string();
            }

            // Unknown key: ignore so unrelated variables under the prefix
            // do not break startup.
            _ => {}
        }

        Ok(())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loader_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert!(config.implicit);
        assert_eq!(config.mode.route_param, "r");
    }

    #[test]
    fn loader_with_string_toml() {
        let toml = r#"
            implicit = false

            [mode]
            kind = "path_rewrite"
            base_path = "/app"
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap();

        assert!(!config.implicit);
        assert_eq!(config.mode.kind, ModeKind::PathRewrite);
        assert_eq!(config.mode.base_path, "/app");
    }

    #[test]
    fn loader_with_string_json() {
        let json = r#"{"routes": [{"pattern": "/about", "handler": "Site.About"}]}"#;

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn loader_with_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [[routes]]
            pattern = "/article/:id"
            handler = "Article.Show"
            "#
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn loader_with_file_not_found() {
        let result = ConfigLoader::new().with_file("/nonexistent/routes.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/routes.toml")
            .unwrap()
            .load()
            .unwrap();
        assert!(config.implicit);
    }

    #[test]
    fn loader_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn loader_rejects_invalid_pattern_at_load() {
        let toml = r#"
            [[routes]]
            pattern = "/a/{id"
            handler = "X"
        "#;

        let result = ConfigLoader::new().with_string(toml, "toml").unwrap().load();
        assert!(matches!(result, Err(ConfigError::Pattern(_))));
    }

    // Environment override tests call apply_env_var directly instead of
    // mutating the process environment, which is racy across test threads.

    #[test]
    fn apply_env_var_mode_kind() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__MODE__KIND", "path_rewrite", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__MODE__BASE_PATH", "/app", "TEST")
            .unwrap();
        assert_eq!(loader.config.mode.kind, ModeKind::PathRewrite);
        assert_eq!(loader.config.mode.base_path, "/app");
    }

    #[test]
    fn apply_env_var_implicit() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__IMPLICIT", "off", "TEST").unwrap();
        assert!(!loader.config.implicit);
    }

    #[test]
    fn apply_env_var_invalid_mode_kind() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_env_var("TEST__MODE__KIND", "telepathy", "TEST");
        assert!(matches!(result, Err(ConfigError::EnvOverride { .. })));
    }

    #[test]
    fn apply_env_var_unknown_key_is_ignored() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__SOMETHING__ELSE", "1", "TEST")
            .unwrap();
        assert_eq!(loader.config, RoutingConfig::default());
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
