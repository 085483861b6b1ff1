use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .pr-diff.toml.
/// All fields are optional; the tool works with zero config as long as a
/// GITHUB_TOKEN is in the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub-specific settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Default view settings, overridable per-run by CLI flags
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewConfig {
    /// Default view mode: "unified" or "split"
    pub mode: Option<String>,

    /// Total output width for the split view
    pub width: Option<usize>,
}

impl Config {
    /// Load configuration from .pr-diff.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".pr-diff.toml");
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Config::default()
        };

        if config.github.token.is_none() {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                config.github.token = Some(token);
            }
        }

        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert!(config.view.mode.is_none());
        assert!(config.view.width.is_none());
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[github]
token = "ghp_example"

[view]
mode = "split"
width = 120
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.token.as_deref(), Some("ghp_example"));
        assert_eq!(config.view.mode.as_deref(), Some("split"));
        assert_eq!(config.view.width, Some(120));
    }

    #[test]
    fn test_partial_config_toml() {
        let config: Config = toml::from_str("[view]\nmode = \"unified\"\n").unwrap();
        assert_eq!(config.view.mode.as_deref(), Some("unified"));
        assert!(config.view.width.is_none());
        assert!(config.github.token.is_none());
    }
}
