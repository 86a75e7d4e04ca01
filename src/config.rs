//! Site configuration.
//!
//! Loads an optional `config.toml` from the content root. Every field has a
//! default, so a config file is only needed to override something. The
//! loaded [`SiteConfig`] is constructed once at startup and passed by
//! reference into every component that needs it; nothing reads configuration
//! ambiently.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! link_root_prefix = "/"            # Prefix for generated links
//! skip_dirs = [".git", "assets", "cmd"]  # Directories pruned during scan
//!
//! [templates]
//! page = "assets/templates/page.tpl"     # Per-document template
//! home = "assets/templates/index.tpl"    # Homepage template
//!
//! [build]
//! workers = 4                       # Render workers (absent = all cores)
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Root-relative prefix prepended to every generated link.
    pub link_root_prefix: String,
    /// Directory names pruned entirely during traversal.
    pub skip_dirs: Vec<String>,
    /// Template file locations, relative to the content root.
    pub templates: TemplatesConfig,
    /// Parallel rendering settings.
    pub build: BuildConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            link_root_prefix: "/".to_string(),
            skip_dirs: vec![".git".into(), "assets".into(), "cmd".into()],
            templates: TemplatesConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.templates.page.is_empty() {
            return Err(ConfigError::Validation("templates.page must not be empty".into()));
        }
        if self.templates.home.is_empty() {
            return Err(ConfigError::Validation("templates.home must not be empty".into()));
        }
        Ok(())
    }
}

/// Template file locations, relative to the content root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    pub page: String,
    pub home: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            page: "assets/templates/page.tpl".to_string(),
            home: "assets/templates/index.tpl".to_string(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum number of parallel render workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.workers.map(|n| n.min(cores).max(1)).unwrap_or(cores)
}

/// Load `config.toml` from the content root, falling back to defaults when
/// the file does not exist. A present-but-invalid file is a fatal error.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.link_root_prefix, "/");
        assert_eq!(config.skip_dirs, vec![".git", "assets", "cmd"]);
        assert_eq!(config.templates.page, "assets/templates/page.tpl");
        assert_eq!(config.templates.home, "assets/templates/index.tpl");
        assert_eq!(config.build.workers, None);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "link_root_prefix = \"/blog/\"\n\n[build]\nworkers = 2\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.link_root_prefix, "/blog/");
        assert_eq!(config.build.workers, Some(2));
        // Untouched fields keep their defaults
        assert_eq!(config.skip_dirs, vec![".git", "assets", "cmd"]);
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "no_such_key = 1\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn invalid_toml_is_fatal() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "not toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_template_path_fails_validation() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "[templates]\npage = \"\"\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn effective_threads_caps_at_core_count() {
        let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);

        assert_eq!(effective_threads(&BuildConfig { workers: None }), cores);
        assert_eq!(effective_threads(&BuildConfig { workers: Some(1) }), 1);
        assert_eq!(effective_threads(&BuildConfig { workers: Some(10_000) }), cores);
    }
}
