//! Build settings.
//!
//! Handles loading, validating, and merging the project's `config.toml`.
//! The file lives in the project's lib directory and is optional:
//!
//! ```text
//! project/
//! ├── _lib/
//! │   └── config.toml      # Project config (overrides stock defaults)
//! ├── _templates/
//! │   └── default.html
//! └── index.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "_output"      # Where the site is written. Deleted on every build!
//! template_dir = "_templates" # Named templates are looked up here
//! lib_dir = "_lib"            # Project support files; never treated as content
//! date_format = "%Y-%m-%d"    # strftime format for `date:`/`updated:` headers
//!
//! [[urls]]
//! pattern = "blog/*"          # glob on the page path; defaults to "*"
//! name = "blog"               # rule name, selected with `url: blog`
//! template = "blog/$year/$slug/"
//!
//! # Any other key is passed to templates as `settings.<key>`:
//! site_name = "My site"
//! ```
//!
//! Relative directories are resolved against the project directory. The file
//! itself is always read from `<project>/_lib/config.toml`; setting `lib_dir`
//! only changes what discovery skips.

use crate::url::{UrlRegistry, UrlRule};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_LIB_DIR: &str = "_lib";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// The contents of `config.toml`, with unresolved paths.
///
/// Fields the build knows about are typed; everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub output_dir: String,
    pub template_dir: String,
    pub lib_dir: String,
    /// strftime format used to parse `date` and `updated` headers.
    pub date_format: String,
    /// Custom URL rules, registered after the built-ins in file order.
    pub urls: Vec<UrlRuleConfig>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output_dir: "_output".to_string(),
            template_dir: "_templates".to_string(),
            lib_dir: DEFAULT_LIB_DIR.to_string(),
            date_format: "%Y-%m-%d".to_string(),
            urls: Vec::new(),
            extra: toml::Table::new(),
        }
    }
}

/// One `[[urls]]` entry: a template-based rule for pages matching `pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlRuleConfig {
    #[serde(default = "default_url_pattern")]
    pub pattern: String,
    pub name: String,
    pub template: String,
}

fn default_url_pattern() -> String {
    crate::url::CATCH_ALL.to_string()
}

/// Fully resolved settings for one build.
///
/// Serialized into the template context as `settings`.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub project_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template_dir: PathBuf,
    pub lib_dir: PathBuf,
    pub date_format: String,
    pub urls: Vec<UrlRuleConfig>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Settings {
    /// Load settings for the project at `project_dir`.
    ///
    /// Reads `_lib/config.toml` if present, merges it over the stock defaults
    /// and validates the result.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let project_dir = normalize_path(&std::path::absolute(project_dir)?);
        let overlay = load_raw_config(&project_dir.join(DEFAULT_LIB_DIR))?;
        let config = resolve_config(stock_defaults_value(), overlay)?;
        let settings = Self::from_config(&project_dir, config);
        settings.validate()?;
        Ok(settings)
    }

    /// Resolve a config's directories against `project_dir`.
    pub fn from_config(project_dir: &Path, config: ProjectConfig) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            output_dir: resolve_path(project_dir, &config.output_dir),
            template_dir: resolve_path(project_dir, &config.template_dir),
            lib_dir: resolve_path(project_dir, &config.lib_dir),
            date_format: config.date_format,
            urls: config.urls,
            extra: config.extra,
        }
    }

    /// Replace the output directory. Re-validate afterwards.
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = normalize_path(&dir);
        self
    }

    /// Replace the header date format. Re-validate afterwards.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Check the settings are safe to build with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Validation(
                "date_format must not be empty".into(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Validation(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        if existing_path(&self.project_dir).starts_with(existing_path(&self.output_dir)) {
            return Err(ConfigError::Validation(format!(
                "output_dir {} would delete the project directory",
                self.output_dir.display()
            )));
        }
        for rule in &self.urls {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "urls: rule for pattern '{}' has an empty name",
                    rule.pattern
                )));
            }
            glob::Pattern::new(&rule.pattern).map_err(|e| {
                ConfigError::Validation(format!("urls: invalid pattern '{}': {e}", rule.pattern))
            })?;
        }
        Ok(())
    }

    /// Built-in URL rules followed by the configured ones.
    pub fn url_registry(&self) -> Result<UrlRegistry, ConfigError> {
        let mut registry = UrlRegistry::with_builtins();
        for rule in &self.urls {
            registry
                .register(&rule.pattern, &rule.name, UrlRule::Template(rule.template.clone()))
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        Ok(registry)
    }

    /// Directories discovery must not descend into.
    pub fn excluded_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.output_dir.clone(),
            self.template_dir.clone(),
            self.lib_dir.clone(),
        ]
    }
}

fn resolve_path(project_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&project_dir.join(path))
    }
}

/// Remove `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root, as the OS resolves it.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// The path with symlinks resolved when it exists, else cleaned lexically.
fn existing_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| normalize_path(path))
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ProjectConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value and deserialize it.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ProjectConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ProjectConfig = merged.try_into()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Leafpress Configuration
# =======================
# Place this file at <project>/_lib/config.toml.
# All settings are optional. Values shown below are the defaults.

# Directory the site is written to, relative to the project directory.
# WARNING: it is deleted and recreated on every build.
output_dir = "_output"

# Directory holding named templates (`template: post.html` in a page header).
# A built-in default.html is used when the project does not provide one.
template_dir = "_templates"

# Directory for project support files. Never scanned for content.
lib_dir = "_lib"

# strftime format used to parse `date:` and `updated:` page headers.
date_format = "%Y-%m-%d"

# ---------------------------------------------------------------------------
# Custom URL rules
# ---------------------------------------------------------------------------
# A page picks a rule with its `url:` header (default: "default").
# Built-in rules, available to every page:
#   default  source path with the output extension; dir/index.html -> dir/
#   pretty   $year/$month/$day/$slug/
# Any other `url:` value is used as a literal output path.
#
# Rules declared here apply to pages whose path matches `pattern` (a glob,
# default "*"). Later patterns take precedence over earlier ones.
# Templates can use $year, $month, $day, $slug and $ext.
#
# [[urls]]
# pattern = "blog/*"
# name = "blog"
# template = "blog/$year/$slug/"

# ---------------------------------------------------------------------------
# Template settings
# ---------------------------------------------------------------------------
# Any other key is available in templates as `settings.<key>`.
#
# site_name = "My site"
"##
}
