//! Application configuration and the persisted theme flag.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grader::MIN_SUBMISSION_LEN;

/// File name searched for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "academy.toml";

/// Color theme. The only preference the application writes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademyConfig {
    /// Directory of course TOML files.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default)]
    pub theme: Theme,
    /// How long "checking..." is shown before an exercise result.
    #[serde(default = "default_check_delay")]
    pub check_delay_ms: u64,
    /// Shorter submissions are rejected before grading.
    #[serde(default = "default_min_submission_len")]
    pub min_submission_len: usize,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content")
}
fn default_check_delay() -> u64 {
    800
}
fn default_min_submission_len() -> usize {
    MIN_SUBMISSION_LEN
}

impl Default for AcademyConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            theme: Theme::default(),
            check_delay_ms: default_check_delay(),
            min_submission_len: default_min_submission_len(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Where an existing config file would be found, if any.
///
/// Search order:
/// 1. the explicit path (must exist)
/// 2. `academy.toml` in the current directory
/// 3. `~/.config/academy/config.toml`
pub fn find_config(path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(p) = path {
        if p.exists() {
            return Ok(Some(p.to_path_buf()));
        }
        anyhow::bail!("config file not found: {}", p.display());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }
    Ok(dirs_path()
        .map(|dir| dir.join("config.toml"))
        .filter(|global| global.exists()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Environment overrides: `ACADEMY_CONTENT_DIR`, `ACADEMY_THEME`.
pub fn load_config_from(path: Option<&Path>) -> Result<AcademyConfig> {
    let mut config = match find_config(path)? {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AcademyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AcademyConfig::default(),
    };

    if let Ok(dir) = std::env::var("ACADEMY_CONTENT_DIR") {
        config.content_dir = PathBuf::from(dir);
    }
    if let Ok(theme) = std::env::var("ACADEMY_THEME") {
        match theme.parse() {
            Ok(theme) => config.theme = theme,
            Err(e) => tracing::warn!("ignoring ACADEMY_THEME: {e}"),
        }
    }

    config.content_dir = PathBuf::from(resolve_env_vars(&config.content_dir.to_string_lossy()));
    Ok(config)
}

/// Persist `theme` to the config file at `path`.
///
/// Only the `theme` key is touched; every other key and comment in an
/// existing file is kept as written. A missing file is created.
pub fn save_theme(theme: Theme, path: &Path) -> Result<()> {
    let content = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?
    } else {
        String::new()
    };
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    doc["theme"] = toml_edit::value(theme.to_string());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_string())
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("academy"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ACADEMY_TEST_VAR", "courses");
        assert_eq!(resolve_env_vars("${_ACADEMY_TEST_VAR}"), "courses");
        assert_eq!(
            resolve_env_vars("/srv/${_ACADEMY_TEST_VAR}/pl1"),
            "/srv/courses/pl1"
        );
        assert_eq!(resolve_env_vars("unterminated ${"), "unterminated ${");
        std::env::remove_var("_ACADEMY_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = AcademyConfig::default();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.check_delay_ms, 800);
        assert_eq!(config.min_submission_len, 10);
    }

    #[test]
    fn parse_partial_config() {
        let config: AcademyConfig = toml::from_str("theme = \"dark\"\n").unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.content_dir, PathBuf::from("./content"));
    }

    #[test]
    fn theme_toggle_and_parse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_values() {
        std::env::set_var("_ACADEMY_SELF_REF", "${_ACADEMY_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_ACADEMY_SELF_REF}/x"),
            "${_ACADEMY_SELF_REF}/x"
        );
        std::env::remove_var("_ACADEMY_SELF_REF");
    }

    #[test]
    fn save_theme_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("academy.toml");
        save_theme(Theme::Dark, &path).unwrap();
        let loaded = load_config_from(Some(&path)).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.check_delay_ms, 800);
    }

    #[test]
    fn save_theme_keeps_other_keys_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("academy.toml");
        let original = "# my notes\ncontent_dir = \"${_ACADEMY_KEEP_ROOT}/courses\"\ntheme = \"light\"\n";
        std::fs::write(&path, original).unwrap();

        save_theme(Theme::Dark, &path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("# my notes"));
        assert!(saved.contains("content_dir = \"${_ACADEMY_KEEP_ROOT}/courses\""));
        assert!(saved.contains("theme = \"dark\""));
        assert!(!saved.contains("check_delay_ms"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/academy.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
