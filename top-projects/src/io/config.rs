//! Task runner configuration stored in `top-projects.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::core::invariants::validate_ecosystems;
use crate::core::naming::{DEFAULT_MAX_STARS, DEFAULT_MIN_STARS, default_output_path};
use crate::core::types::DatasetRequest;

pub const DEFAULT_CONFIG_FILE: &str = "top-projects.toml";

/// Task runner configuration (TOML).
///
/// Intended to be edited by humans. Missing sections fall back to the
/// built-in `go` and `python` datasets and the default delegate commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    pub fetch: FetchConfig,
    pub viewer: ViewerConfig,
    #[serde(rename = "dataset")]
    pub datasets: Vec<DatasetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    /// Fetch program argv prefix (e.g. `["python","main.py"]`).
    pub command: Vec<String>,

    /// Kill the fetch program after this many seconds. Unset waits forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            command: vec!["python".to_string(), "main.py".to_string()],
            timeout_secs: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Viewer argv prefix; the CSV path is appended.
    pub command: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            command: vec!["csvlens".to_string()],
        }
    }
}

/// One `[[dataset]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetConfig {
    pub ecosystem: String,
    #[serde(default = "default_min_stars")]
    pub min_stars: u64,
    #[serde(default = "default_max_stars")]
    pub max_stars: u64,
    /// Overrides the `top-<ecosystem>-projects.csv` convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_forks: Option<u64>,
}

fn default_min_stars() -> u64 {
    DEFAULT_MIN_STARS
}

fn default_max_stars() -> u64 {
    DEFAULT_MAX_STARS
}

impl DatasetConfig {
    /// Dataset with the default star window and conventional output path.
    pub fn with_defaults(ecosystem: &str) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            min_stars: DEFAULT_MIN_STARS,
            max_stars: DEFAULT_MAX_STARS,
            output: None,
            min_forks: None,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.ecosystem))
    }

    /// Build the request handed to the fetch program.
    pub fn request(&self) -> DatasetRequest {
        DatasetRequest::new(
            self.ecosystem.clone(),
            self.min_stars,
            self.max_stars,
            self.output_path(),
        )
        .with_min_forks(self.min_forks)
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            viewer: ViewerConfig::default(),
            datasets: vec![
                DatasetConfig::with_defaults("go"),
                DatasetConfig::with_defaults("python"),
            ],
        }
    }
}

impl ProjectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fetch.command.is_empty() || self.fetch.command[0].trim().is_empty() {
            return Err(anyhow!("fetch.command must be a non-empty array"));
        }
        if self.viewer.command.is_empty() || self.viewer.command[0].trim().is_empty() {
            return Err(anyhow!("viewer.command must be a non-empty array"));
        }
        if self.fetch.timeout_secs == Some(0) {
            return Err(anyhow!("fetch.timeout_secs must be > 0"));
        }
        let errors = validate_ecosystems(self.datasets.iter().map(|d| d.ecosystem.as_str()));
        if !errors.is_empty() {
            bail!("invalid datasets:\n- {}", errors.join("\n- "));
        }
        Ok(())
    }

    pub fn dataset(&self, ecosystem: &str) -> Option<&DatasetConfig> {
        self.datasets.iter().find(|d| d.ecosystem == ecosystem)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ProjectConfig::default()`. A path that
/// cannot be checked is an error, never a silent fallback to defaults.
pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    if !config_exists(path)? {
        let cfg = ProjectConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ProjectConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ProjectConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Write the default config unless one exists (or `force` is set).
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if config_exists(path)? && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    write_config(path, &ProjectConfig::default())
}

fn config_exists(path: &Path) -> Result<bool> {
    path.try_exists()
        .with_context(|| format!("check {}", path.display()))
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ProjectConfig::default());
    }

    #[test]
    fn uncheckable_path_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("f");
        fs::write(&file, "not a directory").expect("write file");

        let err = load_config(&file.join("top-projects.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("check"), "{err:#}");
    }

    #[test]
    fn default_datasets_use_fixed_star_window() {
        let cfg = ProjectConfig::default();
        let go = cfg.dataset("go").expect("go dataset").request();
        assert_eq!(
            go,
            DatasetRequest::new("go", 25_000, 40_000, "top-go-projects.csv")
        );
        let python = cfg.dataset("python").expect("python dataset").request();
        assert_eq!(python.output, PathBuf::from("top-python-projects.csv"));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("top-projects.toml");
        let mut cfg = ProjectConfig::default();
        cfg.fetch.timeout_secs = Some(600);
        cfg.datasets[0].min_forks = Some(100);
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("top-projects.toml");
        fs::write(
            &path,
            "[viewer]\ncommand = [\"tv\"]\n\n[[dataset]]\necosystem = \"rust\"\nmax_stars = 90000\noutput = \"rust.csv\"\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.fetch, FetchConfig::default());
        assert_eq!(cfg.viewer.command, vec!["tv"]);
        assert_eq!(cfg.datasets.len(), 1);
        let rust = cfg.datasets[0].request();
        assert_eq!(rust.min_stars, 25_000);
        assert_eq!(rust.max_stars, 90_000);
        assert_eq!(rust.output, PathBuf::from("rust.csv"));
    }

    #[test]
    fn inverted_star_window_is_not_rejected() {
        let mut cfg = ProjectConfig::default();
        cfg.datasets[0].min_stars = 50_000;
        cfg.datasets[0].max_stars = 10;
        cfg.validate().expect("bounds are left to the fetch program");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = ProjectConfig::default();
        cfg.fetch.command.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = ProjectConfig::default();
        cfg.fetch.timeout_secs = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = ProjectConfig::default();
        cfg.datasets.push(DatasetConfig::with_defaults("go"));
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate ecosystem 'go'"));
    }

    #[test]
    fn init_refuses_existing_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("top-projects.toml");
        fs::write(&path, "custom").expect("write custom");

        let err = init_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).expect("read"), "custom");

        init_config(&path, true).expect("force init");
        assert_eq!(load_config(&path).expect("load"), ProjectConfig::default());
    }
}
