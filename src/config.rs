//! Output file layout and logging settings.

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

pub const DAILY_FILE: &str = "daily_WBGT_THI_stats.csv";
pub const CATEGORIZED_FILE: &str = "categorized_daily.csv";
pub const SUMMARY_FILE: &str = "summary_exposure_statistics.csv";
pub const PLOTS_DIR: &str = "plots";

/// Paths of every file the pipeline writes under one output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn daily(&self) -> PathBuf {
        self.root.join(DAILY_FILE)
    }

    pub fn categorized(&self) -> PathBuf {
        self.root.join(CATEGORIZED_FILE)
    }

    pub fn summary(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }

    pub fn plots(&self) -> PathBuf {
        self.root.join(PLOTS_DIR)
    }

    /// Creates the output directory if it does not exist.
    pub fn ensure_root(&self) -> Result<()> {
        create_dir(&self.root)
    }

    /// Creates the output directory and its `plots/` folder.
    pub fn ensure_with_plots(&self) -> Result<()> {
        create_dir(&self.root)?;
        create_dir(&self.plots())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| PipelineError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Logging settings, read from the environment.
///
/// | Variable        | Default                  |
/// |-----------------|--------------------------|
/// | `LOG_FILE_PATH` | `logs/heat_stress.log`   |
/// | `RUST_LOG`      | `info` (stderr)          |
/// | `RUST_LOG_JSON` | `debug` (JSON log file)  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub file_name: String,
}

impl LogConfig {
    pub const DEFAULT_PATH: &'static str = "logs/heat_stress.log";

    pub fn from_env() -> Self {
        let path = std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        Self::from_path(&path)
    }

    fn from_path(path: &str) -> Self {
        let path = Path::new(path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("logs"))
            .to_path_buf();
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("heat_stress.log")
            .to_string();
        Self { dir, file_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_layout_paths() {
        let layout = OutputLayout::new("results");
        assert_eq!(layout.daily(), Path::new("results/daily_WBGT_THI_stats.csv"));
        assert_eq!(layout.categorized(), Path::new("results/categorized_daily.csv"));
        assert_eq!(
            layout.summary(),
            Path::new("results/summary_exposure_statistics.csv")
        );
        assert_eq!(layout.plots(), Path::new("results/plots"));
    }

    #[test]
    fn test_ensure_with_plots_creates_dirs() {
        let root = env::temp_dir().join("heat_stress_test_layout/nested");
        let _ = fs::remove_dir_all(env::temp_dir().join("heat_stress_test_layout"));

        let layout = OutputLayout::new(&root);
        layout.ensure_with_plots().unwrap();
        assert!(layout.plots().is_dir());

        fs::remove_dir_all(env::temp_dir().join("heat_stress_test_layout")).unwrap();
    }

    #[test]
    fn test_log_config_from_path() {
        let config = LogConfig::from_path("/var/log/heat/run.log");
        assert_eq!(config.dir, Path::new("/var/log/heat"));
        assert_eq!(config.file_name, "run.log");

        let bare = LogConfig::from_path("run.log");
        assert_eq!(bare.dir, Path::new("logs"));
        assert_eq!(bare.file_name, "run.log");
    }
}
