use crate::dataset::SeriesWindow;
use crate::error::{Result, TechTrendsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure loaded from tech_trends.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub report: ReportConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Mock dataset window and cache behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// First month of the series, "YYYY-MM"
    pub start: String,
    /// Last month of the series (inclusive), "YYYY-MM"
    pub end: String,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            start: "2018-01".to_string(),
            end: "2025-01".to_string(),
            cache_ttl_secs: 3600,
            cache_capacity: 8,
        }
    }
}

impl DatasetConfig {
    pub fn window(&self) -> Result<SeriesWindow> {
        SeriesWindow::parse(&self.start, &self.end)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// PDF/chart rendering and output placement
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Extra directory searched before the system font locations
    pub font_dir: Option<PathBuf>,
    /// Expects `{family}-Regular.ttf` (Bold/Italic/BoldItalic optional)
    pub font_family: String,
    /// Most recent points plotted in the report chart
    pub chart_points: usize,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            font_dir: None,
            font_family: "LiberationSans".to_string(),
            chart_points: 24,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub config_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "tech_trends=info".to_string(),
            config_path: None,
        }
    }
}

impl RuntimeConfig {
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "tech_trends=info".to_string()),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses TECH_TRENDS_CONFIG or ./tech_trends.toml, then the user config dir
    pub fn load() -> Result<Self> {
        // .env next to the binary's working dir; missing file is fine
        if let Ok(env_path) = std::env::var("TT_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }

        let path = config_path();
        let mut config = match &path {
            Some(path) => Self::from_file(path)?,
            None => {
                tracing::debug!("no config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env();
        config.runtime = RuntimeConfig::load_from_env();
        config.runtime.config_path = path;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TechTrendsError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Env-first overrides
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("TT_OUTPUT_DIR") {
            self.report.output_dir = PathBuf::from(dir);
            tracing::debug!("TT_OUTPUT_DIR env override applied");
        }
        if let Ok(dir) = std::env::var("TT_FONT_DIR") {
            self.report.font_dir = Some(PathBuf::from(dir));
            tracing::debug!("TT_FONT_DIR env override applied");
        }
        if let Ok(family) = std::env::var("TT_FONT_FAMILY") {
            self.report.font_family = family;
        }
        if let Some(ttl) = std::env::var("TT_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.dataset.cache_ttl_secs = ttl;
        }
        if let Some(points) = std::env::var("TT_CHART_POINTS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            self.report.chart_points = points;
        }
    }

    /// Reject an unusable window; clamp numeric knobs into range
    pub fn validate(&mut self) -> Result<()> {
        self.dataset.window()?;

        if self.dataset.cache_capacity == 0 {
            tracing::warn!("cache_capacity 0 is not allowed, using 1");
            self.dataset.cache_capacity = 1;
        }

        if self.report.chart_points < 2 {
            tracing::warn!(
                "chart_points {} too small, clamping to 2",
                self.report.chart_points
            );
            self.report.chart_points = 2;
        }

        if self.report.font_family.trim().is_empty() {
            return Err(TechTrendsError::Config {
                message: "font_family cannot be empty".into(),
            });
        }
        Ok(())
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TECH_TRENDS_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from("tech_trends.toml");
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("tech-trends").join("tech_trends.toml"))
        .filter(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_2018_to_2025() {
        let config = Config::default();
        let window = config.dataset.window().unwrap();
        assert_eq!(window.months(), 85);
        assert_eq!(config.dataset.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.report.chart_points, 24);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [report]
            font_family = "DejaVuSans"
            "#,
        )
        .unwrap();
        assert_eq!(config.report.font_family, "DejaVuSans");
        assert_eq!(config.report.chart_points, 24);
        assert_eq!(config.dataset.start, "2018-01");
    }

    #[test]
    fn validate_clamps_and_rejects() {
        let mut config = Config::default();
        config.report.chart_points = 0;
        config.dataset.cache_capacity = 0;
        config.validate().unwrap();
        assert_eq!(config.report.chart_points, 2);
        assert_eq!(config.dataset.cache_capacity, 1);

        config.dataset.start = "2026-01".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Config::from_toml("[dataset\nstart = 1").unwrap_err();
        assert!(matches!(err, TechTrendsError::Config { .. }));
    }
}
