//! Dashboard configuration.
//!
//! Handles loading and validating the optional `config.toml` at the data
//! root. Config files are sparse; override just the values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Agricultural Intensification & Market Dynamics"
//! subtitle = "Evaluating the responsiveness of cropping patterns to market price signals and mandi proximity."
//!
//! [paths]
//! findings = "findings"     # Taluka artifact tree, relative to the data root
//! assets = "assets"         # Overview images, CSV matrices, about.md
//!
//! [years]
//! first_start = 2017        # First academic year start (2017 -> "2017-2018")
//! last_start = 2024         # Last academic year start, inclusive
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"    # Nav list, captions, notices
//! border = "#e0e0e0"
//! link = "#333333"
//! link_hover = "#000000"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#cccccc"
//! link_hover = "#ffffff"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

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

/// Dashboard configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashConfig {
    /// Title, subtitle and other display strings.
    pub site: SiteSection,
    /// Locations of the findings tree and the assets directory.
    pub paths: PathsSection,
    /// Academic year range covered by the year-scoped artifacts.
    pub years: YearsSection,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel generation settings.
    pub processing: ProcessingConfig,
}

impl DashConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.first_start > self.years.last_start {
            return Err(ConfigError::Validation(
                "years.first_start must not exceed years.last_start".into(),
            ));
        }
        if self.paths.findings.is_empty() || self.paths.assets.is_empty() {
            return Err(ConfigError::Validation(
                "paths.findings and paths.assets must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    pub subtitle: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Agricultural Intensification & Market Dynamics".to_string(),
            subtitle: "Evaluating the responsiveness of cropping patterns to market \
                       price signals and mandi proximity."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    /// Taluka artifact tree, relative to the data root.
    pub findings: String,
    /// Overview images, CSV matrices and about.md, relative to the data root.
    pub assets: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            findings: "findings".to_string(),
            assets: "assets".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct YearsSection {
    /// First academic year start (2017 means "2017-2018").
    pub first_start: u16,
    /// Last academic year start, inclusive.
    pub last_start: u16,
}

impl Default for YearsSection {
    fn default() -> Self {
        Self {
            first_start: 2017,
            last_start: 2024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    #[serde(default = "dark_scheme")]
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default(),
            dark: dark_scheme(),
        }
    }
}

fn dark_scheme() -> ColorScheme {
    ColorScheme {
        background: "#0a0a0a".to_string(),
        text: "#eeeeee".to_string(),
        text_muted: "#999999".to_string(),
        border: "#333333".to_string(),
        link: "#cccccc".to_string(),
        link_hover: "#ffffff".to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        // Light scheme. The dark defaults live in `dark_scheme`.
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#333333".to_string(),
            link_hover: "#000000".to_string(),
        }
    }
}

/// Parallel generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers. When absent, defaults to the
    /// number of CPU cores. Values larger than the core count are clamped
    /// down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load `config.toml` from the data root, falling back to defaults when the
/// file does not exist.
pub fn load_config(root: &Path) -> Result<DashConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.is_file() {
        let raw = fs::read_to_string(&path)?;
        toml::from_str(&raw)?
    } else {
        DashConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Generate CSS custom properties from the color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}

/// A stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    r##"# taluka-dash configuration. All options are optional; defaults shown.

[site]
title = "Agricultural Intensification & Market Dynamics"
subtitle = "Evaluating the responsiveness of cropping patterns to market price signals and mandi proximity."

[paths]
# Taluka artifact tree, relative to the data root.
findings = "findings"
# Overview images, CSV matrices and about.md, relative to the data root.
assets = "assets"

[years]
# Academic years are labelled "<start>-<start + 1>". The range is inclusive:
# 2017/2024 yields "2017-2018" through "2024-2025".
first_start = 2017
last_start = 2024

[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"
border = "#e0e0e0"
link = "#333333"
link_hover = "#000000"

[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
link_hover = "#ffffff"

[processing]
# Max parallel workers during generation. Omit for auto (CPU cores).
# max_processes = 4
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.paths.findings, "findings");
        assert_eq!(config.years.first_start, 2017);
        assert_eq!(config.years.last_start, 2024);
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0a0a0a");
    }

    #[test]
    fn sparse_override() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[years]\nfirst_start = 2019\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.years.first_start, 2019);
        // Untouched sections keep their defaults
        assert_eq!(config.years.last_start, 2024);
        assert_eq!(config.paths.assets, "assets");
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "[site]\ntitel = \"typo\"\n").unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn inverted_year_range_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[years]\nfirst_start = 2024\nlast_start = 2017\n",
        )
        .unwrap();

        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn color_css_contains_both_schemes() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    #[test]
    fn stock_config_parses_back() {
        let config: DashConfig = toml::from_str(&stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.years.last_start, 2024);
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);

        let auto = ProcessingConfig::default();
        assert!(effective_threads(&auto) >= 1);
    }
}
