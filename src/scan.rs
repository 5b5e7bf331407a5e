//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the data root to discover talukas,
//! price plots and overview assets, producing a structured manifest that the
//! generate stage consumes.
//!
//! ## Directory Structure
//!
//! The scanner expects this layout under the data root:
//!
//! ```text
//! root/
//! ├── config.toml                      # Optional (see crate::config)
//! ├── findings/
//! │   ├── Dindori/                     # One directory per taluka
//! │   │   ├── combined_crops_2017-2018.jpg
//! │   │   ├── hotspots_2017-2018.jpg
//! │   │   ├── dist_distrib_2017-2018.jpg
//! │   │   ├── ...                      # Remaining years
//! │   │   ├── YoY_Single_Kharif.jpg    # One per crop category
//! │   │   └── transition_map.jpg
//! │   ├── Sinnar/
//! │   └── onion_price/                 # Reserved; never a taluka
//! │       └── sinnar_price.jpg         # Flat, matched by substring
//! └── assets/
//!     ├── Figure_10_intro_loc.jpeg
//!     ├── Figure_8_heat_map.jpeg
//!     ├── pearson.csv
//!     ├── elasticity.csv
//!     ├── about.md
//!     └── profile.md                   # Optional
//! ```
//!
//! ## Guarantees
//!
//! - The taluka list is lexicographically sorted and duplicate-free, and
//!   never contains the reserved `onion_price` name.
//! - A missing findings root degrades to an empty taluka list with a logged
//!   warning; it is not an error.
//! - The price plot list is sorted, making the first-match tie-break in the
//!   fuzzy matcher deterministic.
//!
//! Per-taluka artifact counts in the manifest are reporting-only: the
//! generate stage re-checks every file at the moment of use.

use crate::config::{self, DashConfig};
use crate::naming::{self, YearLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub talukas: Vec<Taluka>,
    /// Sorted `.jpg` filenames in the price directory.
    pub price_plots: Vec<String>,
    /// False when the findings root does not exist at all.
    pub findings_root_present: bool,
    pub assets: AssetInventory,
    pub config: DashConfig,
}

/// A discovered taluka with its scan-time artifact inventory.
#[derive(Debug, Serialize, Deserialize)]
pub struct Taluka {
    pub name: String,
    /// Artifacts present at scan time, out of `expected`.
    pub present: usize,
    pub expected: usize,
}

/// Which of the fixed overview assets exist at scan time.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AssetInventory {
    pub intro_image: bool,
    pub heatmap_image: bool,
    pub pearson_csv: bool,
    pub elasticity_csv: bool,
    pub about_md: bool,
    pub profile_md: bool,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let findings = root.join(&config.paths.findings);
    let assets = root.join(&config.paths.assets);
    let years = naming::year_labels(config.years.first_start, config.years.last_start);

    let findings_root_present = findings.is_dir();
    if !findings_root_present {
        log::warn!(
            "findings root {} does not exist; navigation will be Overview only",
            findings.display()
        );
    }

    let names = list_taluka_names(&findings)?;
    if names.is_empty() && findings_root_present {
        log::warn!("no taluka directories under {}", findings.display());
    }

    let talukas = names
        .into_iter()
        .map(|name| inventory_taluka(&findings, name, &years))
        .collect();

    Ok(Manifest {
        talukas,
        price_plots: list_price_plots(&findings)?,
        findings_root_present,
        assets: inventory_assets(&assets),
        config,
    })
}

/// Immediate subdirectories of the findings root, excluding the reserved
/// price directory and hidden entries. Sorted ascending, duplicate-free.
/// A missing root yields an empty list.
fn list_taluka_names(findings: &Path) -> Result<Vec<String>, ScanError> {
    if !findings.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = BTreeSet::new();
    for entry in WalkDir::new(findings).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name == naming::PRICE_DIR || name.starts_with('.') {
            continue;
        }
        names.insert(name);
    }
    Ok(names.into_iter().collect())
}

/// Sorted `.jpg` filenames in `findings/onion_price/`. The sort fixes the
/// candidate order the matcher's first-match rule operates on.
fn list_price_plots(findings: &Path) -> Result<Vec<String>, ScanError> {
    let dir = findings.join(naming::PRICE_DIR);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<String> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(naming::PRICE_EXT))
                    .unwrap_or(false)
        })
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    files.sort();
    Ok(files)
}

fn inventory_taluka(findings: &Path, name: String, years: &[YearLabel]) -> Taluka {
    let dir = findings.join(&name);
    let expected = naming::expected_artifacts(years);
    let present = expected
        .iter()
        .filter(|kind| dir.join(kind.filename()).is_file())
        .count();

    Taluka {
        name,
        present,
        expected: expected.len(),
    }
}

fn inventory_assets(assets: &Path) -> AssetInventory {
    let has = |name: &str| assets.join(name).is_file();
    AssetInventory {
        intro_image: has(naming::INTRO_IMAGE),
        heatmap_image: has(naming::HEATMAP_IMAGE),
        pearson_csv: has(naming::PEARSON_CSV),
        elasticity_csv: has(naming::ELASTICITY_CSV),
        about_md: has(naming::ABOUT_MD),
        profile_md: has(naming::PROFILE_MD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{fixture_root, write_jpeg};
    use tempfile::TempDir;

    #[test]
    fn talukas_sorted_and_reserved_name_excluded() {
        let tmp = fixture_root();
        let manifest = scan(tmp.path()).unwrap();

        let names: Vec<&str> = manifest.talukas.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Dindori", "Malegaon", "Sinnar"]);
        assert!(!names.contains(&"onion_price"));
    }

    #[test]
    fn missing_findings_root_is_empty_not_error() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();

        assert!(!manifest.findings_root_present);
        assert!(manifest.talukas.is_empty());
        assert!(manifest.price_plots.is_empty());
    }

    #[test]
    fn price_plots_sorted_and_jpg_only() {
        let tmp = fixture_root();
        let price_dir = tmp.path().join("findings").join("onion_price");
        std::fs::write(price_dir.join("notes.txt"), "not a plot").unwrap();
        write_jpeg(&price_dir.join("aaa_extra.jpg"));

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            manifest.price_plots,
            vec!["aaa_extra.jpg", "nashik_price.jpg", "sinnar_price.jpg"]
        );
    }

    #[test]
    fn hidden_directories_skipped() {
        let tmp = fixture_root();
        std::fs::create_dir(tmp.path().join("findings").join(".stash")).unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.talukas.iter().all(|t| t.name != ".stash"));
    }

    #[test]
    fn files_under_findings_root_are_not_talukas() {
        let tmp = fixture_root();
        std::fs::write(tmp.path().join("findings").join("README.txt"), "hi").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.talukas.iter().all(|t| t.name != "README.txt"));
    }

    #[test]
    fn taluka_inventory_counts_present_artifacts() {
        let tmp = fixture_root();
        let manifest = scan(tmp.path()).unwrap();

        let dindori = manifest
            .talukas
            .iter()
            .find(|t| t.name == "Dindori")
            .unwrap();
        // 8 years x 3 + 4 YoY + 1 transition map
        assert_eq!(dindori.expected, 29);
        assert!(dindori.present > 0);
        assert!(dindori.present < dindori.expected);

        let malegaon = manifest
            .talukas
            .iter()
            .find(|t| t.name == "Malegaon")
            .unwrap();
        assert_eq!(malegaon.present, 0);
    }

    #[test]
    fn asset_inventory_reflects_fixture() {
        let tmp = fixture_root();
        let manifest = scan(tmp.path()).unwrap();

        assert!(manifest.assets.intro_image);
        assert!(manifest.assets.heatmap_image);
        assert!(manifest.assets.pearson_csv);
        assert!(manifest.assets.elasticity_csv);
        assert!(manifest.assets.about_md);
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = fixture_root();
        let manifest = scan(tmp.path()).unwrap();

        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.talukas.len(), manifest.talukas.len());
        assert_eq!(back.price_plots, manifest.price_plots);
    }
}
