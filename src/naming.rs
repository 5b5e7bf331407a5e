//! Centralized filename conventions for findings artifacts and fixed assets.
//!
//! Every artifact the dashboard displays is addressed by a naming convention
//! fixed by the upstream analysis scripts. This module is the single place
//! those conventions live; no other module builds an artifact filename by
//! hand.
//!
//! A taluka never appears in an artifact filename; it only scopes the
//! directory the artifact is looked up in:
//!
//! ```text
//! findings/<taluka>/combined_crops_<YYYY-YYYY>.jpg
//! findings/<taluka>/hotspots_<YYYY-YYYY>.jpg
//! findings/<taluka>/dist_distrib_<YYYY-YYYY>.jpg
//! findings/<taluka>/YoY_<CropCategory>.jpg
//! findings/<taluka>/transition_map.jpg
//! ```
//!
//! Price trend plots in `findings/onion_price/` are the one exception: they
//! carry no convention at all and are matched by substring (see
//! [`crate::matcher`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved subdirectory under the findings root holding price trend plots.
/// Excluded from the navigable taluka list.
pub const PRICE_DIR: &str = "onion_price";

/// The only extension considered when listing price trend plots.
pub const PRICE_EXT: &str = "jpg";

/// District locator image shown in the Overview intro section.
pub const INTRO_IMAGE: &str = "Figure_10_intro_loc.jpeg";

/// Monthly price heatmap shown in the Overview market section.
pub const HEATMAP_IMAGE: &str = "Figure_8_heat_map.jpeg";

/// Pairwise correlation matrix, rendered verbatim.
pub const PEARSON_CSV: &str = "pearson.csv";

/// Elasticity matrix, rendered verbatim.
pub const ELASTICITY_CSV: &str = "elasticity.csv";

/// Markdown body of the About sub-screen.
pub const ABOUT_MD: &str = "about.md";

/// Optional markdown shown in the Overview profile section.
pub const PROFILE_MD: &str = "profile.md";

/// An academic year, displayed and embedded in filenames as
/// `"{start}-{start+1}"` (e.g. `2017-2018`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearLabel(pub u16);

impl YearLabel {
    pub fn start(&self) -> u16 {
        self.0
    }

    pub fn end(&self) -> u16 {
        self.0 + 1
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.0 + 1)
    }
}

/// The full year sequence for an inclusive range of start years.
pub fn year_labels(first_start: u16, last_start: u16) -> Vec<YearLabel> {
    (first_start..=last_start).map(YearLabel).collect()
}

/// The four cropping-pattern categories with a year-over-year change chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropCategory {
    SingleKharif,
    SingleNonKharif,
    DoubleCrop,
    TripleCrop,
}

impl CropCategory {
    pub const ALL: [CropCategory; 4] = [
        CropCategory::SingleKharif,
        CropCategory::SingleNonKharif,
        CropCategory::DoubleCrop,
        CropCategory::TripleCrop,
    ];

    /// Token as it appears in artifact filenames.
    pub fn token(&self) -> &'static str {
        match self {
            CropCategory::SingleKharif => "Single_Kharif",
            CropCategory::SingleNonKharif => "Single_Non_Kharif",
            CropCategory::DoubleCrop => "Double_Crop",
            CropCategory::TripleCrop => "Triple_Crop",
        }
    }

    /// Display label: token with underscores converted to spaces.
    pub fn label(&self) -> String {
        self.token().replace('_', " ")
    }
}

/// One displayable artifact in a taluka directory.
///
/// The first three kinds are scoped to the selected academic year; the
/// year-over-year charts and the transition map are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CombinedCrops(YearLabel),
    Hotspots(YearLabel),
    DistanceDistribution(YearLabel),
    YearOverYear(CropCategory),
    TransitionMap,
}

impl ArtifactKind {
    /// Expected filename inside the taluka directory.
    ///
    /// Pure and filesystem-independent: the same kind always yields the same
    /// string. Inputs come from the year and category enumerations, so no
    /// sanitization is applied here.
    pub fn filename(&self) -> String {
        match self {
            ArtifactKind::CombinedCrops(year) => format!("combined_crops_{year}.jpg"),
            ArtifactKind::Hotspots(year) => format!("hotspots_{year}.jpg"),
            ArtifactKind::DistanceDistribution(year) => format!("dist_distrib_{year}.jpg"),
            ArtifactKind::YearOverYear(category) => format!("YoY_{}.jpg", category.token()),
            ArtifactKind::TransitionMap => "transition_map.jpg".to_string(),
        }
    }

    /// Caption shown under the rendered panel.
    pub fn caption(&self) -> String {
        match self {
            ArtifactKind::CombinedCrops(year) => format!("Crop Patterns ({year})"),
            ArtifactKind::Hotspots(year) => format!("Hotspots ({year})"),
            ArtifactKind::DistanceDistribution(year) => format!("Distance Distribution ({year})"),
            ArtifactKind::YearOverYear(category) => category.label(),
            ArtifactKind::TransitionMap => "Land Use Transition Map".to_string(),
        }
    }
}

/// Every artifact a fully populated taluka directory is expected to contain
/// for the given year sequence: three year-scoped charts per year, one chart
/// per crop category, and the transition map.
pub fn expected_artifacts(years: &[YearLabel]) -> Vec<ArtifactKind> {
    let mut kinds = Vec::with_capacity(years.len() * 3 + CropCategory::ALL.len() + 1);
    for &year in years {
        kinds.push(ArtifactKind::CombinedCrops(year));
        kinds.push(ArtifactKind::Hotspots(year));
        kinds.push(ArtifactKind::DistanceDistribution(year));
    }
    for category in CropCategory::ALL {
        kinds.push(ArtifactKind::YearOverYear(category));
    }
    kinds.push(ArtifactKind::TransitionMap);
    kinds
}
