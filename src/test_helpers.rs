//! Shared test utilities for the taluka-dash test suite.
//!
//! Tests build their data roots programmatically in a temp directory, with
//! real (tiny) JPEGs so the loader exercises actual decoding. The standard
//! fixture covers the interesting shapes: a mostly populated taluka, an
//! empty one, a sparse one, price plots for some talukas but not others.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a tiny real JPEG at `path`, creating parent directories.
pub fn write_jpeg(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(4, 3, image::Rgb([96, 128, 64]))
        .save(path)
        .unwrap();
}

/// Build the standard fixture data root:
///
/// - `Dindori`: combined crops + hotspots for 2017-2018 and 2019-2020,
///   distance distribution for 2017-2018 only, all four YoY charts and the
///   transition map (10 of 29 artifacts)
/// - `Malegaon`: empty directory, no price plot
/// - `Sinnar`: transition map only, with a matching price plot
/// - `onion_price`: `nashik_price.jpg` and `sinnar_price.jpg`
/// - assets: both overview images, both matrices, `about.md`, `profile.md`
pub fn fixture_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let findings = tmp.path().join("findings");

    let dindori = findings.join("Dindori");
    for year in ["2017-2018", "2019-2020"] {
        write_jpeg(&dindori.join(format!("combined_crops_{year}.jpg")));
        write_jpeg(&dindori.join(format!("hotspots_{year}.jpg")));
    }
    write_jpeg(&dindori.join("dist_distrib_2017-2018.jpg"));
    for crop in ["Single_Kharif", "Single_Non_Kharif", "Double_Crop", "Triple_Crop"] {
        write_jpeg(&dindori.join(format!("YoY_{crop}.jpg")));
    }
    write_jpeg(&dindori.join("transition_map.jpg"));

    fs::create_dir_all(findings.join("Malegaon")).unwrap();
    write_jpeg(&findings.join("Sinnar").join("transition_map.jpg"));

    write_jpeg(&findings.join("onion_price").join("nashik_price.jpg"));
    write_jpeg(&findings.join("onion_price").join("sinnar_price.jpg"));

    let assets = tmp.path().join("assets");
    write_jpeg(&assets.join("Figure_10_intro_loc.jpeg"));
    write_jpeg(&assets.join("Figure_8_heat_map.jpeg"));
    fs::write(
        assets.join("pearson.csv"),
        "Variable,Price T-1\nSingle_Kharif,-0.42\nDouble_Crop,0.61\n",
    )
    .unwrap();
    fs::write(
        assets.join("elasticity.csv"),
        "Category,Elasticity\nDouble_Crop,1.31\n",
    )
    .unwrap();
    fs::write(
        assets.join("about.md"),
        "## About Me\n\nA dashboard of taluka-level findings.\n",
    )
    .unwrap();
    fs::write(
        assets.join("profile.md"),
        "- Semi-arid climate\n- Rich loamy soils\n- Distinct Kharif and Rabi seasons\n",
    )
    .unwrap();

    tmp
}
