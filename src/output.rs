//! CLI output formatting for both pipeline stages.
//!
//! Output is information-centric: the primary display for every taluka is
//! its name and positional index, with filesystem paths shown as secondary
//! context. Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Talukas
//! 001 Dindori (10 of 29 artifacts)
//!     Source: findings/Dindori/
//!
//! Price plots
//!     2 file(s) in findings/onion_price/
//!
//! Assets
//!     [x] Figure_10_intro_loc.jpeg
//!     [ ] pearson.csv
//! ```
//!
//! ## Generate
//!
//! ```text
//! Overview → index.html, about.html
//!     4 panels rendered, 0 missing, 0 unreadable
//! 001 Dindori → Dindori/ (9 pages)
//!     41 panels rendered, 31 missing, 0 unreadable
//!
//! Generated 29 pages
//! ```

use crate::generate::{GenerateSummary, PanelTally};
use crate::naming;
use crate::scan::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn tally_line(tally: &PanelTally) -> String {
    format!(
        "{} panels rendered, {} missing, {} unreadable",
        tally.found, tally.missing, tally.unreadable
    )
}

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let findings = &manifest.config.paths.findings;
    let mut lines = vec!["Talukas".to_string()];

    if manifest.talukas.is_empty() {
        let detail = if manifest.findings_root_present {
            "(none found)"
        } else {
            "(findings root missing)"
        };
        lines.push(format!("{}{detail}", indent(1)));
    }
    for (idx, taluka) in manifest.talukas.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} of {} artifacts)",
            format_index(idx + 1),
            taluka.name,
            taluka.present,
            taluka.expected
        ));
        lines.push(format!("{}Source: {findings}/{}/", indent(1), taluka.name));
    }

    lines.push(String::new());
    lines.push("Price plots".to_string());
    lines.push(format!(
        "{}{} file(s) in {findings}/{}/",
        indent(1),
        manifest.price_plots.len(),
        naming::PRICE_DIR
    ));

    lines.push(String::new());
    lines.push("Assets".to_string());
    let assets = [
        (naming::INTRO_IMAGE, manifest.assets.intro_image),
        (naming::HEATMAP_IMAGE, manifest.assets.heatmap_image),
        (naming::PEARSON_CSV, manifest.assets.pearson_csv),
        (naming::ELASTICITY_CSV, manifest.assets.elasticity_csv),
        (naming::ABOUT_MD, manifest.assets.about_md),
        (naming::PROFILE_MD, manifest.assets.profile_md),
    ];
    for (name, present) in assets {
        let mark = if present { "x" } else { " " };
        lines.push(format!("{}[{mark}] {name}", indent(1)));
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{line}");
    }
}

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec!["Overview → index.html, about.html".to_string()];
    lines.push(format!("{}{}", indent(1), tally_line(&summary.overview)));

    for (idx, report) in summary.talukas.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}/ ({} pages)",
            format_index(idx + 1),
            report.name,
            report.name,
            report.pages
        ));
        lines.push(format!("{}{}", indent(1), tally_line(&report.tally)));
    }

    lines.push(String::new());
    lines.push(format!("Generated {} pages", summary.pages));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use crate::test_helpers::fixture_root;
    use tempfile::TempDir;

    #[test]
    fn scan_output_lists_talukas_with_counts() {
        let tmp = fixture_root();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest);

        assert_eq!(lines[0], "Talukas");
        assert!(lines.iter().any(|l| l.starts_with("001 Dindori (")));
        assert!(lines.iter().any(|l| l.contains("Source: findings/Dindori/")));
        assert!(lines.iter().any(|l| l.contains("2 file(s) in findings/onion_price/")));
        assert!(lines.iter().any(|l| l.contains("[x] pearson.csv")));
    }

    #[test]
    fn scan_output_notes_missing_root() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest);

        assert!(lines.iter().any(|l| l.contains("(findings root missing)")));
    }

    #[test]
    fn generate_output_reports_pages_and_tallies() {
        let tmp = fixture_root();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(tmp.path()).unwrap();
        let summary = crate::generate::generate_site(&manifest, tmp.path(), out.path()).unwrap();

        let lines = format_generate_output(&summary);
        assert_eq!(lines[0], "Overview → index.html, about.html");
        assert!(lines.iter().any(|l| l.contains("001 Dindori → Dindori/ (9 pages)")));
        assert!(lines.last().unwrap().contains("Generated 29 pages"));
    }
}
