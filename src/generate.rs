//! Static site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and produces the
//! final static site: one HTML page per reachable view state, with every
//! referenced artifact copied alongside its page.
//!
//! ## Generated Pages
//!
//! - **Overview** (`/index.html`): district context, price heatmap, matrices
//! - **About** (`/about.html`): the About sub-screen
//! - **Taluka pages** (`/{taluka}/{year}.html`): one per taluka and academic
//!   year; the default year doubles as `/{taluka}/index.html`
//!
//! ## State Enumeration
//!
//! Pages are derived from the view state machine, not hand-listed: starting
//! from [`ViewState::initial`], each page is the render of one state reached
//! through [`state::update`]. The About flag short-circuits rendering; see
//! [`render_state`].
//!
//! ## Re-validation
//!
//! Nothing is cached between pages. Every panel probe happens at the moment
//! that page is built, so a file swapped out mid-generation changes the next
//! page that references it. Missing and unreadable artifacts become inline
//! notices; only genuine filesystem failures (permissions, exhaustion) abort
//! the build.

use crate::config::{self, SiteSection};
use crate::loader::{self, LoadError};
use crate::matcher;
use crate::naming::{self, ArtifactKind, CropCategory, YearLabel};
use crate::render::{
    self, AboutData, ImagePanel, NavContext, OverviewData, PricePanel, TablePanel, TalukaData,
};
use crate::scan::Manifest;
use crate::state::{self, Action, Selection, ViewState};
use crate::tables::{self, TableError};
use maud::Markup;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const CSS_STATIC: &str = include_str!("../static/style.css");

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Per-screen panel outcome counts, for CLI reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanelTally {
    pub found: usize,
    pub missing: usize,
    pub unreadable: usize,
}

impl PanelTally {
    fn record_image(&mut self, panel: &ImagePanel) {
        match panel {
            ImagePanel::Found { .. } => self.found += 1,
            ImagePanel::Missing { .. } => self.missing += 1,
            ImagePanel::Unreadable { .. } => self.unreadable += 1,
        }
    }

    fn record_table(&mut self, panel: &TablePanel) {
        match panel {
            TablePanel::Found(_) => self.found += 1,
            TablePanel::Missing { .. } => self.missing += 1,
            TablePanel::Malformed { .. } => self.unreadable += 1,
        }
    }

    fn record_price(&mut self, panel: &PricePanel) {
        match panel {
            PricePanel::Matched(inner) => self.record_image(inner),
            PricePanel::NoMatch { .. } => self.missing += 1,
        }
    }
}

/// Result of a full generate run.
#[derive(Debug)]
pub struct GenerateSummary {
    pub overview: PanelTally,
    pub talukas: Vec<TalukaReport>,
    pub pages: usize,
}

#[derive(Debug)]
pub struct TalukaReport {
    pub name: String,
    pub pages: usize,
    pub tally: PanelTally,
}

/// Everything a single page build needs, shared across the run.
struct SiteCtx<'a> {
    findings: &'a Path,
    assets: &'a Path,
    out: &'a Path,
    nav: &'a NavContext,
    site: &'a SiteSection,
    css: &'a str,
    years: &'a [YearLabel],
    price_plots: &'a [String],
}

/// Read the scan manifest from `manifest_path` and generate the site.
pub fn generate(
    manifest_path: &Path,
    root: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let manifest: Manifest = serde_json::from_str(&fs::read_to_string(manifest_path)?)?;
    generate_site(&manifest, root, output_dir)
}

pub fn generate_site(
    manifest: &Manifest,
    root: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let config = &manifest.config;
    config.validate()?;

    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    let years = naming::year_labels(config.years.first_start, config.years.last_start);
    let findings = root.join(&config.paths.findings);
    let assets = root.join(&config.paths.assets);
    let nav = NavContext {
        talukas: manifest.talukas.iter().map(|t| t.name.clone()).collect(),
        warn_empty: manifest.talukas.is_empty(),
    };

    fs::create_dir_all(output_dir)?;

    let ctx = SiteCtx {
        findings: &findings,
        assets: &assets,
        out: output_dir,
        nav: &nav,
        site: &config.site,
        css: &css,
        years: &years,
        price_plots: &manifest.price_plots,
    };
    // years is non-empty: validate() enforces the range ordering
    let initial = ViewState::initial(years[0]);

    // Overview and About are the two states reachable without leaving the
    // default navigation selection.
    let mut overview_tally = PanelTally::default();
    let index = render_state(&initial, &ctx, &mut overview_tally)?;
    fs::write(output_dir.join("index.html"), index.into_string())?;

    let about_state = state::update(&initial, Action::OpenAbout);
    let about = render_state(&about_state, &ctx, &mut overview_tally)?;
    fs::write(output_dir.join("about.html"), about.into_string())?;

    // Talukas are independent of each other: fan out.
    let talukas: Vec<TalukaReport> = manifest
        .talukas
        .par_iter()
        .map(|taluka| generate_taluka(&ctx, &initial, &taluka.name))
        .collect::<Result<_, GenerateError>>()?;

    let pages = 2 + talukas.iter().map(|report| report.pages).sum::<usize>();
    Ok(GenerateSummary {
        overview: overview_tally,
        talukas,
        pages,
    })
}

/// Render the page for one view state.
///
/// The About flag short-circuits the whole pass: when set, the About screen
/// is the entire output and no Overview or taluka panel is probed, copied or
/// rendered for this state.
fn render_state(
    view: &ViewState,
    ctx: &SiteCtx<'_>,
    tally: &mut PanelTally,
) -> Result<Markup, GenerateError> {
    if view.show_about {
        let about = build_about(ctx.assets)?;
        return Ok(render::about_page(&about, ctx.nav, ctx.site, ctx.css));
    }

    match &view.selection {
        Selection::Overview => {
            let data = build_overview(ctx, tally)?;
            Ok(render::overview_page(&data, ctx.nav, ctx.site, ctx.css))
        }
        Selection::Taluka(name) => {
            let data = build_taluka(ctx, name, view.year, tally)?;
            Ok(render::taluka_page(&data, view.year, ctx.nav, ctx.site, ctx.css))
        }
    }
}

/// Generate every page for one taluka: one per academic year, with the
/// default year doubling as the directory index.
fn generate_taluka(
    ctx: &SiteCtx<'_>,
    initial: &ViewState,
    name: &str,
) -> Result<TalukaReport, GenerateError> {
    let dir = ctx.out.join(name);
    fs::create_dir_all(&dir)?;

    let selected = state::update(initial, Action::SelectTaluka(name.to_string()));
    let mut tally = PanelTally::default();
    let mut pages = 0;

    for &year in ctx.years {
        let at_year = state::update(&selected, Action::SelectYear(year));
        let html = render_state(&at_year, ctx, &mut tally)?.into_string();
        fs::write(dir.join(format!("{year}.html")), &html)?;
        pages += 1;

        if year == selected.year {
            fs::write(dir.join("index.html"), &html)?;
            pages += 1;
        }
    }

    Ok(TalukaReport {
        name: name.to_string(),
        pages,
        tally,
    })
}

fn build_overview(
    ctx: &SiteCtx<'_>,
    tally: &mut PanelTally,
) -> Result<OverviewData, GenerateError> {
    let assets_out = ctx.out.join("assets");
    fs::create_dir_all(&assets_out)?;

    let intro = image_panel_from(
        &ctx.assets.join(naming::INTRO_IMAGE),
        naming::INTRO_IMAGE,
        "Market & Trader Locations".to_string(),
        &assets_out,
        format!("assets/{}", naming::INTRO_IMAGE),
    )?;
    let heatmap = image_panel_from(
        &ctx.assets.join(naming::HEATMAP_IMAGE),
        naming::HEATMAP_IMAGE,
        "Monthly Onion Price Heatmap".to_string(),
        &assets_out,
        format!("assets/{}", naming::HEATMAP_IMAGE),
    )?;
    let profile_html = read_markdown(&ctx.assets.join(naming::PROFILE_MD))?;
    let pearson = table_panel_from(&ctx.assets.join(naming::PEARSON_CSV), naming::PEARSON_CSV)?;
    let elasticity = table_panel_from(
        &ctx.assets.join(naming::ELASTICITY_CSV),
        naming::ELASTICITY_CSV,
    )?;

    tally.record_image(&intro);
    tally.record_image(&heatmap);
    tally.record_table(&pearson);
    tally.record_table(&elasticity);

    Ok(OverviewData {
        intro,
        profile_html,
        heatmap,
        pearson,
        elasticity,
    })
}

fn build_about(assets: &Path) -> Result<AboutData, GenerateError> {
    let body_html = read_markdown(&assets.join(naming::ABOUT_MD))?;
    Ok(AboutData { body_html })
}

fn build_taluka(
    ctx: &SiteCtx<'_>,
    name: &str,
    year: YearLabel,
    tally: &mut PanelTally,
) -> Result<TalukaData, GenerateError> {
    let src_dir = ctx.findings.join(name);
    let out_dir = ctx.out.join(name);

    let kind_panel = |kind: ArtifactKind| -> Result<ImagePanel, GenerateError> {
        let filename = kind.filename();
        let src = filename.clone();
        image_panel_from(&src_dir.join(&filename), &filename, kind.caption(), &out_dir, src)
    };

    let price = match matcher::match_price_plot(name, ctx.price_plots) {
        Some(file) => {
            let source = ctx.findings.join(naming::PRICE_DIR).join(file);
            PricePanel::Matched(image_panel_from(
                &source,
                file,
                format!("Price Trend: {file}"),
                &out_dir,
                file.to_string(),
            )?)
        }
        None => PricePanel::NoMatch {
            taluka: name.to_string(),
        },
    };

    let combined_crops = kind_panel(ArtifactKind::CombinedCrops(year))?;
    let hotspots = kind_panel(ArtifactKind::Hotspots(year))?;
    let distance = kind_panel(ArtifactKind::DistanceDistribution(year))?;
    let yoy = CropCategory::ALL
        .iter()
        .map(|&category| {
            kind_panel(ArtifactKind::YearOverYear(category)).map(|panel| (category, panel))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let transition = kind_panel(ArtifactKind::TransitionMap)?;

    tally.record_price(&price);
    tally.record_image(&combined_crops);
    tally.record_image(&hotspots);
    tally.record_image(&distance);
    for (_, panel) in &yoy {
        tally.record_image(panel);
    }
    tally.record_image(&transition);

    Ok(TalukaData {
        name: name.to_string(),
        years: ctx.years.to_vec(),
        price,
        combined_crops,
        hotspots,
        distance,
        yoy,
        transition,
    })
}

/// Probe `source` and, when readable, copy it into `copy_to_dir` and return
/// a Found panel pointing at `src`. Missing and unreadable outcomes become
/// their notice panels; other I/O failures abort.
fn image_panel_from(
    source: &Path,
    filename: &str,
    caption: String,
    copy_to_dir: &Path,
    src: String,
) -> Result<ImagePanel, GenerateError> {
    match loader::probe(source) {
        Ok(Some(probe)) => {
            fs::copy(source, copy_to_dir.join(filename))?;
            Ok(ImagePanel::Found {
                src,
                caption,
                width: probe.width,
                height: probe.height,
            })
        }
        Ok(None) => Ok(ImagePanel::Missing {
            filename: filename.to_string(),
        }),
        Err(LoadError::Decode { source: err, .. }) => {
            log::warn!("unreadable image {}: {err}", source.display());
            Ok(ImagePanel::Unreadable {
                filename: filename.to_string(),
                detail: err.to_string(),
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn table_panel_from(source: &Path, filename: &str) -> Result<TablePanel, GenerateError> {
    match tables::load_table(source) {
        Ok(Some(table)) => Ok(TablePanel::Found(table)),
        Ok(None) => Ok(TablePanel::Missing {
            filename: filename.to_string(),
        }),
        Err(TableError::Csv { source: err, .. }) => {
            log::warn!("malformed CSV {}: {err}", source.display());
            Ok(TablePanel::Malformed {
                filename: filename.to_string(),
                detail: err.to_string(),
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn read_markdown(path: &Path) -> Result<Option<String>, GenerateError> {
    match fs::read_to_string(path) {
        Ok(markdown) => Ok(Some(render::markdown_to_html(&markdown))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Full-decode validation for `check`: every artifact present on disk must
/// decode, and both matrices must parse. Returns one line per problem;
/// legitimately absent files are not problems.
pub fn validate(manifest: &Manifest, root: &Path) -> Result<Vec<String>, GenerateError> {
    let config = &manifest.config;
    let findings = root.join(&config.paths.findings);
    let assets = root.join(&config.paths.assets);
    let years = naming::year_labels(config.years.first_start, config.years.last_start);
    let mut problems = Vec::new();

    for taluka in &manifest.talukas {
        let dir = findings.join(&taluka.name);
        for kind in naming::expected_artifacts(&years) {
            check_image(&dir.join(kind.filename()), &mut problems)?;
        }
    }
    for file in &manifest.price_plots {
        check_image(&findings.join(naming::PRICE_DIR).join(file), &mut problems)?;
    }
    for name in [naming::INTRO_IMAGE, naming::HEATMAP_IMAGE] {
        check_image(&assets.join(name), &mut problems)?;
    }

    for name in [naming::PEARSON_CSV, naming::ELASTICITY_CSV] {
        match tables::load_table(&assets.join(name)) {
            Ok(_) => {}
            Err(TableError::Csv { source, .. }) => {
                problems.push(format!("{}: {source}", assets.join(name).display()));
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(problems)
}

fn check_image(path: &Path, problems: &mut Vec<String>) -> Result<(), GenerateError> {
    match loader::load(path) {
        Ok(_) => Ok(()),
        Err(LoadError::Decode { source, .. }) => {
            problems.push(format!("{}: {source}", path.display()));
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
