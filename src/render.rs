//! HTML rendering for every dashboard screen.
//!
//! Every function here is pure: it maps already-resolved panel data to
//! markup. All filesystem probing happens in the generate stage, which hands
//! each renderer a value describing what it found. A panel is always one of
//! a small set of outcomes (content, missing with the filename that was
//! looked for, or unreadable), and a missing panel never suppresses its
//! siblings.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping; the only
//! raw interpolation is markdown already converted by [`markdown_to_html`].

use crate::config::SiteSection;
use crate::naming::{CropCategory, YearLabel};
use crate::state::Selection;
use crate::tables::Table;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

/// A single image slot on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePanel {
    Found {
        /// Path relative to the page's own directory.
        src: String,
        caption: String,
        width: u32,
        height: u32,
    },
    Missing {
        filename: String,
    },
    Unreadable {
        filename: String,
        detail: String,
    },
}

/// A tabular slot on the overview page.
#[derive(Debug, Clone)]
pub enum TablePanel {
    Found(Table),
    Missing { filename: String },
    Malformed { filename: String, detail: String },
}

/// The price-trend slot on a taluka page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricePanel {
    /// The fuzzy matcher found a plot; the inner panel says whether the file
    /// was still readable at render time.
    Matched(ImagePanel),
    NoMatch { taluka: String },
}

/// Resolved content for the Overview screen.
#[derive(Debug)]
pub struct OverviewData {
    pub intro: ImagePanel,
    /// Converted markdown from `profile.md`, when present.
    pub profile_html: Option<String>,
    pub heatmap: ImagePanel,
    pub pearson: TablePanel,
    pub elasticity: TablePanel,
}

/// Resolved content for the About sub-screen.
#[derive(Debug)]
pub struct AboutData {
    /// Converted markdown from `about.md`, when present.
    pub body_html: Option<String>,
}

/// Resolved content for one taluka screen at one selected year.
#[derive(Debug)]
pub struct TalukaData {
    pub name: String,
    pub years: Vec<YearLabel>,
    pub price: PricePanel,
    pub combined_crops: ImagePanel,
    pub hotspots: ImagePanel,
    pub distance: ImagePanel,
    /// Year-over-year panels, one per crop category. Independent of the
    /// selected year.
    pub yoy: Vec<(CropCategory, ImagePanel)>,
    pub transition: ImagePanel,
}

/// Navigation list context shared by every page.
#[derive(Debug, Clone)]
pub struct NavContext {
    pub talukas: Vec<String>,
    /// True when the findings root is missing or holds no talukas.
    pub warn_empty: bool,
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// HTML components
// ============================================================================

/// Renders the base HTML document: sidebar navigation plus main content.
fn base_document(title: &str, css: &str, nav: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                // The stylesheet is trusted build input, not user content
                style { (PreEscaped(css)) }
            }
            body {
                div.layout {
                    aside.sidebar {
                        h2.nav-title { "Navigation" }
                        (nav)
                    }
                    (content)
                }
            }
        }
    }
}

/// Renders the navigation list: Overview plus one entry per taluka.
pub fn render_nav(nav: &NavContext, current: &Selection) -> Markup {
    html! {
        nav.taluka-nav {
            ul {
                @let on_overview = matches!(current, Selection::Overview);
                li class=[on_overview.then_some("current")] {
                    a href="/" { "Overview" }
                }
                @for name in &nav.talukas {
                    @let is_current = matches!(current, Selection::Taluka(t) if t == name);
                    li class=[is_current.then_some("current")] {
                        a href={ "/" (name) "/" } { (name) }
                    }
                }
            }
            @if nav.warn_empty {
                p.notice.notice-warning { "No taluka data found in the findings directory." }
            }
        }
    }
}

/// Renders one image slot: the image with caption, or the notice for its
/// missing/unreadable outcome.
fn image_panel(panel: &ImagePanel) -> Markup {
    match panel {
        ImagePanel::Found {
            src,
            caption,
            width,
            height,
        } => html! {
            figure.panel {
                img src=(src) alt=(caption) width=(width) height=(height) loading="lazy";
                figcaption { (caption) }
            }
        },
        ImagePanel::Missing { filename } => html! {
            p.notice.notice-missing { "File not found: " (filename) }
        },
        ImagePanel::Unreadable { filename, detail } => html! {
            p.notice.notice-error { "Unreadable image " (filename) ": " (detail) }
        },
    }
}

/// Renders one tabular slot verbatim.
fn table_panel(panel: &TablePanel) -> Markup {
    match panel {
        TablePanel::Found(table) => html! {
            div.table-wrap {
                table {
                    thead {
                        tr {
                            @for header in &table.headers { th { (header) } }
                        }
                    }
                    tbody {
                        @for row in &table.rows {
                            tr {
                                @for cell in row { td { (cell) } }
                            }
                        }
                    }
                }
            }
        },
        TablePanel::Missing { filename } => html! {
            p.notice.notice-info { (filename) " not found in assets directory." }
        },
        TablePanel::Malformed { filename, detail } => html! {
            p.notice.notice-error { "Could not parse " (filename) ": " (detail) }
        },
    }
}

/// Year links for a taluka page. The default year doubles as the directory
/// index, so every label links to its own page.
fn year_selector(taluka: &str, years: &[YearLabel], current: YearLabel) -> Markup {
    html! {
        nav.year-selector {
            span.year-selector-label { "Academic Year:" }
            @for year in years {
                @let is_current = *year == current;
                a class=[is_current.then_some("current")]
                    href={ "/" (taluka) "/" (year) ".html" } { (year) }
            }
        }
    }
}

// ============================================================================
// Page renderers
// ============================================================================

/// Renders the Overview screen.
pub fn overview_page(
    data: &OverviewData,
    nav: &NavContext,
    site: &SiteSection,
    css: &str,
) -> Markup {
    let nav_markup = render_nav(nav, &Selection::Overview);

    let content = html! {
        main.overview-page {
            header.page-header {
                div {
                    h1 { (site.title) }
                    p.subtitle { (site.subtitle) }
                }
                a.about-link href="/about.html" { "About" }
            }
            div.intro-grid {
                section.panel-block {
                    h2 { "District Context" }
                    (image_panel(&data.intro))
                }
                section.panel-block {
                    h2 { "Agricultural Profile" }
                    @if let Some(profile) = &data.profile_html {
                        div.profile { (PreEscaped(profile)) }
                    } @else {
                        p.notice.notice-info { "profile.md not found in assets directory." }
                    }
                }
            }
            section.panel-block {
                h2 { "Market Price Dynamics" }
                (image_panel(&data.heatmap))
            }
            section.panel-block {
                h2 { "Statistical Analysis" }
                h3 { "Correlation Matrix" }
                ul.blurb {
                    li { b { "Price T-1 vs Single_Kharif" } ": impact on traditional monsoon farming." }
                    li { b { "Price T-1 vs Single_Non_Kharif" } ": specialized single-season farming." }
                    li { b { "Price T-1 vs Double_Crop" } ": response via Rabi adoption." }
                    li { b { "Price T-1 vs Triple_Crop" } ": sensitivity of year-round farming." }
                }
                (table_panel(&data.pearson))
                h3 { "Elasticity Matrix" }
                ul.blurb {
                    li { b { "> 1.0 / < -1.0 (elastic)" } ": high sensitivity to profit." }
                    li { b { "-1.0 to 1.0 (inelastic)" } ": resistance (subsistence or infrastructure)." }
                    li { b { "Negative" } ": opportunity cost, crop switching." }
                }
                (table_panel(&data.elasticity))
            }
        }
    };

    base_document(&site.title, css, nav_markup, content)
}

/// Renders the About sub-screen. This is the whole output for the
/// About-visible state; none of the Overview panels are rendered alongside
/// it.
pub fn about_page(data: &AboutData, nav: &NavContext, site: &SiteSection, css: &str) -> Markup {
    let nav_markup = render_nav(nav, &Selection::Overview);

    let content = html! {
        main.about-page {
            h1 { "About" }
            article.about-content {
                @if let Some(body) = &data.body_html {
                    (PreEscaped(body))
                } @else {
                    p.notice.notice-info { "about.md not found in assets directory." }
                }
            }
            a.back-link href="/" { "Back to Dashboard" }
        }
    };

    base_document(&format!("About - {}", site.title), css, nav_markup, content)
}

/// Renders one taluka screen at one selected year.
pub fn taluka_page(
    data: &TalukaData,
    current_year: YearLabel,
    nav: &NavContext,
    site: &SiteSection,
    css: &str,
) -> Markup {
    let nav_markup = render_nav(nav, &Selection::Taluka(data.name.clone()));

    let content = html! {
        main.taluka-page {
            h1 { (data.name) }
            section.panel-block {
                h2 { "Onion Price" }
                @match &data.price {
                    PricePanel::Matched(panel) => { (image_panel(panel)) }
                    PricePanel::NoMatch { taluka } => {
                        p.notice.notice-info {
                            "No price plot found matching '" (taluka)
                            "'. Local mandi data might be missing."
                        }
                    }
                }
            }
            section.panel-block {
                h2 { "Multi-Temporal Analysis" }
                (year_selector(&data.name, &data.years, current_year))
                div.chart-pair {
                    (image_panel(&data.combined_crops))
                    (image_panel(&data.hotspots))
                }
                h3 { "Distance Analysis" }
                (image_panel(&data.distance))
            }
            section.panel-block {
                h2 { "Change & Transition Analysis" }
                h3 { "Year-on-Year Change" }
                div.yoy-grid {
                    @for (_, panel) in &data.yoy {
                        div.yoy-cell { (image_panel(panel)) }
                    }
                }
                h3 { "Land Use Transition Map" }
                (image_panel(&data.transition))
            }
        }
    };

    base_document(
        &format!("{} - {}", data.name, site.title),
        css,
        nav_markup,
        content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::ArtifactKind;

    fn site() -> SiteSection {
        SiteSection::default()
    }

    fn nav() -> NavContext {
        NavContext {
            talukas: vec!["Dindori".to_string(), "Sinnar".to_string()],
            warn_empty: false,
        }
    }

    fn found(src: &str, caption: &str) -> ImagePanel {
        ImagePanel::Found {
            src: src.to_string(),
            caption: caption.to_string(),
            width: 640,
            height: 480,
        }
    }

    fn taluka_data(year: YearLabel) -> TalukaData {
        TalukaData {
            name: "Dindori".to_string(),
            years: crate::naming::year_labels(2017, 2024),
            price: PricePanel::NoMatch {
                taluka: "Dindori".to_string(),
            },
            combined_crops: found(
                &ArtifactKind::CombinedCrops(year).filename(),
                &ArtifactKind::CombinedCrops(year).caption(),
            ),
            hotspots: ImagePanel::Missing {
                filename: ArtifactKind::Hotspots(year).filename(),
            },
            distance: ImagePanel::Missing {
                filename: ArtifactKind::DistanceDistribution(year).filename(),
            },
            yoy: CropCategory::ALL
                .iter()
                .map(|&c| {
                    (
                        c,
                        ImagePanel::Missing {
                            filename: ArtifactKind::YearOverYear(c).filename(),
                        },
                    )
                })
                .collect(),
            transition: found("transition_map.jpg", "Land Use Transition Map"),
        }
    }

    #[test]
    fn missing_panel_names_the_filename() {
        let panel = ImagePanel::Missing {
            filename: "dist_distrib_2019-2020.jpg".to_string(),
        };
        let html = image_panel(&panel).into_string();
        assert!(html.contains("File not found: dist_distrib_2019-2020.jpg"));
    }

    #[test]
    fn found_panel_renders_img_with_dimensions() {
        let html = image_panel(&found("hotspots_2019-2020.jpg", "Hotspots (2019-2020)"))
            .into_string();
        assert!(html.contains(r#"src="hotspots_2019-2020.jpg""#));
        assert!(html.contains(r#"width="640""#));
        assert!(html.contains("Hotspots (2019-2020)"));
    }

    #[test]
    fn unreadable_panel_is_distinct_from_missing() {
        let panel = ImagePanel::Unreadable {
            filename: "hotspots_2019-2020.jpg".to_string(),
            detail: "bad jpeg".to_string(),
        };
        let html = image_panel(&panel).into_string();
        assert!(html.contains("Unreadable image"));
        assert!(!html.contains("File not found"));
    }

    #[test]
    fn table_panel_renders_verbatim_cells() {
        let table = Table {
            headers: vec!["Variable".into(), "Price T-1".into()],
            rows: vec![vec!["Double_Crop".into(), "0.61".into()]],
        };
        let html = table_panel(&TablePanel::Found(table)).into_string();
        assert!(html.contains("<th>Variable</th>"));
        assert!(html.contains("<td>0.61</td>"));
    }

    #[test]
    fn malformed_table_is_distinct_from_missing() {
        let html = table_panel(&TablePanel::Malformed {
            filename: "pearson.csv".into(),
            detail: "invalid utf-8".into(),
        })
        .into_string();
        assert!(html.contains("Could not parse pearson.csv"));

        let html = table_panel(&TablePanel::Missing {
            filename: "pearson.csv".into(),
        })
        .into_string();
        assert!(html.contains("pearson.csv not found in assets directory."));
    }

    #[test]
    fn nav_marks_current_taluka() {
        let html = render_nav(&nav(), &Selection::Taluka("Sinnar".to_string())).into_string();
        assert!(html.contains(r#"class="current""#));
        assert!(html.contains("/Sinnar/"));
    }

    #[test]
    fn nav_warns_when_empty() {
        let empty = NavContext {
            talukas: vec![],
            warn_empty: true,
        };
        let html = render_nav(&empty, &Selection::Overview).into_string();
        assert!(html.contains("Overview"));
        assert!(html.contains("No taluka data found"));
    }

    #[test]
    fn overview_page_has_about_link_and_sections() {
        let data = OverviewData {
            intro: ImagePanel::Missing {
                filename: crate::naming::INTRO_IMAGE.to_string(),
            },
            profile_html: Some("<p>Semi-arid climate.</p>".to_string()),
            heatmap: ImagePanel::Missing {
                filename: crate::naming::HEATMAP_IMAGE.to_string(),
            },
            pearson: TablePanel::Missing {
                filename: crate::naming::PEARSON_CSV.to_string(),
            },
            elasticity: TablePanel::Missing {
                filename: crate::naming::ELASTICITY_CSV.to_string(),
            },
        };
        let html = overview_page(&data, &nav(), &site(), "").into_string();
        assert!(html.contains(r#"href="/about.html""#));
        assert!(html.contains("District Context"));
        assert!(html.contains("Market Price Dynamics"));
        assert!(html.contains("Semi-arid climate."));
        assert!(html.contains("File not found: Figure_8_heat_map.jpeg"));
    }

    #[test]
    fn about_page_converts_markdown_and_links_back() {
        let data = AboutData {
            body_html: Some(markdown_to_html("## About Me\n\n**Project by** a researcher.")),
        };
        let html = about_page(&data, &nav(), &site(), "").into_string();
        assert!(html.contains("<h2>About Me</h2>"));
        assert!(html.contains("Back to Dashboard"));
    }

    #[test]
    fn about_page_handles_missing_body() {
        let html = about_page(&AboutData { body_html: None }, &nav(), &site(), "").into_string();
        assert!(html.contains("about.md not found"));
    }

    #[test]
    fn taluka_page_renders_all_slots_independently() {
        let year = YearLabel(2019);
        let html = taluka_page(&taluka_data(year), year, &nav(), &site(), "").into_string();

        // A missing chart never hides its siblings
        assert!(html.contains(r#"src="combined_crops_2019-2020.jpg""#));
        assert!(html.contains("File not found: hotspots_2019-2020.jpg"));
        assert!(html.contains("File not found: dist_distrib_2019-2020.jpg"));
        assert!(html.contains("File not found: YoY_Triple_Crop.jpg"));
        assert!(html.contains(r#"src="transition_map.jpg""#));
        assert!(html.contains("No price plot found matching 'Dindori'"));
    }

    #[test]
    fn year_selector_marks_current_year() {
        let html = year_selector(
            "Dindori",
            &crate::naming::year_labels(2017, 2024),
            YearLabel(2019),
        )
        .into_string();
        assert!(html.contains(r#"href="/Dindori/2019-2020.html""#));
        assert!(html.contains(r#"href="/Dindori/2024-2025.html""#));
        assert!(html.contains(r#"class="current""#));
    }

    #[test]
    fn yoy_markup_is_year_independent() {
        let nav = nav();
        let a = taluka_page(&taluka_data(YearLabel(2018)), YearLabel(2018), &nav, &site(), "")
            .into_string();
        let b = taluka_page(&taluka_data(YearLabel(2022)), YearLabel(2022), &nav, &site(), "")
            .into_string();

        let yoy_of = |page: &str| {
            let start = page.find("Year-on-Year Change").unwrap();
            let end = page.find("Land Use Transition Map").unwrap();
            page[start..end].to_string()
        };
        assert_eq!(yoy_of(&a), yoy_of(&b));
    }
}
