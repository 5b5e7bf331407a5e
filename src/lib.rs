//! # Taluka Dash
//!
//! A static dashboard generator for taluka-level geospatial findings. Your
//! filesystem is the data source: one directory per taluka holds the plot
//! images an upstream analysis produced, a flat directory holds price trend
//! plots, and a fixed assets directory holds the district-level images and
//! matrices. The generator walks that tree and emits a self-contained HTML
//! dashboard.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content is processed in two independent stages, joined by a JSON manifest:
//!
//! ```text
//! 1. Scan      data root  →  manifest.json   (filesystem → structured data)
//! 2. Generate  manifest   →  dist/           (static HTML + copied artifacts)
//! ```
//!
//! The separation keeps each stage inspectable (the manifest is
//! human-readable JSON) and testable (generation is a function of the
//! manifest plus whatever the filesystem holds at render time).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: discovers talukas, price plots and assets, produces the manifest |
//! | [`generate`] | Stage 2: enumerates view states and renders the site |
//! | [`state`] | Explicit view state machine: `ViewState` + `Action` + `update()` |
//! | [`render`] | Maud templates mapping resolved panel data to markup |
//! | [`naming`] | Fixed filename conventions for artifacts and assets |
//! | [`matcher`] | Substring matching for price plots |
//! | [`loader`] | Image probing/decoding with a missing-vs-unreadable distinction |
//! | [`tables`] | CSV matrices, loaded in full and rendered verbatim |
//! | [`config`] | `config.toml` loading, validation, CSS variable generation |
//! | [`output`] | CLI output formatting for both stages |
//!
//! # Design Decisions
//!
//! ## Pages Are View States
//!
//! The dashboard this replaces was a single interactive page whose content
//! was a function of three inputs: the selected taluka, the selected
//! academic year, and an "About visible" flag. That state space is finite
//! and small, so the generator enumerates it: every page is the render of
//! one [`state::ViewState`] reached through [`state::update`]. The About
//! flag short-circuits rendering exactly as the interactive version did:
//! the About state's output contains About content and nothing else.
//!
//! ## Missing Is Not an Error
//!
//! Artifacts appear and disappear as the upstream analysis is re-run, so a
//! missing file is an expected outcome for every panel. Each panel resolves
//! independently through [`loader`] and renders either its content or a
//! notice naming the file it looked for; one absent chart never takes down
//! a page. Unreadable bytes and malformed CSV are distinct outcomes with
//! distinct notices, because silently conflating them with "missing" hides
//! real data corruption.
//!
//! ## Deterministic Price Matching
//!
//! Price plots carry no naming convention, only a taluka name buried
//! somewhere in the filename. Matching is case-insensitive substring
//! containment, first match wins. The scanner sorts the candidate list so
//! "first" means the same thing on every platform, rather than whatever
//! order the directory enumeration happens to produce.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed
//! markup is a compile error, interpolation is auto-escaped, and there is
//! no template directory to ship or get out of sync.

pub mod config;
pub mod generate;
pub mod loader;
pub mod matcher;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod state;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_helpers;
