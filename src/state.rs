//! Dashboard view state.
//!
//! Everything a visitor can do on the dashboard is an [`Action`]; [`update`]
//! maps the current state and an action to the next state. No I/O here, and
//! no hidden globals: the About flag that the original single-page layout
//! kept in session storage is an ordinary field.
//!
//! ```text
//! ViewState + Action  →  update()  →  new ViewState
//! ```
//!
//! The generate stage enumerates every state reachable from
//! [`ViewState::initial`] and emits one page per state, so each generated
//! page is the render of exactly one state.

use crate::naming::YearLabel;

/// Which screen the navigation list has selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Overview,
    Taluka(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selection: Selection,
    /// Selected academic year on a taluka screen. Reset to the default
    /// whenever the selection changes, like the slider widget it models.
    pub year: YearLabel,
    /// About sub-screen visible. Only meaningful on Overview; while set, the
    /// renderer emits the About content and nothing else.
    pub show_about: bool,
    default_year: YearLabel,
}

impl ViewState {
    /// The state a fresh session starts in: Overview, first year, About
    /// hidden.
    pub fn initial(default_year: YearLabel) -> Self {
        Self {
            selection: Selection::Overview,
            year: default_year,
            show_about: false,
            default_year,
        }
    }
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectOverview,
    SelectTaluka(String),
    SelectYear(YearLabel),
    OpenAbout,
    CloseAbout,
}

/// Pure transition function. The latest selection fully determines the
/// screen; there is no history stack beyond the About flag.
pub fn update(state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();
    match action {
        Action::SelectOverview => {
            next.selection = Selection::Overview;
            next.year = state.default_year;
            next.show_about = false;
        }
        Action::SelectTaluka(name) => {
            next.selection = Selection::Taluka(name);
            next.year = state.default_year;
            next.show_about = false;
        }
        Action::SelectYear(year) => {
            next.year = year;
        }
        Action::OpenAbout => {
            // The About control only exists on the Overview screen
            if next.selection == Selection::Overview {
                next.show_about = true;
            }
        }
        Action::CloseAbout => {
            next.show_about = false;
        }
    }
    next
}
