//! Page navigation as a pure reducer: `(state, action) -> (state, effect)`.
//! The caller performs the effect and renders the new state.

use std::fmt;
use std::str::FromStr;

use crate::model::{Day, DayFilter};

/// Pages reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageName {
    Home,
    Day(Day),
    Placements,
}

impl PageName {
    pub const ALL: [PageName; 5] = [
        PageName::Home,
        PageName::Day(Day::ONE),
        PageName::Day(Day::TWO),
        PageName::Day(Day::THREE),
        PageName::Placements,
    ];

    pub fn href(self) -> String {
        match self {
            PageName::Home => "/".to_string(),
            PageName::Day(d) => format!("/day/{}", d),
            PageName::Placements => "/placements".to_string(),
        }
    }

    pub fn title(self) -> String {
        match self {
            PageName::Home => "Home".to_string(),
            PageName::Day(d) => format!("Day {}", d),
            PageName::Placements => "Placements".to_string(),
        }
    }
}

impl FromStr for PageName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(PageName::Home),
            "placements" => Ok(PageName::Placements),
            other => other
                .strip_prefix("day")
                .and_then(|n| n.parse::<Day>().ok())
                .map(PageName::Day)
                .ok_or_else(|| format!("unknown page: {}", other)),
        }
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageName::Home => f.write_str("home"),
            PageName::Day(d) => write!(f, "day{}", d),
            PageName::Placements => f.write_str("placements"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Day(Day),
    Placements,
    Company { day: Day, sheet: String, name: String },
}

impl Page {
    fn from_name(name: PageName) -> Page {
        match name {
            PageName::Home => Page::Home,
            PageName::Day(d) => Page::Day(d),
            PageName::Placements => Page::Placements,
        }
    }

    /// Navigation bar entry to highlight.
    pub fn nav_name(&self) -> Option<PageName> {
        match self {
            Page::Home => Some(PageName::Home),
            Page::Day(d) => Some(PageName::Day(*d)),
            Page::Placements => Some(PageName::Placements),
            Page::Company { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub page: Page,
    pub placement_filter: DayFilter,
    /// Section shown on the company page; `None` means the first listed.
    pub company_section: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            page: Page::Home,
            placement_filter: DayFilter::All,
            company_section: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(PageName),
    OpenCompany { day: Day, sheet: String, name: String },
    Back,
    SelectSection(String),
    FilterPlacements(DayFilter),
    Refresh,
}

/// Work the caller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadDashboard,
    LoadSchedule(Day),
    LoadCompany { day: Day, sheet: String },
    LoadPlacements,
    /// Re-render the placements table from data already loaded.
    RenderPlacements(DayFilter),
    /// Re-render only the company content region.
    RenderSection(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: AppState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn stay(state: &AppState) -> Transition {
        Transition {
            state: state.clone(),
            effect: None,
        }
    }
}

fn load_effect(page: &Page) -> Effect {
    match page {
        Page::Home => Effect::LoadDashboard,
        Page::Day(d) => Effect::LoadSchedule(*d),
        Page::Placements => Effect::LoadPlacements,
        Page::Company { day, sheet, .. } => Effect::LoadCompany {
            day: *day,
            sheet: sheet.clone(),
        },
    }
}

pub fn reduce(state: &AppState, action: Action) -> Transition {
    match action {
        Action::Navigate(name) => {
            let page = Page::from_name(name);
            // home shows the snapshot kept by the periodic refresh
            let effect = match page {
                Page::Home => None,
                _ => Some(load_effect(&page)),
            };
            Transition {
                state: AppState {
                    page,
                    placement_filter: DayFilter::All,
                    company_section: None,
                },
                effect,
            }
        }

        Action::OpenCompany { day, sheet, name } => match state.page {
            // companies are only reachable from their own day's schedule
            Page::Day(current) if current == day => {
                let page = Page::Company { day, sheet, name };
                let effect = load_effect(&page);
                Transition {
                    state: AppState {
                        page,
                        company_section: None,
                        ..state.clone()
                    },
                    effect: Some(effect),
                }
            }
            _ => Transition::stay(state),
        },

        Action::Back => match &state.page {
            Page::Company { day, .. } => reduce(state, Action::Navigate(PageName::Day(*day))),
            _ => Transition::stay(state),
        },

        Action::SelectSection(section) => match state.page {
            Page::Company { .. } => Transition {
                state: AppState {
                    company_section: Some(section.clone()),
                    ..state.clone()
                },
                effect: Some(Effect::RenderSection(section)),
            },
            _ => Transition::stay(state),
        },

        Action::FilterPlacements(filter) => match state.page {
            Page::Placements => Transition {
                state: AppState {
                    placement_filter: filter,
                    ..state.clone()
                },
                effect: Some(Effect::RenderPlacements(filter)),
            },
            _ => Transition::stay(state),
        },

        Action::Refresh => Transition {
            state: state.clone(),
            effect: Some(load_effect(&state.page)),
        },
    }
}
