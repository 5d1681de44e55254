// src/report/tabs.rs
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::core::submission::{StateKind, Transition, TransitionObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Score,
    Missing,
    Suggestions,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 3] = [Self::Score, Self::Missing, Self::Suggestions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Missing => "missing",
            Self::Suggestions => "suggestions",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Score => "ATS Score",
            Self::Missing => "Missing Elements",
            Self::Suggestions => "Suggestions",
        }
    }
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "score" | "s" => Ok(Self::Score),
            "missing" | "m" => Ok(Self::Missing),
            "suggestions" | "g" => Ok(Self::Suggestions),
            other => Err(format!(
                "Unknown tab: {}. Use score, missing or suggestions",
                other
            )),
        }
    }
}

/// Emitted when the visible tab actually changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChanged {
    pub from: ActiveTab,
    pub to: ActiveTab,
}

#[derive(Debug, Default)]
struct TabState {
    active: ActiveTab,
    interactive: bool,
}

/// Which result section is shown. Only switchable while a result is on
/// screen; a new result always opens on the score tab.
#[derive(Debug, Default)]
pub struct TabViewController {
    state: Mutex<TabState>,
}

impl TabViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ActiveTab {
        self.lock().active
    }

    pub fn is_interactive(&self) -> bool {
        self.lock().interactive
    }

    /// Switch to `tab`. Returns `None` when nothing changed: the tab was
    /// already active, or there is no result to switch between.
    pub fn select(&self, tab: ActiveTab) -> Option<TabChanged> {
        let mut state = self.lock();
        if !state.interactive || state.active == tab {
            return None;
        }
        let change = TabChanged {
            from: state.active,
            to: tab,
        };
        state.active = tab;
        debug!("Tab {} -> {}", change.from, change.to);
        Some(change)
    }

    fn lock(&self) -> MutexGuard<'_, TabState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TransitionObserver for TabViewController {
    fn on_transition(&self, transition: &Transition<'_>) {
        let mut state = self.lock();
        if transition.entered(StateKind::Succeeded) {
            state.active = ActiveTab::Score;
            state.interactive = true;
        } else if transition.to.kind() != StateKind::Succeeded {
            state.interactive = false;
        }
    }
}
