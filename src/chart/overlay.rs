//! Dependency overlay: which arrows are drawn, and how strongly.
//!
//! The overlay is a plain value owned by the UI layer. Each mode carries
//! only the transient state that means something in that mode.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Task, TaskKey};

const OPACITY_FULL: f32 = 1.0;
const OPACITY_IDLE: f32 = 0.6;
const OPACITY_DIM: f32 = 0.2;
const OPACITY_BACKGROUND: f32 = 0.3;

const STROKE_HIGHLIGHTED: f32 = 3.0;
const STROKE_NORMAL: f32 = 2.0;

/// The four arrow display policies offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// Arrows are never drawn.
    Hidden,
    /// Arrows follow the task under the pointer.
    #[default]
    Hover,
    /// Arrows follow a set of clicked tasks.
    Click,
    /// Every arrow is drawn.
    All,
}

impl OverlayMode {
    pub const ALL: [OverlayMode; 4] = [Self::Hidden, Self::Hover, Self::Click, Self::All];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Hover => "hover",
            Self::Click => "click",
            Self::All => "all",
        }
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hidden" | "none" | "off" => Ok(Self::Hidden),
            "hover" => Ok(Self::Hover),
            "click" | "select" => Ok(Self::Click),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown overlay mode '{other}' (expected hidden, hover, click or all)"
            )),
        }
    }
}

/// How one task's incoming arrows should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowStyle {
    pub visible: bool,
    pub highlighted: bool,
    pub opacity: f32,
    pub stroke_width: f32,
}

/// Current overlay mode together with its transient hover/selection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum OverlayState {
    Hidden,
    Hover { hovered: Option<TaskKey> },
    Click { selected: BTreeSet<TaskKey> },
    /// Every arrow drawn at background opacity. Carries no hover, so nothing
    /// is ever highlighted in this mode.
    All,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::Hover { hovered: None }
    }
}

impl OverlayState {
    pub fn new(mode: OverlayMode) -> Self {
        let mut state = Self::default();
        state.set_mode(mode);
        state
    }

    pub fn mode(&self) -> OverlayMode {
        match self {
            Self::Hidden => OverlayMode::Hidden,
            Self::Hover { .. } => OverlayMode::Hover,
            Self::Click { .. } => OverlayMode::Click,
            Self::All => OverlayMode::All,
        }
    }

    // ── Events ──────────────────────────────────────────────────

    /// Switch mode. The selection is always cleared; a hover survives only
    /// when staying in hover mode.
    pub fn set_mode(&mut self, mode: OverlayMode) {
        *self = match (mode, std::mem::take(self)) {
            (OverlayMode::Hover, Self::Hover { hovered }) => Self::Hover { hovered },
            (OverlayMode::Hover, _) => Self::Hover { hovered: None },
            (OverlayMode::Click, _) => Self::Click {
                selected: BTreeSet::new(),
            },
            (OverlayMode::Hidden, _) => Self::Hidden,
            (OverlayMode::All, _) => Self::All,
        };
        tracing::debug!(mode = %mode, "overlay mode changed");
    }

    /// Pointer entered (`Some`) or left (`None`) a task bar. Ignored outside hover mode.
    pub fn hover_task(&mut self, key: Option<TaskKey>) {
        if let Self::Hover { hovered } = self {
            *hovered = key;
        }
    }

    /// Add or remove a task from the selection. Ignored outside click mode.
    pub fn toggle_task_selection(&mut self, key: TaskKey) {
        if let Self::Click { selected } = self {
            if !selected.remove(&key) {
                selected.insert(key);
            }
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn hovered(&self) -> Option<TaskKey> {
        match self {
            Self::Hover { hovered } => *hovered,
            _ => None,
        }
    }

    pub fn is_selected(&self, key: TaskKey) -> bool {
        matches!(self, Self::Click { selected } if selected.contains(&key))
    }

    pub fn selected_count(&self) -> usize {
        match self {
            Self::Click { selected } => selected.len(),
            _ => 0,
        }
    }

    /// Whether arrows into `task` are drawn at all.
    pub fn should_show_arrow(&self, task: &Task) -> bool {
        match self {
            Self::Hidden => false,
            Self::All => true,
            Self::Hover { hovered: None } => true,
            Self::Hover { hovered: Some(key) } => task.key == *key || task.depends_on(*key),
            Self::Click { selected } => selected.is_empty() || touches_selection(task, selected),
        }
    }

    /// Whether arrows into `task` are emphasised.
    pub fn is_highlighted(&self, task: &Task) -> bool {
        match self {
            Self::Hidden | Self::All | Self::Hover { hovered: None } => false,
            Self::Hover { hovered: Some(key) } => task.key == *key || task.depends_on(*key),
            Self::Click { selected } => touches_selection(task, selected),
        }
    }

    /// Arrow opacity for the current mode.
    pub fn opacity(&self, highlighted: bool) -> f32 {
        match self {
            Self::All if highlighted => OPACITY_FULL,
            Self::All => OPACITY_BACKGROUND,
            Self::Hover { hovered: None } => OPACITY_IDLE,
            Self::Click { selected } if selected.is_empty() => OPACITY_IDLE,
            Self::Hover { .. } | Self::Click { .. } if highlighted => OPACITY_FULL,
            Self::Hover { .. } | Self::Click { .. } => OPACITY_DIM,
            Self::Hidden => OPACITY_IDLE,
        }
    }

    /// Everything a renderer needs to draw the arrows into `task`.
    pub fn arrow_style(&self, task: &Task) -> ArrowStyle {
        let highlighted = self.is_highlighted(task);
        ArrowStyle {
            visible: self.should_show_arrow(task),
            highlighted,
            opacity: self.opacity(highlighted),
            stroke_width: if highlighted {
                STROKE_HIGHLIGHTED
            } else {
                STROKE_NORMAL
            },
        }
    }
}

fn touches_selection(task: &Task, selected: &BTreeSet<TaskKey>) -> bool {
    selected.contains(&task.key) || task.depends.iter().any(|dep| selected.contains(dep))
}
