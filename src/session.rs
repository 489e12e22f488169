use std::path::Path;

use chrono::NaiveDate;

use crate::chart::{ChartLayout, OverlayMode, OverlayState, OverlayView, RowMetrics};
use crate::config::Settings;
use crate::error::GanttError;
use crate::io;
use crate::model::{Task, TaskKey};

/// State of one chart editing session.
///
/// Holds the raw input, the last task list that passed validation and its
/// layout, and the overlay. A rejected input never replaces what is shown.
#[derive(Debug, Clone)]
pub struct ChartSession {
    pub input: String,
    pub tasks: Vec<Task>,
    pub layout: ChartLayout,
    pub overlay: OverlayState,
    pub metrics: RowMetrics,
    /// Message of the last rejected input, cleared by the next success.
    pub error: Option<String>,
    pub status_message: String,
}

impl Default for ChartSession {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl ChartSession {
    pub fn new(settings: &Settings) -> Self {
        Self {
            input: sample_json(),
            tasks: Vec::new(),
            layout: ChartLayout::empty(),
            overlay: OverlayState::new(settings.default_mode),
            metrics: RowMetrics::with_width(settings.chart_width),
            error: None,
            status_message: "Ready".to_string(),
        }
    }

    // --- Input ---

    /// Replace the raw input and generate the chart from it.
    pub fn generate_from(&mut self, input: impl Into<String>) -> Result<(), GanttError> {
        self.input = input.into();
        self.generate()
    }

    /// Parse and validate the current input, then lay it out.
    pub fn generate(&mut self) -> Result<(), GanttError> {
        let result = io::parse_tasks(&self.input).and_then(|tasks| self.apply(tasks));
        self.record(result)
    }

    /// Load a JSON or CSV file and show it.
    pub fn open(&mut self, path: &Path) -> Result<(), GanttError> {
        let result = io::load_any(path).and_then(|tasks| {
            let input = serde_json::to_string_pretty(&tasks)?;
            self.apply(tasks)?;
            self.input = input;
            Ok(())
        });
        self.record(result)
    }

    /// Back to the built-in sample input with nothing shown.
    pub fn reset(&mut self) {
        self.input = sample_json();
        self.tasks.clear();
        self.layout = ChartLayout::empty();
        self.error = None;
        self.status_message = "Reset to sample".to_string();
    }

    fn apply(&mut self, tasks: Vec<Task>) -> Result<(), GanttError> {
        let layout = ChartLayout::build(&tasks)?;
        self.tasks = tasks;
        self.layout = layout;
        Ok(())
    }

    fn record(&mut self, result: Result<(), GanttError>) -> Result<(), GanttError> {
        match &result {
            Ok(()) => {
                self.error = None;
                self.status_message = format!("Tasks: {}", self.tasks.len());
            }
            Err(e) => {
                tracing::info!("input rejected: {e}");
                self.error = Some(e.to_string());
                self.status_message = "Input rejected".to_string();
            }
        }
        result
    }

    // --- Overlay events ---

    pub fn set_mode(&mut self, mode: OverlayMode) {
        self.overlay.set_mode(mode);
    }

    pub fn hover_task(&mut self, key: Option<TaskKey>) {
        self.overlay.hover_task(key);
    }

    pub fn toggle_task_selection(&mut self, key: TaskKey) {
        self.overlay.toggle_task_selection(key);
    }

    /// Overlay decisions for the current layout, using the reference geometry.
    pub fn overlay_view(&self) -> OverlayView {
        let rects = self.layout.bar_rects(&self.metrics);
        self.layout.overlay_view(&self.overlay, &rects)
    }
}

/// Built-in example project shown in a fresh session.
pub fn sample_tasks() -> Vec<Task> {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default();
    vec![
        Task::new(1, "Project Kickoff", d(2025, 1, 6), d(2025, 1, 10)).with_group("Planning"),
        Task::new(2, "Requirements Gathering", d(2025, 1, 10), d(2025, 1, 31))
            .with_group("Planning")
            .with_depends([1]),
        Task::new(3, "UI Design", d(2025, 2, 3), d(2025, 3, 14))
            .with_group("Execution")
            .with_depends([2]),
        Task::new(4, "Backend Development", d(2025, 2, 3), d(2025, 4, 18))
            .with_group("Execution")
            .with_depends([2]),
        Task::new(5, "Testing & QA", d(2025, 4, 21), d(2025, 5, 16))
            .with_group("Execution")
            .with_depends([3, 4]),
        Task::new(6, "Launch", d(2025, 5, 19), d(2025, 5, 23))
            .with_group("Release")
            .with_depends([5]),
        Task::new(7, "Retrospective", d(2025, 6, 2), d(2025, 6, 4)).with_depends([6]),
    ]
}

/// [`sample_tasks`] as pretty JSON.
pub fn sample_json() -> String {
    serde_json::to_string_pretty(&sample_tasks()).unwrap_or_else(|_| "[]".to_string())
}
