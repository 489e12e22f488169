use std::collections::HashMap;

use egui::{pos2, vec2, Color32, Rect};
use serde::Serialize;

use super::arrows::{dependency_arrows, DependencyArrow};
use super::color::hex_color;
use super::overlay::{ArrowStyle, OverlayMode, OverlayState};
use crate::error::GanttError;
use crate::model::{
    group_tasks, validate_dependencies, HeaderCell, Task, TaskKey, TaskPosition, TimelineRange,
    TimelineScale,
};

// ── Reference geometry ──────────────────────────────────────────────────────

pub const ROW_HEIGHT: f32 = 30.0;
pub const ROW_GAP: f32 = 2.0;
pub const GROUP_HEADER_HEIGHT: f32 = 24.0;
pub const GROUP_GAP: f32 = 16.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so bars don't touch row edges

/// Pixel metrics used to turn percent positions into bar rectangles.
///
/// Renderers that measure their own bars can ignore this and pass their
/// rectangles to [`dependency_arrows`] directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    pub chart_width: f32,
    pub row_height: f32,
    pub row_gap: f32,
    pub group_header_height: f32,
    pub group_gap: f32,
    pub bar_inset: f32,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            chart_width: 1200.0,
            row_height: ROW_HEIGHT,
            row_gap: ROW_GAP,
            group_header_height: GROUP_HEADER_HEIGHT,
            group_gap: GROUP_GAP,
            bar_inset: BAR_INSET,
        }
    }
}

impl RowMetrics {
    pub fn with_width(chart_width: f32) -> Self {
        Self {
            chart_width,
            ..Default::default()
        }
    }
}

// ── Layout ──────────────────────────────────────────────────────────────────

/// One header row (years, quarters or months).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderRow {
    pub scale: TimelineScale,
    pub cells: Vec<HeaderCell>,
}

/// A task together with its bar position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: Task,
    pub position: TaskPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLayout {
    pub name: String,
    #[serde(with = "hex_color")]
    pub color: Color32,
    pub rows: Vec<TaskRow>,
}

/// Everything about a chart that does not depend on the overlay.
///
/// Built from a validated task list and replaced wholesale whenever the
/// list changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    /// `None` when there are no tasks.
    pub timeline: Option<TimelineRange>,
    pub headers: Vec<HeaderRow>,
    pub grid_lines: Vec<f64>,
    pub groups: Vec<GroupLayout>,
    /// Input order, which arrow iteration follows.
    #[serde(skip)]
    tasks: Vec<Task>,
}

impl ChartLayout {
    /// Validate the task list and lay it out.
    pub fn build(tasks: &[Task]) -> Result<Self, GanttError> {
        validate_dependencies(tasks)?;

        let Some(timeline) = TimelineRange::compute(tasks) else {
            tracing::debug!("empty task list, nothing to lay out");
            return Ok(Self::empty());
        };

        let headers = TimelineScale::ALL
            .into_iter()
            .map(|scale| HeaderRow {
                scale,
                cells: timeline.header_row(scale),
            })
            .collect();

        let groups: Vec<GroupLayout> = group_tasks(tasks)
            .into_iter()
            .map(|group| GroupLayout {
                name: group.name.to_string(),
                color: group.color(),
                rows: group
                    .tasks
                    .iter()
                    .map(|task| TaskRow {
                        task: (*task).clone(),
                        position: TaskPosition::compute(task, timeline.min_date, timeline.max_date),
                    })
                    .collect(),
            })
            .collect();

        tracing::debug!(
            tasks = tasks.len(),
            groups = groups.len(),
            months = timeline.month_count(),
            "chart laid out"
        );

        Ok(Self {
            grid_lines: timeline.month_grid_lines(),
            timeline: Some(timeline),
            headers,
            groups,
            tasks: tasks.to_vec(),
        })
    }

    pub fn empty() -> Self {
        Self {
            timeline: None,
            headers: Vec::new(),
            grid_lines: Vec::new(),
            groups: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Rows in display order (group by group).
    pub fn rows(&self) -> impl Iterator<Item = &TaskRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    pub fn position_of(&self, key: TaskKey) -> Option<TaskPosition> {
        self.rows().find(|r| r.task.key == key).map(|r| r.position)
    }

    /// Bar rectangles in display order, stacked group by group from y = 0.
    pub fn bar_rects(&self, metrics: &RowMetrics) -> HashMap<TaskKey, Rect> {
        let mut rects = HashMap::new();
        let mut y = 0.0;

        for group in &self.groups {
            y += metrics.group_header_height;
            for row in &group.rows {
                let x = row.position.left as f32 / 100.0 * metrics.chart_width;
                let width = row.position.width as f32 / 100.0 * metrics.chart_width;
                let rect = Rect::from_min_size(
                    pos2(x, y + metrics.bar_inset),
                    vec2(width, metrics.row_height - metrics.bar_inset * 2.0),
                );
                rects.insert(row.task.key, rect);
                y += metrics.row_height + metrics.row_gap;
            }
            y += metrics.group_gap;
        }

        rects
    }

    /// Per-task overlay decisions plus the arrows to draw, for the given
    /// overlay state and bar rectangles.
    pub fn overlay_view(
        &self,
        overlay: &OverlayState,
        bar_rects: &HashMap<TaskKey, Rect>,
    ) -> OverlayView {
        let tasks = self
            .tasks
            .iter()
            .map(|task| TaskOverlay {
                key: task.key,
                selected: overlay.is_selected(task.key),
                arrow: overlay.arrow_style(task),
            })
            .collect();

        OverlayView {
            mode: overlay.mode(),
            hovered: overlay.hovered(),
            selected_count: overlay.selected_count(),
            tasks,
            arrows: dependency_arrows(&self.tasks, overlay, bar_rects),
        }
    }
}

// ── Overlay view ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskOverlay {
    pub key: TaskKey,
    /// Drawn with the selection ring in click mode.
    pub selected: bool,
    pub arrow: ArrowStyle,
}

/// Overlay decisions for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub mode: OverlayMode,
    pub hovered: Option<TaskKey>,
    pub selected_count: usize,
    pub tasks: Vec<TaskOverlay>,
    pub arrows: Vec<DependencyArrow>,
}

impl OverlayView {
    pub fn task(&self, key: TaskKey) -> Option<&TaskOverlay> {
        self.tasks.iter().find(|t| t.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new(1, "Design", d(2024, 1, 1), d(2024, 1, 31)).with_group("Plan"),
            Task::new(2, "Build", d(2024, 2, 1), d(2024, 2, 15))
                .with_group("Make")
                .with_depends([1]),
            Task::new(3, "Review", d(2024, 1, 10), d(2024, 1, 20)).with_group("Plan"),
        ]
    }

    #[test]
    fn builds_groups_and_headers() {
        let layout = ChartLayout::build(&tasks()).unwrap();
        let names: Vec<&str> = layout.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Plan", "Make"]);
        assert_eq!(layout.groups[0].rows.len(), 2);
        assert_eq!(layout.headers.len(), 3);
        assert_eq!(layout.grid_lines, vec![50.0]);
        assert_eq!(layout.position_of(1).unwrap().left, 0.0);
    }

    #[test]
    fn rejects_invalid_tasks() {
        let mut bad = tasks();
        bad[1].depends = vec![99];
        assert!(matches!(
            ChartLayout::build(&bad),
            Err(GanttError::MissingDependency { missing_key: 99, .. })
        ));
    }

    #[test]
    fn empty_list_gives_empty_layout() {
        let layout = ChartLayout::build(&[]).unwrap();
        assert!(layout.is_empty());
        assert!(layout.timeline.is_none());
        assert!(layout.bar_rects(&RowMetrics::default()).is_empty());
    }

    #[test]
    fn bar_rects_stack_by_group() {
        let layout = ChartLayout::build(&tasks()).unwrap();
        let metrics = RowMetrics::with_width(590.0);
        let rects = layout.bar_rects(&metrics);

        // Plan: Design, Review; then Make: Build.
        assert_eq!(rects[&1].top(), GROUP_HEADER_HEIGHT + BAR_INSET);
        assert_eq!(rects[&3].top(), GROUP_HEADER_HEIGHT + ROW_HEIGHT + ROW_GAP + BAR_INSET);
        assert!(rects[&2].top() > rects[&3].top());
        // Span is 59 days; Build starts 31 days in.
        assert!((rects[&2].left() - 310.0).abs() < 1e-3);
        assert!((rects[&1].width() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn overlay_view_follows_hover() {
        let layout = ChartLayout::build(&tasks()).unwrap();
        let rects = layout.bar_rects(&RowMetrics::default());
        let mut overlay = OverlayState::default();
        overlay.hover_task(Some(1));

        let view = layout.overlay_view(&overlay, &rects);
        assert_eq!(view.mode, OverlayMode::Hover);
        assert_eq!(view.hovered, Some(1));
        assert_eq!(view.task(2).unwrap().arrow.opacity, 1.0);
        assert_eq!(view.task(3).unwrap().arrow.opacity, 0.2);
        assert_eq!(view.arrows.len(), 1);
    }

    #[test]
    fn serializes_group_color_as_hex() {
        let layout = ChartLayout::build(&tasks()).unwrap();
        let json = serde_json::to_value(&layout).unwrap();
        let color = json["groups"][0]["color"].as_str().unwrap();
        assert!(color.starts_with('#') && color.len() == 7);
        assert_eq!(json["groups"][0]["rows"][0]["key"], 1);
        assert!(json.get("tasks").is_none());
    }
}
