use std::collections::HashMap;

use egui::epaint::CubicBezierShape;
use egui::{pos2, Color32, Pos2, Rect, Stroke, Vec2};
use serde::Serialize;

use super::color::ArrowColor;
use super::overlay::{ArrowStyle, OverlayState};
use crate::model::{Task, TaskKey};

/// Cubic curve from the right edge of a dependency's bar to the left edge of
/// its dependent's bar.
///
/// Both control points sit on the horizontal midpoint, each at its own
/// endpoint's height, so vertically offset bars get an S-curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowPath {
    pub start: Pos2,
    pub control1: Pos2,
    pub control2: Pos2,
    pub end: Pos2,
}

impl ArrowPath {
    pub fn between(source: Rect, target: Rect) -> Self {
        let start = pos2(source.right(), source.center().y);
        let end = pos2(target.left(), target.center().y);
        let mid_x = (start.x + end.x) / 2.0;
        Self {
            start,
            control1: pos2(mid_x, start.y),
            control2: pos2(mid_x, end.y),
            end,
        }
    }

    pub fn points(&self) -> [Pos2; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    /// SVG path data, e.g. `M 10 5 C 20 5, 20 25, 30 25`.
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }

    /// Triangle for the arrow head, tip on `end`, pointing along the curve's
    /// final tangent.
    pub fn head(&self, size: f32) -> [Pos2; 3] {
        let tangent = self.end - self.control2;
        let dir = if tangent.length_sq() > f32::EPSILON {
            tangent.normalized()
        } else {
            Vec2::X
        };
        let back = self.end - dir * size;
        let side = dir.rot90() * (size * 0.3);
        [self.end, back + side, back - side]
    }

    pub fn to_shape(&self, stroke: Stroke) -> CubicBezierShape {
        CubicBezierShape::from_points_stroke(self.points(), false, Color32::TRANSPARENT, stroke)
    }
}

/// One drawable dependency arrow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyArrow {
    /// The prerequisite task.
    pub source: TaskKey,
    /// The task that depends on `source`.
    pub target: TaskKey,
    pub path: ArrowPath,
    pub color: ArrowColor,
    pub style: ArrowStyle,
}

impl DependencyArrow {
    pub fn stroke(&self) -> Stroke {
        Stroke::new(
            self.style.stroke_width,
            self.color.with_opacity(self.style.opacity),
        )
    }

    pub fn shape(&self) -> CubicBezierShape {
        self.path.to_shape(self.stroke())
    }
}

/// Collect the visible arrows for the current overlay state.
///
/// `bar_rects` holds the measured bar rectangle of every rendered task.
/// Arrows whose bars were not measured are skipped.
pub fn dependency_arrows(
    tasks: &[Task],
    overlay: &OverlayState,
    bar_rects: &HashMap<TaskKey, Rect>,
) -> Vec<DependencyArrow> {
    let mut arrows = Vec::new();

    for task in tasks {
        if task.depends.is_empty() {
            continue;
        }
        let style = overlay.arrow_style(task);
        if !style.visible {
            continue;
        }
        let Some(&target_rect) = bar_rects.get(&task.key) else {
            continue;
        };

        for &dep_key in &task.depends {
            let Some(&source_rect) = bar_rects.get(&dep_key) else {
                continue;
            };
            arrows.push(DependencyArrow {
                source: dep_key,
                target: task.key,
                path: ArrowPath::between(source_rect, target_rect),
                color: ArrowColor::for_pair(dep_key, task.key),
                style,
            });
        }
    }

    arrows
}
