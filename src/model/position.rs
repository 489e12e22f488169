use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::task::Task;

/// Horizontal placement of a task bar, in percent of the timeline width.
///
/// Only meaningful for the span it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskPosition {
    pub left: f64,
    pub width: f64,
}

impl TaskPosition {
    /// A bar covering the whole axis.
    pub const FULL: TaskPosition = TaskPosition {
        left: 0.0,
        width: 100.0,
    };

    /// Map the task's interval onto the `[min_date, max_date]` span.
    ///
    /// A span of zero days yields [`TaskPosition::FULL`]. A task that ends
    /// before it starts gets zero width.
    pub fn compute(task: &Task, min_date: NaiveDate, max_date: NaiveDate) -> Self {
        let total_days = (max_date - min_date).num_days();
        if total_days <= 0 {
            return Self::FULL;
        }

        let total = total_days as f64;
        let start_offset = (task.start_date - min_date).num_days() as f64;
        let duration = task.duration_days().max(0) as f64;

        Self {
            left: start_offset / total * 100.0,
            width: duration / total * 100.0,
        }
    }

    /// Right edge, in percent.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// `left` as a CSS length, e.g. `"52.54237288135593%"`.
    pub fn css_left(&self) -> String {
        format!("{}%", self.left)
    }

    pub fn css_width(&self) -> String {
        format!("{}%", self.width)
    }
}

impl fmt::Display for TaskPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "left: {}%; width: {}%", self.left, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn places_task_proportionally() {
        let task = Task::new(2, "b", d(2024, 2, 1), d(2024, 2, 15));
        let pos = TaskPosition::compute(&task, d(2024, 1, 1), d(2024, 2, 29));
        assert!((pos.left - 31.0 / 59.0 * 100.0).abs() < 1e-9);
        assert!((pos.width - 14.0 / 59.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn first_task_starts_at_zero() {
        let task = Task::new(1, "a", d(2024, 1, 1), d(2024, 1, 31));
        let pos = TaskPosition::compute(&task, d(2024, 1, 1), d(2024, 2, 29));
        assert_eq!(pos.left, 0.0);
        assert_eq!(pos.css_left(), "0%");
    }

    #[test]
    fn zero_day_span_fills_the_axis() {
        let day = d(2024, 3, 3);
        let task = Task::new(1, "a", day, day);
        let pos = TaskPosition::compute(&task, day, day);
        assert_eq!(pos, TaskPosition::FULL);
        assert!(pos.left.is_finite() && pos.width.is_finite());
    }

    #[test]
    fn inverted_interval_has_zero_width() {
        let task = Task::new(1, "a", d(2024, 1, 20), d(2024, 1, 10));
        let pos = TaskPosition::compute(&task, d(2024, 1, 1), d(2024, 1, 31));
        assert_eq!(pos.width, 0.0);
    }

    #[test]
    fn display_renders_css_pair() {
        let pos = TaskPosition { left: 25.0, width: 50.0 };
        assert_eq!(pos.to_string(), "left: 25%; width: 50%");
        assert_eq!(pos.css_width(), "50%");
        assert_eq!(pos.right(), 75.0);
    }
}
