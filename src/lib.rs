//! Gantt timeline layout engine.
//!
//! Turns a list of tasks into everything a Gantt renderer needs: dependency
//! validation, a month-aligned time axis with year/quarter/month bins,
//! percent positions for every bar, display groups, and the dependency
//! overlay deciding which arrows to draw and how strongly.
//!
//! ```
//! use gantt_timeline::chart::{ChartLayout, OverlayState};
//! use gantt_timeline::io::parse_tasks;
//!
//! let tasks = parse_tasks(r#"[
//!     {"key": 1, "name": "Design", "start_date": "2024-01-01", "end_date": "2024-01-31"},
//!     {"key": 2, "name": "Build", "start_date": "2024-02-01", "end_date": "2024-02-15", "depends": [1]}
//! ]"#).unwrap();
//!
//! let layout = ChartLayout::build(&tasks).unwrap();
//! assert_eq!(layout.timeline.as_ref().unwrap().months.len(), 2);
//!
//! let mut overlay = OverlayState::default();
//! overlay.hover_task(Some(1));
//! assert!(overlay.is_highlighted(&tasks[1]));
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod session;

pub use chart::{ChartLayout, OverlayMode, OverlayState};
pub use error::GanttError;
pub use model::{Task, TaskKey};
pub use session::ChartSession;
