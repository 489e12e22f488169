//! Everything the renderer consumes: layout, overlay decisions, arrows and colors.

pub mod arrows;
pub mod color;
pub mod layout;
pub mod overlay;

pub use arrows::{dependency_arrows, ArrowPath, DependencyArrow};
pub use color::{arrow_color, pastel_color_from_text, to_hex, ArrowColor};
pub use layout::{ChartLayout, GroupLayout, HeaderRow, OverlayView, RowMetrics, TaskOverlay, TaskRow};
pub use overlay::{ArrowStyle, OverlayMode, OverlayState};
