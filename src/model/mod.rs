pub mod group;
pub mod position;
pub mod task;
pub mod timeline;
pub mod validate;

pub use group::{group_tasks, TaskGroup};
pub use position::TaskPosition;
pub use task::{Task, TaskKey, DEFAULT_GROUP};
pub use timeline::{HeaderCell, QuarterBin, TimelineRange, TimelineScale, YearBin};
pub use validate::validate_dependencies;
