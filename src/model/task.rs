use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity of a task within one task list.
pub type TaskKey = i64;

/// Label used for tasks that carry no group.
pub const DEFAULT_GROUP: &str = "Ungrouped";

/// A single task in the Gantt chart.
///
/// Tasks arrive wholesale from external input (JSON or CSV) and are never
/// mutated by the layout pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub key: TaskKey,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Optional group/category name for organizing tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Keys of the tasks this one waits on, in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<TaskKey>,
}

impl Task {
    /// Create a new ungrouped task with no dependencies.
    pub fn new(
        key: TaskKey,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            start_date,
            end_date,
            group: None,
            depends: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_depends(mut self, depends: impl IntoIterator<Item = TaskKey>) -> Self {
        self.depends = depends.into_iter().collect();
        self
    }

    /// The group this task is displayed under. Empty names count as no group.
    pub fn group_name(&self) -> &str {
        match self.group.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_GROUP,
        }
    }

    /// True when `key` is one of this task's prerequisites.
    pub fn depends_on(&self, key: TaskKey) -> bool {
        self.depends.contains(&key)
    }

    /// Length of the task in whole days (negative for inverted intervals).
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
