use std::path::PathBuf;

use chrono::NaiveDate;

use crate::model::TaskKey;

/// Everything that can reject a task list before it reaches the chart.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum GanttError {
    /// The input could not be read as a list of tasks.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A `depends` entry names a key that no task carries.
    #[error(
        "task \"{task_name}\" (key {task_key}) depends on task key {missing_key}, which does not exist"
    )]
    MissingDependency {
        task_name: String,
        task_key: TaskKey,
        missing_key: TaskKey,
    },

    /// A task starts before one of its prerequisites has ended.
    #[error(
        "task \"{task_name}\" (key {task_key}) starts on {start_date} but depends on \
         \"{dependency_name}\" (key {dependency_key}) which ends on {dependency_end}; \
         a task cannot start before its dependencies end"
    )]
    TemporalViolation {
        task_name: String,
        task_key: TaskKey,
        start_date: NaiveDate,
        dependency_name: String,
        dependency_key: TaskKey,
        dependency_end: NaiveDate,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GanttError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the two dependency-graph rejections.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingDependency { .. } | Self::TemporalViolation { .. }
        )
    }
}

impl From<serde_json::Error> for GanttError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
