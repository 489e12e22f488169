pub mod csv_export;
pub mod csv_import;
pub mod file;

use std::path::Path;

use crate::error::GanttError;
use crate::model::Task;

pub use csv_export::{export_csv, export_csv_string};
pub use csv_import::{import_csv, import_csv_str};
pub use file::{load_tasks, parse_tasks, save_tasks};

/// True for paths the CSV reader/writer should handle.
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Load tasks from a `.csv` or JSON file, chosen by extension.
pub fn load_any(path: &Path) -> Result<Vec<Task>, GanttError> {
    if is_csv(path) {
        let (tasks, skipped) = import_csv(path)?;
        if skipped > 0 {
            tracing::warn!(path = %path.display(), skipped, "some CSV rows were skipped");
        }
        Ok(tasks)
    } else {
        load_tasks(path)
    }
}

/// Save tasks as CSV or JSON, chosen by extension.
pub fn save_any(tasks: &[Task], path: &Path) -> Result<(), GanttError> {
    if is_csv(path) {
        export_csv(tasks, path).map(|_| ())
    } else {
        save_tasks(tasks, path)
    }
}
