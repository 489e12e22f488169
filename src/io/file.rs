use std::path::Path;

use crate::error::GanttError;
use crate::model::Task;

/// Parse a JSON task list. The root must be an array.
pub fn parse_tasks(json: &str) -> Result<Vec<Task>, GanttError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(GanttError::MalformedInput(
            "the root of the task list must be a JSON array".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Save tasks to a JSON file.
pub fn save_tasks(tasks: &[Task], path: &Path) -> Result<(), GanttError> {
    let json = serde_json::to_string_pretty(tasks)?;
    std::fs::write(path, json).map_err(|e| GanttError::io(path, e))
}

/// Load tasks from a JSON file.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, GanttError> {
    let json = std::fs::read_to_string(path).map_err(|e| GanttError::io(path, e))?;
    parse_tasks(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_task_array() {
        let json = r#"[
            {"key": 1, "name": "a", "start_date": "2024-01-01", "end_date": "2024-01-31"},
            {"key": 2, "name": "b", "start_date": "2024-02-01", "end_date": "2024-02-15",
             "group": "G", "depends": [1]}
        ]"#;
        let tasks = parse_tasks(json).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].depends, vec![1]);
        assert_eq!(tasks[1].group.as_deref(), Some("G"));
    }

    #[test]
    fn rejects_non_array_root() {
        let err = parse_tasks(r#"{"key": 1}"#).unwrap_err();
        assert!(matches!(err, GanttError::MalformedInput(_)));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn rejects_invalid_json_and_bad_dates() {
        assert!(matches!(parse_tasks("[{"), Err(GanttError::MalformedInput(_))));
        let bad_date = r#"[{"key": 1, "name": "a", "start_date": "2024-13-01", "end_date": "2024-01-31"}]"#;
        assert!(matches!(parse_tasks(bad_date), Err(GanttError::MalformedInput(_))));
        let missing_key = r#"[{"name": "a", "start_date": "2024-01-01", "end_date": "2024-01-31"}]"#;
        assert!(matches!(parse_tasks(missing_key), Err(GanttError::MalformedInput(_))));
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let tasks = vec![Task::new(7, "x", day, day).with_group("G")];
        save_tasks(&tasks, &path).unwrap();
        assert_eq!(load_tasks(&path).unwrap(), tasks);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tasks(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, GanttError::Io { .. }));
    }
}
