use std::path::Path;

use crate::error::GanttError;
use crate::model::Task;

const HEADER: [&str; 6] = ["Key", "Name", "Start Date", "End Date", "Group", "Depends"];

fn write_tasks<W: std::io::Write>(wtr: &mut csv::Writer<W>, tasks: &[Task]) -> Result<(), GanttError> {
    wtr.write_record(HEADER)?;

    for task in tasks {
        let key = task.key.to_string();
        let start = task.start_date.format("%Y-%m-%d").to_string();
        let end = task.end_date.format("%Y-%m-%d").to_string();
        let depends: Vec<String> = task.depends.iter().map(|k| k.to_string()).collect();
        let depends = depends.join(" ");
        wtr.write_record([
            key.as_str(),
            task.name.as_str(),
            start.as_str(),
            end.as_str(),
            task.group.as_deref().unwrap_or(""),
            depends.as_str(),
        ])?;
    }

    wtr.flush().map_err(|e| GanttError::Csv(e.into()))
}

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(b';').has_headers(false);
    builder
}

/// Export tasks to a semicolon-delimited CSV file the importer reads back.
///
/// Columns: Key ; Name ; Start Date ; End Date ; Group ; Depends
/// Dates are ISO `YYYY-MM-DD`, dependency keys are space separated.
/// Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize, GanttError> {
    let mut wtr = writer_builder().from_path(path)?;
    write_tasks(&mut wtr, tasks)?;
    Ok(tasks.len())
}

/// Same as [`export_csv`], into a string.
pub fn export_csv_string(tasks: &[Task]) -> Result<String, GanttError> {
    let mut wtr = writer_builder().from_writer(Vec::new());
    write_tasks(&mut wtr, tasks)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| GanttError::MalformedInput(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| GanttError::MalformedInput(e.to_string()))
}
