use std::path::Path;

use chrono::NaiveDate;

use crate::error::GanttError;
use crate::model::{Task, TaskKey};

/// Column roles recognised in a CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Key,
    Name,
    Start,
    End,
    Group,
    Depends,
}

/// Try parsing a date string with several common formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "key" | "id" | "taskkey" | "taskid" => Some(Column::Key),

        "name" | "task" | "tasklabel" | "taskname" | "label" | "title" | "activity" => {
            Some(Column::Name)
        }

        "start" | "startdate" | "from" | "begin" | "begindate" => Some(Column::Start),

        "end" | "enddate" | "to" | "finish" | "finishdate" | "due" | "duedate" => {
            Some(Column::End)
        }

        "group" | "category" | "phase" | "section" => Some(Column::Group),

        "depends" | "dependson" | "dependencies" | "predecessors" | "after" => {
            Some(Column::Depends)
        }

        _ => None,
    }
}

/// Parse a `depends` cell such as `"1 2"`, `"1|2"` or `"1,2"`.
fn parse_depends(cell: &str) -> Result<Vec<TaskKey>, String> {
    cell.split([' ', '|', ',', ';'])
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<TaskKey>()
                .map_err(|_| format!("invalid dependency key '{s}'"))
        })
        .collect()
}

/// Import tasks from a CSV file. See [`import_csv_str`].
pub fn import_csv(path: &Path) -> Result<(Vec<Task>, usize), GanttError> {
    let content = std::fs::read_to_string(path).map_err(|e| GanttError::io(path, e))?;
    import_csv_str(&content)
}

/// Import tasks from CSV text.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly. Name, start and end columns are required. Without a key column,
/// rows are keyed by their data row number from 1, skipped rows included; with
/// one, a blank key skips the row. Returns `(tasks, skipped_count)`.
pub fn import_csv_str(content: &str) -> Result<(Vec<Task>, usize), GanttError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has = |col: Column| col_map.contains(&Some(col));
    if !has(Column::Name) || !has(Column::Start) || !has(Column::End) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(GanttError::MalformedInput(format!(
            "CSV is missing required columns. Found headers: {found:?}. \
             Need columns for: task name, start date, end date."
        )));
    }

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(line, "skipping CSV row: {e}");
                skipped += 1;
                continue;
            }
        };

        match parse_record(&record, &col_map, i + 1) {
            Ok(task) => tasks.push(task),
            Err(reason) => {
                tracing::warn!(line, "skipping CSV row: {reason}");
                skipped += 1;
            }
        }
    }

    if tasks.is_empty() && skipped > 0 {
        return Err(GanttError::MalformedInput(format!(
            "no valid tasks found in CSV ({skipped} rows skipped)"
        )));
    }
    if tasks.is_empty() {
        return Err(GanttError::MalformedInput(
            "CSV file is empty or has no data rows".to_string(),
        ));
    }

    tracing::debug!(tasks = tasks.len(), skipped, "CSV imported");
    Ok((tasks, skipped))
}

fn parse_record(
    record: &csv::StringRecord,
    col_map: &[Option<Column>],
    row: usize,
) -> Result<Task, String> {
    let mut key = None;
    let mut name = None;
    let mut start = None;
    let mut end = None;
    let mut group = None;
    let mut depends = None;

    for (field, col) in record.iter().zip(col_map) {
        match col {
            Some(Column::Key) => key = Some(field),
            Some(Column::Name) => name = Some(field),
            Some(Column::Start) => start = Some(field),
            Some(Column::End) => end = Some(field),
            Some(Column::Group) => group = Some(field),
            Some(Column::Depends) => depends = Some(field),
            None => {}
        }
    }

    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return Err("missing task name".to_string()),
    };

    let key = match key.filter(|k| !k.is_empty()) {
        Some(k) => k
            .parse::<TaskKey>()
            .map_err(|_| format!("invalid key '{k}'"))?,
        None if col_map.contains(&Some(Column::Key)) => return Err("missing key".to_string()),
        None => row as TaskKey,
    };

    let start_date = start
        .and_then(parse_date)
        .ok_or_else(|| format!("invalid start date '{}'", start.unwrap_or("")))?;
    let end_date = end
        .and_then(parse_date)
        .ok_or_else(|| format!("invalid end date '{}'", end.unwrap_or("")))?;

    let mut task = Task::new(key, name, start_date, end_date);
    task.group = group.filter(|g| !g.is_empty()).map(str::to_string);
    task.depends = match depends {
        Some(cell) => parse_depends(cell)?,
        None => Vec::new(),
    };
    Ok(task)
}
