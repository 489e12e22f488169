use std::collections::HashMap;

use super::task::{Task, TaskKey};
use crate::error::GanttError;

/// Check that every dependency exists and ends no later than its dependent starts.
///
/// Tasks are walked in input order and each task's `depends` in declared
/// order; the first violation found is returned. Cycles are not detected:
/// only each (task, dependency) pair is compared.
pub fn validate_dependencies(tasks: &[Task]) -> Result<(), GanttError> {
    // Later duplicates win, like a map filled front to back.
    let by_key: HashMap<TaskKey, &Task> = tasks.iter().map(|t| (t.key, t)).collect();

    for task in tasks {
        if task.end_date < task.start_date {
            tracing::warn!(
                key = task.key,
                name = %task.name,
                "task ends ({}) before it starts ({})",
                task.end_date,
                task.start_date
            );
        }

        for &dep_key in &task.depends {
            let Some(dependency) = by_key.get(&dep_key) else {
                return Err(GanttError::MissingDependency {
                    task_name: task.name.clone(),
                    task_key: task.key,
                    missing_key: dep_key,
                });
            };

            if task.start_date < dependency.end_date {
                return Err(GanttError::TemporalViolation {
                    task_name: task.name.clone(),
                    task_key: task.key,
                    start_date: task.start_date,
                    dependency_name: dependency.name.clone(),
                    dependency_key: dep_key,
                    dependency_end: dependency.end_date,
                });
            }
        }
    }

    tracing::debug!(tasks = tasks.len(), "dependencies validated");
    Ok(())
}
