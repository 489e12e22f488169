use egui::Color32;

use super::task::Task;
use crate::chart::color::pastel_color_from_text;

/// Tasks sharing one group name, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup<'a> {
    pub name: &'a str,
    pub tasks: Vec<&'a Task>,
}

impl TaskGroup<'_> {
    /// Background color for the group's band.
    pub fn color(&self) -> Color32 {
        pastel_color_from_text(self.name)
    }
}

/// Partition tasks by group without reordering anything.
///
/// Groups appear in the order their names are first seen; tasks without a
/// group land in [`DEFAULT_GROUP`](super::task::DEFAULT_GROUP).
pub fn group_tasks(tasks: &[Task]) -> Vec<TaskGroup<'_>> {
    let mut groups: Vec<TaskGroup<'_>> = Vec::new();
    for task in tasks {
        let name = task.group_name();
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.tasks.push(task),
            None => groups.push(TaskGroup {
                name,
                tasks: vec![task],
            }),
        }
    }
    groups
}
