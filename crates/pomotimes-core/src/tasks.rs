//! Task list with per-task pomodoro counters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Focus sessions completed while this task was selected.
    #[serde(rename = "pomodoros")]
    pub pomodoros_completed: u32,
    #[serde(rename = "estimate")]
    pub estimate_pomodoros: u32,
}

/// Ordered task list, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task at the top of the list.
    pub fn add(&mut self, text: &str, estimate: u32) -> Result<&Task, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyTaskText);
        }
        if estimate == 0 {
            return Err(ValidationError::InvalidEstimate(estimate));
        }
        self.tasks.insert(
            0,
            Task {
                id: Uuid::new_v4().to_string(),
                text: text.to_string(),
                completed: false,
                pomodoros_completed: 0,
                estimate_pomodoros: estimate,
            },
        );
        Ok(&self.tasks[0])
    }

    /// Flip the completed flag. Returns the new value, or `None` if unknown.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Credit a focus completion to the selected task, if it exists.
    ///
    /// Completed tasks still receive credit while selected.
    pub fn on_focus_completed(&mut self, selected: Option<&str>) -> Option<&Task> {
        let task = self.get_mut(selected?)?;
        task.pomodoros_completed = task.pomodoros_completed.saturating_add(1);
        Some(task)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks still in progress.
    pub fn engaged(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Tasks marked done.
    pub fn terminated(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_prepends() {
        let mut list = TaskList::new();
        list.add("first", 1).unwrap();
        let id = list.add("  second  ", 3).unwrap().id.clone();
        assert_eq!(list.tasks()[0].id, id);
        assert_eq!(list.tasks()[0].text, "second");
        assert_eq!(list.tasks()[0].estimate_pomodoros, 3);
        assert_eq!(list.tasks()[1].text, "first");
    }

    #[test]
    fn add_rejects_blank_text_and_zero_estimate() {
        let mut list = TaskList::new();
        assert_eq!(list.add("   ", 1).unwrap_err(), ValidationError::EmptyTaskText);
        assert_eq!(list.add("write", 0).unwrap_err(), ValidationError::InvalidEstimate(0));
        assert!(list.is_empty());
    }

    #[test]
    fn toggle_partitions_engaged_and_terminated() {
        let mut list = TaskList::new();
        let a = list.add("a", 1).unwrap().id.clone();
        list.add("b", 1).unwrap();
        assert_eq!(list.toggle(&a), Some(true));
        assert_eq!(list.engaged().count(), 1);
        assert_eq!(list.terminated().next().unwrap().id, a);
        assert_eq!(list.toggle(&a), Some(false));
        assert_eq!(list.toggle("missing"), None);
    }

    #[test]
    fn focus_completion_credits_selected_task_only() {
        let mut list = TaskList::new();
        let a = list.add("a", 2).unwrap().id.clone();
        let b = list.add("b", 2).unwrap().id.clone();

        list.on_focus_completed(Some(&a));
        list.on_focus_completed(Some(&a));
        assert!(list.on_focus_completed(None).is_none());
        assert!(list.on_focus_completed(Some("gone")).is_none());

        assert_eq!(list.get(&a).unwrap().pomodoros_completed, 2);
        assert_eq!(list.get(&b).unwrap().pomodoros_completed, 0);
    }

    #[test]
    fn completed_task_still_receives_credit() {
        let mut list = TaskList::new();
        let a = list.add("a", 1).unwrap().id.clone();
        list.toggle(&a);
        list.on_focus_completed(Some(&a));
        assert_eq!(list.get(&a).unwrap().pomodoros_completed, 1);
    }

    #[test]
    fn delete_removes_task() {
        let mut list = TaskList::new();
        let a = list.add("a", 1).unwrap().id.clone();
        assert_eq!(list.delete(&a).unwrap().text, "a");
        assert!(list.delete(&a).is_none());
    }

    #[test]
    fn persisted_field_names() {
        let task = Task {
            id: "t1".into(),
            text: "write report".into(),
            completed: false,
            pomodoros_completed: 2,
            estimate_pomodoros: 4,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["pomodoros"], 2);
        assert_eq!(json["estimate"], 4);
    }
}
