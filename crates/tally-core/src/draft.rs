use crate::error::CoreError;
use crate::task::{normalize_category, Priority, Task, TaskId};
use chrono::NaiveDate;

/// Not-yet-committed form values for an add or an edit.
///
/// Optional fields left as `None` mean "unset": on add they take their
/// defaults (Medium, today, "General"); on save they leave the task's
/// existing value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub priority: Option<Priority>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl Draft {
    /// Copy a task's editable fields.
    pub fn from_task(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            priority: Some(task.priority),
            date: Some(task.date),
            category: Some(task.category.clone()),
        }
    }

    /// Trimmed text, or `EmptyText` if nothing is left.
    pub fn normalized_text(&self) -> Result<String, CoreError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(CoreError::EmptyText);
        }
        Ok(text.to_string())
    }

    /// Build a new, open task from this draft.
    pub fn to_task(&self, id: TaskId, today: NaiveDate) -> Result<Task, CoreError> {
        Ok(Task {
            id,
            text: self.normalized_text()?,
            priority: self.priority.unwrap_or_default(),
            date: self.date.unwrap_or(today),
            completed: false,
            category: normalize_category(self.category.as_deref().unwrap_or_default()),
        })
    }

    /// Overwrite `task`'s editable fields with the ones set here.
    ///
    /// Validation happens before any field is touched, so an error leaves
    /// `task` unchanged. `id` and `completed` are never modified.
    pub fn apply_to(&self, task: &mut Task) -> Result<(), CoreError> {
        let text = self.normalized_text()?;
        task.text = text;
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(date) = self.date {
            task.date = date;
        }
        if let Some(category) = &self.category {
            task.category = normalize_category(category);
        }
        Ok(())
    }
}
