use crate::model::{Filter, Task};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// All state a session owns: the task collection, the active filter, and the
/// editing target. Constructed explicitly by the caller so the operations can
/// be exercised without any terminal attached.
///
/// Every operation is best-effort: unknown identifiers and blank text are
/// absorbed as no-ops. The return values only report whether anything
/// changed.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
    editing: Option<u64>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    /// Add a task at the front of the collection. Blank text is a no-op.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.next_id += 1;
        let task = Task {
            id: self.next_id,
            text: trimmed.to_string(),
            completed: false,
            created_at: timestamp_now(),
        };

        self.tasks.insert(0, task);
        self.tasks.first()
    }

    /// Flip the completion flag of the matching task. Reports whether a task
    /// matched.
    pub fn toggle(&mut self, id: u64) -> bool {
        for task in &mut self.tasks {
            if task.id == id {
                task.completed = !task.completed;
                return true;
            }
        }

        false
    }

    /// Remove the matching task. A second delete of the same id is a no-op.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return false;
        };

        self.tasks.remove(index);
        if self.editing == Some(id) {
            self.editing = None;
        }

        true
    }

    /// Record the task as the editing target and hand back its current text.
    pub fn begin_edit(&mut self, id: u64) -> Option<&str> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        self.editing = Some(id);
        Some(self.tasks[index].text.as_str())
    }

    /// Commit an edit. Blank replacement text keeps the original; either way
    /// the editing target is cleared. Reports whether the text changed.
    pub fn save_edit(&mut self, id: u64, new_text: &str) -> bool {
        if self.editing == Some(id) {
            self.editing = None;
        }

        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return false;
        }

        for task in &mut self.tasks {
            if task.id == id {
                task.text = trimmed.to_string();
                return true;
            }
        }

        false
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }
}

fn timestamp_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
