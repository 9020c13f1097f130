use crate::model::{Filter, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Presentation-ready snapshot of the collection: the filtered rows in their
/// original relative order plus the counters over the whole collection.
#[derive(Debug, Clone)]
pub struct ViewModel<'a> {
    pub rows: Vec<&'a Task>,
    pub filter: Filter,
    pub stats: Stats,
}

/// Derive the displayed subset and the counters. Pure: drawing the result is
/// the caller's concern.
pub fn build(tasks: &[Task], filter: Filter) -> ViewModel<'_> {
    let completed = tasks.iter().filter(|task| task.completed).count();
    let stats = Stats {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
    };

    let rows = tasks.iter().filter(|task| filter.matches(task)).collect();

    ViewModel {
        rows,
        filter,
        stats,
    }
}

impl ViewModel<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Message shown in place of the list when the filtered view is empty.
    pub fn empty_message(&self) -> &'static str {
        match self.filter {
            Filter::All => "No tasks yet. Add one to get started!",
            Filter::Completed => "No completed tasks yet. Complete some tasks to see them here!",
            Filter::Pending => "No pending tasks! You're all caught up!",
        }
    }
}
