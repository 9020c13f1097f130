use jot_core::config::Palette;
use jot_core::model::{Filter, Task};
use jot_core::view::ViewModel;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "done")]
    done: String,
    #[tabled(rename = "task")]
    text: String,
    #[tabled(rename = "created")]
    created_at: String,
}

fn task_row(task: &Task, palette: &Palette) -> TaskRow {
    let done = if task.completed { "[x]" } else { "[ ]" };
    let text = if task.completed {
        palette.mutedize(&task.text)
    } else {
        task.text.clone()
    };

    TaskRow {
        id: task.id,
        done: done.to_string(),
        text,
        created_at: task.created_at.clone(),
    }
}

/// One line naming all three filter controls, the active one bracketed and
/// accented.
pub fn filter_bar(active: Filter, palette: &Palette) -> String {
    [Filter::All, Filter::Completed, Filter::Pending]
        .into_iter()
        .map(|filter| {
            if filter == active {
                palette.accentize(&format!("[{}]", filter.label()))
            } else {
                filter.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn task_table(view: &ViewModel<'_>, palette: &Palette) -> String {
    let rows: Vec<TaskRow> = view.rows.iter().map(|task| task_row(task, palette)).collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn counters(view: &ViewModel<'_>) -> String {
    format!(
        "total={} completed={} pending={}",
        view.stats.total, view.stats.completed, view.stats.pending
    )
}

pub fn stats_json(view: &ViewModel<'_>) -> serde_json::Value {
    serde_json::json!({
        "total": view.stats.total,
        "completed": view.stats.completed,
        "pending": view.stats.pending,
    })
}

pub fn view_json(view: &ViewModel<'_>) -> serde_json::Value {
    let tasks: Vec<serde_json::Value> = view
        .rows
        .iter()
        .map(|task| {
            serde_json::json!({
                "id": task.id,
                "text": task.text,
                "completed": task.completed,
                "created_at": task.created_at,
            })
        })
        .collect();

    serde_json::json!({
        "filter": view.filter,
        "tasks": tasks,
        "stats": stats_json(view),
    })
}
