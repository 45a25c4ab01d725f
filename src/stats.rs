use crate::models::{ChartSummary, Task};

/// Derives the chart summary from one task snapshot. Anything other than
/// the literal `"completed"` status counts as pending.
pub fn summarize(tasks: &[Task]) -> ChartSummary {
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    ChartSummary {
        completed,
        pending: tasks.len() - completed,
    }
}
