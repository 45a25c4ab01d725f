use crate::models::Task;
use crate::state::AuthMode;

/// Seam between the synchronization logic and the presentation. The
/// controller drives every state change through this trait; the binary
/// plugs in [`TerminalView`], tests plug in a recording view.
pub trait View {
    fn apply_auth_ui(&mut self, logged_in: bool);
    fn show_modal(&mut self, mode: AuthMode);
    fn hide_modal(&mut self);
    fn show_auth_error(&mut self, message: &str);
    fn clear_auth_error(&mut self);
    fn render_tasks(&mut self, tasks: &[Task]);
    fn clear_tasks(&mut self);
    fn render_summary(&mut self, completed: usize, pending: usize);
    fn transcript(&self) -> String;
    fn clear_transcript(&mut self);
    fn set_busy(&mut self, busy: bool);
    fn alert(&mut self, message: &str);
}

/// The completion chart: a fixed-width bar plus the literal progress label.
/// One value lives at a time; rendering a new summary replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryChart {
    completed: usize,
    pending: usize,
}

impl SummaryChart {
    const WIDTH: usize = 20;

    pub fn new(completed: usize, pending: usize) -> Self {
        Self { completed, pending }
    }

    pub fn render(&self) -> String {
        let total = self.completed + self.pending;
        let filled = if total == 0 {
            0
        } else {
            Self::WIDTH * self.completed / total
        };
        format!(
            "[{}{}] {} completed • {} pending",
            "#".repeat(filled),
            "-".repeat(Self::WIDTH - filled),
            self.completed,
            self.pending
        )
    }
}

pub fn format_task_line(task: &Task) -> String {
    let checkbox = if task.is_completed() { "[x]" } else { "[ ]" };
    match task.priority.as_deref() {
        Some(priority) => format!("{checkbox} {} {} ({priority})", task.id, task.text),
        None => format!("{checkbox} {} {}", task.id, task.text),
    }
}

/// Append-only terminal renderer, the browser DOM's stand-in. Owns the
/// transcript input buffer filled by the `note` command.
#[derive(Debug, Default)]
pub struct TerminalView {
    transcript: String,
    chart: Option<SummaryChart>,
    busy: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_note(&mut self, line: &str) {
        if !self.transcript.is_empty() {
            self.transcript.push('\n');
        }
        self.transcript.push_str(line);
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl View for TerminalView {
    fn apply_auth_ui(&mut self, logged_in: bool) {
        if logged_in {
            println!("status: signed in");
        } else {
            println!("status: signed out");
        }
    }

    fn show_modal(&mut self, mode: AuthMode) {
        println!("-- {} --", mode.title());
    }

    fn hide_modal(&mut self) {}

    fn show_auth_error(&mut self, message: &str) {
        println!("error: {message}");
    }

    // Append-only output has nothing to hide.
    fn clear_auth_error(&mut self) {}

    fn render_tasks(&mut self, tasks: &[Task]) {
        for task in tasks {
            println!("{}", format_task_line(task));
        }
    }

    fn clear_tasks(&mut self) {}

    fn render_summary(&mut self, completed: usize, pending: usize) {
        let chart = SummaryChart::new(completed, pending);
        self.chart = Some(chart);
        println!("{}", chart.render());
    }

    fn transcript(&self) -> String {
        self.transcript.clone()
    }

    fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        if busy {
            println!("Generating...");
        }
    }

    fn alert(&mut self, message: &str) {
        println!("alert: {message}");
    }
}
