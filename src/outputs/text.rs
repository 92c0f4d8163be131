use crate::store::{Message, Note, Task};

pub fn render_message(message: &Message) -> String {
    format!(
        "[{}] {}: {}",
        message.timestamp.format("%H:%M:%S"),
        message.sender,
        message.text
    )
}

pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.".to_string();
    }
    tasks
        .iter()
        .map(|t| format!("[{}] {}  ({})", if t.done { "x" } else { " " }, t.text, t.id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes yet.".to_string();
    }
    notes
        .iter()
        .map(|n| format!("- {}  ({})", n.text, n.id))
        .collect::<Vec<_>>()
        .join("\n")
}
