use std::io::{Write, stdout};

use parking_lot::Mutex;
use tracing::warn;

/// The element whose text is the only user-visible result of a submission.
pub trait Output: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Keeps the current text and every update in memory.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    history: Mutex<Vec<String>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text, empty before the first update.
    pub fn text(&self) -> String {
        self.history.lock().last().cloned().unwrap_or_default()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl Output for MemoryOutput {
    fn set_text(&self, text: &str) {
        self.history.lock().push(text.to_string());
    }
}

/// Prints each update as its own line on stdout.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn set_text(&self, text: &str) {
        let mut out = stdout().lock();
        if let Err(e) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            warn!("Failed to write to stdout: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_output() {
        let output = MemoryOutput::new();
        assert_eq!(output.text(), "");

        output.set_text("Processing...");
        output.set_text("Prediction: 12");

        assert_eq!(output.text(), "Prediction: 12");
        assert_eq!(output.history(), vec!["Processing...", "Prediction: 12"]);
    }
}
