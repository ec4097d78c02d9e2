//! Non-interactive UI for CI/headless environments.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Plain text without colors or spinners. Warnings and errors go to
/// stderr so piped stdout stays clean.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_diagnostics() {
            eprintln!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        println!("\n📄 {}", title);
    }

    fn show_hint(&mut self, hint: &str) {
        println!("{}", hint);
    }
}

/// Spinner without animation; only the final line is printed, on stderr.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        eprintln!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn finish_clear(&mut self) {}
}
