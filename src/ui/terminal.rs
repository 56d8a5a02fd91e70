//! Interactive terminal UI.

use console::Term;
use std::io::{IsTerminal, Write};

use crate::error::Result;
use crate::shell::is_ci;

use super::{
    prompt_user, should_use_colors, MkvenvTheme, NonInteractiveUI, OutputMode, ProgressSpinner,
    Prompt, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    err: Term,
    theme: MkvenvTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_colors(mode, should_use_colors())
    }

    /// Create a terminal UI with colors forced on or off.
    pub fn with_colors(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors {
            MkvenvTheme::new()
        } else {
            MkvenvTheme::plain()
        };

        Self {
            term: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        prompt_user(prompt, &self.err)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Whether prompts can be answered by a person in this session.
///
/// Prompts are drawn on stderr and read from the keyboard, so stdout may be
/// piped without losing them.
pub fn is_interactive_session(disabled: bool) -> bool {
    wants_prompts(
        disabled,
        is_ci(),
        std::io::stdin().is_terminal() && Term::stderr().is_term(),
    )
}

fn wants_prompts(disabled: bool, ci: bool, attended: bool) -> bool {
    !disabled && !ci && attended
}

/// Create the appropriate UI based on environment.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    create_ui_with_colors(interactive, mode, should_use_colors())
}

/// Create a UI, choosing whether the terminal variant uses colors.
pub fn create_ui_with_colors(
    interactive: bool,
    mode: OutputMode,
    colors: bool,
) -> Box<dyn UserInterface> {
    if interactive {
        Box::new(TerminalUI::with_colors(mode, colors))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
