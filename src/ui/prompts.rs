//! Interactive prompts.

use console::Term;
use dialoguer::Input;

use crate::error::{MkvenvError, Result};

use super::Prompt;

/// Convert dialoguer errors to MkvenvError.
fn map_dialoguer_err(e: dialoguer::Error) -> MkvenvError {
    MkvenvError::Io(e.into())
}

/// Ask the user a free-text question on the terminal.
///
/// An empty answer yields the prompt's default, if any.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let answer = match &prompt.default {
        Some(default) => input
            .default(default.clone())
            .show_default(false)
            .interact_on(term)
            .map_err(map_dialoguer_err)?,
        None => input.interact_on(term).map_err(map_dialoguer_err)?,
    };

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialoguer_errors_map_to_io() {
        let err = dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "closed",
        ));
        assert!(matches!(map_dialoguer_err(err), MkvenvError::Io(_)));
    }
}
