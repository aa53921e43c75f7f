//! Line-based user input port for the interactive controller.

use crate::domain::AppError;

/// Port for reading one line of user input.
pub trait LinePrompt {
    /// Show `prompt` and read a line. `Ok(None)` means input ended.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError>;
}
