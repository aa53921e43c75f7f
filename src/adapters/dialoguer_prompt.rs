use std::io::ErrorKind;

use dialoguer::{Error as DialoguerError, Input};

use crate::domain::AppError;
use crate::ports::LinePrompt;

/// Terminal prompt backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompt;

impl LinePrompt for DialoguerPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        match Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text() {
            Ok(value) => Ok(Some(value)),
            Err(DialoguerError::IO(err))
                if matches!(err.kind(), ErrorKind::Interrupted | ErrorKind::UnexpectedEof) =>
            {
                Ok(None)
            }
            Err(err) => Err(AppError::invalid_input(format!("Failed to read input: {}", err))),
        }
    }
}
