use std::path::PathBuf;
use thiserror::Error;

use crate::session::Status;

/// Errors raised while loading a word list.
#[derive(Debug, Error)]
pub enum WordBankError {
    /// The word-list file does not exist.
    #[error("word list not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The source parsed cleanly but contained no words.
    #[error("word list is empty or contains only categories")]
    Empty,

    /// Any other read failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejections produced by a `GameSession`. None of them change session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("input must be exactly one letter")]
    InvalidInput,

    #[error("letter '{0}' was already guessed")]
    AlreadyGuessed(char),

    #[error("the hint for this round was already used")]
    HintAlreadyUsed,

    /// The round is over; the caller should have started a new one.
    #[error("round is already finished ({0:?})")]
    InvalidState(Status),
}

/// Failures of a hint provider. Converted to a fallback hint by `HintService`.
#[derive(Debug, Error)]
pub enum HintError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("reply reveals the target word")]
    RevealsWord,

    #[error("hint service unavailable: {0}")]
    Unavailable(String),
}
