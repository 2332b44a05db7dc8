use std::collections::BTreeSet;

use log::{debug, info};

use crate::error::GameError;
use crate::hint::{HintRequest, HintService};
use crate::render::render_masked;
use crate::wordbank::WordEntry;

pub const MAX_ATTEMPTS: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
}

/// State of a single round.
///
/// Transitions only `InProgress -> Won` or `InProgress -> Lost`. Rejected
/// actions leave every field untouched.
#[derive(Debug, Clone)]
pub struct GameSession {
    entry: WordEntry,
    guessed: BTreeSet<char>,
    attempts_remaining: u8,
    hint_used: bool,
    status: Status,
}

impl GameSession {
    #[must_use]
    pub fn new(entry: WordEntry) -> Self {
        Self {
            entry,
            guessed: BTreeSet::new(),
            attempts_remaining: MAX_ATTEMPTS,
            hint_used: false,
            status: Status::InProgress,
        }
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.entry.word
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.entry.category
    }

    #[must_use]
    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    #[must_use]
    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn masked(&self) -> String {
        render_masked(&self.entry.word, &self.guessed)
    }

    /// Applies one letter guess. `input` may carry surrounding whitespace and
    /// any case.
    pub fn guess_letter(&mut self, input: &str) -> Result<GuessOutcome, GameError> {
        self.ensure_in_progress()?;
        let letter = normalize_letter(input)?;
        if self.guessed.contains(&letter) {
            return Err(GameError::AlreadyGuessed(letter));
        }
        self.guessed.insert(letter);

        let outcome = if self.entry.word.contains(letter) {
            GuessOutcome::Hit
        } else {
            self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            GuessOutcome::Miss
        };
        debug!(
            "Guess '{letter}': {outcome:?}, {} attempts left",
            self.attempts_remaining
        );

        if self.entry.word.chars().all(|c| self.guessed.contains(&c)) {
            self.status = Status::Won;
        } else if self.attempts_remaining == 0 {
            self.status = Status::Lost;
        }
        if self.status != Status::InProgress {
            info!("Round finished: {:?}", self.status);
        }
        Ok(outcome)
    }

    /// Obtains the round's single hint. The hint is spent even when the
    /// service had to fall back to a locally generated one.
    pub fn request_hint(&mut self, hints: &mut HintService) -> Result<String, GameError> {
        self.ensure_in_progress()?;
        if self.hint_used {
            return Err(GameError::HintAlreadyUsed);
        }
        self.hint_used = true;
        let request = HintRequest {
            word: &self.entry.word,
            category: &self.entry.category,
            guessed: &self.guessed,
        };
        Ok(hints.hint_for(&request))
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            Status::InProgress => Ok(()),
            other => Err(GameError::InvalidState(other)),
        }
    }
}

/// Trims and lowercases a guess, accepting exactly one alphabetic character.
pub fn normalize_letter(input: &str) -> Result<char, GameError> {
    let lowered = input.trim().to_lowercase();
    let mut chars = lowered.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(c),
        _ => Err(GameError::InvalidInput),
    }
}
