use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::Rng;

use crate::error::WordBankError;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/russian_words.txt");
pub const DEFAULT_WORDBANK_FILE: &str = "russian_words.txt";
pub const UNCATEGORIZED: &str = "Без категории";
pub const CATEGORY_MARKER: char = '#';

/// A word drawn for one round together with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

/// Categorized word list. Never empty, and no category in it is empty.
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: Vec<Category>,
}

impl WordBank {
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }

    /// Picks a category uniformly, then a word uniformly within it.
    ///
    /// Words in small categories are therefore more likely to come up than
    /// words in large ones.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> WordEntry {
        let category = &self.categories[rng.gen_range(0..self.categories.len())];
        let word = &category.words[rng.gen_range(0..category.words.len())];
        debug!("Picked word from category '{}'", category.name);
        WordEntry {
            word: word.clone(),
            category: category.name.clone(),
        }
    }

    fn push_word(&mut self, category: &str, word: String) {
        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.words.push(word),
            None => self.categories.push(Category {
                name: category.to_string(),
                words: vec![word],
            }),
        }
    }
}

pub fn load_wordbank_from_str(data: &str) -> Result<WordBank, WordBankError> {
    let mut bank = WordBank {
        categories: Vec::new(),
    };
    let mut current = UNCATEGORIZED.to_string();

    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix(CATEGORY_MARKER) {
            let name = name.trim();
            current = if name.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                name.to_string()
            };
            continue;
        }
        let word = line.to_lowercase();
        if !word.chars().all(char::is_alphabetic) {
            warn!("Skipping '{word}': words may contain letters only");
            continue;
        }
        bank.push_word(&current, word);
    }

    if bank.categories.is_empty() {
        return Err(WordBankError::Empty);
    }
    info!(
        "Loaded {} words in {} categories",
        bank.word_count(),
        bank.categories.len()
    );
    Ok(bank)
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<WordBank, WordBankError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => WordBankError::NotFound(path.to_path_buf()),
        _ => WordBankError::Io(e),
    })?;
    debug!("Read word list from {}", path.display());
    load_wordbank_from_str(&data)
}

/// Places searched for the word list when no path is given: the working
/// directory first, then the per-user data directory.
#[must_use]
pub fn default_wordbank_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_WORDBANK_FILE)];
    if let Some(dir) = dirs::data_dir() {
        paths.push(dir.join("viselitsa").join(DEFAULT_WORDBANK_FILE));
    }
    paths
}

/// Returns the first existing candidate, or the first candidate if none exist
/// so the load reports a meaningful `NotFound`.
#[must_use]
pub fn resolve_wordbank_path(candidates: &[PathBuf]) -> PathBuf {
    candidates
        .iter()
        .find(|p| p.exists())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDBANK_FILE))
}
