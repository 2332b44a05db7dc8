//! Text rendering of the round: masked word and gallows frames.

use std::collections::BTreeSet;

pub const PLACEHOLDER: char = '_';

/// Gallows frames, indexed by the number of misses so far.
pub const GALLOWS_STAGES: [&str; 7] = [
    r"
   ------
   |    |
   |
   |
   |
   |
--------",
    r"
   ------
   |    |
   |    O
   |
   |
   |
--------",
    r"
   ------
   |    |
   |    O
   |    |
   |
   |
--------",
    r"
   ------
   |    |
   |    O
   |   /|
   |
   |
--------",
    r"
   ------
   |    |
   |    O
   |   /|\
   |
   |
--------",
    r"
   ------
   |    |
   |    O
   |   /|\
   |   /
   |
--------",
    r"
   ------
   |    |
   |    O
   |   /|\
   |   / \
   |
--------",
];

/// Word with unguessed letters replaced by `_`, characters separated by spaces.
#[must_use]
pub fn render_masked(word: &str, guessed: &BTreeSet<char>) -> String {
    word.chars()
        .map(|c| if guessed.contains(&c) { c } else { PLACEHOLDER })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn render_gallows(attempts_remaining: u8) -> &'static str {
    let misses = GALLOWS_STAGES.len() - 1 - usize::from(attempts_remaining.min(6));
    GALLOWS_STAGES[misses]
}

/// Guessed letters in sorted order, comma separated.
#[must_use]
pub fn render_guessed(guessed: &BTreeSet<char>) -> String {
    guessed
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(letters: &str) -> BTreeSet<char> {
        letters.chars().collect()
    }

    #[test]
    fn test_render_masked_nothing_guessed() {
        assert_eq!(render_masked("кот", &set("")), "_ _ _");
    }

    #[test]
    fn test_render_masked_partial() {
        assert_eq!(render_masked("молоко", &set("о")), "_ о _ о _ о");
        assert_eq!(render_masked("молоко", &set("мк")), "м _ _ _ к _");
    }

    #[test]
    fn test_render_masked_length_and_positions() {
        let word = "виноград";
        let guessed = set("иаоя");
        let masked = render_masked(word, &guessed);
        let shown: Vec<char> = masked.split(' ').filter_map(|s| s.chars().next()).collect();
        assert_eq!(shown.len(), word.chars().count());
        for (shown, actual) in shown.iter().zip(word.chars()) {
            if *shown == PLACEHOLDER {
                assert!(!guessed.contains(&actual));
            } else {
                assert_eq!(*shown, actual);
                assert!(guessed.contains(shown));
            }
        }
    }

    #[test]
    fn test_render_gallows_indexing() {
        assert_eq!(render_gallows(6), GALLOWS_STAGES[0]);
        assert_eq!(render_gallows(3), GALLOWS_STAGES[3]);
        assert_eq!(render_gallows(0), GALLOWS_STAGES[6]);
        // Out-of-range input clamps to the empty gallows.
        assert_eq!(render_gallows(9), GALLOWS_STAGES[0]);
    }

    #[test]
    fn test_gallows_stages_strictly_grow() {
        let drawn = |frame: &str| frame.chars().filter(|c| !c.is_whitespace()).count();
        for pair in GALLOWS_STAGES.windows(2) {
            assert!(drawn(pair[1]) > drawn(pair[0]));
            // Every non-blank cell of the previous frame is still there.
            for (prev, next) in pair[0].lines().zip(pair[1].lines()) {
                for (i, c) in prev.chars().enumerate() {
                    if !c.is_whitespace() {
                        assert_eq!(next.chars().nth(i), Some(c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_render_guessed_is_sorted() {
        assert_eq!(render_guessed(&set("тко")), "к, о, т");
        assert_eq!(render_guessed(&set("")), "");
    }
}
