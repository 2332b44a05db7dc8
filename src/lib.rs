// Library interface for viselitsa
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod hint;
pub mod logging;
pub mod render;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{GameError, HintError, WordBankError};
pub use game_state::{GameInterface, GameStats, UserAction, game_loop, play_round};
pub use hint::{ChatHintProvider, HintConfig, HintProvider, HintRequest, HintService};
pub use render::{render_gallows, render_masked};
pub use session::{GameSession, GuessOutcome, MAX_ATTEMPTS, Status};
pub use wordbank::{WordBank, WordEntry, load_wordbank_from_file, load_wordbank_from_str};
