use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::GameError;
use crate::game_state::{BoardView, GameInterface, GameStats, RoundInfo, UserAction};
use crate::hint::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, HintConfig};
use crate::session::{GuessOutcome, MAX_ATTEMPTS, Status};

/// Hangman in Russian, with optional hints from a chat-completion service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the word list (`#Category` lines followed by words)
    #[arg(short = 'i', long = "input", conflicts_with = "builtin")]
    pub wordbank_path: Option<PathBuf>,

    /// Use the word list compiled into the binary
    #[arg(long)]
    pub builtin: bool,

    /// Run the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Do not offer hints
    #[arg(long)]
    pub no_hints: bool,

    /// Chat-completion endpoint used for hints
    #[arg(long, env = "VISELITSA_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token for the hint endpoint
    #[arg(long, env = "VISELITSA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model requested from the hint endpoint
    #[arg(long, env = "VISELITSA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Hint request timeout in seconds
    #[arg(long, env = "VISELITSA_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    #[must_use]
    pub fn hint_config(&self) -> HintConfig {
        HintConfig {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const AFFIRMATIVE: [&str; 4] = ["да", "д", "yes", "y"];

#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Reads one line. `None` on end of input or a read error.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt<R: BufRead>(reader: &mut R, text: &str) -> Option<String> {
    use std::io::Write;
    print!("{text}");
    let _ = std::io::stdout().flush();
    read_line(reader)
}

pub fn read_action<R: BufRead>(reader: &mut R, hints_enabled: bool) -> Option<UserAction> {
    if !hints_enabled {
        return match prompt(reader, "Введите букву: ") {
            Some(letter) => Some(UserAction::Guess(letter)),
            None => Some(UserAction::Exit),
        };
    }

    println!("\n1 - Угадать букву");
    println!("2 - Получить подсказку");
    let Some(choice) = prompt(reader, "Выберите действие (1/2): ") else {
        return Some(UserAction::Exit);
    };
    match choice.as_str() {
        "1" => match prompt(reader, "Введите букву: ") {
            Some(letter) => Some(UserAction::Guess(letter)),
            None => Some(UserAction::Exit),
        },
        "2" => Some(UserAction::Hint),
        _ => {
            println!("\nНекорректный выбор!");
            None
        }
    }
}

pub fn display_round_start(info: &RoundInfo, board: &BoardView) {
    println!("\nДобро пожаловать в игру 'Виселица'!");
    println!("Категория: {}", info.category);
    println!("Слово состоит из {} букв", info.word_len);
    println!("{}", board.gallows);
}

pub fn display_board(board: &BoardView) {
    println!("\nСлово: {}", board.masked);
    if !board.guessed.is_empty() {
        println!("Названные буквы: {}", board.guessed);
    }
}

pub fn display_guess_outcome(outcome: GuessOutcome, board: &BoardView) {
    match outcome {
        GuessOutcome::Hit => println!("\nВерно! Эта буква есть в слове."),
        GuessOutcome::Miss => {
            println!(
                "\nНет такой буквы! Осталось попыток: {}",
                board.attempts_remaining
            );
            println!("{}", board.gallows);
        }
    }
}

#[must_use]
pub fn rejection_message(error: &GameError) -> String {
    match error {
        GameError::InvalidInput => "Пожалуйста, введите одну букву!".to_string(),
        GameError::AlreadyGuessed(_) => "Вы уже называли эту букву!".to_string(),
        GameError::HintAlreadyUsed => "Вы уже использовали подсказку!".to_string(),
        GameError::InvalidState(_) => "Раунд уже закончен.".to_string(),
    }
}

pub fn display_round_over(status: Status, word: &str) {
    match status {
        Status::Won => {
            println!("\nПоздравляем! Вы угадали слово: {}!", word.to_uppercase());
            println!("Вы победили! 🎉");
        }
        Status::Lost => {
            println!("\nИгра окончена! Загаданное слово: {}", word.to_uppercase());
            println!("Попробуйте ещё раз! 💪");
        }
        Status::InProgress => {}
    }
}

pub fn display_goodbye(stats: &GameStats) {
    if stats.rounds > 0 {
        println!("\nСыграно раундов: {}, побед: {}", stats.rounds, stats.wins);
    }
    println!("\nСпасибо за игру! До свидания!");
}

pub fn display_title(hints_enabled: bool) {
    if hints_enabled {
        println!("Игра 'Виселица' с подсказками от нейросети");
    } else {
        println!("Игра 'Виселица'");
    }
    println!("У вас {MAX_ATTEMPTS} попыток на ошибку.");
    println!("----------------------------------------");
}

/// Line-oriented implementation of `GameInterface` over any `BufRead` source.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round_start(&mut self, info: &RoundInfo, board: &BoardView) {
        display_round_start(info, board);
    }

    fn display_board(&mut self, board: &BoardView) {
        display_board(board);
    }

    fn read_action(&mut self, hints_enabled: bool) -> Option<UserAction> {
        read_action(&mut self.reader, hints_enabled)
    }

    fn display_guess_outcome(&mut self, outcome: GuessOutcome, board: &BoardView) {
        display_guess_outcome(outcome, board);
    }

    fn display_rejection(&mut self, error: &GameError) {
        println!("{}", rejection_message(error));
    }

    fn display_hint_pending(&mut self) {
        println!("\nГенерация подсказки...");
    }

    fn display_hint(&mut self, hint: &str) {
        println!("\nПодсказка: {hint}");
    }

    fn display_round_over(&mut self, status: Status, word: &str) {
        display_round_over(status, word);
    }

    fn ask_play_again(&mut self) -> bool {
        prompt(&mut self.reader, "\nХотите сыграть ещё? (да/нет): ")
            .is_some_and(|answer| is_affirmative(&answer))
    }

    fn display_goodbye(&mut self, stats: &GameStats) {
        display_goodbye(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["viselitsa"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert!(!cli.builtin);
        assert!(!cli.tui);
        assert!(!cli.no_hints);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "viselitsa",
            "-i",
            "words.txt",
            "--no-hints",
            "--timeout",
            "3",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert!(cli.no_hints);
        assert_eq!(cli.hint_config().timeout, Duration::from_secs(3));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_input_conflicts_with_builtin() {
        assert!(Cli::try_parse_from(["viselitsa", "-i", "w.txt", "--builtin"]).is_err());
    }

    #[test]
    fn test_is_affirmative() {
        for yes in ["да", "Да", "Д", "yes", "Y", "  y  "] {
            assert!(is_affirmative(yes), "{yes}");
        }
        for no in ["нет", "n", "", "дааа", "1"] {
            assert!(!is_affirmative(no), "{no}");
        }
    }

    #[test]
    fn test_read_action_menu_guess() {
        let mut reader = Cursor::new("1\nк\n");
        assert_eq!(
            read_action(&mut reader, true),
            Some(UserAction::Guess("к".to_string()))
        );
    }

    #[test]
    fn test_read_action_menu_hint() {
        let mut reader = Cursor::new(" 2 \n");
        assert_eq!(read_action(&mut reader, true), Some(UserAction::Hint));
    }

    #[test]
    fn test_read_action_bad_choice() {
        let mut reader = Cursor::new("3\n");
        assert_eq!(read_action(&mut reader, true), None);
    }

    #[test]
    fn test_read_action_without_hints_prompts_letter() {
        let mut reader = Cursor::new("2\n");
        assert_eq!(
            read_action(&mut reader, false),
            Some(UserAction::Guess("2".to_string()))
        );
    }

    #[test]
    fn test_read_action_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader, true), Some(UserAction::Exit));
        let mut reader = Cursor::new("1\n");
        assert_eq!(read_action(&mut reader, true), Some(UserAction::Exit));
    }

    #[test]
    fn test_ask_play_again() {
        let mut ui = CliInterface::new(Cursor::new("да\nнет\n"));
        assert!(ui.ask_play_again());
        assert!(!ui.ask_play_again());
        assert!(!ui.ask_play_again());
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            rejection_message(&GameError::InvalidInput),
            "Пожалуйста, введите одну букву!"
        );
        assert_eq!(
            rejection_message(&GameError::AlreadyGuessed('к')),
            "Вы уже называли эту букву!"
        );
        assert_eq!(
            rejection_message(&GameError::HintAlreadyUsed),
            "Вы уже использовали подсказку!"
        );
    }
}
