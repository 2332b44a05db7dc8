use std::io;
use std::process::ExitCode;

use log::{info, warn};
use viselitsa::cli::{CliInterface, display_title, parse_cli};
use viselitsa::game_state::{GameInterface, game_loop};
use viselitsa::hint::{ChatHintProvider, HintService};
use viselitsa::logging::{default_log_file, init_logging};
use viselitsa::tui::TuiInterface;
use viselitsa::wordbank::{
    EMBEDDED_WORDBANK, WordBank, default_wordbank_paths, load_wordbank_from_file,
    load_wordbank_from_str, resolve_wordbank_path,
};
use viselitsa::WordBankError;

fn load_wordbank(cli: &viselitsa::cli::Cli) -> Result<WordBank, WordBankError> {
    if cli.builtin {
        return load_wordbank_from_str(EMBEDDED_WORDBANK);
    }
    let path = match &cli.wordbank_path {
        Some(path) => path.clone(),
        None => resolve_wordbank_path(&default_wordbank_paths()),
    };
    info!("Loading word list from {}", path.display());
    load_wordbank_from_file(&path)
}

fn main() -> ExitCode {
    let cli = parse_cli();
    let log_file = if cli.tui { default_log_file() } else { None };
    init_logging(cli.verbose, log_file.as_deref());

    let wordbank = match load_wordbank(&cli) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Не удалось загрузить слова для игры: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut hints = if cli.no_hints {
        None
    } else {
        match ChatHintProvider::new(cli.hint_config()) {
            Ok(provider) => Some(HintService::new(Box::new(provider))),
            Err(e) => {
                warn!("Hints disabled, could not create HTTP client: {e}");
                None
            }
        }
    };

    let mut rng = rand::thread_rng();
    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        run(&wordbank, &mut interface, hints.as_mut(), &mut rng);
    } else {
        display_title(hints.is_some());
        let mut interface = CliInterface::new(io::stdin().lock());
        run(&wordbank, &mut interface, hints.as_mut(), &mut rng);
    }
    ExitCode::SUCCESS
}

fn run(
    wordbank: &WordBank,
    interface: &mut dyn GameInterface,
    hints: Option<&mut HintService>,
    rng: &mut rand::rngs::ThreadRng,
) {
    let stats = game_loop(wordbank, interface, hints, rng);
    info!("Played {} rounds, won {}", stats.rounds, stats.wins);
}
