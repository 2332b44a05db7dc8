use log::{debug, info};
use rand::Rng;

use crate::error::GameError;
use crate::hint::HintService;
use crate::render::{render_gallows, render_guessed};
use crate::session::{GameSession, GuessOutcome, Status};
use crate::wordbank::{WordBank, WordEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Hint,
    Exit,
}

/// Shown once when a round begins.
#[derive(Debug, Clone)]
pub struct RoundInfo {
    pub category: String,
    pub word_len: usize,
    pub hints_enabled: bool,
}

/// Snapshot of everything a front-end may draw for the current round.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub masked: String,
    pub gallows: &'static str,
    pub attempts_remaining: u8,
    pub guessed: String,
    pub hint_used: bool,
}

impl BoardView {
    #[must_use]
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            masked: session.masked(),
            gallows: render_gallows(session.attempts_remaining()),
            attempts_remaining: session.attempts_remaining(),
            guessed: render_guessed(session.guessed()),
            hint_used: session.hint_used(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub rounds: u32,
    pub wins: u32,
}

/// Everything the loop needs from a front-end. All I/O goes through here.
pub trait GameInterface {
    fn display_round_start(&mut self, info: &RoundInfo, board: &BoardView);
    fn display_board(&mut self, board: &BoardView);
    /// `None` means the input was not understood and the loop should prompt again.
    fn read_action(&mut self, hints_enabled: bool) -> Option<UserAction>;
    fn display_guess_outcome(&mut self, outcome: GuessOutcome, board: &BoardView);
    fn display_rejection(&mut self, error: &GameError);
    fn display_hint_pending(&mut self);
    fn display_hint(&mut self, hint: &str);
    fn display_round_over(&mut self, status: Status, word: &str);
    fn ask_play_again(&mut self) -> bool;
    fn display_goodbye(&mut self, stats: &GameStats);
}

/// Plays rounds until the player declines another one or exits mid-round.
///
/// Without a `HintService` the hint option is not offered.
pub fn game_loop<I, R>(
    bank: &WordBank,
    interface: &mut I,
    mut hints: Option<&mut HintService>,
    rng: &mut R,
) -> GameStats
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = GameStats::default();
    loop {
        let entry = bank.pick_random(rng);
        let Some(status) = play_round(entry, interface, hints.as_deref_mut()) else {
            info!("Player left during a round");
            break;
        };
        stats.rounds += 1;
        if status == Status::Won {
            stats.wins += 1;
        }
        if !interface.ask_play_again() {
            break;
        }
    }
    info!("Session over: {} rounds, {} wins", stats.rounds, stats.wins);
    interface.display_goodbye(&stats);
    stats
}

/// Runs one round to completion. Returns `None` if the player exited early.
pub fn play_round<I>(
    entry: WordEntry,
    interface: &mut I,
    mut hints: Option<&mut HintService>,
) -> Option<Status>
where
    I: GameInterface + ?Sized,
{
    let mut session = GameSession::new(entry);
    info!("New round, category '{}'", session.category());
    debug!("Target word: {}", session.word());

    let info = RoundInfo {
        category: session.category().to_string(),
        word_len: session.word().chars().count(),
        hints_enabled: hints.is_some(),
    };
    interface.display_round_start(&info, &BoardView::from_session(&session));

    loop {
        interface.display_board(&BoardView::from_session(&session));
        if session.status() != Status::InProgress {
            interface.display_round_over(session.status(), session.word());
            return Some(session.status());
        }

        let Some(action) = interface.read_action(hints.is_some()) else {
            continue;
        };
        match action {
            UserAction::Exit => return None,
            UserAction::Guess(input) => match session.guess_letter(&input) {
                Ok(outcome) => {
                    interface.display_guess_outcome(outcome, &BoardView::from_session(&session));
                }
                Err(e) => interface.display_rejection(&e),
            },
            UserAction::Hint => {
                let Some(service) = hints.as_deref_mut() else {
                    debug!("Hint requested while hints are disabled");
                    continue;
                };
                if session.hint_used() {
                    interface.display_rejection(&GameError::HintAlreadyUsed);
                    continue;
                }
                interface.display_hint_pending();
                match session.request_hint(service) {
                    Ok(hint) => interface.display_hint(&hint),
                    Err(e) => interface.display_rejection(&e),
                }
            }
        }
    }
}
