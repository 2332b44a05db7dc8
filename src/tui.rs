//! TUI (Terminal User Interface) front-end for Viselitsa
//!
//! Full-screen interface built on Ratatui, implementing the same
//! `GameInterface` the line-oriented CLI does.
//!
//! # State Machine
//! - `EnteringGuess` → (round ends) → `AskingReplay` → `EnteringGuess`
//! - `Finished` once the player leaves

use crate::error::GameError;
use crate::game_state::{BoardView, GameInterface, GameStats, RoundInfo, UserAction};
use crate::cli::{is_affirmative, rejection_message};
use crate::session::{GuessOutcome, MAX_ATTEMPTS, Status};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const GALLOWS_WIDTH: u16 = 22;
const HINT_KEY: char = '?';

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    AskingReplay,
    Finished,
}

/// Groups what a frame needs so rendering can stay a pair of static functions.
struct RenderContext<'a> {
    category: &'a str,
    word_len: usize,
    board: Option<&'a BoardView>,
    current_input: &'a str,
    state: TuiState,
    hints_enabled: bool,
    hint: &'a str,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    category: String,
    word_len: usize,
    board: Option<BoardView>,
    current_input: String,
    state: TuiState,
    hints_enabled: bool,
    hint: String,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            category: String::new(),
            word_len: 0,
            board: None,
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            hints_enabled: false,
            hint: String::new(),
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Готово".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            category: &self.category,
            word_len: self.word_len,
            board: self.board.as_ref(),
            current_input: &self.current_input,
            state: self.state,
            hints_enabled: self.hints_enabled,
            hint: &self.hint,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };
        self.terminal.draw(|f| Self::render_static(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn set_message(&mut self, text: String, style: Style) {
        self.message = text;
        self.message_style = style;
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(12),   // Gallows + word
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(20)])
            .split(rows[1]);

        Self::render_title(f, rows[0], ctx.category);
        Self::render_gallows(f, middle[0], ctx.board);
        Self::render_info(f, middle[1], ctx);
        Self::render_status(f, rows[2], ctx.status);
        Self::render_instructions(f, rows[3], ctx.state, ctx.hints_enabled);
    }

    fn render_title(f: &mut Frame, area: Rect, category: &str) {
        let text = if category.is_empty() {
            "ВИСЕЛИЦА".to_string()
        } else {
            format!("ВИСЕЛИЦА - категория: {category}")
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, board: Option<&BoardView>) {
        let art = board.map_or("", |b| b.gallows);
        let lines: Vec<Line> = art.lines().map(Line::from).collect();
        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(board) = ctx.board {
            lines.push(Line::from(vec![
                Span::styled("Слово: ", HEADER_STYLE),
                Span::styled(board.masked.clone(), SUCCESS_STYLE),
            ]));
            lines.push(Line::from(format!("Букв в слове: {}", ctx.word_len)));
            let attempts_style = if board.attempts_remaining <= 2 {
                ERROR_STYLE
            } else {
                INFO_STYLE
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "Осталось попыток: {} из {MAX_ATTEMPTS}",
                    board.attempts_remaining
                ),
                attempts_style,
            )));
            if !board.guessed.is_empty() {
                lines.push(Line::from(format!("Названные буквы: {}", board.guessed)));
            }
            lines.push(Line::from(""));
        }

        if ctx.state == TuiState::EnteringGuess {
            lines.push(Line::from(vec![
                Span::raw("Ваша буква: "),
                Span::styled(
                    format!(" {} ", ctx.current_input),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(""));
        }

        if !ctx.hint.is_empty() {
            lines.push(Line::from(Span::styled("Подсказка:", HEADER_STYLE)));
            lines.push(Line::from(ctx.hint.to_string()));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message.to_string(), ctx.message_style)));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(
                ctx.error_message.to_string(),
                ERROR_STYLE,
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Игра").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let paragraph = Paragraph::new(status.to_string())
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Статус"));
        f.render_widget(paragraph, area);
    }

    fn instructions_text(state: TuiState, hints_enabled: bool) -> &'static str {
        match state {
            TuiState::EnteringGuess if hints_enabled => {
                "Буква + ENTER: Угадать | ?: Подсказка | ESC: Выход"
            }
            TuiState::EnteringGuess => "Буква + ENTER: Угадать | ESC: Выход",
            TuiState::AskingReplay => "Д/Y: Играть ещё | любая другая клавиша: Выход",
            TuiState::Finished => "До свидания! Нажмите любую клавишу для выхода",
        }
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState, hints_enabled: bool) {
        let paragraph = Paragraph::new(Self::instructions_text(state, hints_enabled))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Waits up to one poll interval for a key press.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            // Only Press events, Release and Repeat would double the input
            Event::Key(key) if key.kind == event::KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_guess_input() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }
        match key.code {
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Char(HINT_KEY) if self.hints_enabled => {
                self.error_message.clear();
                Some(UserAction::Hint)
            }
            KeyCode::Char(c) if c.is_alphabetic() => {
                self.error_message.clear();
                self.current_input = c.to_lowercase().collect();
                None
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Разрешены только буквы! ('{c}' не буква)");
                None
            }
            KeyCode::Backspace => {
                self.current_input.clear();
                None
            }
            KeyCode::Enter if !self.current_input.is_empty() => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            KeyCode::Enter => {
                self.error_message = "Сначала введите букву.".to_string();
                None
            }
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_round_start(&mut self, info: &RoundInfo, board: &BoardView) {
        self.category.clone_from(&info.category);
        self.word_len = info.word_len;
        self.hints_enabled = info.hints_enabled;
        self.board = Some(board.clone());
        self.current_input.clear();
        self.hint.clear();
        self.error_message.clear();
        self.state = TuiState::EnteringGuess;
        self.set_message(
            format!("Новый раунд! Слово состоит из {} букв.", info.word_len),
            MESSAGE_STYLE,
        );
        self.status = "Ожидание буквы".to_string();
        self.draw_or_log();
    }

    fn display_board(&mut self, board: &BoardView) {
        self.board = Some(board.clone());
        self.draw_or_log();
    }

    fn read_action(&mut self, hints_enabled: bool) -> Option<UserAction> {
        self.hints_enabled = hints_enabled;
        self.state = TuiState::EnteringGuess;
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_input(key) {
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_guess_outcome(&mut self, outcome: GuessOutcome, board: &BoardView) {
        self.board = Some(board.clone());
        match outcome {
            GuessOutcome::Hit => {
                self.set_message("Верно! Эта буква есть в слове.".to_string(), SUCCESS_STYLE);
            }
            GuessOutcome::Miss => self.set_message(
                format!(
                    "Нет такой буквы! Осталось попыток: {}",
                    board.attempts_remaining
                ),
                ERROR_STYLE,
            ),
        }
        self.draw_or_log();
    }

    fn display_rejection(&mut self, error: &GameError) {
        self.error_message = rejection_message(error);
        self.draw_or_log();
    }

    fn display_hint_pending(&mut self) {
        self.status = "Генерация подсказки...".to_string();
        self.draw_or_log();
    }

    fn display_hint(&mut self, hint: &str) {
        self.hint = hint.to_string();
        self.status = "Подсказка получена".to_string();
        self.draw_or_log();
    }

    fn display_round_over(&mut self, status: Status, word: &str) {
        match status {
            Status::Won => self.set_message(
                format!("Поздравляем! Вы угадали слово: {}!", word.to_uppercase()),
                SUCCESS_STYLE,
            ),
            Status::Lost => self.set_message(
                format!("Игра окончена! Загаданное слово: {}", word.to_uppercase()),
                ERROR_STYLE,
            ),
            Status::InProgress => {}
        }
        self.status = "Раунд окончен".to_string();
        self.draw_or_log();
    }

    fn ask_play_again(&mut self) -> bool {
        self.state = TuiState::AskingReplay;
        self.status = "Хотите сыграть ещё?".to_string();
        loop {
            if self.draw().is_err() {
                return false;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    return match key.code {
                        KeyCode::Char(c) => is_affirmative(&c.to_string()),
                        _ => false,
                    };
                }
                Ok(None) => {}
                Err(_) => return false,
            }
        }
    }

    fn display_goodbye(&mut self, stats: &GameStats) {
        self.state = TuiState::Finished;
        self.set_message(
            format!(
                "Спасибо за игру! Сыграно раундов: {}, побед: {}",
                stats.rounds, stats.wins
            ),
            MESSAGE_STYLE,
        );
        self.status = "Выход".to_string();
        // The tally stays on screen until a key press; Drop leaves the alternate screen.
        loop {
            if self.draw().is_err() {
                return;
            }
            match Self::next_key() {
                Ok(Some(_)) | Err(_) => return,
                Ok(None) => {}
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
