//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive full-screen interface using Ratatui.
//!
//! # State Machine
//! - `Guessing`: every printable key is submitted as a guess
//! - `RoundOver`: `Y` starts a new round, `N`/`ESC` quits
//! - `Exiting`: terminal state, nothing more is read

use crate::engine::{GameError, GuessOutcome, Status};
use crate::game_state::{Board, GameInterface, RoundResult, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow);

const GALLOWS: [[&str; 6]; 7] = [
    ["  +---+", "  |   |", "      |", "      |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", "      |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", "  |   |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|   |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " /    |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " / \\  |", "========"],
];

/// Which drawing to show after `wrong` misses out of `max` allowed.
///
/// Scales so the last miss always shows the full figure, whatever `max` is.
fn gallows_stage(wrong: u32, max: u32) -> usize {
    let last = GALLOWS.len() - 1;
    if max == 0 {
        return last;
    }
    let wrong = wrong.min(max) as usize;
    (wrong * last).div_ceil(max as usize)
}

fn spaced(pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| c.to_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Guessing,
    RoundOver,
    Exiting,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    board: Option<Board>,
    result: Option<RoundResult>,
    message: String,
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
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            state: TuiState::Guessing,
            board: None,
            result: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
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
        let Self {
            terminal,
            state,
            board,
            result,
            message,
            error_message,
            status,
        } = self;

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Title
                    Constraint::Length(9), // Gallows and word
                    Constraint::Length(3), // Attempts gauge
                    Constraint::Min(4),    // Messages
                    Constraint::Length(3), // Status line
                    Constraint::Length(3), // Instructions
                ])
                .split(f.area());

            render_title(f, chunks[0]);
            render_board(f, chunks[1], board.as_ref());
            render_attempts(f, chunks[2], board.as_ref());
            render_messages(
                f,
                chunks[3],
                result.as_ref(),
                message.as_str(),
                error_message.as_str(),
            );
            render_status(f, chunks[4], status.as_str());
            render_instructions(f, chunks[5], *state);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait for the next key press, skipping everything that is not one.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring control character: {:?}", c);
                    return Ok(None);
                }
                debug_log!(
                    "next_key() - code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_guess_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UserAction::Exit)
            }
            _ if Self::has_modifier_keys(&key) => None,
            KeyCode::Char(c) => {
                self.error_message.clear();
                Some(UserAction::Guess(c.to_string()))
            }
            _ => None,
        }
    }

    fn handle_round_over_key(key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('y' | 'Y') => Some(true),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(false),
            _ => None,
        }
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("HANGMAN")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, board: Option<&Board>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(20)])
        .split(area);

    let stage = board.map_or(0, |b| gallows_stage(b.wrong_guesses(), b.max_attempts));
    let drawing: Vec<Line> = GALLOWS[stage].iter().map(|row| Line::from(*row)).collect();
    f.render_widget(
        Paragraph::new(drawing).block(Block::default().borders(Borders::ALL)),
        columns[0],
    );

    let mut lines = Vec::new();
    if let Some(board) = board {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(spaced(&board.pattern), WORD_STYLE)));
        lines.push(Line::from(""));
        let used: Vec<String> = board.used_letters.iter().map(char::to_string).collect();
        lines.push(Line::from(vec![
            Span::styled("Used: ", HEADER_STYLE),
            Span::raw(used.join(" ")),
        ]));
    }
    f.render_widget(
        Paragraph::new(lines).block(Block::default().title("Word").borders(Borders::ALL)),
        columns[1],
    );
}

fn render_attempts(f: &mut Frame, area: Rect, board: Option<&Board>) {
    let (remaining, max) = board.map_or((0, 1), |b| (b.remaining_attempts, b.max_attempts.max(1)));
    let color = if remaining * 3 <= max {
        Color::Red
    } else {
        Color::Green
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Attempts").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(f64::from(remaining) / f64::from(max))
        .label(format!("{remaining} / {max}"));
    f.render_widget(gauge, area);
}

fn render_messages(
    f: &mut Frame,
    area: Rect,
    result: Option<&RoundResult>,
    message: &str,
    error_message: &str,
) {
    let mut lines = Vec::new();

    if let Some(result) = result {
        let (text, style) = match result.status {
            Status::Won => (
                format!("You won! The word was {}", result.secret_word),
                SUCCESS_STYLE,
            ),
            Status::Lost => (
                format!("You've been hanged! The word was {}", result.secret_word),
                FAILURE_STYLE,
            ),
            Status::InProgress => (String::new(), MESSAGE_STYLE),
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    if !message.is_empty() {
        lines.push(Line::from(Span::styled(message, MESSAGE_STYLE)));
    }
    if !error_message.is_empty() {
        lines.push(Line::from(Span::styled(error_message, ERROR_STYLE)));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Messages").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::Guessing => "Type a letter to guess | ESC: Quit",
        TuiState::RoundOver => "Y: Play again | N / ESC: Quit",
        TuiState::Exiting => "Exiting...",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn display_round_start(&mut self, max_attempts: u32) {
        self.state = TuiState::Guessing;
        self.board = None;
        self.result = None;
        self.error_message.clear();
        self.message = format!("New word chosen. You have {max_attempts} attempts. Good luck!");
        self.status = "Round in progress".to_string();
        self.draw_or_log();
    }

    fn display_board(&mut self, board: &Board) {
        self.board = Some(board.clone());
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> UserAction {
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Exit");
                return UserAction::Exit;
            }
            match self.next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_key(key) {
                        info_log!("read_guess() - Action: {:?}", action);
                        return action;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_guess() - Input error {}, returning Exit", e);
                    return UserAction::Exit;
                }
            }
        }
    }

    fn display_guess_outcome(&mut self, guess: &str, outcome: GuessOutcome) {
        let letter = guess.to_lowercase();
        self.message = match outcome {
            GuessOutcome::Hit => format!("Good guess! '{letter}' is in the word."),
            GuessOutcome::Miss => format!("Sorry, '{letter}' is not in the word."),
        };
    }

    fn display_guess_error(&mut self, error: &GameError) {
        self.message.clear();
        self.error_message = match error {
            GameError::InvalidLetter(raw) => format!("'{raw}' is not a letter."),
            GameError::DuplicateLetter(letter) => format!("You already tried '{letter}'."),
            other => other.to_string(),
        };
    }

    fn display_round_result(&mut self, result: &RoundResult) {
        self.state = TuiState::RoundOver;
        self.result = Some(result.clone());
        self.message.clear();
        self.error_message.clear();
        self.status = format!("Round {}", result.status);
        self.draw_or_log();
    }

    fn ask_play_again(&mut self) -> bool {
        loop {
            if self.draw().is_err() {
                return false;
            }
            match self.next_key() {
                Ok(Some(key)) => {
                    if let Some(again) = Self::handle_round_over_key(key) {
                        return again;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("ask_play_again() - Input error: {}", e);
                    return false;
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.state = TuiState::Exiting;
        self.message = "Thanks for the game!".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
