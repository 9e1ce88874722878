use crate::debug_log;
use crate::engine::{DEFAULT_MAX_ATTEMPTS, GameError, GuessOutcome, Status};
use crate::game_state::{Board, GameInterface, RoundResult, UserAction};
use clap::Parser;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::PathBuf;

/// Hangman: guess the hidden word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited, UTF-8 word list
    #[arg(short = 'i', long = "input", env = "HANGMAN_WORDS")]
    pub wordbank_path: Option<PathBuf>,

    /// Wrong guesses allowed per round
    #[arg(
        short = 'a',
        long = "attempts",
        env = "HANGMAN_ATTEMPTS",
        default_value_t = DEFAULT_MAX_ATTEMPTS
    )]
    pub max_attempts: u32,

    /// Seed for word selection, for reproducible games
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Append log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const EXIT_COMMAND: &str = "exit";

fn format_used_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_error(error: &GameError) -> String {
    match error {
        GameError::InvalidLetter(raw) => format!("Letter {raw} is invalid. Try again."),
        GameError::DuplicateLetter(letter) => {
            format!("You've already tried the letter {letter}. Try another letter.")
        }
        other => other.to_string(),
    }
}

/// Line-based interface over any reader/writer pair.
///
/// One line of input is one guess. End of input, or typing `exit`, ends the
/// session.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl CliInterface<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("emit() - write failed: {}", e);
        }
    }

    /// Show `prompt` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.writer, "{prompt}").and_then(|()| self.writer.flush()) {
            debug_log!("prompt() - write failed: {}", e);
        }

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(e) => {
                debug_log!("prompt() - read failed: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_round_start(&mut self, max_attempts: u32) {
        self.emit("\nThe new game has begun!");
        self.emit(&format!("You have {max_attempts} attempts. Good luck!"));
    }

    fn display_board(&mut self, board: &Board) {
        self.emit(&format!("\nThe hidden word: {}", board.pattern));
        self.emit(&format!(
            "The letters used are: {}",
            format_used_letters(&board.used_letters)
        ));
        self.emit(&format!("Attempts remaining: {}", board.remaining_attempts));
    }

    fn read_guess(&mut self) -> UserAction {
        match self.prompt("Enter a letter: ") {
            None => UserAction::Exit,
            Some(input) if input.eq_ignore_ascii_case(EXIT_COMMAND) => UserAction::Exit,
            Some(input) => UserAction::Guess(input),
        }
    }

    fn display_guess_outcome(&mut self, guess: &str, outcome: GuessOutcome) {
        let letter = guess.to_lowercase();
        match outcome {
            GuessOutcome::Hit => self.emit(&format!("Good guess! '{letter}' is in the word.")),
            GuessOutcome::Miss => self.emit(&format!("Sorry, '{letter}' is not in the word.")),
        }
    }

    fn display_guess_error(&mut self, error: &GameError) {
        self.emit(&format!("\nError guessing: {}", describe_error(error)));
    }

    fn display_round_result(&mut self, result: &RoundResult) {
        match result.status {
            Status::Won => self.emit(&format!(
                "\nCongratulations! You've won! Word: {}",
                result.secret_word
            )),
            Status::Lost => self.emit(&format!(
                "\nYou've been hanged! The hidden word: {}",
                result.secret_word
            )),
            Status::InProgress => {}
        }
    }

    fn ask_play_again(&mut self) -> bool {
        self.prompt("\nWould you like to play again? (y/n): ")
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
    }

    fn display_exit_message(&mut self) {
        self.emit("\nThanks for the game!");
    }
}
