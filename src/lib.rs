// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod engine;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{GameEngine, GameError, GuessOutcome, Status};
pub use game_state::{Board, GameInterface, RoundResult, UserAction, game_loop};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
