use crate::engine::{GameEngine, GameError, GuessOutcome, Status};
use crate::{debug_log, info_log};
use rand::Rng;

/// What the player asked for at the guess prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// Snapshot of everything an interface shows between guesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub pattern: String,
    pub used_letters: Vec<char>,
    pub remaining_attempts: u32,
    pub max_attempts: u32,
}

impl Board {
    pub fn from_engine<R: Rng>(engine: &GameEngine<R>) -> Self {
        Self {
            pattern: engine.revealed_pattern(),
            used_letters: engine.used_letters(),
            remaining_attempts: engine.remaining_attempts(),
            max_attempts: engine.max_attempts(),
        }
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> u32 {
        self.max_attempts - self.remaining_attempts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub status: Status,
    pub secret_word: String,
}

/// Everything the game loop needs from a front end.
///
/// Implementations own all user-facing text; the loop only decides what
/// happens next.
pub trait GameInterface {
    fn display_round_start(&mut self, max_attempts: u32);
    fn display_board(&mut self, board: &Board);
    fn read_guess(&mut self) -> UserAction;
    fn display_guess_outcome(&mut self, guess: &str, outcome: GuessOutcome);
    fn display_guess_error(&mut self, error: &GameError);
    fn display_round_result(&mut self, result: &RoundResult);
    fn ask_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self);
}

enum RoundEnd {
    Finished(RoundResult),
    Exit,
}

/// Play rounds until the player declines another one or exits.
///
/// Returns the number of rounds started. Only word-list problems escape as
/// errors; rejected guesses are reported through the interface.
pub fn game_loop<R, I>(engine: &mut GameEngine<R>, interface: &mut I) -> Result<usize, GameError>
where
    R: Rng,
    I: GameInterface + ?Sized,
{
    let mut rounds_played = 0;

    loop {
        engine.start_round()?;
        rounds_played += 1;
        info_log!("game_loop() - round {} started", rounds_played);
        interface.display_round_start(engine.max_attempts());

        match play_round(engine, interface) {
            RoundEnd::Finished(result) => interface.display_round_result(&result),
            RoundEnd::Exit => break,
        }

        if !interface.ask_play_again() {
            break;
        }
    }

    interface.display_exit_message();
    Ok(rounds_played)
}

fn play_round<R, I>(engine: &mut GameEngine<R>, interface: &mut I) -> RoundEnd
where
    R: Rng,
    I: GameInterface + ?Sized,
{
    while !engine.is_over() {
        interface.display_board(&Board::from_engine(engine));

        let guess = match interface.read_guess() {
            UserAction::Guess(guess) => guess,
            UserAction::Exit => {
                info_log!("play_round() - player exited mid-round");
                return RoundEnd::Exit;
            }
        };

        match engine.guess_letter(&guess) {
            Ok(outcome) => interface.display_guess_outcome(&guess, outcome),
            Err(e) => {
                debug_log!("play_round() - guess {:?} rejected: {}", guess, e);
                interface.display_guess_error(&e);
            }
        }
    }

    interface.display_board(&Board::from_engine(engine));
    RoundEnd::Finished(RoundResult {
        status: engine.status(),
        secret_word: engine.secret_word().unwrap_or_default().to_string(),
    })
}
