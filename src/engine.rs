//! Game-state engine for hangman rounds.
//!
//! The engine owns secret-word selection, guess validation and status
//! derivation. It performs no I/O: interfaces read input, hand it to
//! [`GameEngine::guess_letter`] and render whatever the accessors report.
//!
//! # Round lifecycle
//! `load_words` → `start_round` → `guess_letter`* until `is_over` → `start_round` ...

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 7;
pub const PLACEHOLDER: char = '_';

/// Everything the engine can refuse to do.
///
/// None of these are fatal to the process; the driver reports them and
/// carries on (or, for the word-list variants, decides whether to give up).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("max attempts must be greater than zero (got {max_attempts})")]
    Configuration { max_attempts: u32 },

    #[error("the word list contains no playable words")]
    EmptyWordList,

    #[error("no words are loaded, cannot start a round")]
    NoWordsAvailable,

    #[error("no round has been started yet")]
    NoActiveRound,

    /// The guess was not exactly one alphabetic character.
    #[error("\"{0}\" is not a single letter")]
    InvalidLetter(String),

    #[error("the letter '{0}' has already been tried")]
    DuplicateLetter(char),

    /// A guess arrived after the round was already won or lost.
    #[error("the round is over, start a new one to keep guessing")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// Whether an accepted guess was in the secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
}

#[derive(Debug)]
struct Round {
    secret_word: String,
    guessed_letters: BTreeSet<char>,
    remaining_attempts: u32,
}

impl Round {
    fn new(secret_word: String, max_attempts: u32) -> Self {
        Self {
            secret_word,
            guessed_letters: BTreeSet::new(),
            remaining_attempts: max_attempts,
        }
    }

    fn is_revealed(&self) -> bool {
        self.secret_word
            .chars()
            .all(|c| self.guessed_letters.contains(&c))
    }

    fn status(&self) -> Status {
        if self.is_revealed() {
            Status::Won
        } else if self.remaining_attempts == 0 {
            Status::Lost
        } else {
            Status::InProgress
        }
    }
}

/// A hangman game: one word list, one round at a time.
///
/// The random source is injected so word selection can be replayed under a
/// fixed seed. Independent games need independent engines.
#[derive(Debug)]
pub struct GameEngine<R = StdRng> {
    max_attempts: u32,
    word_list: Vec<String>,
    round: Option<Round>,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Engine whose word selection is fully determined by `seed`.
    pub fn with_seed(max_attempts: u32, seed: u64) -> Result<Self, GameError> {
        Self::new(max_attempts, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(max_attempts: u32) -> Result<Self, GameError> {
        Self::new(max_attempts, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn new(max_attempts: u32, rng: R) -> Result<Self, GameError> {
        if max_attempts == 0 {
            return Err(GameError::Configuration { max_attempts });
        }
        Ok(Self {
            max_attempts,
            word_list: Vec::new(),
            round: None,
            rng,
        })
    }

    /// Replace the word list with the trimmed, lowercased `words`.
    ///
    /// Blank entries and entries containing anything other than letters are
    /// skipped, since they could never be fully revealed. Returns the number
    /// of words kept. On error the previous list is left untouched.
    pub fn load_words<I, S>(&mut self, words: I) -> Result<usize, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0usize;
        let normalized: Vec<String> = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim().to_lowercase();
                if is_playable(&word) {
                    Some(word)
                } else {
                    skipped += 1;
                    None
                }
            })
            .collect();

        if skipped > 0 {
            debug!("load_words() - skipped {skipped} unplayable entries");
        }
        if normalized.is_empty() {
            return Err(GameError::EmptyWordList);
        }

        info!("Loaded {} words", normalized.len());
        self.word_list = normalized;
        Ok(self.word_list.len())
    }

    /// Pick a new secret word and reset the round state.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        let secret_word = self
            .word_list
            .choose(&mut self.rng)
            .ok_or(GameError::NoWordsAvailable)?
            .clone();
        debug!(
            "start_round() - secret has {} letters, {} attempts",
            secret_word.chars().count(),
            self.max_attempts
        );
        self.round = Some(Round::new(secret_word, self.max_attempts));
        Ok(())
    }

    /// Apply one guess to the current round.
    ///
    /// Rejected guesses (any `Err`) leave the round exactly as it was.
    pub fn guess_letter(&mut self, raw: &str) -> Result<GuessOutcome, GameError> {
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        if round.status() != Status::InProgress {
            return Err(GameError::GameOver);
        }

        let letter = normalize_letter(raw)?;
        if !round.guessed_letters.insert(letter) {
            return Err(GameError::DuplicateLetter(letter));
        }

        let outcome = if round.secret_word.contains(letter) {
            GuessOutcome::Hit
        } else {
            round.remaining_attempts = round.remaining_attempts.saturating_sub(1);
            GuessOutcome::Miss
        };
        debug!(
            "guess_letter() - '{letter}' was a {outcome:?}, {} attempts left",
            round.remaining_attempts
        );

        match round.status() {
            Status::InProgress => {}
            finished => info!("Round {finished} after {} guesses", round.guessed_letters.len()),
        }
        Ok(outcome)
    }

    /// The secret word with unguessed letters replaced by [`PLACEHOLDER`].
    ///
    /// Empty before the first round.
    pub fn revealed_pattern(&self) -> String {
        let Some(round) = &self.round else {
            return String::new();
        };
        round
            .secret_word
            .chars()
            .map(|c| {
                if round.guessed_letters.contains(&c) {
                    c
                } else {
                    PLACEHOLDER
                }
            })
            .collect()
    }

    /// Letters tried this round, in ascending order.
    pub fn used_letters(&self) -> Vec<char> {
        self.round
            .as_ref()
            .map(|round| round.guessed_letters.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn status(&self) -> Status {
        self.round
            .as_ref()
            .map_or(Status::InProgress, Round::status)
    }

    pub fn is_over(&self) -> bool {
        self.status() != Status::InProgress
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.round
            .as_ref()
            .map_or(self.max_attempts, |round| round.remaining_attempts)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn secret_word(&self) -> Option<&str> {
        self.round.as_ref().map(|round| round.secret_word.as_str())
    }

    pub fn word_count(&self) -> usize {
        self.word_list.len()
    }
}

fn is_playable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

fn normalize_letter(raw: &str) -> Result<char, GameError> {
    let lowered = raw.to_lowercase();
    let mut chars = lowered.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_alphabetic() => Ok(letter),
        _ => Err(GameError::InvalidLetter(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine_with(word: &str, max_attempts: u32) -> GameEngine {
        let mut engine = GameEngine::with_seed(max_attempts, 7).unwrap();
        engine.load_words([word]).unwrap();
        engine.start_round().unwrap();
        engine
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = GameEngine::with_seed(0, 1);
        assert!(matches!(
            result,
            Err(GameError::Configuration { max_attempts: 0 })
        ));
    }

    #[test]
    fn test_new_engine_has_no_round() {
        let engine = GameEngine::with_seed(5, 1).unwrap();
        assert_eq!(engine.status(), Status::InProgress);
        assert!(!engine.is_over());
        assert_eq!(engine.remaining_attempts(), 5);
        assert_eq!(engine.revealed_pattern(), "");
        assert!(engine.used_letters().is_empty());
        assert_eq!(engine.secret_word(), None);
    }

    #[test]
    fn test_load_words_normalizes() {
        let mut engine = GameEngine::with_seed(7, 1).unwrap();
        let count = engine.load_words(["  Apple ", "BANANA", "cherry\r"]).unwrap();
        assert_eq!(count, 3);
        assert_eq!(engine.word_list, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_load_words_skips_unplayable_entries() {
        let mut engine = GameEngine::with_seed(7, 1).unwrap();
        let count = engine
            .load_words(["", "   ", "ice cream", "r2d2", "Кот", "plum"])
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(engine.word_list, vec!["кот", "plum"]);
    }

    #[test]
    fn test_load_words_empty_input() {
        let mut engine = GameEngine::with_seed(7, 1).unwrap();
        let empty: [&str; 0] = [];
        assert_eq!(engine.load_words(empty), Err(GameError::EmptyWordList));
        assert_eq!(engine.load_words(["", " "]), Err(GameError::EmptyWordList));
    }

    #[test]
    fn test_failed_load_keeps_previous_list() {
        let mut engine = GameEngine::with_seed(7, 1).unwrap();
        engine.load_words(["cat"]).unwrap();
        let empty: Vec<String> = Vec::new();
        assert!(engine.load_words(empty).is_err());
        assert_eq!(engine.word_count(), 1);
    }

    #[test]
    fn test_start_round_without_words() {
        let mut engine = GameEngine::with_seed(7, 1).unwrap();
        assert_eq!(engine.start_round(), Err(GameError::NoWordsAvailable));
    }

    #[test]
    fn test_guess_before_round() {
        let mut engine = GameEngine::with_seed(7, 1).unwrap();
        engine.load_words(["cat"]).unwrap();
        assert_eq!(engine.guess_letter("c"), Err(GameError::NoActiveRound));
    }

    #[test]
    fn test_start_round_resets_state() {
        let mut engine = engine_with("cat", 7);
        assert_eq!(engine.status(), Status::InProgress);
        assert_eq!(engine.remaining_attempts(), 7);
        assert_eq!(engine.revealed_pattern(), "___");

        engine.guess_letter("c").unwrap();
        engine.guess_letter("z").unwrap();
        engine.start_round().unwrap();

        assert_eq!(engine.remaining_attempts(), 7);
        assert_eq!(engine.revealed_pattern(), "___");
        assert!(engine.used_letters().is_empty());
    }

    #[test]
    fn test_winning_round() {
        let mut engine = engine_with("cat", 7);

        assert_eq!(engine.guess_letter("c"), Ok(GuessOutcome::Hit));
        assert_eq!(engine.revealed_pattern(), "c__");
        assert_eq!(engine.remaining_attempts(), 7);
        assert_eq!(engine.status(), Status::InProgress);

        assert_eq!(engine.guess_letter("z"), Ok(GuessOutcome::Miss));
        assert_eq!(engine.revealed_pattern(), "c__");
        assert_eq!(engine.remaining_attempts(), 6);
        assert_eq!(engine.status(), Status::InProgress);

        engine.guess_letter("a").unwrap();
        assert_eq!(engine.revealed_pattern(), "ca_");

        engine.guess_letter("t").unwrap();
        assert_eq!(engine.revealed_pattern(), "cat");
        assert_eq!(engine.status(), Status::Won);
        assert!(engine.is_over());
    }

    #[test]
    fn test_losing_round() {
        let mut engine = engine_with("dog", 2);

        engine.guess_letter("x").unwrap();
        assert_eq!(engine.remaining_attempts(), 1);
        assert_eq!(engine.status(), Status::InProgress);

        engine.guess_letter("y").unwrap();
        assert_eq!(engine.remaining_attempts(), 0);
        assert_eq!(engine.status(), Status::Lost);
        assert_eq!(engine.revealed_pattern(), "___");
    }

    #[test]
    fn test_guess_after_round_over() {
        let mut engine = engine_with("dog", 1);
        engine.guess_letter("x").unwrap();
        assert_eq!(engine.status(), Status::Lost);

        assert_eq!(engine.guess_letter("d"), Err(GameError::GameOver));
        assert_eq!(engine.remaining_attempts(), 0);
        assert_eq!(engine.used_letters(), vec!['x']);
    }

    #[test]
    fn test_repeated_letters_revealed_together() {
        let mut engine = engine_with("banana", 7);
        engine.guess_letter("a").unwrap();
        assert_eq!(engine.revealed_pattern(), "_a_a_a");
        engine.guess_letter("n").unwrap();
        engine.guess_letter("b").unwrap();
        assert_eq!(engine.status(), Status::Won);
    }

    #[test]
    fn test_uppercase_guess_is_normalized() {
        let mut engine = engine_with("cat", 7);
        assert_eq!(engine.guess_letter("C"), Ok(GuessOutcome::Hit));
        assert_eq!(engine.used_letters(), vec!['c']);
        assert_eq!(engine.guess_letter("c"), Err(GameError::DuplicateLetter('c')));
    }

    #[test]
    fn test_invalid_guesses_leave_state_alone() {
        let mut engine = engine_with("cat", 7);
        engine.guess_letter("c").unwrap();

        for raw in ["", "ab", "1", " ", "?", "c "] {
            assert_eq!(
                engine.guess_letter(raw),
                Err(GameError::InvalidLetter(raw.to_string()))
            );
        }
        assert_eq!(engine.remaining_attempts(), 7);
        assert_eq!(engine.used_letters(), vec!['c']);
        assert_eq!(engine.revealed_pattern(), "c__");
    }

    #[test]
    fn test_duplicate_miss_does_not_cost_twice() {
        let mut engine = engine_with("cat", 7);
        engine.guess_letter("q").unwrap();
        assert_eq!(engine.guess_letter("Q"), Err(GameError::DuplicateLetter('q')));
        assert_eq!(engine.remaining_attempts(), 6);
        assert_eq!(engine.status(), Status::InProgress);
    }

    #[test]
    fn test_cyrillic_word() {
        let mut engine = engine_with("Кот", 3);
        assert_eq!(engine.revealed_pattern(), "___");
        engine.guess_letter("К").unwrap();
        engine.guess_letter("о").unwrap();
        assert_eq!(engine.revealed_pattern(), "ко_");
        engine.guess_letter("т").unwrap();
        assert_eq!(engine.status(), Status::Won);
    }

    #[test]
    fn test_used_letters_sorted() {
        let mut engine = engine_with("zebra", 10);
        for letter in ["r", "b", "y", "a", "m"] {
            engine.guess_letter(letter).unwrap();
        }
        assert_eq!(engine.used_letters(), vec!['a', 'b', 'm', 'r', 'y']);
    }

    #[test]
    fn test_same_seed_same_words() {
        let words = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
        let mut first = GameEngine::with_seed(7, 42).unwrap();
        let mut second = GameEngine::with_seed(7, 42).unwrap();
        first.load_words(words).unwrap();
        second.load_words(words).unwrap();

        for _ in 0..20 {
            first.start_round().unwrap();
            second.start_round().unwrap();
            assert_eq!(first.secret_word(), second.secret_word());
        }
    }

    #[test]
    fn test_every_word_can_be_chosen() {
        let words = ["one", "two", "three"];
        let mut engine = GameEngine::with_seed(7, 3).unwrap();
        engine.load_words(words).unwrap();

        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            engine.start_round().unwrap();
            seen.insert(engine.secret_word().unwrap().to_string());
        }
        assert_eq!(seen.len(), words.len());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::InProgress.to_string(), "in progress");
        assert_eq!(Status::Won.to_string(), "won");
        assert_eq!(Status::Lost.to_string(), "lost");
    }

    proptest! {
        #[test]
        fn guesses_preserve_invariants(
            word in "[a-z]{1,10}",
            max_attempts in 1u32..10,
            guesses in proptest::collection::vec("[a-zA-Z0-9 ]{0,2}", 0..40)
        ) {
            let mut engine = engine_with(&word, max_attempts);

            for guess in &guesses {
                let attempts_before = engine.remaining_attempts();
                let used_before = engine.used_letters();
                let status_before = engine.status();

                match engine.guess_letter(guess) {
                    Ok(GuessOutcome::Hit) => {
                        prop_assert_eq!(engine.remaining_attempts(), attempts_before);
                    }
                    Ok(GuessOutcome::Miss) => {
                        prop_assert_eq!(engine.remaining_attempts(), attempts_before - 1);
                    }
                    Err(_) => {
                        prop_assert_eq!(engine.remaining_attempts(), attempts_before);
                        prop_assert_eq!(engine.used_letters(), used_before);
                        prop_assert_eq!(engine.status(), status_before);
                    }
                }

                let used = engine.used_letters();
                prop_assert!(used.windows(2).all(|pair| pair[0] < pair[1]));
                prop_assert!(used.iter().all(|c| c.is_lowercase()));
                prop_assert!(engine.remaining_attempts() <= max_attempts);

                let pattern = engine.revealed_pattern();
                prop_assert_eq!(pattern.chars().count(), word.chars().count());
                prop_assert_eq!(engine.status() == Status::Won, pattern == word);
                prop_assert_eq!(
                    engine.status() == Status::Lost,
                    engine.remaining_attempts() == 0 && pattern != word
                );
            }
        }
    }
}
