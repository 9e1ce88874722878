//! Runtime configuration resolved from command-line arguments.

use crate::cli::Cli;
use crate::engine::{GameEngine, GameError};
use crate::wordbank::{
    EMBEDDED_WORDBANK, default_wordbank_path, load_wordbank_from_file, load_wordbank_from_str,
};
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "hangman";
const LOG_FILE: &str = "hangman.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    File(PathBuf),
    Embedded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceMode {
    Cli,
    Tui,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_attempts: u32,
    pub word_source: WordSource,
    pub seed: Option<u64>,
    pub mode: InterfaceMode,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, GameError> {
        Self::resolve(cli, default_wordbank_path(), dirs::cache_dir())
    }

    fn resolve(
        cli: &Cli,
        default_words: Option<PathBuf>,
        cache_dir: Option<PathBuf>,
    ) -> Result<Self, GameError> {
        if cli.max_attempts == 0 {
            return Err(GameError::Configuration {
                max_attempts: cli.max_attempts,
            });
        }

        let word_source = match (&cli.wordbank_path, default_words) {
            (Some(path), _) => WordSource::File(path.clone()),
            (None, Some(path)) if path.is_file() => WordSource::File(path),
            _ => WordSource::Embedded,
        };

        let mode = if cli.tui {
            InterfaceMode::Tui
        } else {
            InterfaceMode::Cli
        };

        // Logging to stderr would scribble over the alternate screen.
        let log_file = cli.log_file.clone().or_else(|| match mode {
            InterfaceMode::Tui => cache_dir.map(|dir| dir.join(APP_DIR).join(LOG_FILE)),
            InterfaceMode::Cli => None,
        });

        Ok(Self {
            max_attempts: cli.max_attempts,
            word_source,
            seed: cli.seed,
            mode,
            log_file,
        })
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn load_words(&self) -> io::Result<Vec<String>> {
        match &self.word_source {
            WordSource::File(path) => load_wordbank_from_file(path),
            WordSource::Embedded => Ok(load_wordbank_from_str(EMBEDDED_WORDBANK)),
        }
    }

    pub fn build_engine(&self) -> Result<GameEngine, GameError> {
        match self.seed {
            Some(seed) => GameEngine::with_seed(self.max_attempts, seed),
            None => GameEngine::from_entropy(self.max_attempts),
        }
    }
}
