use hangman::cli::{CliInterface, parse_cli};
use hangman::config::{Config, InterfaceMode};
use hangman::game_state::{GameInterface, game_loop};
use hangman::logging;
use hangman::tui::TuiInterface;
use log::{error, info};

fn main() {
    let cli = parse_cli();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };

    if let Err(e) = logging::init(config.log_file()) {
        eprintln!("Failed to set up logging: {e}");
    }
    info!("Starting with {:?}", config);

    let words = match config.load_words() {
        Ok(words) => words,
        Err(e) => {
            error!("Word list unavailable: {e}");
            eprintln!("Failed to load word list from {:?}: {e}", config.word_source);
            return;
        }
    };

    let mut engine = match config.build_engine() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };
    if let Err(e) = engine.load_words(&words) {
        eprintln!("Error: {e}");
        return;
    }

    let mut interface: Box<dyn GameInterface> = match config.mode {
        InterfaceMode::Cli => Box::new(CliInterface::stdio()),
        InterfaceMode::Tui => match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to initialize terminal interface: {e}");
                return;
            }
        },
    };

    let result = game_loop(&mut engine, interface.as_mut());
    // Restore the terminal before anything else is printed.
    drop(interface);

    match result {
        Ok(rounds) => info!("Session finished after {rounds} rounds"),
        Err(e) => {
            error!("Session ended early: {e}");
            eprintln!("Error: {e}");
        }
    }
}
