// Library interface for wordle-tui
// The binary and the integration tests both build on these modules

pub mod cli;
pub mod display;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod scoring;
pub mod timers;
pub mod tui;
pub mod word;
pub mod word_source;
pub mod wordbank;

pub use display::{BoardDisplay, GameDisplay, Marker, Outcome};
pub use error::GameError;
pub use game_state::{GameController, GameSettings, GameStatus, Key, KeyOutcome, Submission};
pub use scoring::{Mark, score_guess};
pub use word::Word;
pub use word_source::{OfflineDictionary, Validator, WordSource, WordsApiClient};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
