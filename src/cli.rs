use crate::game_state::{DEFAULT_ROWS, GameSettings};
use crate::word_source::DEFAULT_API_URL;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const MAX_ROWS: usize = 12;

/// Guess the five-letter word in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the words API
    #[arg(long = "api-url", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Play the word of the day instead of a random word
    #[arg(long)]
    pub daily: bool,

    /// Play offline against a newline-delimited word list
    #[arg(short = 'i', long = "wordbank")]
    pub wordbank_path: Option<PathBuf>,

    /// Number of guesses
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = parse_rows)]
    pub rows: usize,

    /// How long an unknown word stays highlighted, in milliseconds
    #[arg(long = "invalid-flash-ms", default_value_t = 1000)]
    pub invalid_flash_ms: u64,

    /// Log level used when RUST_LOG is not set
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}

/// Where the secret word comes from and who validates guesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Api { base_url: String, random: bool },
    Offline { wordbank: PathBuf },
}

impl Cli {
    #[must_use]
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            rows: self.rows,
            invalid_flash: Duration::from_millis(self.invalid_flash_ms),
        }
    }

    #[must_use]
    pub fn source(&self) -> SourceConfig {
        match &self.wordbank_path {
            Some(path) => SourceConfig::Offline {
                wordbank: path.clone(),
            },
            None => SourceConfig::Api {
                base_url: self.api_url.clone(),
                random: !self.daily,
            },
        }
    }
}

fn parse_rows(value: &str) -> Result<usize, String> {
    let rows: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (1..=MAX_ROWS).contains(&rows) {
        Ok(rows)
    } else {
        Err(format!("rows must be between 1 and {MAX_ROWS}"))
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}
