//! Error types for the game and its collaborators.
//!
//! Only infrastructure failures are errors. A guess the dictionary rejects is
//! part of normal play and is reported on the board instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("request to the words API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("'{0}' is not a five-letter word")]
    MalformedWord(String),
    #[error("the word bank contains no five-letter words")]
    EmptyWordbank,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
