//! Collaborators that supply the secret word and check guesses.
//!
//! [`WordsApiClient`] talks to the words API over HTTP. [`OfflineDictionary`]
//! plays from a local word list and picks the secret from the calendar date.

use crate::error::GameError;
use crate::word::Word;
use crate::{debug_log, info_log};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_API_URL: &str = "https://words.dev-apis.com";

/// Supplies the secret word for a game.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn secret_word(&self) -> Result<String, GameError>;
}

/// Decides whether a guess is a recognised word.
#[async_trait]
pub trait Validator: Send + Sync {
    async fn is_valid(&self, word: &str) -> Result<bool, GameError>;
}

#[derive(Debug, Deserialize)]
struct WordOfTheDayResponse {
    word: String,
}

#[derive(Debug, Serialize)]
struct ValidateWordRequest<'a> {
    word: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateWordResponse {
    valid_word: bool,
}

/// HTTP client for the words API.
pub struct WordsApiClient {
    client: Client,
    base_url: String,
    random: bool,
}

impl WordsApiClient {
    /// `random` asks for a random word instead of the word of the day.
    #[must_use]
    pub fn new(base_url: &str, random: bool) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            random,
        }
    }

    fn word_of_the_day_url(&self) -> String {
        if self.random {
            format!("{}/word-of-the-day?random=1", self.base_url)
        } else {
            format!("{}/word-of-the-day", self.base_url)
        }
    }

    fn validate_url(&self) -> String {
        format!("{}/validate-word", self.base_url)
    }
}

#[async_trait]
impl WordSource for WordsApiClient {
    async fn secret_word(&self) -> Result<String, GameError> {
        let url = self.word_of_the_day_url();
        debug_log!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(GameError::Status {
                endpoint: url,
                status: resp.status(),
            });
        }
        let body: WordOfTheDayResponse = resp.json().await?;
        info_log!("Secret word fetched");
        Ok(body.word)
    }
}

#[async_trait]
impl Validator for WordsApiClient {
    async fn is_valid(&self, word: &str) -> Result<bool, GameError> {
        let url = self.validate_url();
        debug_log!("POST {} word={}", url, word);
        let resp = self
            .client
            .post(&url)
            .json(&ValidateWordRequest { word })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(GameError::Status {
                endpoint: url,
                status: resp.status(),
            });
        }
        let body: ValidateWordResponse = resp.json().await?;
        debug_log!("{} valid={}", word, body.valid_word);
        Ok(body.valid_word)
    }
}

/// Word source and validator backed by a local word list.
pub struct OfflineDictionary {
    words: Vec<Word>,
    known: HashSet<Word>,
    date: NaiveDate,
}

impl OfflineDictionary {
    pub fn new(words: Vec<Word>) -> Result<Self, GameError> {
        Self::for_date(words, Local::now().date_naive())
    }

    /// Dictionary whose secret is the word for `date`.
    pub fn for_date(words: Vec<Word>, date: NaiveDate) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordbank);
        }
        let known = words.iter().copied().collect();
        Ok(Self { words, known, date })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The same date always yields the same word; consecutive dates step
    /// through the list, starting from the first word on 1970-01-01.
    #[must_use]
    pub fn word_for(&self, date: NaiveDate) -> Word {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.date_naive();
        let days = date.signed_duration_since(epoch).num_days();
        let len = i64::try_from(self.words.len()).unwrap_or(i64::MAX);
        let index = usize::try_from(days.rem_euclid(len)).unwrap_or(0);
        self.words[index]
    }
}

#[async_trait]
impl WordSource for OfflineDictionary {
    async fn secret_word(&self) -> Result<String, GameError> {
        Ok(self.word_for(self.date).to_string())
    }
}

#[async_trait]
impl Validator for OfflineDictionary {
    async fn is_valid(&self, word: &str) -> Result<bool, GameError> {
        Ok(Word::parse(word).is_ok_and(|w| self.known.contains(&w)))
    }
}
