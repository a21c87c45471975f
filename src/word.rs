use crate::error::GameError;
use std::fmt;

pub const WORD_LENGTH: usize = 5;

/// A five-letter, uppercase ASCII word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Word([char; WORD_LENGTH]);

#[must_use]
pub fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

impl Word {
    /// Parse a word, accepting either case and surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let trimmed = input.trim();
        if !is_valid_word(trimmed) {
            return Err(GameError::MalformedWord(trimmed.to_string()));
        }
        let mut letters = [' '; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(trimmed.chars()) {
            *slot = c.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    #[must_use]
    pub fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn letter(&self, index: usize) -> char {
        self.0[index]
    }

    #[must_use]
    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Word {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
