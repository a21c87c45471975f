//! Game controller: owns the secret word, the guess being typed, the cursor
//! and the game status, and drives a [`GameDisplay`].
//!
//! Key events arrive one at a time through [`GameController::handle_key`].
//! Submitting a full guess is split in two so the host can await the
//! validator without holding up its own event loop:
//! `handle_key` returns [`KeyOutcome::Submit`] and raises the loading flag,
//! and [`GameController::complete_submission`] applies the verdict.
//! [`GameController::press`] does both for hosts that can simply await.

use crate::display::{GameDisplay, Marker, Outcome};
use crate::error::GameError;
use crate::scoring::{Mark, score_guess};
use crate::timers::{Deferred, TimerQueue};
use crate::word::{WORD_LENGTH, Word};
use crate::word_source::{Validator, WordSource};
use crate::{debug_log, info_log};
use std::time::{Duration, Instant};

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_INVALID_FLASH: Duration = Duration::from_millis(1000);

pub const WIN_TITLE: &str = "You Win!";
pub const LOSS_TITLE: &str = "You Lose!";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// A key press as delivered by the host.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Key {
    Letter(char),
    Enter,
    Backspace,
    Other(String),
}

impl Key {
    /// Map a key name (`"a"`, `"Enter"`, `"Backspace"`, ...) to a key.
    /// Single ASCII letters are uppercased.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Self::Letter(c.to_ascii_uppercase()),
            _ => match name {
                "Enter" => Self::Enter,
                "Backspace" => Self::Backspace,
                other => Self::Other(other.to_string()),
            },
        }
    }
}

/// What the controller did with a key.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum KeyOutcome {
    /// Dropped: game over, validation in flight, or nothing to do.
    Ignored,
    /// Guess, cursor or board changed.
    Applied,
    /// A full guess is waiting on the validator.
    Submit(Word),
}

/// Result of a completed submission.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Submission {
    Rejected,
    Scored([Mark; WORD_LENGTH]),
}

#[derive(Clone, Copy, Debug)]
pub struct GameSettings {
    pub rows: usize,
    pub invalid_flash: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            invalid_flash: DEFAULT_INVALID_FLASH,
        }
    }
}

#[derive(Debug)]
pub struct GameState {
    pub secret: Word,
    pub guess: String,
    /// Most recently filled cell; `None` before the first letter.
    pub cursor: Option<usize>,
    pub status: GameStatus,
    pub loading: bool,
}

pub struct GameController<D: GameDisplay> {
    display: D,
    state: GameState,
    timers: TimerQueue,
    invalid_flash: Duration,
    /// Cells available for guesses: `rows * WORD_LENGTH`.
    cell_limit: usize,
}

impl<D: GameDisplay> GameController<D> {
    /// Fetch the secret word and get the board ready for input.
    pub async fn start<S>(source: &S, display: D, settings: GameSettings) -> Result<Self, GameError>
    where
        S: WordSource + ?Sized,
    {
        let raw = source.secret_word().await?;
        let secret = Word::parse(&raw)?;
        info_log!("Game started with {} rows", settings.rows);
        Ok(Self::new(secret, display, settings))
    }

    /// Controller for a known secret word.
    ///
    /// `settings.rows` decides how many guesses the player gets. The display
    /// must have exactly that many rows of five cells.
    pub fn new(secret: Word, mut display: D, settings: GameSettings) -> Self {
        let cell_limit = settings.rows * WORD_LENGTH;
        debug_assert!(
            display.cell_count() % WORD_LENGTH == 0,
            "display has {} cells, not a multiple of five",
            display.cell_count()
        );
        debug_assert_eq!(
            display.cell_count(),
            cell_limit,
            "display size does not match {} rows",
            settings.rows
        );
        display.set_loading(false);
        Self {
            display,
            state: GameState {
                secret,
                guess: String::new(),
                cursor: None,
                status: GameStatus::Playing,
                loading: false,
            },
            timers: TimerQueue::new(),
            invalid_flash: settings.invalid_flash,
            cell_limit,
        }
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if self.state.status.is_over() || self.state.loading {
            debug_log!(
                "Key {:?} dropped (status={:?}, loading={})",
                key,
                self.state.status,
                self.state.loading
            );
            return KeyOutcome::Ignored;
        }

        match key {
            Key::Letter(c) if c.is_ascii_alphabetic() => self.handle_letter(c.to_ascii_uppercase()),
            Key::Enter => self.begin_submission(),
            Key::Backspace => self.handle_backspace(),
            other => {
                debug_log!("Wrong key: {:?}", other);
                KeyOutcome::Ignored
            }
        }
    }

    /// Apply the validator's verdict on the guess handed out by
    /// [`KeyOutcome::Submit`]. Does nothing if no submission is pending.
    pub fn complete_submission(&mut self, valid: bool) -> Option<Submission> {
        if !self.state.loading {
            return None;
        }
        self.state.loading = false;
        self.display.set_loading(false);

        let cells = self.guess_cells()?;
        if !valid {
            info_log!("'{}' is not a word", self.state.guess);
            for index in cells {
                self.display.add_marker(index, Marker::Invalid);
            }
            self.timers.schedule(self.invalid_flash, Deferred::ClearInvalid);
            return Some(Submission::Rejected);
        }

        let guess = Word::parse(&self.state.guess).ok()?;
        let marks = score_guess(&guess, &self.state.secret);
        for (index, mark) in cells.zip(marks) {
            self.display.add_marker(index, mark.into());
        }
        self.check_game_over(&guess);
        self.state.guess.clear();
        Some(Submission::Scored(marks))
    }

    /// Handle a key, awaiting the validator if it submits a guess.
    pub async fn press<V>(&mut self, key: Key, validator: &V) -> Result<KeyOutcome, GameError>
    where
        V: Validator + ?Sized,
    {
        let outcome = self.handle_key(key);
        if let KeyOutcome::Submit(word) = &outcome {
            let valid = validator.is_valid(&word.to_string()).await?;
            self.complete_submission(valid);
        }
        Ok(outcome)
    }

    /// Run every deferred action that is due at `now`.
    pub fn run_due_timers(&mut self, now: Instant) -> usize {
        let due = self.timers.take_due(now);
        for action in &due {
            match action {
                Deferred::ClearInvalid => self.clear_invalid_markers(),
            }
        }
        due.len()
    }

    fn handle_letter(&mut self, letter: char) -> KeyOutcome {
        let cell_count = self.cell_limit;
        if self.state.cursor.is_some_and(|c| c >= cell_count) {
            return KeyOutcome::Ignored;
        }

        if self.state.guess.len() < WORD_LENGTH {
            let index = match self.state.cursor {
                None => 0,
                Some(c) if c + 1 < cell_count => c + 1,
                // Already on the last cell
                Some(c) => c,
            };
            if index >= cell_count {
                return KeyOutcome::Ignored;
            }
            self.state.guess.push(letter);
            self.state.cursor = Some(index);
            self.display.set_cell_text(index, Some(letter));
        } else {
            // A full, unsubmitted guess keeps replacing its last letter
            self.state.guess.pop();
            self.state.guess.push(letter);
            if let Some(index) = self.state.cursor {
                self.display.set_cell_text(index, Some(letter));
            }
        }
        debug_log!("Guess '{}' cursor={:?}", self.state.guess, self.state.cursor);
        KeyOutcome::Applied
    }

    fn handle_backspace(&mut self) -> KeyOutcome {
        let Some(index) = self.state.cursor else {
            return KeyOutcome::Ignored;
        };
        if self.state.guess.is_empty() || index >= self.cell_limit {
            return KeyOutcome::Ignored;
        }

        self.state.guess.pop();
        self.display.set_cell_text(index, None);
        self.state.cursor = index.checked_sub(1);
        KeyOutcome::Applied
    }

    fn begin_submission(&mut self) -> KeyOutcome {
        if self.state.guess.len() < WORD_LENGTH {
            return KeyOutcome::Ignored;
        }
        let Ok(word) = Word::parse(&self.state.guess) else {
            return KeyOutcome::Ignored;
        };
        self.state.loading = true;
        self.display.set_loading(true);
        debug_log!("Submitting '{}'", word);
        KeyOutcome::Submit(word)
    }

    /// Cells holding the current guess, ending at the cursor.
    fn guess_cells(&self) -> Option<std::ops::RangeInclusive<usize>> {
        let last = self.state.cursor?;
        let first = last.checked_sub(WORD_LENGTH - 1)?;
        Some(first..=last)
    }

    fn check_game_over(&mut self, guess: &Word) {
        if *guess == self.state.secret {
            self.state.status = GameStatus::Won;
            self.display.set_title(WIN_TITLE);
            self.display.set_outcome(Outcome::Won);
            info_log!("Game won");
        } else if self.state.cursor == self.cell_limit.checked_sub(1) {
            self.state.status = GameStatus::Lost;
            self.display.set_title(LOSS_TITLE);
            self.display.set_outcome(Outcome::Lost);
            self.display
                .reveal_answer(&format!("Correct Answer: {}", self.state.secret));
            info_log!("Game lost");
        }
    }

    fn clear_invalid_markers(&mut self) {
        for index in 0..self.display.cell_count() {
            self.display.remove_marker(index, Marker::Invalid);
        }
    }
}
