//! Display abstraction for the game board.
//!
//! The controller never renders anything itself. It drives a [`GameDisplay`]:
//! a fixed sequence of letter cells, each carrying a set of markers, plus a
//! loading indicator, a title with an outcome style and an answer area.
//!
//! [`BoardDisplay`] keeps all of that in memory. The terminal front end
//! renders from it and the tests inspect it directly.

use crate::scoring::Mark;
use crate::word::WORD_LENGTH;
use std::collections::BTreeSet;

pub const DEFAULT_TITLE: &str = "WORDLE";

/// Visual state marker on a cell. Markers are not mutually exclusive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Marker {
    Right,
    Close,
    Wrong,
    Invalid,
}

impl From<Mark> for Marker {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Right => Self::Right,
            Mark::Close => Self::Close,
            Mark::Wrong => Self::Wrong,
        }
    }
}

/// Style marker for the title area once the game is over.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Won,
    Lost,
}

pub trait GameDisplay {
    fn cell_count(&self) -> usize;
    fn cell_text(&self, index: usize) -> Option<char>;
    fn set_cell_text(&mut self, index: usize, letter: Option<char>);
    fn add_marker(&mut self, index: usize, marker: Marker);
    fn remove_marker(&mut self, index: usize, marker: Marker);
    fn set_loading(&mut self, visible: bool);
    fn set_title(&mut self, text: &str);
    fn set_outcome(&mut self, outcome: Outcome);
    fn reveal_answer(&mut self, text: &str);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub markers: BTreeSet<Marker>,
}

impl Cell {
    #[must_use]
    pub fn has(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

#[derive(Debug)]
pub struct BoardDisplay {
    cells: Vec<Cell>,
    loading: bool,
    title: String,
    outcome: Option<Outcome>,
    answer: Option<String>,
}

impl BoardDisplay {
    /// A board of `rows` rows of five cells. The loading indicator starts
    /// visible, as it stays until the secret word has arrived.
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            cells: vec![Cell::default(); rows * WORD_LENGTH],
            loading: true,
            title: DEFAULT_TITLE.to_string(),
            outcome: None,
            answer: None,
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(WORD_LENGTH)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// Row text as a plain string, blanks as `_`.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .iter()
            .skip(row * WORD_LENGTH)
            .take(WORD_LENGTH)
            .map(|cell| cell.letter.unwrap_or('_'))
            .collect()
    }
}

impl GameDisplay for BoardDisplay {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell_text(&self, index: usize) -> Option<char> {
        self.cells.get(index).and_then(|cell| cell.letter)
    }

    fn set_cell_text(&mut self, index: usize, letter: Option<char>) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.letter = letter;
        }
    }

    fn add_marker(&mut self, index: usize, marker: Marker) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.markers.insert(marker);
        }
    }

    fn remove_marker(&mut self, index: usize, marker: Marker) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.markers.remove(&marker);
        }
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }

    fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    fn reveal_answer(&mut self, text: &str) {
        self.answer = Some(text.to_string());
    }
}
