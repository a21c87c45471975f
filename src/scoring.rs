use crate::word::{WORD_LENGTH, Word};
use std::collections::HashMap;

/// Per-letter result of scoring a guess.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mark {
    /// Letter is in the secret word at this position.
    Right,
    /// Letter is in the secret word elsewhere and not yet accounted for.
    Close,
    /// Letter does not appear (in excess) in the secret word.
    Wrong,
}

impl Mark {
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Right => 'G',
            Self::Close => 'Y',
            Self::Wrong => 'X',
        }
    }
}

/// Remaining count of each letter of the secret word.
pub type LetterCounts = HashMap<char, usize>;

#[must_use]
pub fn letter_counts(secret: &Word) -> LetterCounts {
    let mut counts = LetterCounts::new();
    for &c in secret.letters() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Score `guess` against `secret`.
///
/// Exact matches are taken out of the letter pool before any close match is
/// considered, so a duplicated guess letter is only marked close as many times
/// as it remains unmatched in the secret.
#[must_use]
pub fn score_guess(guess: &Word, secret: &Word) -> [Mark; WORD_LENGTH] {
    let mut counts = letter_counts(secret);
    let mut marks = [Mark::Wrong; WORD_LENGTH];

    // First pass: exact matches
    for i in 0..WORD_LENGTH {
        let c = guess.letter(i);
        if c == secret.letter(i) {
            marks[i] = Mark::Right;
            if let Some(count) = counts.get_mut(&c) {
                *count -= 1;
            }
        }
    }

    // Second pass: close or wrong
    for i in 0..WORD_LENGTH {
        if marks[i] == Mark::Right {
            continue;
        }
        let c = guess.letter(i);
        if !secret.contains(c) {
            continue;
        }
        if let Some(count) = counts.get_mut(&c)
            && *count > 0
        {
            marks[i] = Mark::Close;
            *count -= 1;
        }
    }
    marks
}

#[must_use]
pub fn marks_to_string(marks: &[Mark]) -> String {
    marks.iter().map(|m| m.to_char()).collect()
}
