use crate::error::GameError;
use crate::word::Word;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a newline-delimited word list, keeping only five-letter words.
pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(|line| Word::parse(line).ok()).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, GameError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Ok(word) = Word::parse(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}
