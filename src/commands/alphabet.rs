use anyhow::Result;
use serde::Serialize;

use crate::alphabet::{Alphabet, CharClass, SIMILAR_CHARS};
use crate::output;

/// What a set of options resolves to before any sampling happens.
#[derive(Debug, Serialize)]
pub struct AlphabetPreview {
    pub classes: Vec<CharClass>,
    pub exclude_similar: bool,
    pub removed: Vec<char>,
    pub chars: String,
    pub size: usize,
    pub capacity: f64,
}

pub fn run(no_uppercase: bool, no_digits: bool, exclude_similar: bool, json: bool) -> Result<()> {
    let mut classes = Vec::new();
    if !no_uppercase {
        classes.push(CharClass::Uppercase);
    }
    if !no_digits {
        classes.push(CharClass::Digits);
    }

    let unfiltered = Alphabet::build(&classes, false)?;
    let alphabet = Alphabet::build(&classes, exclude_similar)?;

    let removed: Vec<char> = if exclude_similar {
        SIMILAR_CHARS
            .iter()
            .copied()
            .filter(|&c| unfiltered.contains(c))
            .collect()
    } else {
        Vec::new()
    };

    let preview = AlphabetPreview {
        classes,
        exclude_similar,
        removed,
        chars: alphabet.chars().iter().collect(),
        size: alphabet.len(),
        capacity: alphabet.capacity(),
    };

    output::alphabet_preview(&preview, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_rejects_empty_selection() {
        assert!(run(true, true, false, true).is_err());
    }

    #[test]
    fn test_preview_accepts_digits_only() {
        assert!(run(true, false, true, true).is_ok());
    }
}
