use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Error, Result};
use crate::sampler::KEY_CHARS;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Characters that are easy to misread on paper or over the phone
/// (0/O, 1/I/L, 5/S, 2/Z). Removed when `exclude_similar` is set.
pub const SIMILAR_CHARS: [char; 9] = ['O', '0', 'I', '1', 'L', 'S', '5', 'Z', '2'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CharClass {
    Uppercase,
    Digits,
}

impl CharClass {
    fn chars(self) -> &'static str {
        match self {
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digits => DIGITS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CharClass::Uppercase => "uppercase (A-Z)",
            CharClass::Digits => "digits (0-9)",
        }
    }
}

/// The filtered set of characters eligible for sampling.
/// Invariant: never empty once constructed.
#[derive(Debug, Clone)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Assemble an alphabet from character classes, in declaration order,
    /// optionally minus the visually-similar set.
    pub fn build(classes: &[CharClass], exclude_similar: bool) -> Result<Self> {
        let mut chars: Vec<char> = classes.iter().flat_map(|c| c.chars().chars()).collect();

        if exclude_similar {
            chars.retain(|c| !SIMILAR_CHARS.contains(c));
        }

        Self::from_chars(chars)
    }

    /// Use an explicit character set instead of the named classes.
    pub fn from_chars(chars: Vec<char>) -> Result<Self> {
        if chars.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Number of distinct keys this alphabet can produce. Reporting only;
    /// overflows a u128 for realistic alphabets, so it stays an f64.
    pub fn capacity(&self) -> f64 {
        (self.chars.len() as f64).powi(KEY_CHARS as i32)
    }
}
