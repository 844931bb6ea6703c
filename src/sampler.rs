use std::collections::HashSet;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};

pub const GROUP_COUNT: usize = 5;
pub const GROUP_LEN: usize = 5;
pub const SEPARATOR: char = '-';

/// Characters drawn per key, excluding separators.
pub const KEY_CHARS: usize = GROUP_COUNT * GROUP_LEN;

/// Full formatted key length: 5 groups of 5 plus 4 separators.
pub const KEY_LEN: usize = KEY_CHARS + GROUP_COUNT - 1;

/// Accepted batch size for one generation run.
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 10_000;

/// How many candidate draws to spend per key before giving up.
/// A policy knob, not a derived value; override via `[sampler] max_retries`
/// in `keymint.toml` when an intentionally tiny alphabet needs more draws.
pub const DEFAULT_MAX_RETRIES: u32 = 1000;

/// Draws formatted keys uniformly at random from an alphabet, rejecting
/// any candidate already issued in the current session.
pub struct Sampler<'a> {
    alphabet: &'a Alphabet,
    max_retries: u32,
}

impl<'a> Sampler<'a> {
    pub fn new(alphabet: &'a Alphabet, max_retries: u32) -> Self {
        Self {
            alphabet,
            max_retries,
        }
    }

    /// One candidate key: 5 groups of 5 characters, each drawn
    /// independently from the alphabet by a CSPRNG.
    fn draw(&self) -> String {
        let groups: Vec<String> = (0..GROUP_COUNT)
            .map(|_| nanoid::nanoid!(GROUP_LEN, self.alphabet.chars()))
            .collect();
        groups.join("-")
    }

    /// Sample one key not present in `issued`, retrying up to the bound.
    /// The accepted key is inserted into `issued` before returning.
    pub fn sample_one(&self, issued: &mut HashSet<String>) -> Result<String> {
        for _ in 0..self.max_retries {
            let candidate = self.draw();
            if !issued.contains(&candidate) {
                issued.insert(candidate.clone());
                return Ok(candidate);
            }
        }
        Err(Error::RetriesExhausted {
            attempts: self.max_retries,
        })
    }

    /// Sample `count` keys, all absent from `issued` and from each other.
    /// On exhaustion the whole batch is discarded; callers never see a
    /// partial result.
    pub fn sample_into(&self, count: usize, issued: &mut HashSet<String>) -> Result<Vec<String>> {
        let mut keys = Vec::with_capacity(count);
        for _ in 0..count {
            keys.push(self.sample_one(issued)?);
        }
        Ok(keys)
    }

    /// Sample a batch against a fresh session set owned by this call.
    /// Previous runs place no constraint on the result.
    pub fn sample_batch(&self, count: usize) -> Result<Vec<String>> {
        let mut issued = HashSet::with_capacity(count);
        self.sample_into(count, &mut issued)
    }
}

/// Whether `key` has the exact issued shape: 5 groups of 5 uppercase
/// alphanumerics joined by `-`.
pub fn is_well_formed(key: &str) -> bool {
    if key.len() != KEY_LEN {
        return false;
    }
    for (i, b) in key.bytes().enumerate() {
        if i % (GROUP_LEN + 1) == GROUP_LEN {
            if b != SEPARATOR as u8 {
                return false;
            }
        } else if !b.is_ascii_uppercase() && !b.is_ascii_digit() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{Alphabet, CharClass, SIMILAR_CHARS};

    fn full_alphabet() -> Alphabet {
        Alphabet::build(&[CharClass::Uppercase, CharClass::Digits], false).unwrap()
    }

    #[test]
    fn test_batch_is_exact_count_and_distinct() {
        let alphabet = full_alphabet();
        let sampler = Sampler::new(&alphabet, DEFAULT_MAX_RETRIES);

        let keys = sampler.sample_batch(500).unwrap();
        assert_eq!(keys.len(), 500);

        let distinct: HashSet<&String> = keys.iter().collect();
        assert_eq!(distinct.len(), 500);
    }

    #[test]
    fn test_keys_are_well_formed_and_alphabet_only() {
        let alphabet = full_alphabet();
        let sampler = Sampler::new(&alphabet, DEFAULT_MAX_RETRIES);

        for key in sampler.sample_batch(50).unwrap() {
            assert!(is_well_formed(&key), "malformed key: {key}");
            for c in key.chars().filter(|&c| c != SEPARATOR) {
                assert!(alphabet.contains(c), "{c} not in alphabet");
            }
        }
    }

    #[test]
    fn test_key_shape() {
        let alphabet = full_alphabet();
        let sampler = Sampler::new(&alphabet, DEFAULT_MAX_RETRIES);

        let key = &sampler.sample_batch(1).unwrap()[0];
        assert_eq!(key.len(), 29);
        let groups: Vec<&str> = key.split(SEPARATOR).collect();
        assert_eq!(groups.len(), 5);
        assert!(groups.iter().all(|g| g.len() == 5));
    }

    #[test]
    fn test_excluded_characters_never_appear() {
        let alphabet =
            Alphabet::build(&[CharClass::Uppercase, CharClass::Digits], true).unwrap();
        let sampler = Sampler::new(&alphabet, DEFAULT_MAX_RETRIES);

        for key in sampler.sample_batch(100).unwrap() {
            for c in SIMILAR_CHARS {
                assert!(!key.contains(c), "excluded {c} appeared in {key}");
            }
        }
    }

    #[test]
    fn test_digits_only_excluded_uses_six_symbols() {
        let alphabet = Alphabet::build(&[CharClass::Digits], true).unwrap();
        let sampler = Sampler::new(&alphabet, DEFAULT_MAX_RETRIES);

        let key = &sampler.sample_batch(1).unwrap()[0];
        assert_eq!(key.len(), 29);
        assert!(key
            .chars()
            .all(|c| c == SEPARATOR || "346789".contains(c)));
    }

    #[test]
    fn test_exhaustion_on_tiny_alphabet() {
        // One character admits exactly one key; the second request must
        // burn through the bound and fail, discarding the batch.
        let alphabet = Alphabet::from_chars(vec!['A']).unwrap();
        let sampler = Sampler::new(&alphabet, 50);

        let err = sampler.sample_batch(2).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::RetriesExhausted { attempts: 50 }
        ));
    }

    #[test]
    fn test_fresh_session_is_unconstrained_by_previous_runs() {
        let alphabet = Alphabet::from_chars(vec!['A']).unwrap();
        let sampler = Sampler::new(&alphabet, 10);

        let first = sampler.sample_batch(1).unwrap();
        let second = sampler.sample_batch(1).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0], "AAAAA-AAAAA-AAAAA-AAAAA-AAAAA");
    }

    #[test]
    fn test_session_set_blocks_already_issued_keys() {
        let alphabet = Alphabet::from_chars(vec!['A']).unwrap();
        let sampler = Sampler::new(&alphabet, 10);

        let mut issued = HashSet::new();
        issued.insert("AAAAA-AAAAA-AAAAA-AAAAA-AAAAA".to_string());
        assert!(sampler.sample_one(&mut issued).is_err());
    }

    #[test]
    fn test_is_well_formed_rejects_bad_shapes() {
        assert!(is_well_formed("ABCDE-FGHJK-MNPQR-TUVWX-Y3467"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("ABCDE-FGHJK-MNPQR-TUVWX-Y346")); // short
        assert!(!is_well_formed("ABCDE-FGHJK-MNPQR-TUVWX-Y34678")); // long
        assert!(!is_well_formed("ABCDEF-GHJK-MNPQR-TUVWX-Y3467")); // separator misplaced
        assert!(!is_well_formed("abcde-fghjk-mnpqr-tuvwx-y3467")); // lowercase
        assert!(!is_well_formed("ABCDE FGHJK MNPQR TUVWX Y3467")); // wrong separator
    }
}
