//! Reservation code generation.
//!
//! A code is derived from a SHA-256 digest of the booking identity (a
//! nanosecond timestamp, the guest's last name and the two dates). The hex
//! digest is scanned left to right and split into digit candidates (`1`-`9`)
//! and letter candidates (`a`-`z` without `i` and `o`). Digits and upper-cased
//! letters then alternate in the final code. Even lengths start with a digit,
//! odd lengths with a letter, and there are always `length / 2` digits.
//!
//! When one digest does not yield enough candidates of either class, the
//! input is re-hashed with a round counter and scanning continues on the new
//! digest, so a code is either complete or not produced at all.

use chrono::{DateTime, NaiveDate, Utc};
use sha2::{Digest, Sha256};

use crate::codec::format_date;
use crate::error::{Error, Result};

/// Shortest supported code.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest supported code.
pub const MAX_CODE_LENGTH: usize = 32;

/// Code length used when nothing else is configured.
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Re-hash rounds attempted before giving up.
const MAX_ROUNDS: u32 = 64;

/// Generator for fixed-length reservation codes.
///
/// # Examples
///
/// ```
/// use bookings::CodeGenerator;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let generator = CodeGenerator::new(10).unwrap();
/// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
/// let at = Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap();
///
/// let code = generator.generate("Lovelace", start, end, at).unwrap();
/// assert_eq!(code.len(), 10);
/// assert_eq!(code, generator.generate("Lovelace", start, end, at).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    length: usize,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl CodeGenerator {
    /// Create a generator for codes of `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `length` is outside
    /// [`MIN_CODE_LENGTH`]..=[`MAX_CODE_LENGTH`].
    pub fn new(length: usize) -> Result<Self> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(Error::validation(
                "reservation_code_length",
                format!("must be between {MIN_CODE_LENGTH} and {MAX_CODE_LENGTH}, got {length}"),
            ));
        }
        Ok(Self { length })
    }

    /// Length of the codes this generator produces.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Derive a code from booking identity and a generation timestamp.
    ///
    /// The result depends only on the arguments. Callers must pass a fresh
    /// timestamp per booking; it is the only source of variation between
    /// bookings for the same guest and dates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CodeGeneration`] if the digest stream never supplies
    /// enough candidates.
    pub fn generate(
        &self,
        last_name: &str,
        start: NaiveDate,
        end: NaiveDate,
        timestamp: DateTime<Utc>,
    ) -> Result<String> {
        let seed = format!(
            "{}{}{}{}",
            timestamp.format("%Y%m%d%H%M%S%9f"),
            last_name,
            format_date(start),
            format_date(end)
        );

        let digits_needed = self.length / 2;
        let letters_needed = self.length - digits_needed;
        let mut digits = Vec::with_capacity(digits_needed);
        let mut letters = Vec::with_capacity(letters_needed);

        for round in 0..MAX_ROUNDS {
            let digest = if round == 0 {
                hex_digest(&seed)
            } else {
                hex_digest(&format!("{seed}#{round}"))
            };
            for c in digest.chars() {
                if digits.len() == digits_needed && letters.len() == letters_needed {
                    break;
                }
                if is_digit_candidate(c) {
                    if digits.len() < digits_needed {
                        digits.push(c);
                    }
                } else if is_letter_candidate(c) && letters.len() < letters_needed {
                    letters.push(c.to_ascii_uppercase());
                }
            }
            if digits.len() == digits_needed && letters.len() == letters_needed {
                return Ok(interleave(self.length, &digits, &letters));
            }
        }

        Err(Error::CodeGeneration {
            reason: format!(
                "digest stream exhausted after {MAX_ROUNDS} rounds for length {}",
                self.length
            ),
        })
    }

    /// Derive a code stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`CodeGenerator::generate`].
    pub fn generate_now(&self, last_name: &str, start: NaiveDate, end: NaiveDate) -> Result<String> {
        self.generate(last_name, start, end, Utc::now())
    }
}

fn hex_digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

fn is_digit_candidate(c: char) -> bool {
    matches!(c, '1'..='9')
}

fn is_letter_candidate(c: char) -> bool {
    c.is_ascii_lowercase() && c != 'i' && c != 'o'
}

// Slot i holds a letter when (i + length) is odd.
fn interleave(length: usize, digits: &[char], letters: &[char]) -> String {
    let mut digits = digits.iter();
    let mut letters = letters.iter();
    (0..length)
        .filter_map(|i| {
            if (i + length) % 2 == 1 {
                letters.next()
            } else {
                digits.next()
            }
        })
        .collect()
}
