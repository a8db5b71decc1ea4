// Guess grammar and feedback rendering.
//
// A guess is exactly four characters, each one of '1'..='6'. Repeated
// digits are accepted even though the rules text says digits are unique;
// the server decides what to do with them.

use std::fmt;

use crate::protocol::GuessFeedback;

pub const CODE_LENGTH: usize = 4;

/// True iff `input` is four characters from `1`-`6`.
pub fn is_valid_guess(input: &str) -> bool {
    input.chars().count() == CODE_LENGTH && input.chars().all(|c| ('1'..='6').contains(&c))
}

/// A validated guess, stored as its four digit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess([u8; CODE_LENGTH]);

impl Guess {
    /// Validate and convert a line of input. Returns `None` for anything
    /// [`is_valid_guess`] rejects.
    pub fn parse(input: &str) -> Option<Self> {
        if !is_valid_guess(input) {
            return None;
        }
        let mut digits = [0u8; CODE_LENGTH];
        for (slot, c) in digits.iter_mut().zip(input.bytes()) {
            *slot = c - b'0';
        }
        Some(Guess(digits))
    }

    pub fn digits(&self) -> &[u8; CODE_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl GuessFeedback {
    /// `black` B's followed by `white` W's, e.g. (2, 1) -> "BBW".
    pub fn pegs(&self) -> String {
        let mut out = "B".repeat(self.black as usize);
        out.push_str(&"W".repeat(self.white as usize));
        out
    }

    /// Every digit in the right place.
    pub fn is_solved(&self) -> bool {
        self.black as usize == CODE_LENGTH
    }
}
