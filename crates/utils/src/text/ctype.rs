//! ASCII character classification.
//!
//! Deliberately narrower than `char::is_whitespace` and friends: only the
//! four classic whitespace characters and ASCII letters count.

use std::fmt;

pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_alnum(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

/// Coarse class of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Space,
    Alpha,
    Digit,
    Other,
}

pub fn classify(c: char) -> CharClass {
    if is_space(c) {
        CharClass::Space
    } else if is_alpha(c) {
        CharClass::Alpha
    } else if is_digit(c) {
        CharClass::Digit
    } else {
        CharClass::Other
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharClass::Space => "space",
            CharClass::Alpha => "alpha",
            CharClass::Digit => "digit",
            CharClass::Other => "other",
        };
        f.write_str(name)
    }
}
