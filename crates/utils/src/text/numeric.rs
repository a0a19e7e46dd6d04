//! Integer parsing with base prefixes.
//!
//! Accepts the same literals as an integer constant in source code: an
//! optional sign, then `0x`/`0X` (hex), `0o`/`0O` (octal), `0b`/`0B`
//! (binary), a bare leading `0` (octal), or plain decimal. Underscores may
//! separate digits, or follow a base prefix.

use std::fmt;

/// Why a string could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntErrorKind {
    Syntax,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIntError {
    kind: IntErrorKind,
    negative: bool,
}

impl ParseIntError {
    fn syntax() -> Self {
        Self {
            kind: IntErrorKind::Syntax,
            negative: false,
        }
    }

    fn range(negative: bool) -> Self {
        Self {
            kind: IntErrorKind::Range,
            negative,
        }
    }

    pub fn kind(&self) -> IntErrorKind {
        self.kind
    }

    /// Whether an out-of-range value was below `i64::MIN`
    pub fn is_negative(&self) -> bool {
        self.negative
    }
}

impl fmt::Display for ParseIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IntErrorKind::Syntax => f.write_str("invalid syntax"),
            IntErrorKind::Range => f.write_str("value out of range"),
        }
    }
}

impl std::error::Error for ParseIntError {}

/// Parse `s` as a signed 64-bit integer, detecting the base from its prefix.
pub fn parse_int(s: &str) -> Result<i64, ParseIntError> {
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if unsigned.is_empty() {
        return Err(ParseIntError::syntax());
    }

    let (radix, digits) = split_radix(unsigned);
    if unsigned.contains('_') && !underscores_ok(unsigned) {
        return Err(ParseIntError::syntax());
    }

    let mut value: u64 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix).ok_or_else(ParseIntError::syntax)?;
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(ParseIntError::range(negative))?;
    }

    let signed = if negative {
        -i128::from(value)
    } else {
        i128::from(value)
    };
    i64::try_from(signed).map_err(|_| ParseIntError::range(negative))
}

/// Lenient parse: malformed input yields 0 and out-of-range input saturates.
pub fn atoi(s: &str) -> i64 {
    match parse_int(s) {
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::Syntax => 0,
            IntErrorKind::Range if e.is_negative() => i64::MIN,
            IntErrorKind::Range => i64::MAX,
        },
    }
}

fn split_radix(s: &str) -> (u32, &str) {
    let bytes = s.as_bytes();
    if bytes[0] != b'0' {
        return (10, s);
    }
    if bytes.len() >= 3 {
        match bytes[1].to_ascii_lowercase() {
            b'x' => return (16, &s[2..]),
            b'o' => return (8, &s[2..]),
            b'b' => return (2, &s[2..]),
            _ => {}
        }
    }
    // A lone "0" leaves no digits, which parses as zero
    (8, &s[1..])
}

/// Every underscore must sit between two digits, or right after a base prefix.
fn underscores_ok(s: &str) -> bool {
    #[derive(PartialEq)]
    enum Saw {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let bytes = s.as_bytes();
    let mut saw = Saw::Start;
    let mut i = 0;
    let mut hex = false;

    if bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'b' | b'o' | b'x')
    {
        i = 2;
        saw = Saw::Digit;
        hex = bytes[1].to_ascii_lowercase() == b'x';
    }

    for &b in &bytes[i..] {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            saw = Saw::Digit;
            continue;
        }
        if b == b'_' {
            if saw != Saw::Digit {
                return false;
            }
            saw = Saw::Underscore;
            continue;
        }
        if saw == Saw::Underscore {
            return false;
        }
        saw = Saw::Other;
    }
    saw != Saw::Underscore
}
