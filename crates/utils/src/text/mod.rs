//! Small, stateless text helpers used by the command line front-end.

pub mod ctype;
pub mod numeric;
pub mod quote;

pub use ctype::{classify, is_alnum, is_alpha, is_digit, is_space, CharClass};
pub use numeric::{atoi, parse_int, IntErrorKind, ParseIntError};
pub use quote::plan9_quote;

use std::cmp::Ordering;

/// Three-way byte-wise comparison returning -1, 0 or 1
pub fn compare(a: &str, b: &str) -> i32 {
    match a.cmp(b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare() {
        assert_eq!(compare("abc", "abc"), 0);
        assert_eq!(compare("abc", "abd"), -1);
        assert_eq!(compare("b", "abc"), 1);
        assert_eq!(compare("", "a"), -1);
        // Uppercase sorts before lowercase in byte order
        assert_eq!(compare("Z", "a"), -1);
    }
}
