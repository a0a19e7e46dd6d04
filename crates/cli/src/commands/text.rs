use exitkit_core::{Error, IoResultExt, Result};
use exitkit_utils::text;
use std::io::Write;

pub(crate) const STDOUT: &str = "write to stdout";

pub fn quote(out: &mut impl Write, args: &[String]) -> Result<()> {
    let quoted: Vec<String> = args.iter().map(|arg| text::plan9_quote(arg)).collect();
    writeln!(out, "{}", quoted.join(" ")).fs_context("", STDOUT)?;
    Ok(())
}

pub fn atoi(out: &mut impl Write, values: &[String], lenient: bool) -> Result<()> {
    for value in values {
        let n = if lenient {
            text::atoi(value)
        } else {
            text::parse_int(value).map_err(|e| Error::invalid_number(value, e.to_string()))?
        };
        writeln!(out, "{n}").fs_context("", STDOUT)?;
    }
    Ok(())
}

pub fn compare(out: &mut impl Write, a: &str, b: &str) -> Result<()> {
    writeln!(out, "{}", text::compare(a, b)).fs_context("", STDOUT)?;
    Ok(())
}

pub fn classify(out: &mut impl Write, input: &str) -> Result<()> {
    for c in input.chars() {
        writeln!(out, "{}", text::classify(c)).fs_context("", STDOUT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_quote_joins_words() {
        let args = vec!["plain".to_string(), "two words".to_string(), String::new()];
        assert_eq!(run(|out| quote(out, &args)), "plain 'two words' ''\n");
    }

    #[test]
    fn test_atoi_strict_and_lenient() {
        let values = vec!["0x1f".to_string(), "-010".to_string()];
        assert_eq!(run(|out| atoi(out, &values, false)), "31\n-8\n");

        let bad = vec!["12".to_string(), "nope".to_string()];
        let mut out = Vec::new();
        let err = atoi(&mut out, &bad, false).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { .. }));
        // Values before the bad one were already printed
        assert_eq!(String::from_utf8(out).unwrap(), "12\n");

        assert_eq!(run(|out| atoi(out, &bad, true)), "12\n0\n");
    }

    #[test]
    fn test_compare_and_classify() {
        assert_eq!(run(|out| compare(out, "b", "a")), "1\n");
        assert_eq!(run(|out| classify(out, "x 9")), "alpha\nspace\ndigit\n");
    }
}
