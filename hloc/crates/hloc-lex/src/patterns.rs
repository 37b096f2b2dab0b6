//! Pattern table for literals that are not lexed character by character.
//!
//! Every pattern is compiled once per process and is anchored, so it only
//! matches at the very start of the text it is applied to. The numeric
//! patterns are tried by the lexer in this order:
//!
//! 1. [`FLOAT`] - `[-]?(([0-9]+|[0-9]+[.][0-9]*|[0-9]*[.][0-9]+)([eE][+-]?[0-9]+))|[-]?([0-9]+[.][0-9]*|[0-9]*[.][0-9]+)`
//! 2. [`DIM_LABELS`] - `[0-9bf]{2,}_[0-9io]{2,}->[0-9bf]{2,}`
//! 3. [`DXD`] - `[0-9]+(x[0-9]+)+`
//! 4. [`PAD`] - `[-]?[0-9]+_[-]?[0-9]+(_[0-9]+)?(x[-]?[0-9]+_[-]?[0-9]+(_[0-9]+)?)*`
//! 5. [`INT`] - `[-]?[0-9]+`
//! 6. [`NEG_INF`] - `-inf`
//! 7. [`NEG_NAN`] - `-nan`
//!
//! Dim labels, dxd and pad accept digit sequences that the int pattern would
//! also accept, so they come first to avoid a shorter match.

use once_cell::sync::Lazy;
use regex::Regex;

fn anchored(pattern: &str) -> Regex {
    // The patterns are constants; failing to compile one is a programming error.
    Regex::new(&format!("^(?:{pattern})")).expect("invalid lexer pattern")
}

/// Floating-point literal with optional sign and exponent.
pub static FLOAT: Lazy<Regex> = Lazy::new(|| {
    anchored(
        r"[-]?(([0-9]+|[0-9]+[.][0-9]*|[0-9]*[.][0-9]+)([eE][+-]?[0-9]+))|[-]?([0-9]+[.][0-9]*|[0-9]*[.][0-9]+)",
    )
});

/// Convolution dimension labels such as `b01f_01io->b01f`.
pub static DIM_LABELS: Lazy<Regex> =
    Lazy::new(|| anchored(r"[0-9bf]{2,}_[0-9io]{2,}->[0-9bf]{2,}"));

/// Window sizes such as `1x2x3`.
pub static DXD: Lazy<Regex> = Lazy::new(|| anchored(r"[0-9]+(x[0-9]+)+"));

/// Padding such as `0_0x1_1` or `-1_2_1`.
pub static PAD: Lazy<Regex> = Lazy::new(|| {
    anchored(r"[-]?[0-9]+_[-]?[0-9]+(_[0-9]+)?(x[-]?[0-9]+_[-]?[0-9]+(_[0-9]+)?)*")
});

/// Signed decimal integer.
pub static INT: Lazy<Regex> = Lazy::new(|| anchored(r"[-]?[0-9]+"));

/// Negative infinity.
pub static NEG_INF: Lazy<Regex> = Lazy::new(|| anchored(r"-inf"));

/// Negative NaN, without its payload.
pub static NEG_NAN: Lazy<Regex> = Lazy::new(|| anchored(r"-nan"));

/// Instruction or computation name following `%`.
pub static NAME: Lazy<Regex> = Lazy::new(|| anchored(r"[a-zA-Z_][a-zA-Z0-9_.-]*"));

/// Double-quoted string with backslash escapes.
pub static QUOTED_STRING: Lazy<Regex> = Lazy::new(|| anchored(r#""([^"\\]|\\.)*""#));

/// Parenthesized NaN payload, decimal or `0x` hex.
pub static NAN_PAYLOAD: Lazy<Regex> =
    Lazy::new(|| anchored(r"\((0x[0-9a-fA-F]+|[0-9]+)\)"));

/// Length of the match of `pattern` at the start of `text`, if any.
#[inline]
pub fn consume(pattern: &Regex, text: &str) -> Option<usize> {
    pattern.find(text).map(|m| m.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_anchored() {
        assert_eq!(consume(&INT, "42"), Some(2));
        assert_eq!(consume(&INT, "x42"), None);
        assert_eq!(consume(&DXD, " 1x2"), None);
    }

    #[test]
    fn test_float() {
        assert_eq!(consume(&FLOAT, "4.2,"), Some(3));
        assert_eq!(consume(&FLOAT, "-.5]"), Some(3));
        assert_eq!(consume(&FLOAT, "1e10 "), Some(4));
        assert_eq!(consume(&FLOAT, "1.5E-3"), Some(6));
        assert_eq!(consume(&FLOAT, "7."), Some(2));
        assert_eq!(consume(&FLOAT, "42"), None);
        assert_eq!(consume(&FLOAT, "1x2"), None);
    }

    #[test]
    fn test_dim_labels() {
        assert_eq!(consume(&DIM_LABELS, "b01f_01io->b01f,"), Some(15));
        assert_eq!(consume(&DIM_LABELS, "01_01->01"), Some(9));
        assert_eq!(consume(&DIM_LABELS, "0_01->01"), None);
    }

    #[test]
    fn test_dxd_and_pad() {
        assert_eq!(consume(&DXD, "1x2x3}"), Some(5));
        assert_eq!(consume(&DXD, "12"), None);
        assert_eq!(consume(&PAD, "0_0x1_1 "), Some(7));
        assert_eq!(consume(&PAD, "-1_2_1"), Some(6));
        assert_eq!(consume(&PAD, "1x2"), None);
    }

    #[test]
    fn test_name_and_string() {
        assert_eq!(consume(&NAME, "param.0-1 "), Some(9));
        assert_eq!(consume(&NAME, "0param"), None);
        assert_eq!(consume(&QUOTED_STRING, r#""a\"b" x"#), Some(6));
        assert_eq!(consume(&QUOTED_STRING, r#""open"#), None);
    }

    #[test]
    fn test_nan_payload() {
        assert_eq!(consume(&NAN_PAYLOAD, "(5)"), Some(3));
        assert_eq!(consume(&NAN_PAYLOAD, "(0x1f)"), Some(6));
        assert_eq!(consume(&NAN_PAYLOAD, "(x)"), None);
    }
}
