//! Number and structural pattern lexing.
//!
//! Anything starting with a digit or `-` is tried against the numeric
//! patterns in a fixed order: float, dim labels, dxd, pad, int, `-inf`,
//! `-nan`. The first pattern that matches at the token start wins.

use hloc_util::TypeNameResolver;

use super::core::Lexed;
use crate::patterns::{self, consume};
use crate::token::{TokKind, TokenValue};
use crate::Lexer;

/// Mask of the payload (mantissa) bits of an `f64`.
pub const NAN_PAYLOAD_MASK: u64 = (1 << 52) - 1;

/// Payload of the quiet NaN used when none is written.
pub const QUIET_NAN_PAYLOAD: u64 = 1 << 51;

const EXPONENT_BITS: u64 = 0x7ff0_0000_0000_0000;

/// Builds a NaN with the given sign and mantissa payload.
///
/// Payload bits outside [`NAN_PAYLOAD_MASK`] are dropped.
///
/// # Examples
///
/// ```
/// use hloc_lex::{nan_with_sign_and_payload, NAN_PAYLOAD_MASK};
///
/// let nan = nan_with_sign_and_payload(true, 5);
/// assert!(nan.is_nan());
/// assert!(nan.is_sign_negative());
/// assert_eq!(nan.to_bits() & NAN_PAYLOAD_MASK, 5);
/// ```
pub fn nan_with_sign_and_payload(negative: bool, payload: u64) -> f64 {
    let sign = if negative { 1u64 << 63 } else { 0 };
    f64::from_bits(sign | EXPONENT_BITS | (payload & NAN_PAYLOAD_MASK))
}

/// Parses the digits of a NaN payload, `0x`-prefixed hex or decimal.
fn parse_payload(digits: &str) -> Option<u64> {
    match digits.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => digits.parse().ok(),
    }
}

impl<R: TypeNameResolver> Lexer<R> {
    /// Lexes integer and floating-point values, `-inf`, `-nan` and the
    /// dim labels, dxd and pad patterns. The first character has already
    /// been consumed.
    pub(super) fn lex_number_or_pattern(&mut self, start: usize) -> Lexed {
        let buf = self.buf.clone();
        let text = buf.as_str().get(start..).unwrap_or("");

        if let Some(len) = consume(&patterns::FLOAT, text) {
            self.cursor.set_offset(start + len);
            return match text[..len].parse::<f64>() {
                Ok(value) => (TokKind::Decimal, TokenValue::Decimal(value)),
                Err(err) => {
                    tracing::error!(literal = &text[..len], error = %err, "invalid float literal");
                    (TokKind::Error, TokenValue::None)
                },
            };
        }

        for (pattern, kind) in [
            (&patterns::DIM_LABELS, TokKind::DimLabels),
            (&patterns::DXD, TokKind::DxD),
            (&patterns::PAD, TokKind::Pad),
        ] {
            if let Some(len) = consume(pattern, text) {
                self.cursor.set_offset(start + len);
                return (kind, TokenValue::Str(text[..len].to_string()));
            }
        }

        if let Some(len) = consume(&patterns::INT, text) {
            self.cursor.set_offset(start + len);
            return lex_int(&text[..len]);
        }

        if let Some(len) = consume(&patterns::NEG_INF, text) {
            self.cursor.set_offset(start + len);
            return (TokKind::NegInf, TokenValue::None);
        }

        if let Some(len) = consume(&patterns::NEG_NAN, text) {
            self.cursor.set_offset(start + len);
            let payload = if self.peek_is(b'(') {
                match self.lex_nan_payload() {
                    Some(payload) => payload,
                    None => return (TokKind::Error, TokenValue::None),
                }
            } else {
                QUIET_NAN_PAYLOAD
            };
            return (
                TokKind::Decimal,
                TokenValue::Decimal(nan_with_sign_and_payload(true, payload)),
            );
        }

        (TokKind::Error, TokenValue::None)
    }

    /// Lexes a parenthesized NaN payload at the cursor.
    ///
    /// The payload must be non-zero and fit in the mantissa; otherwise
    /// `None` is returned. The cursor moves past the parentheses whenever
    /// they are well formed.
    pub(super) fn lex_nan_payload(&mut self) -> Option<u64> {
        let buf = self.buf.clone();
        let offset = self.cursor.offset();
        let text = buf.as_str().get(offset..).unwrap_or("");

        let Some(len) = consume(&patterns::NAN_PAYLOAD, text) else {
            tracing::debug!(offset, "malformed NaN payload");
            return None;
        };
        self.cursor.set_offset(offset + len);

        let digits = &text[1..len - 1];
        match parse_payload(digits) {
            Some(payload) if (1..=NAN_PAYLOAD_MASK).contains(&payload) => Some(payload),
            _ => {
                tracing::debug!(offset, payload = digits, "NaN payload out of range");
                None
            },
        }
    }
}

/// Decodes an integer literal. Literals above `i64::MAX` that still fit in
/// 64 bits keep their bit pattern.
fn lex_int(literal: &str) -> Lexed {
    if let Ok(value) = literal.parse::<i64>() {
        return (TokKind::Int, TokenValue::Int(value));
    }
    match literal.parse::<u64>() {
        Ok(value) => (TokKind::Int, TokenValue::Int(value as i64)),
        Err(err) => {
            tracing::error!(literal, error = %err, "integer literal out of range");
            (TokKind::Error, TokenValue::None)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> Lexer {
        let mut lexer = Lexer::new(source);
        lexer.lex();
        lexer
    }

    #[test]
    fn test_int() {
        let lexer = lex_one("42");
        assert_eq!(lexer.kind(), TokKind::Int);
        assert_eq!(lexer.int64_val(), 42);

        let lexer = lex_one("-7,");
        assert_eq!(lexer.kind(), TokKind::Int);
        assert_eq!(lexer.int64_val(), -7);
        assert_eq!(lexer.position(), 2);
    }

    #[test]
    fn test_int_u64_wraps() {
        let lexer = lex_one("18446744073709551615");
        assert_eq!(lexer.kind(), TokKind::Int);
        assert_eq!(lexer.int64_val(), -1);
    }

    #[test]
    fn test_int_too_large() {
        assert_eq!(lex_one("18446744073709551616").kind(), TokKind::Error);
        assert_eq!(lex_one("-9223372036854775809").kind(), TokKind::Error);
    }

    #[test]
    fn test_float() {
        let lexer = lex_one("4.2");
        assert_eq!(lexer.kind(), TokKind::Decimal);
        assert_eq!(lexer.decimal_val(), 4.2);

        assert_eq!(lex_one("1e3").decimal_val(), 1000.0);
        assert_eq!(lex_one("-.5").decimal_val(), -0.5);
        assert_eq!(lex_one("7.").decimal_val(), 7.0);
    }

    #[test]
    fn test_patterns() {
        let lexer = lex_one("1x2x3");
        assert_eq!(lexer.kind(), TokKind::DxD);
        assert_eq!(lexer.str_val(), "1x2x3");

        let lexer = lex_one("0_0x1_1");
        assert_eq!(lexer.kind(), TokKind::Pad);
        assert_eq!(lexer.str_val(), "0_0x1_1");

        let lexer = lex_one("01_01->01");
        assert_eq!(lexer.kind(), TokKind::DimLabels);
        assert_eq!(lexer.str_val(), "01_01->01");
    }

    #[test]
    fn test_neg_inf() {
        let lexer = lex_one("-inf");
        assert_eq!(lexer.kind(), TokKind::NegInf);
        assert_eq!(lexer.position(), 4);
    }

    #[test]
    fn test_neg_nan() {
        let lexer = lex_one("-nan");
        assert_eq!(lexer.kind(), TokKind::Decimal);
        let bits = lexer.decimal_val().to_bits();
        assert!(lexer.decimal_val().is_nan());
        assert!(lexer.decimal_val().is_sign_negative());
        assert_eq!(bits & NAN_PAYLOAD_MASK, QUIET_NAN_PAYLOAD);
    }

    #[test]
    fn test_neg_nan_with_payload() {
        let lexer = lex_one("-nan(0x1f)");
        assert_eq!(lexer.kind(), TokKind::Decimal);
        assert_eq!(lexer.decimal_val().to_bits() & NAN_PAYLOAD_MASK, 0x1f);
        assert_eq!(lexer.position(), 10);
    }

    #[test]
    fn test_nan_payload_out_of_range() {
        assert_eq!(lex_one("-nan(0)").kind(), TokKind::Error);
        assert_eq!(lex_one("-nan(0x10000000000000)").kind(), TokKind::Error);
        assert_eq!(lex_one("-nan(").kind(), TokKind::Error);
    }

    #[test]
    fn test_lone_minus() {
        assert_eq!(lex_one("-").kind(), TokKind::Error);
        assert_eq!(lex_one("-x").kind(), TokKind::Error);
    }

    #[test]
    fn test_nan_helper() {
        let nan = nan_with_sign_and_payload(false, QUIET_NAN_PAYLOAD);
        assert!(nan.is_nan());
        assert!(nan.is_sign_positive());
        assert_eq!(nan.to_bits(), 0x7ff8_0000_0000_0000);
    }
}
