//! Identifier and keyword lexing.
//!
//! An identifier run can turn into several token kinds depending on what
//! follows it and what it spells:
//!
//! ```text
//! foo:        -> Name("foo")
//! dimensions= -> AttributeName("dimensions")
//! f32         -> PrimitiveType(F32)
//! nan, nan(5) -> Decimal(NaN)
//! ENTRY       -> KwEntry
//! b01f_01io->b01f -> DimLabels
//! copy        -> Ident("copy")
//! ```

use hloc_util::{PrimitiveType, TypeNameResolver};

use super::core::{Lexed, Peeked};
use super::number::{nan_with_sign_and_payload, QUIET_NAN_PAYLOAD};
use crate::patterns::{self, consume};
use crate::token::{keyword_from_ident, TokKind, TokenValue};
use crate::Lexer;

/// Returns true for bytes that may continue an identifier: `[A-Za-z0-9._-]`.
#[inline]
pub fn is_identifier_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'.' | b'_' | b'-')
}

impl<R: TypeNameResolver> Lexer<R> {
    /// Lexes an identifier-like token. The first character has already been
    /// consumed.
    pub(super) fn lex_identifier(&mut self, start: usize) -> Lexed {
        while let Peeked::Char(c) = self.peek_current_char() {
            if !is_identifier_char(c) {
                break;
            }
            self.cursor.advance(1);
        }

        let buf = self.buf.clone();
        let identifier = buf.as_str().get(start..self.cursor.offset()).unwrap_or("");

        if self.peek_is(b':') {
            self.cursor.advance(1);
            return (TokKind::Name, TokenValue::Str(identifier.to_string()));
        }

        if self.peek_is(b'=') {
            self.cursor.advance(1);
            return (TokKind::AttributeName, TokenValue::Str(identifier.to_string()));
        }

        // Primitive type names are reserved words, except `tuple` whose type
        // is written with nested parentheses.
        if self.resolver.is_primitive_type_name(identifier) {
            match self.resolver.resolve(identifier) {
                Ok(PrimitiveType::Tuple) => {},
                Ok(ty) => return (TokKind::PrimitiveType, TokenValue::PrimitiveType(ty)),
                Err(err) => tracing::debug!(identifier, error = %err, "type name did not resolve"),
            }
        }

        if identifier == "nan" {
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
                TokenValue::Decimal(nan_with_sign_and_payload(false, payload)),
            );
        }

        if let Some(keyword) = keyword_from_ident(identifier) {
            return (keyword, TokenValue::None);
        }

        // Dim labels such as `bf01_oi01->bf01` start with a letter and
        // contain `>`, so they only show up here.
        let rest = buf.as_str().get(start..).unwrap_or("");
        if let Some(len) = consume(&patterns::DIM_LABELS, rest) {
            self.cursor.set_offset(start + len);
            return (TokKind::DimLabels, TokenValue::Str(rest[..len].to_string()));
        }

        (TokKind::Ident, TokenValue::Str(identifier.to_string()))
    }

    /// Lexes a name after a `%` character.
    pub(super) fn lex_percent(&mut self) -> Lexed {
        let buf = self.buf.clone();
        let offset = self.cursor.offset();
        let text = buf.as_str().get(offset..).unwrap_or("");

        match consume(&patterns::NAME, text) {
            Some(len) => {
                self.cursor.set_offset(offset + len);
                (TokKind::Name, TokenValue::Str(text[..len].to_string()))
            },
            None => (TokKind::Error, TokenValue::None),
        }
    }
}
