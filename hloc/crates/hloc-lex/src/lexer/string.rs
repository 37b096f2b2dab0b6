//! String literal lexing.

use hloc_util::TypeNameResolver;

use super::core::Lexed;
use crate::escape::c_unescape;
use crate::patterns::{self, consume};
use crate::token::{TokKind, TokenValue};
use crate::Lexer;

impl<R: TypeNameResolver> Lexer<R> {
    /// Lexes a quoted string with C escapes. The opening quote has already
    /// been consumed; the unescaped contents become the token payload.
    pub(super) fn lex_string(&mut self, start: usize) -> Lexed {
        let buf = self.buf.clone();
        let text = buf.as_str().get(start..).unwrap_or("");

        let Some(len) = consume(&patterns::QUOTED_STRING, text) else {
            tracing::debug!(offset = start, "unterminated string literal");
            return (TokKind::Error, TokenValue::None);
        };
        self.cursor.set_offset(start + len);

        let raw = &text[1..len - 1];
        match c_unescape(raw) {
            Ok(value) => (TokKind::String, TokenValue::Str(value)),
            Err(err) => {
                tracing::error!(raw, error = %err, "failed unescaping string");
                (TokKind::Error, TokenValue::None)
            },
        }
    }
}
