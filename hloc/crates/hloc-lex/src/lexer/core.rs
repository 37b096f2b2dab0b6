//! Core lexer implementation.
//!
//! This module contains the main Lexer struct, the character access
//! primitives and the dispatch loop.

use hloc_util::{BufferPos, PrimitiveType, PrimitiveTypeTable, SourceBuffer, TypeNameResolver};

use super::location::LineNoCache;
use crate::token::{TokKind, Token, TokenValue};

/// Result of a sub-lexer: the kind plus its decoded payload.
pub(super) type Lexed = (TokKind, TokenValue);

/// What the cursor currently points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Peeked {
    /// Cursor is at the end of the buffer
    Eof,
    /// Embedded NUL byte
    Invalid,
    /// Any other byte
    Char(u8),
}

/// Lexer for HLO text.
///
/// The lexer owns its source buffer and produces one [`Token`] per call to
/// [`Lexer::lex`]. Primitive type names are recognized through a
/// [`TypeNameResolver`], which defaults to the built-in name table.
///
/// Lexing never fails with a panic or a `Result`: problems are reported as
/// a [`TokKind::Error`] token, after which the caller is expected to stop.
///
/// # Example
///
/// ```
/// use hloc_lex::{Lexer, TokKind};
///
/// let mut lexer = Lexer::new("ROOT %c = f32[] constant(4.2)");
/// assert_eq!(lexer.lex(), TokKind::KwRoot);
/// assert_eq!(lexer.lex(), TokKind::Name);
/// assert_eq!(lexer.str_val(), "c");
/// ```
pub struct Lexer<R: TypeNameResolver = PrimitiveTypeTable> {
    /// The buffer being lexed.
    pub(super) buf: SourceBuffer,

    /// Position of the next byte to be consumed.
    pub(super) cursor: BufferPos,

    /// The most recently lexed token.
    pub(super) token: Token,

    /// Memo of the last line/column query.
    pub(super) line_cache: LineNoCache,

    /// Source of primitive type names.
    pub(super) resolver: R,

    /// Whether `lex` has been called at least once.
    pub(super) started: bool,

    /// Set once the iterator has yielded a terminal token.
    finished: bool,
}

impl Lexer<PrimitiveTypeTable> {
    /// Creates a new lexer over `source` using the built-in type table.
    pub fn new(source: impl Into<SourceBuffer>) -> Self {
        Self::with_resolver(source, PrimitiveTypeTable)
    }
}

impl<R: TypeNameResolver> Lexer<R> {
    /// Creates a new lexer that resolves type names through `resolver`.
    pub fn with_resolver(source: impl Into<SourceBuffer>, resolver: R) -> Self {
        let buf = source.into();
        let cursor = buf.begin();
        Self {
            token: Token::new(TokKind::Eof, cursor.clone(), 0),
            cursor,
            buf,
            line_cache: LineNoCache::default(),
            resolver,
            started: false,
            finished: false,
        }
    }

    /// Advances to the next token and returns its kind.
    ///
    /// Once the end of input is reached every further call returns
    /// [`TokKind::Eof`] again.
    pub fn lex(&mut self) -> TokKind {
        self.started = true;
        self.token = self.lex_token();
        self.token.kind()
    }

    /// Kind of the current token
    #[inline]
    pub fn kind(&self) -> TokKind {
        self.token.kind()
    }

    /// The current token
    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Location of the first byte of the current token
    pub fn loc(&self) -> BufferPos {
        self.token.start().clone()
    }

    /// Text payload of the current token
    #[inline]
    pub fn str_val(&self) -> &str {
        self.token.str_val()
    }

    /// Integer payload of the current token
    #[inline]
    pub fn int64_val(&self) -> i64 {
        self.token.int64_val()
    }

    /// Floating-point payload of the current token
    #[inline]
    pub fn decimal_val(&self) -> f64 {
        self.token.decimal_val()
    }

    /// Primitive type payload of the current token
    #[inline]
    pub fn primitive_type_val(&self) -> PrimitiveType {
        self.token.primitive_type_val()
    }

    /// The buffer being lexed
    #[inline]
    pub fn source(&self) -> &SourceBuffer {
        &self.buf
    }

    /// Byte offset of the next character to be lexed
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.offset()
    }

    /// Looks at the byte under the cursor without consuming it.
    pub(super) fn peek_current_char(&self) -> Peeked {
        match self.cursor.byte() {
            Err(_) => Peeked::Eof,
            // NUL should not appear in the middle of the text.
            Ok(0) => Peeked::Invalid,
            Ok(b) => Peeked::Char(b),
        }
    }

    /// Consumes the byte under the cursor. `Eof` and `Invalid` leave the
    /// cursor where it is.
    pub(super) fn get_next_char(&mut self) -> Peeked {
        let current = self.peek_current_char();
        if let Peeked::Char(_) = current {
            self.cursor.advance(1);
        }
        current
    }

    /// Returns true if the byte under the cursor is `expected`
    #[inline]
    pub(super) fn peek_is(&self, expected: u8) -> bool {
        self.peek_current_char() == Peeked::Char(expected)
    }

    /// Lexes one token starting at the cursor, skipping whitespace and
    /// comments.
    pub(super) fn lex_token(&mut self) -> Token {
        loop {
            let start = self.cursor.offset();
            let (kind, value) = match self.get_next_char() {
                Peeked::Eof => (TokKind::Eof, TokenValue::None),
                Peeked::Invalid => (TokKind::Error, TokenValue::None),
                Peeked::Char(b' ' | b'\t' | b'\n' | b'\r') => continue,
                Peeked::Char(b'-') if self.peek_is(b'>') => {
                    self.cursor.advance(1);
                    (TokKind::Arrow, TokenValue::None)
                },
                Peeked::Char(b'0'..=b'9' | b'-') => self.lex_number_or_pattern(start),
                Peeked::Char(b'=') => (TokKind::Equal, TokenValue::None),
                Peeked::Char(b',') => (TokKind::Comma, TokenValue::None),
                Peeked::Char(b':') => (TokKind::Colon, TokenValue::None),
                Peeked::Char(b'*') => (TokKind::Asterisk, TokenValue::None),
                Peeked::Char(b'[') => (TokKind::Lsquare, TokenValue::None),
                Peeked::Char(b']') => (TokKind::Rsquare, TokenValue::None),
                Peeked::Char(b'{') => (TokKind::Lbrace, TokenValue::None),
                Peeked::Char(b'}') => (TokKind::Rbrace, TokenValue::None),
                Peeked::Char(b'(') => (TokKind::Lparen, TokenValue::None),
                Peeked::Char(b')') => (TokKind::Rparen, TokenValue::None),
                Peeked::Char(b'<') => {
                    if self.peek_is(b'=') {
                        self.cursor.advance(1);
                        (TokKind::Leq, TokenValue::None)
                    } else {
                        (TokKind::Error, TokenValue::None)
                    }
                },
                Peeked::Char(b'%') => self.lex_percent(),
                Peeked::Char(b'/') => match self.peek_current_char() {
                    Peeked::Char(b'*') => {
                        if self.skip_block_comment() {
                            continue;
                        }
                        (TokKind::Error, TokenValue::None)
                    },
                    Peeked::Char(b'/') => {
                        if self.skip_line_comment() {
                            continue;
                        }
                        (TokKind::Error, TokenValue::None)
                    },
                    // A lone '/' is an error.
                    _ => (TokKind::Error, TokenValue::None),
                },
                Peeked::Char(b'.') => self.lex_dots(),
                Peeked::Char(b'"') => self.lex_string(start),
                Peeked::Char(c) if c.is_ascii_alphabetic() || c == b'_' => {
                    self.lex_identifier(start)
                },
                Peeked::Char(c) => {
                    if !c.is_ascii() {
                        self.skip_rest_of_char(start);
                    }
                    (TokKind::Error, TokenValue::None)
                },
            };
            return Token::with_value(kind, self.buf.pos(start), self.cursor.offset(), value);
        }
    }

    /// `...`; the first dot has been consumed.
    fn lex_dots(&mut self) -> Lexed {
        if self.peek_is(b'.') {
            self.cursor.advance(1);
            if self.peek_is(b'.') {
                self.cursor.advance(1);
                return (TokKind::Dots, TokenValue::None);
            }
        }
        (TokKind::Error, TokenValue::None)
    }

    /// Moves the cursor past the whole UTF-8 character starting at `start`.
    fn skip_rest_of_char(&mut self, start: usize) {
        let width = self
            .buf
            .as_str()
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.cursor.set_offset(start + width);
    }
}

impl<R: TypeNameResolver> Iterator for Lexer<R> {
    type Item = Token;

    /// Yields tokens up to and including the first `Eof` or `Error`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.lex().is_terminal() {
            self.finished = true;
        }
        Some(self.token.clone())
    }
}

impl<R: TypeNameResolver> std::fmt::Debug for Lexer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.cursor.offset())
            .field("token", &self.token)
            .finish()
    }
}
