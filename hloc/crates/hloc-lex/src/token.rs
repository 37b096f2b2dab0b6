//! Token type definitions.
//!
//! A lexing step produces a [`Token`]: a [`TokKind`], the position where the
//! token starts, and a decoded [`TokenValue`] whose active variant depends on
//! the kind.

use std::fmt;

use hloc_util::{BufferPos, PrimitiveType};

/// The closed set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokKind {
    // Markers
    /// End of input
    Eof,
    /// No valid token could be produced
    Error,

    // Tokens with no info
    /// `=`
    Equal,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `*`
    Asterisk,
    /// `[`
    Lsquare,
    /// `]`
    Rsquare,
    /// `{`
    Lbrace,
    /// `}`
    Rbrace,
    /// `(`
    Lparen,
    /// `)`
    Rparen,
    /// `...`
    Dots,
    /// `->`
    Arrow,
    /// `<=`
    Leq,

    // Keywords
    /// `HloModule`
    KwHloModule,
    /// `ENTRY`
    KwEntry,
    /// `ROOT`
    KwRoot,
    /// `true`
    KwTrue,
    /// `false`
    KwFalse,
    /// `maximal`
    KwMaximal,
    /// `replicated`
    KwReplicated,
    /// `manual`
    KwManual,
    /// `last_tile_dim_replicate`
    KwLastTileDimReplicate,
    /// `inf`
    KwInf,
    /// `-inf`
    NegInf,

    // Typed tokens
    /// `f32`, `pred`, ...
    PrimitiveType,
    /// `%foo` or `foo:`
    Name,
    /// `dimensions=`
    AttributeName,
    /// `b01f_01io->b01f`
    DimLabels,
    /// `1x2x3`
    DxD,
    /// `0_0x1_1`
    Pad,
    /// Any other identifier
    Ident,
    /// `"abcd\"\n"`
    String,
    /// `42`
    Int,
    /// `4.2`, `nan`
    Decimal,
}

impl TokKind {
    /// The exact source text of fixed tokens and keywords.
    pub const fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            TokKind::Equal => "=",
            TokKind::Comma => ",",
            TokKind::Colon => ":",
            TokKind::Asterisk => "*",
            TokKind::Lsquare => "[",
            TokKind::Rsquare => "]",
            TokKind::Lbrace => "{",
            TokKind::Rbrace => "}",
            TokKind::Lparen => "(",
            TokKind::Rparen => ")",
            TokKind::Dots => "...",
            TokKind::Arrow => "->",
            TokKind::Leq => "<=",
            TokKind::KwHloModule => "HloModule",
            TokKind::KwEntry => "ENTRY",
            TokKind::KwRoot => "ROOT",
            TokKind::KwTrue => "true",
            TokKind::KwFalse => "false",
            TokKind::KwMaximal => "maximal",
            TokKind::KwReplicated => "replicated",
            TokKind::KwManual => "manual",
            TokKind::KwLastTileDimReplicate => "last_tile_dim_replicate",
            TokKind::KwInf => "inf",
            TokKind::NegInf => "-inf",
            _ => return None,
        })
    }

    /// Returns true for `Eof` and `Error`, after which lexing does not advance.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TokKind::Eof | TokKind::Error)
    }

    /// Returns true for keyword kinds.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokKind::KwHloModule
                | TokKind::KwEntry
                | TokKind::KwRoot
                | TokKind::KwTrue
                | TokKind::KwFalse
                | TokKind::KwMaximal
                | TokKind::KwReplicated
                | TokKind::KwManual
                | TokKind::KwLastTileDimReplicate
                | TokKind::KwInf
        )
    }

    /// Short human-readable name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            TokKind::Eof => "eof",
            TokKind::Error => "error",
            TokKind::PrimitiveType => "primitive_type",
            TokKind::Name => "name",
            TokKind::AttributeName => "attribute_name",
            TokKind::DimLabels => "dim_labels",
            TokKind::DxD => "dxd",
            TokKind::Pad => "pad",
            TokKind::Ident => "ident",
            TokKind::String => "string",
            TokKind::Int => "int",
            TokKind::Decimal => "decimal",
            other => match other.fixed_text() {
                Some(text) => text,
                None => "unknown",
            },
        }
    }
}

impl fmt::Display for TokKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps identifier text to a keyword kind.
///
/// # Examples
///
/// ```
/// use hloc_lex::token::{keyword_from_ident, TokKind};
///
/// assert_eq!(keyword_from_ident("ENTRY"), Some(TokKind::KwEntry));
/// assert_eq!(keyword_from_ident("entry"), None);
/// ```
pub fn keyword_from_ident(text: &str) -> Option<TokKind> {
    match text {
        "true" => Some(TokKind::KwTrue),
        "false" => Some(TokKind::KwFalse),
        "inf" => Some(TokKind::KwInf),
        "HloModule" => Some(TokKind::KwHloModule),
        "ENTRY" => Some(TokKind::KwEntry),
        "ROOT" => Some(TokKind::KwRoot),
        "maximal" => Some(TokKind::KwMaximal),
        "replicated" => Some(TokKind::KwReplicated),
        "manual" => Some(TokKind::KwManual),
        "last_tile_dim_replicate" => Some(TokKind::KwLastTileDimReplicate),
        _ => None,
    }
}

/// Decoded payload of a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TokenValue {
    /// No payload
    #[default]
    None,
    /// Names, attribute names, identifiers, strings and raw patterns
    Str(String),
    /// Integer literal
    Int(i64),
    /// Floating-point literal, including NaN and infinities
    Decimal(f64),
    /// Resolved primitive type
    PrimitiveType(PrimitiveType),
}

/// One lexed token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    kind: TokKind,
    start: BufferPos,
    end: usize,
    value: TokenValue,
}

impl Token {
    /// Creates a token without payload
    pub fn new(kind: TokKind, start: BufferPos, end: usize) -> Self {
        Self::with_value(kind, start, end, TokenValue::None)
    }

    /// Creates a token carrying `value`
    pub fn with_value(kind: TokKind, start: BufferPos, end: usize, value: TokenValue) -> Self {
        Self {
            kind,
            start,
            end,
            value,
        }
    }

    /// Kind of the token
    #[inline]
    pub fn kind(&self) -> TokKind {
        self.kind
    }

    /// Position of the first byte of the token
    #[inline]
    pub fn start(&self) -> &BufferPos {
        &self.start
    }

    /// Byte offset one past the last byte of the token
    #[inline]
    pub fn end_offset(&self) -> usize {
        self.end
    }

    /// Decoded payload
    #[inline]
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    /// Raw source text of the token.
    pub fn lexeme(&self) -> &str {
        self.start
            .buffer()
            .as_str()
            .get(self.start.offset()..self.end)
            .unwrap_or("")
    }

    /// Text payload, or `""` for tokens without one
    pub fn str_val(&self) -> &str {
        match &self.value {
            TokenValue::Str(s) => s,
            _ => "",
        }
    }

    /// Integer payload, or `0`
    pub fn int64_val(&self) -> i64 {
        match self.value {
            TokenValue::Int(v) => v,
            _ => 0,
        }
    }

    /// Floating-point payload, or `0.0`
    pub fn decimal_val(&self) -> f64 {
        match self.value {
            TokenValue::Decimal(v) => v,
            _ => 0.0,
        }
    }

    /// Primitive type payload, or `PrimitiveType::Invalid`
    pub fn primitive_type_val(&self) -> PrimitiveType {
        match self.value {
            TokenValue::PrimitiveType(ty) => ty,
            _ => PrimitiveType::Invalid,
        }
    }
}
