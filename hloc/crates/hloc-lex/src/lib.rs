//! hloc-lex - Lexical Analyzer for HLO Text
//!
//! This crate provides the tokenizer for the textual form of HLO modules
//! (instructions, shapes, layouts and sharding annotations). It transforms
//! a text buffer into a stream of typed tokens for a parser to consume.
//!
//! # Example Usage
//!
//! ```
//! use hloc_lex::{Lexer, TokKind};
//!
//! let source = "ROOT %c = f32[2,2]{1,0} copy(%p)";
//! let mut lexer = Lexer::new(source);
//!
//! // Get tokens one at a time
//! assert_eq!(lexer.lex(), TokKind::KwRoot);
//! assert_eq!(lexer.lex(), TokKind::Name);
//! assert_eq!(lexer.str_val(), "c");
//!
//! // Or iterate; the final Eof token is included
//! let kinds: Vec<TokKind> = Lexer::new(source).map(|t| t.kind()).collect();
//! assert_eq!(kinds.last(), Some(&TokKind::Eof));
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - Token kinds, payloads and the token value type
//! - [`lexer`] - Main lexer implementation, locations and lookahead
//! - [`patterns`] - Anchored regular expressions for literal shapes
//! - [`escape`] - C escape sequence decoding for strings
//!
//! # Token Categories
//!
//! ## Punctuation
//!
//! `=`, `,`, `:`, `*`, `[`, `]`, `{`, `}`, `(`, `)`, `...`, `->`, `<=`
//!
//! ## Keywords
//!
//! `HloModule`, `ENTRY`, `ROOT`, `true`, `false`, `maximal`, `replicated`,
//! `manual`, `last_tile_dim_replicate`, `inf`
//!
//! ## Valued tokens
//!
//! - **Names**: `%foo`, `foo:`
//! - **Attribute names**: `dimensions=`
//! - **Primitive types**: `f32`, `pred`, `bf16`, ... (never `tuple`)
//! - **Numbers**: `42`, `-7`, `4.2`, `1e-3`, `nan`, `nan(0x1f)`, `-nan`, `-inf`
//! - **Patterns**: dim labels `b01f_01io->b01f`, window sizes `1x2x3`,
//!   padding `0_0x1_1`
//! - **Strings**: `"abcd\"\n"`
//!
//! ## Special
//!
//! - **Eof**: End of input
//! - **Error**: Anything that cannot be lexed. Lexing does not recover;
//!   the caller should stop at the first error.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod escape;
pub mod lexer;
pub mod patterns;
pub mod token;

mod edge_cases;

// Re-export main types for convenience
pub use escape::c_unescape;
pub use lexer::{
    is_identifier_char, nan_with_sign_and_payload, Lexer, LINE_OUT_OF_RANGE, NAN_PAYLOAD_MASK,
    QUIET_NAN_PAYLOAD,
};
pub use token::{keyword_from_ident, TokKind, Token, TokenValue};
