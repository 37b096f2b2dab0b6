//! Lexer module.
//!
//! This module organizes the lexer implementation into smaller, focused components:
//! - `core` - Main Lexer struct, character access and dispatch
//! - `number` - Numbers, NaN payloads and structural patterns
//! - `identifier` - Identifiers, keywords, attribute names and `%` names
//! - `string` - Quoted string literals
//! - `comment` - Comment skipping
//! - `location` - Line/column lookup with a memoizing cache
//! - `lookahead` - Side-effect free peeking at the next token

mod comment;
mod core;
mod identifier;
mod location;
mod lookahead;
mod number;
mod string;

pub use self::core::Lexer;
pub use self::identifier::is_identifier_char;
pub use self::location::LINE_OUT_OF_RANGE;
pub use self::number::{nan_with_sign_and_payload, NAN_PAYLOAD_MASK, QUIET_NAN_PAYLOAD};
