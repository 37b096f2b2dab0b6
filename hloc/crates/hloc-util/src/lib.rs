//! hloc-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the foundation types shared by the HLO text tooling:
//!
//! - [`buffer`] - an immutable, shared source buffer and bounds-checked
//!   positions into it
//! - [`primitive`] - the primitive element types and the name table that
//!   maps type keywords such as `f32` to their schema codes
//! - [`error`] - error types for the fallible operations above
//!
//! BUFFER POSITIONS:
//! -----------------
//! A position is a (buffer, offset) pair. Arithmetic, comparison and span
//! extraction are only meaningful between positions of the same buffer:
//!
//! ```text
//! buffer A: | H | l | o | M | o | d | u | l | e |   |
//!             ^ begin                  ^ pos(7)      ^ end
//!
//! pos(7) - begin       = 7
//! pos(7) - <buffer B>  = Err(CrossBuffer)
//! ```
//!
//! # Examples
//!
//! ```
//! use hloc_util::{PrimitiveType, PrimitiveTypeTable, SourceBuffer, TypeNameResolver};
//!
//! let buf = SourceBuffer::new("f32[2]");
//! let ty = buf.begin().to(&buf.pos(3)).unwrap();
//! assert_eq!(PrimitiveTypeTable.resolve(ty.as_str().unwrap()), Ok(PrimitiveType::F32));
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod error;
pub mod primitive;

pub use buffer::{BufferPos, SourceBuffer};
pub use error::{BufferError, BufferResult, PrimitiveTypeError, PrimitiveTypeResult, UnescapeError};
pub use primitive::{PrimitiveType, PrimitiveTypeTable, TypeNameResolver};

// Re-export commonly used types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
