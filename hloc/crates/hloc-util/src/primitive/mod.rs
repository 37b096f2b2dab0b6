//! Primitive element types of the HLO type system.
//!
//! The codes match the `PrimitiveType` enum of the XLA data schema. Type
//! names are the lower-cased enum names, except `OPAQUE_TYPE` which is
//! spelled `opaque`.
//!
//! # Examples
//!
//! ```
//! use hloc_util::primitive::{PrimitiveType, PrimitiveTypeTable, TypeNameResolver};
//!
//! let table = PrimitiveTypeTable;
//! assert!(table.is_primitive_type_name("bf16"));
//! assert_eq!(table.resolve("f32"), Ok(PrimitiveType::F32));
//! assert_eq!(PrimitiveType::F32.code(), 11);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::error::{PrimitiveTypeError, PrimitiveTypeResult};

/// An element type, tagged with its schema code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum PrimitiveType {
    /// Invalid / unset type
    #[default]
    Invalid = 0,
    /// Boolean
    Pred = 1,
    /// Signed 8-bit integer
    S8 = 2,
    /// Signed 16-bit integer
    S16 = 3,
    /// Signed 32-bit integer
    S32 = 4,
    /// Signed 64-bit integer
    S64 = 5,
    /// Unsigned 8-bit integer
    U8 = 6,
    /// Unsigned 16-bit integer
    U16 = 7,
    /// Unsigned 32-bit integer
    U32 = 8,
    /// Unsigned 64-bit integer
    U64 = 9,
    /// IEEE half precision float
    F16 = 10,
    /// IEEE single precision float
    F32 = 11,
    /// IEEE double precision float
    F64 = 12,
    /// Tuple of shapes
    Tuple = 13,
    /// Opaque handle
    OpaqueType = 14,
    /// Complex of two f32
    C64 = 15,
    /// Truncated float (bfloat16)
    Bf16 = 16,
    /// Ordering token
    Token = 17,
    /// Complex of two f64
    C128 = 18,
}

impl PrimitiveType {
    /// Every valid type, in code order.
    pub const ALL: [PrimitiveType; 18] = [
        PrimitiveType::Pred,
        PrimitiveType::S8,
        PrimitiveType::S16,
        PrimitiveType::S32,
        PrimitiveType::S64,
        PrimitiveType::U8,
        PrimitiveType::U16,
        PrimitiveType::U32,
        PrimitiveType::U64,
        PrimitiveType::F16,
        PrimitiveType::F32,
        PrimitiveType::F64,
        PrimitiveType::Tuple,
        PrimitiveType::OpaqueType,
        PrimitiveType::C64,
        PrimitiveType::Bf16,
        PrimitiveType::Token,
        PrimitiveType::C128,
    ];

    /// Schema code of this type
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Textual name as written in HLO text
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveType::Invalid => "invalid",
            PrimitiveType::Pred => "pred",
            PrimitiveType::S8 => "s8",
            PrimitiveType::S16 => "s16",
            PrimitiveType::S32 => "s32",
            PrimitiveType::S64 => "s64",
            PrimitiveType::U8 => "u8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::F16 => "f16",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
            PrimitiveType::Tuple => "tuple",
            PrimitiveType::OpaqueType => "opaque",
            PrimitiveType::C64 => "c64",
            PrimitiveType::Bf16 => "bf16",
            PrimitiveType::Token => "token",
            PrimitiveType::C128 => "c128",
        }
    }

    /// Looks a type up by schema code
    ///
    /// # Examples
    ///
    /// ```
    /// use hloc_util::primitive::PrimitiveType;
    ///
    /// assert_eq!(PrimitiveType::from_code(16), Ok(PrimitiveType::Bf16));
    /// assert!(PrimitiveType::from_code(99).is_err());
    /// ```
    pub fn from_code(code: i32) -> PrimitiveTypeResult<Self> {
        if code == 0 {
            return Ok(PrimitiveType::Invalid);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.code() == code)
            .ok_or(PrimitiveTypeError::UnknownCode(code))
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves identifiers to primitive types.
///
/// The lexer consults a resolver for every bare identifier to decide
/// whether it is a type keyword such as `f32`.
pub trait TypeNameResolver {
    /// Returns true if `name` names a primitive type
    fn is_primitive_type_name(&self, name: &str) -> bool;

    /// Resolves `name` to its primitive type
    fn resolve(&self, name: &str) -> PrimitiveTypeResult<PrimitiveType>;
}

static NAME_MAP: Lazy<FxHashMap<&'static str, PrimitiveType>> = Lazy::new(|| {
    PrimitiveType::ALL
        .iter()
        .map(|ty| (ty.name(), *ty))
        .collect()
});

/// The default resolver, backed by a process-wide name table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrimitiveTypeTable;

impl TypeNameResolver for PrimitiveTypeTable {
    fn is_primitive_type_name(&self, name: &str) -> bool {
        NAME_MAP.contains_key(name)
    }

    fn resolve(&self, name: &str) -> PrimitiveTypeResult<PrimitiveType> {
        NAME_MAP
            .get(name)
            .copied()
            .ok_or_else(|| PrimitiveTypeError::UnknownName(name.to_string()))
    }
}

impl<R: TypeNameResolver + ?Sized> TypeNameResolver for &R {
    fn is_primitive_type_name(&self, name: &str) -> bool {
        (**self).is_primitive_type_name(name)
    }

    fn resolve(&self, name: &str) -> PrimitiveTypeResult<PrimitiveType> {
        (**self).resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip_through_table() {
        for ty in PrimitiveType::ALL {
            assert_eq!(PrimitiveTypeTable.resolve(ty.name()), Ok(ty));
        }
    }

    #[test]
    fn test_codes_roundtrip() {
        for ty in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_code(ty.code()), Ok(ty));
        }
    }

    #[test]
    fn test_opaque_spelling() {
        assert_eq!(PrimitiveTypeTable.resolve("opaque"), Ok(PrimitiveType::OpaqueType));
        assert!(!PrimitiveTypeTable.is_primitive_type_name("opaque_type"));
    }

    #[test]
    fn test_invalid_is_not_a_name() {
        assert!(!PrimitiveTypeTable.is_primitive_type_name("invalid"));
        assert!(!PrimitiveTypeTable.is_primitive_type_name("primitive_type_invalid"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(PrimitiveTypeTable.is_primitive_type_name("f32"));
        assert!(!PrimitiveTypeTable.is_primitive_type_name("F32"));
    }

    #[test]
    fn test_tuple_resolves() {
        assert_eq!(PrimitiveTypeTable.resolve("tuple"), Ok(PrimitiveType::Tuple));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            PrimitiveTypeTable.resolve("f33"),
            Err(PrimitiveTypeError::UnknownName("f33".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(PrimitiveType::Bf16.to_string(), "bf16");
        assert_eq!(PrimitiveType::default(), PrimitiveType::Invalid);
    }
}
