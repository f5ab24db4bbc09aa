//! Conversion between the supported bound types and normalized `f64` space.
//!
//! The kind of a range is resolved once from the runtime type of its minimum
//! bound. Matching is exact: a newtype around `i32` is not an `i32`.

use std::any::{Any, TypeId};
use std::fmt;

use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::errors::{RangeSeekError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Long,
    Double,
    Integer,
    Float,
    Short,
    Byte,
    BigDecimal,
}

impl NumberKind {
    /// Lookup order used by [`NumberKind::of`]; the first match wins.
    pub const ALL: [NumberKind; 7] = [
        NumberKind::Long,
        NumberKind::Double,
        NumberKind::Integer,
        NumberKind::Float,
        NumberKind::Short,
        NumberKind::Byte,
        NumberKind::BigDecimal,
    ];

    fn underlying_type_id(self) -> TypeId {
        match self {
            NumberKind::Long => TypeId::of::<i64>(),
            NumberKind::Double => TypeId::of::<f64>(),
            NumberKind::Integer => TypeId::of::<i32>(),
            NumberKind::Float => TypeId::of::<f32>(),
            NumberKind::Short => TypeId::of::<i16>(),
            NumberKind::Byte => TypeId::of::<i8>(),
            NumberKind::BigDecimal => TypeId::of::<BigDecimal>(),
        }
    }

    /// Resolves the kind of `value` by exact type match.
    pub fn of<T: Any>(value: &T) -> Result<Self> {
        let type_id = value.type_id();
        Self::ALL
            .into_iter()
            .find(|kind| kind.underlying_type_id() == type_id)
            .ok_or(RangeSeekError::UnsupportedNumericKind {
                type_name: std::any::type_name::<T>(),
            })
    }

    pub fn type_name(self) -> &'static str {
        match self {
            NumberKind::Long => "i64",
            NumberKind::Double => "f64",
            NumberKind::Integer => "i32",
            NumberKind::Float => "f32",
            NumberKind::Short => "i16",
            NumberKind::Byte => "i8",
            NumberKind::BigDecimal => "BigDecimal",
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            NumberKind::Long | NumberKind::Integer | NumberKind::Short | NumberKind::Byte
        )
    }

    /// Widens `value` to `f64`. Returns `None` if `T` is not this kind's type.
    pub fn to_f64<T: Any>(self, value: &T) -> Option<f64> {
        let value = value as &dyn Any;
        match self {
            NumberKind::Long => value.downcast_ref::<i64>().map(|v| *v as f64),
            NumberKind::Double => value.downcast_ref::<f64>().copied(),
            NumberKind::Integer => value.downcast_ref::<i32>().map(|v| f64::from(*v)),
            NumberKind::Float => value.downcast_ref::<f32>().map(|v| f64::from(*v)),
            NumberKind::Short => value.downcast_ref::<i16>().map(|v| f64::from(*v)),
            NumberKind::Byte => value.downcast_ref::<i8>().map(|v| f64::from(*v)),
            NumberKind::BigDecimal => value.downcast_ref::<BigDecimal>().and_then(|v| v.to_f64()),
        }
    }

    /// Narrows `value` into this kind with plain cast semantics: integer kinds
    /// truncate toward zero, decimals take the value of the double.
    ///
    /// Returns `None` if `T` is not this kind's type, or if a non-finite value
    /// is converted to a decimal.
    pub fn from_f64<T: Any>(self, value: f64) -> Option<T> {
        let number: Box<dyn Any> = match self {
            NumberKind::Long => Box::new(value as i64),
            NumberKind::Double => Box::new(value),
            NumberKind::Integer => Box::new(value as i32),
            NumberKind::Float => Box::new(value as f32),
            NumberKind::Short => Box::new(value as i16),
            NumberKind::Byte => Box::new(value as i8),
            NumberKind::BigDecimal => Box::new(BigDecimal::from_f64(value)?),
        };
        number.downcast::<T>().ok().map(|number| *number)
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy)]
    struct Complex {
        #[allow(dead_code)]
        re: f64,
        #[allow(dead_code)]
        im: f64,
    }

    #[test]
    fn test_kind_resolution() {
        assert_eq!(NumberKind::of(&5i64).unwrap(), NumberKind::Long);
        assert_eq!(NumberKind::of(&5.0f64).unwrap(), NumberKind::Double);
        assert_eq!(NumberKind::of(&5i32).unwrap(), NumberKind::Integer);
        assert_eq!(NumberKind::of(&5.0f32).unwrap(), NumberKind::Float);
        assert_eq!(NumberKind::of(&5i16).unwrap(), NumberKind::Short);
        assert_eq!(NumberKind::of(&5i8).unwrap(), NumberKind::Byte);
        assert_eq!(
            NumberKind::of(&BigDecimal::from(5)).unwrap(),
            NumberKind::BigDecimal
        );
    }

    #[test]
    fn test_each_listed_kind_resolves_to_itself() {
        assert_eq!(NumberKind::of(&5i32).ok(), Some(NumberKind::Integer));
        assert_eq!(NumberKind::of(&-3i8).ok(), Some(NumberKind::Byte));

        let ids: Vec<TypeId> = NumberKind::ALL
            .iter()
            .map(|kind| kind.underlying_type_id())
            .collect();
        for (i, id) in ids.iter().enumerate() {
            assert_ne!(*id, TypeId::of::<NumberKind>());
            assert!(!ids[i + 1..].contains(id));
        }
    }

    #[test]
    fn test_unsupported_kind() {
        let error = NumberKind::of(&Complex { re: 1.0, im: 2.0 }).unwrap_err();
        assert!(matches!(error, RangeSeekError::UnsupportedNumericKind { .. }));
        assert_eq!(error.error_code(), "UNSUPPORTED_NUMERIC_KIND");
        assert!(!error.is_recoverable());

        // Unsigned types are not part of the supported set
        assert!(NumberKind::of(&5u32).is_err());
    }

    #[test]
    fn test_integer_kinds_truncate_toward_zero() {
        assert_eq!(NumberKind::Integer.from_f64::<i32>(29.999), Some(29));
        assert_eq!(NumberKind::Integer.from_f64::<i32>(-29.999), Some(-29));
        assert_eq!(NumberKind::Long.from_f64::<i64>(7.9), Some(7));
        assert_eq!(NumberKind::Short.from_f64::<i16>(-0.5), Some(0));
        assert_eq!(NumberKind::Byte.from_f64::<i8>(100.99), Some(100));
    }

    #[test]
    fn test_float_kinds() {
        assert_eq!(NumberKind::Double.from_f64::<f64>(0.25), Some(0.25));
        assert_eq!(NumberKind::Float.from_f64::<f32>(0.5), Some(0.5));
        assert_eq!(NumberKind::Float.to_f64(&0.5f32), Some(0.5));
    }

    #[test]
    fn test_big_decimal() {
        let decimal = NumberKind::BigDecimal
            .from_f64::<BigDecimal>(0.5)
            .unwrap();
        assert_eq!(decimal, BigDecimal::from_str("0.5").unwrap());
        assert_eq!(NumberKind::BigDecimal.to_f64(&decimal), Some(0.5));

        // Imprecise doubles keep their binary artifacts
        let tenth = NumberKind::BigDecimal.from_f64::<BigDecimal>(0.1).unwrap();
        assert_eq!(tenth.to_f64(), Some(0.1));

        assert_eq!(NumberKind::BigDecimal.from_f64::<BigDecimal>(f64::NAN), None);
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(NumberKind::Integer.to_f64(&5i64), None);
        assert_eq!(NumberKind::Integer.from_f64::<i64>(5.0), None);
    }
}
