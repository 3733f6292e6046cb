/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Single typed cell values
//!
//! A [`Datum`] is one scalar value tagged with its [`DataType`]. Row-major storage keeps one datum
//! per cell; the column-major layout only materialises datums at its boundary (row appends and
//! layout conversion).

use crate::DataType;
use crate::Scalar;
use std::cmp::Ordering;
use std::fmt;

/// One scalar cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl Datum {
    pub fn data_type(&self) -> DataType {
        match self {
            Datum::Int8(_) => DataType::Int8,
            Datum::Int16(_) => DataType::Int16,
            Datum::Int32(_) => DataType::Int32,
            Datum::Int64(_) => DataType::Int64,
            Datum::Float(_) => DataType::Float,
            Datum::Double(_) => DataType::Double,
            Datum::String(_) => DataType::String,
        }
    }

    /// Display string used when printing a frame
    pub fn value_str(&self) -> String {
        self.to_string()
    }

    pub fn value<T: Scalar>(&self) -> Option<T> {
        T::from_datum(self)
    }

    /// Overwrite the held value. Returns `false` (and leaves the cell untouched) when the new
    /// value has a different type.
    pub fn set_value(&mut self, value: Datum) -> bool {
        if value.data_type() != self.data_type() {
            return false;
        }
        *self = value;
        true
    }

    /// Total order between two cells of the same type; floats use IEEE total ordering.
    /// Cells of different types are ordered by their type tag.
    pub fn total_cmp(&self, other: &Datum) -> Ordering {
        match (self, other) {
            (Datum::Int8(a), Datum::Int8(b)) => a.cmp(b),
            (Datum::Int16(a), Datum::Int16(b)) => a.cmp(b),
            (Datum::Int32(a), Datum::Int32(b)) => a.cmp(b),
            (Datum::Int64(a), Datum::Int64(b)) => a.cmp(b),
            (Datum::Float(a), Datum::Float(b)) => a.total_cmp(b),
            (Datum::Double(a), Datum::Double(b)) => a.total_cmp(b),
            (Datum::String(a), Datum::String(b)) => a.cmp(b),
            (a, b) => a.data_type().cmp(&b.data_type()),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Int8(value) => write!(f, "{}", value),
            Datum::Int16(value) => write!(f, "{}", value),
            Datum::Int32(value) => write!(f, "{}", value),
            Datum::Int64(value) => write!(f, "{}", value),
            Datum::Float(value) => write!(f, "{}", value),
            Datum::Double(value) => write!(f, "{}", value),
            Datum::String(value) => f.write_str(value),
        }
    }
}

macro_rules! impl_from_native {
    ($($native:ty),* $(,)?) => {
        $(
            impl From<$native> for Datum {
                fn from(value: $native) -> Self {
                    value.into_datum()
                }
            }
        )*
    };
}

impl_from_native!(i8, i16, i32, i64, f32, f64, String);

// String literals always become string cells; no numeric parsing is attempted.
impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_strings() {
        assert_eq!(Datum::from(-25.6568).value_str(), "-25.6568");
        assert_eq!(Datum::from(1710460200i64).value_str(), "1710460200");
        assert_eq!(Datum::from("00000").value_str(), "00000");
        assert_eq!(Datum::from(-3i8).value_str(), "-3");
    }

    #[test]
    fn test_literal_string_is_string_typed() {
        assert_eq!(Datum::from("128").data_type(), DataType::String);
    }

    #[test]
    fn test_set_value_requires_same_type() {
        let mut datum = Datum::from(5i16);
        assert!(!datum.set_value(Datum::from(6i32)));
        assert_eq!(datum, Datum::Int16(5));
        assert!(datum.set_value(Datum::from(7i16)));
        assert_eq!(datum.value::<i16>(), Some(7));
    }

    #[test]
    fn test_total_cmp_orders_nan_last() {
        let nan = Datum::from(f64::NAN);
        let one = Datum::from(1.0);
        assert_eq!(one.total_cmp(&nan), Ordering::Less);
        assert_eq!(Datum::from("a").total_cmp(&Datum::from("b")), Ordering::Less);
    }
}
