/*
 * Copyright (c) 2025-present Dawid Pawlik
 *
 * For educational use only by employees and students of MIMUW.
 * See LICENSE file for details.
 */

//! # Typed boundary of the frames
//!
//! Every public operation that accepts or returns typed values (`append_new_column`, `get_column`,
//! `set_column`, `slice_rows`) is generic over [`Scalar`]. The trait is implemented for exactly the
//! seven supported element types and maps each one onto its [`DataType`] tag, its [`Datum`] cell
//! variant and its [`ColumnData`] column variant.

use crate::ColumnData;
use crate::DataType;
use crate::Datum;
use std::fmt;

pub trait Scalar: Clone + PartialOrd + fmt::Debug + fmt::Display + 'static {
    const DATA_TYPE: DataType;

    fn into_datum(self) -> Datum;

    /// Returns `None` when the cell holds another type
    fn from_datum(datum: &Datum) -> Option<Self>;

    fn into_data(values: Vec<Self>) -> ColumnData;

    fn values(data: &ColumnData) -> Option<&Vec<Self>>;

    fn values_mut(data: &mut ColumnData) -> Option<&mut Vec<Self>>;
}

macro_rules! impl_scalar {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $native {
                const DATA_TYPE: DataType = DataType::$variant;

                fn into_datum(self) -> Datum {
                    Datum::$variant(self)
                }

                fn from_datum(datum: &Datum) -> Option<Self> {
                    match datum {
                        Datum::$variant(value) => Some(value.clone()),
                        _ => None,
                    }
                }

                fn into_data(values: Vec<Self>) -> ColumnData {
                    ColumnData::$variant(values)
                }

                fn values(data: &ColumnData) -> Option<&Vec<Self>> {
                    match data {
                        ColumnData::$variant(values) => Some(values),
                        _ => None,
                    }
                }

                fn values_mut(data: &mut ColumnData) -> Option<&mut Vec<Self>> {
                    match data {
                        ColumnData::$variant(values) => Some(values),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    String => String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tags() {
        assert_eq!(<i8 as Scalar>::DATA_TYPE, DataType::Int8);
        assert_eq!(<f32 as Scalar>::DATA_TYPE, DataType::Float);
        assert_eq!(<String as Scalar>::DATA_TYPE, DataType::String);
    }

    #[test]
    fn test_from_datum_rejects_other_types() {
        let datum = 42i32.into_datum();
        assert_eq!(i32::from_datum(&datum), Some(42));
        assert_eq!(i64::from_datum(&datum), None);
        assert_eq!(String::from_datum(&datum), None);
    }

    #[test]
    fn test_values_view_matches_variant() {
        let data = f64::into_data(vec![1.5, -2.5]);
        assert_eq!(f64::values(&data), Some(&vec![1.5, -2.5]));
        assert!(f32::values(&data).is_none());
    }
}
