//! Order-preserving dictionary-encoded column, built in place from
//! any other column by chunk compression (spec.md §4.4).

use std::any::Any;

use column_types::{
    type_cast, AllTypeVariant, AttributeVectorWidth, ColumnDataType, ColumnElement, ValueId,
    INVALID_VALUE_ID,
};
use observability_deps::tracing::warn;

use crate::attribute_vector::AttributeVector;
use crate::column::BaseColumn;
use crate::error::{AppendToDictionaryColumnSnafu, Result};
use crate::value_column::ValueColumn;

#[derive(Debug, Clone)]
pub struct DictionaryColumn<T: ColumnElement> {
    dictionary: Vec<T>,
    attribute_vector: AttributeVector,
}

impl<T: ColumnElement> DictionaryColumn<T> {
    /// Builds a dictionary column from any base column of the same
    /// element type `T`. See spec.md §4.4 for the four-step
    /// construction contract this follows.
    pub fn build(base_column: &dyn BaseColumn) -> Self {
        let dictionary = Self::build_dictionary(base_column);
        let width = AttributeVectorWidth::fitting(dictionary.len());
        let mut attribute_vector = AttributeVector::new(base_column.len(), width);
        Self::build_attribute_vector(base_column, &dictionary, &mut attribute_vector);
        Self {
            dictionary,
            attribute_vector,
        }
    }

    fn build_dictionary(base_column: &dyn BaseColumn) -> Vec<T> {
        let mut values: Vec<T> =
            if let Some(value_column) = base_column.as_any().downcast_ref::<ValueColumn<T>>() {
                value_column.values().to_vec()
            } else {
                warn!(
                    len = base_column.len(),
                    "element-wise copy while compressing a non-ValueColumn source"
                );
                (0..base_column.len())
                    .map(|i| {
                        let variant = base_column.get(i);
                        type_cast::<T>(&variant).expect(
                            "base column's declared data type must match the requested element type",
                        )
                    })
                    .collect()
            };

        // Floats have no total order under NaN; the storage core
        // assumes values never contain NaN, matching the original
        // `std::sort` over `T` with `operator<`.
        values.sort_by(|a, b| a.partial_cmp(b).expect("values must not be NaN"));
        values.dedup();
        values
    }

    fn build_attribute_vector(
        base_column: &dyn BaseColumn,
        dictionary: &[T],
        attribute_vector: &mut AttributeVector,
    ) {
        if let Some(value_column) = base_column.as_any().downcast_ref::<ValueColumn<T>>() {
            for (i, value) in value_column.values().iter().enumerate() {
                attribute_vector.set(i, Self::to_value_id(dictionary, value));
            }
        } else {
            for i in 0..base_column.len() {
                let variant = base_column.get(i);
                let value = type_cast::<T>(&variant)
                    .expect("base column's declared data type must match the requested element type");
                attribute_vector.set(i, Self::to_value_id(dictionary, &value));
            }
        }
    }

    fn to_value_id(dictionary: &[T], value: &T) -> ValueId {
        let k = dictionary.partition_point(|d| d < value);
        if k == dictionary.len() {
            INVALID_VALUE_ID
        } else {
            ValueId(k as u64)
        }
    }

    pub fn get(&self, i: usize) -> T {
        let value_id = self.attribute_vector.get(i);
        self.dictionary[value_id.0 as usize].clone()
    }

    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    pub fn attribute_vector(&self) -> &AttributeVector {
        &self.attribute_vector
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn value_by_value_id(&self, value_id: ValueId) -> &T {
        &self.dictionary[value_id.0 as usize]
    }

    /// Smallest `ValueId` `k` with `dictionary[k] >= value`, or
    /// `INVALID_VALUE_ID` if no such `k` exists.
    pub fn lower_bound_value(&self, value: &T) -> ValueId {
        Self::to_value_id(&self.dictionary, value)
    }

    /// Smallest `ValueId` `k` with `dictionary[k] > value`, or
    /// `INVALID_VALUE_ID` if no such `k` exists.
    pub fn upper_bound_value(&self, value: &T) -> ValueId {
        let k = self.dictionary.partition_point(|d| d <= value);
        if k == self.dictionary.len() {
            INVALID_VALUE_ID
        } else {
            ValueId(k as u64)
        }
    }

    pub fn lower_bound(&self, value: &AllTypeVariant) -> Result<ValueId> {
        let value: T = type_cast(value)?;
        Ok(self.lower_bound_value(&value))
    }

    pub fn upper_bound(&self, value: &AllTypeVariant) -> Result<ValueId> {
        let value: T = type_cast(value)?;
        Ok(self.upper_bound_value(&value))
    }
}

impl<T: ColumnElement> BaseColumn for DictionaryColumn<T> {
    fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    fn get(&self, i: usize) -> AllTypeVariant {
        DictionaryColumn::get(self, i).into_variant()
    }

    fn append(&mut self, _value: &AllTypeVariant) -> Result<()> {
        AppendToDictionaryColumnSnafu.fail()
    }

    fn data_type(&self) -> ColumnDataType {
        T::DATA_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Instantiated by [`column_types::with_column_data_type`] during
/// `Table::compress_chunk`.
pub fn compress_column<T: ColumnElement>(base_column: &dyn BaseColumn) -> Box<dyn BaseColumn> {
    Box::new(DictionaryColumn::<T>::build(base_column))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_column_of(values: &[&str]) -> ValueColumn<String> {
        let mut col = ValueColumn::new();
        for v in values {
            col.push(v.to_string());
        }
        col
    }

    #[test]
    fn compress_dedups_and_sorts() {
        // S2 from spec.md §8.
        let vc = value_column_of(&["Bill", "Steve", "Alexander", "Steve", "Hasso", "Bill"]);
        let dc = DictionaryColumn::<String>::build(&vc);

        assert_eq!(dc.len(), 6);
        assert_eq!(dc.unique_values_count(), 4);
        assert_eq!(
            dc.dictionary(),
            &["Alexander", "Bill", "Hasso", "Steve"].map(String::from)
        );
    }

    #[test]
    fn round_trip_preserves_values() {
        let vc = value_column_of(&["Bill", "Steve", "Alexander", "Steve", "Hasso", "Bill"]);
        let dc = DictionaryColumn::<String>::build(&vc);
        let original = vc.values();
        for i in 0..vc.len() {
            assert_eq!(&dc.get(i), &original[i]);
        }
    }

    #[test]
    fn bounds_scenario_s3() {
        let mut vc: ValueColumn<i32> = ValueColumn::new();
        for v in (0..=10).step_by(2) {
            vc.push(v);
        }
        let dc = DictionaryColumn::<i32>::build(&vc);

        assert_eq!(dc.lower_bound_value(&4), ValueId(2));
        assert_eq!(dc.upper_bound_value(&4), ValueId(3));
        assert_eq!(dc.lower_bound_value(&5), ValueId(3));
        assert_eq!(dc.upper_bound_value(&5), ValueId(3));
        assert_eq!(dc.lower_bound_value(&15), INVALID_VALUE_ID);
        assert_eq!(dc.upper_bound_value(&15), INVALID_VALUE_ID);
    }

    #[test]
    fn width_fits_cardinality() {
        let mut vc: ValueColumn<i32> = ValueColumn::new();
        vc.push(1);
        let dc = DictionaryColumn::<i32>::build(&vc);
        assert_eq!(dc.attribute_vector().width(), AttributeVectorWidth::One);

        let mut vc: ValueColumn<i32> = ValueColumn::new();
        for _ in 0..256 {
            vc.push(1);
        }
        let dc = DictionaryColumn::<i32>::build(&vc);
        assert_eq!(dc.attribute_vector().width(), AttributeVectorWidth::One);

        let mut vc: ValueColumn<i32> = ValueColumn::new();
        for i in 0..256 {
            vc.push(i);
        }
        let dc = DictionaryColumn::<i32>::build(&vc);
        assert_eq!(dc.attribute_vector().width(), AttributeVectorWidth::Two);
    }

    #[test]
    fn append_fails() {
        let vc = value_column_of(&["a"]);
        let mut dc = DictionaryColumn::<String>::build(&vc);
        assert!(BaseColumn::append(&mut dc, &AllTypeVariant::String("b".into())).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn int_value_column(values: &[i32]) -> ValueColumn<i32> {
        let mut col = ValueColumn::new();
        for v in values {
            col.push(*v);
        }
        col
    }

    proptest! {
        // Invariant 1: round-trip.
        #[test]
        fn round_trip(values in proptest::collection::vec(any::<i32>(), 0..200)) {
            let vc = int_value_column(&values);
            let dc = DictionaryColumn::<i32>::build(&vc);
            for (i, v) in values.iter().enumerate() {
                prop_assert_eq!(&dc.get(i), v);
            }
        }

        // Invariant 2: sortedness.
        #[test]
        fn dictionary_is_sorted(values in proptest::collection::vec(any::<i32>(), 0..200)) {
            let vc = int_value_column(&values);
            let dc = DictionaryColumn::<i32>::build(&vc);
            for pair in dc.dictionary().windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        // Invariant 4: lower/upper bound.
        #[test]
        fn bounds_match_linear_scan(
            values in proptest::collection::vec(any::<i32>(), 1..200),
            probe in any::<i32>(),
        ) {
            let vc = int_value_column(&values);
            let dc = DictionaryColumn::<i32>::build(&vc);

            let expected_lower = dc
                .dictionary()
                .iter()
                .position(|d| *d >= probe)
                .map(|k| ValueId(k as u64))
                .unwrap_or(INVALID_VALUE_ID);
            let expected_upper = dc
                .dictionary()
                .iter()
                .position(|d| *d > probe)
                .map(|k| ValueId(k as u64))
                .unwrap_or(INVALID_VALUE_ID);

            prop_assert_eq!(dc.lower_bound_value(&probe), expected_lower);
            prop_assert_eq!(dc.upper_bound_value(&probe), expected_upper);
        }
    }
}
