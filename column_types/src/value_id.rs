//! Dictionary codes and the width of the vector that stores them.

use std::fmt;

/// A dictionary code. [`INVALID_VALUE_ID`] is reserved to mean "no
/// dictionary entry at or above the probed value".
///
/// Represented uniformly as `u64` regardless of the backing
/// [`AttributeVectorWidth`]: truncating `u64::MAX` to any narrower
/// unsigned width still yields that width's all-ones pattern, so a
/// single sentinel works across all four widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(pub u64);

impl ValueId {
    pub fn is_valid(self) -> bool {
        self != INVALID_VALUE_ID
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "INVALID")
        }
    }
}

impl From<usize> for ValueId {
    fn from(i: usize) -> Self {
        Self(i as u64)
    }
}

pub const INVALID_VALUE_ID: ValueId = ValueId(u64::MAX);

/// Byte width of a single dictionary code in an attribute vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeVectorWidth {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl AttributeVectorWidth {
    /// The minimum width such that `cardinality < 2^(8*width) - 1`,
    /// reserving the all-ones code in that width for
    /// [`INVALID_VALUE_ID`].
    pub fn fitting(cardinality: usize) -> Self {
        if (cardinality as u64) < (u8::MAX as u64) {
            Self::One
        } else if (cardinality as u64) < (u16::MAX as u64) {
            Self::Two
        } else if (cardinality as u64) < (u32::MAX as u64) {
            Self::Four
        } else {
            Self::Eight
        }
    }

    pub fn bytes(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_scenario_s4() {
        assert_eq!(AttributeVectorWidth::fitting(1), AttributeVectorWidth::One);
        assert_eq!(AttributeVectorWidth::fitting(256), AttributeVectorWidth::Two);
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        // Invariant 3: width-fitting. `fitting` must choose the
        // minimum width from {1,2,4,8} with `cardinality < 2^(8w) - 1`.
        #[test]
        fn fitting_picks_the_minimum_width(cardinality in 0usize..(1 << 20)) {
            let width = AttributeVectorWidth::fitting(cardinality);
            let max_representable = (1u64 << (8 * width.bytes())) - 1;
            prop_assert!((cardinality as u64) < max_representable);

            let narrower_max = match width {
                AttributeVectorWidth::One => None,
                AttributeVectorWidth::Two => Some(u8::MAX as u64),
                AttributeVectorWidth::Four => Some(u16::MAX as u64),
                AttributeVectorWidth::Eight => Some(u32::MAX as u64),
            };
            if let Some(narrower_max) = narrower_max {
                prop_assert!((cardinality as u64) >= narrower_max);
            }
        }
    }
}
