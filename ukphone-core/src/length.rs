//! Digit-count checks derived from a matched layout.
//!
//! A layout with a fixed last chunk demands an exact total length. A layout
//! whose last chunk is a range keeps the leading chunks fixed and lets only
//! the subscriber suffix vary.

use std::fmt;

use log::debug;

use crate::config::Layout;
use crate::errors::ValidationError;
use crate::normalize::NormalizedNumber;

/// Allowed total digit count of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBounds {
    Exact(usize),
    Range { min: usize, max: usize },
}

impl LengthBounds {
    pub fn contains(&self, length: usize) -> bool {
        match *self {
            LengthBounds::Exact(required) => length == required,
            LengthBounds::Range { min, max } => (min..=max).contains(&length),
        }
    }

    /// The error reported when a number falls outside these bounds.
    pub fn to_error(&self) -> ValidationError {
        match *self {
            LengthBounds::Exact(required) => ValidationError::LengthExact(required),
            LengthBounds::Range { min, max } => ValidationError::LengthRange(min, max),
        }
    }
}

impl fmt::Display for LengthBounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LengthBounds::Exact(required) => write!(f, "{}", required),
            LengthBounds::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

/// Checks the number's length against the layout. An absent layout always passes.
pub fn validate_length(number: &NormalizedNumber, layout: Option<&Layout>) -> Result<(), ValidationError> {
    let Some(layout) = layout else {
        return Ok(());
    };

    let bounds = layout.length_bounds();
    if bounds.contains(number.len()) {
        Ok(())
    } else {
        debug!("Length {} outside {:?}", number.len(), bounds);
        Err(bounds.to_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn digits(count: usize) -> NormalizedNumber {
        normalize(&"0".repeat(count))
    }

    #[test]
    fn exact_layout_requires_sum_of_widths() {
        let layout = Layout::fixed(&[3, 4, 4]).unwrap();
        assert_eq!(validate_length(&digits(11), Some(&layout)), Ok(()));
        assert_eq!(validate_length(&digits(10), Some(&layout)), Err(ValidationError::LengthExact(11)));
        assert_eq!(validate_length(&digits(12), Some(&layout)), Err(ValidationError::LengthExact(11)));
    }

    #[test]
    fn ranged_layout_bounds_are_inclusive() {
        let layout = Layout::with_range(&[4, 3], 4, 6).unwrap();
        assert_eq!(layout.length_bounds(), LengthBounds::Range { min: 11, max: 13 });

        for ok in [11, 12, 13] {
            assert_eq!(validate_length(&digits(ok), Some(&layout)), Ok(()));
        }
        for bad in [10, 14] {
            assert_eq!(
                validate_length(&digits(bad), Some(&layout)),
                Err(ValidationError::LengthRange(11, 13))
            );
        }
    }

    #[test]
    fn bounds_display_compactly() {
        assert_eq!(LengthBounds::Exact(11).to_string(), "11");
        assert_eq!(LengthBounds::Range { min: 11, max: 13 }.to_string(), "11-13");
    }

    #[test]
    fn absent_layout_is_unconstrained() {
        assert_eq!(validate_length(&digits(1), None), Ok(()));
        assert_eq!(validate_length(&digits(40), None), Ok(()));
    }
}
