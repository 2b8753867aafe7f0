//! Scalar readings fed into the machine.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A scalar reading that guards compare against.
///
/// Widening a threshold by the hysteresis margin must never wrap around:
/// integer readings saturate at their bounds, floating point readings use
/// plain arithmetic.
pub trait Measurement:
    Copy + PartialOrd + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// The additive identity, used to reject negative margins.
    fn zero() -> Self;

    /// `self + margin` without wraparound.
    fn raised_by(self, margin: Self) -> Self;

    /// `self - margin` without wraparound.
    fn lowered_by(self, margin: Self) -> Self;
}

macro_rules! saturating_measurement {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Measurement for $ty {
                fn zero() -> Self {
                    0
                }

                fn raised_by(self, margin: Self) -> Self {
                    self.saturating_add(margin)
                }

                fn lowered_by(self, margin: Self) -> Self {
                    self.saturating_sub(margin)
                }
            }
        )*
    };
}

macro_rules! float_measurement {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Measurement for $ty {
                fn zero() -> Self {
                    0.0
                }

                fn raised_by(self, margin: Self) -> Self {
                    self + margin
                }

                fn lowered_by(self, margin: Self) -> Self {
                    self - margin
                }
            }
        )*
    };
}

saturating_measurement!(i8, i16, i32, i64);
float_measurement!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowering_near_zero_goes_negative() {
        assert_eq!(1i32.lowered_by(2), -1);
        assert_eq!(0i16.lowered_by(5), -5);
    }

    #[test]
    fn integer_widening_saturates() {
        assert_eq!(i32::MAX.raised_by(2), i32::MAX);
        assert_eq!(i32::MIN.lowered_by(2), i32::MIN);
        assert_eq!(i8::MAX.raised_by(1), i8::MAX);
    }

    #[test]
    fn float_widening_is_plain_arithmetic() {
        assert_eq!(8.0f32.raised_by(2.0), 10.0);
        assert_eq!(8.0f64.lowered_by(2.5), 5.5);
    }
}
