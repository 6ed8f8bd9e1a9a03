//! Implementation of increment rounding functionality.
//!
//! Rounding a tick count to a unit boundary reduces a signed rounding
//! mode to an unsigned one relative to zero, rounds the magnitude, and
//! reapplies the sign.

use crate::{FieldError, FieldResult, FieldUnwrap};

use core::{cmp::Ordering, num::NonZeroI64, ops::Div};

use num_traits::{ConstZero, Euclid, FromPrimitive, NumCast, Signed, ToPrimitive};

/// Signed rounding modes supported by the field contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundingMode {
    Floor,
    Ceiling,
    HalfFloor,
    HalfCeiling,
    HalfEven,
}

/// Rounding modes relative to zero, after the sign has been peeled off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnsignedRoundingMode {
    Infinity,
    Zero,
    HalfInfinity,
    HalfZero,
    HalfEven,
}

impl RoundingMode {
    /// Returns the `UnsignedRoundingMode` for a dividend of the given sign.
    pub(crate) const fn to_unsigned(self, is_positive: bool) -> UnsignedRoundingMode {
        match self {
            Self::Ceiling if is_positive => UnsignedRoundingMode::Infinity,
            Self::Ceiling => UnsignedRoundingMode::Zero,
            Self::Floor if is_positive => UnsignedRoundingMode::Zero,
            Self::Floor => UnsignedRoundingMode::Infinity,
            Self::HalfCeiling if is_positive => UnsignedRoundingMode::HalfInfinity,
            Self::HalfCeiling => UnsignedRoundingMode::HalfZero,
            Self::HalfFloor if is_positive => UnsignedRoundingMode::HalfZero,
            Self::HalfFloor => UnsignedRoundingMode::HalfInfinity,
            Self::HalfEven => UnsignedRoundingMode::HalfEven,
        }
    }
}

pub(crate) trait Roundable:
    Euclid + Div + PartialOrd + Signed + FromPrimitive + ToPrimitive + NumCast + ConstZero + Copy
{
    fn is_exact(dividend: Self, divisor: Self) -> bool;
    fn compare_remainder(dividend: Self, divisor: Self) -> Ordering;
    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool;
    fn result_floor(dividend: Self, divisor: Self) -> u128;
    fn result_ceil(dividend: Self, divisor: Self) -> u128;
    fn quotient_abs(dividend: Self, divisor: Self) -> Self {
        (dividend / divisor).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IncrementRounder<T: Roundable> {
    sign: bool,
    dividend: T,
    divisor: T,
}

impl<T: Roundable> IncrementRounder<T> {
    #[inline]
    pub(crate) fn from_signed_num(number: T, increment: NonZeroI64) -> FieldResult<Self> {
        let increment = <T as NumCast>::from(increment.get()).field_unwrap()?;
        Ok(Self {
            sign: number >= T::ZERO,
            dividend: number,
            divisor: increment,
        })
    }

    #[inline]
    pub(crate) fn round(&self, mode: RoundingMode) -> FieldResult<i128> {
        let unsigned_mode = mode.to_unsigned(self.sign);
        let mut rounded =
            apply_unsigned_rounding_mode(self.dividend, self.divisor, unsigned_mode) as i128;
        if !self.sign {
            rounded = -rounded;
        }
        let divisor = <i128 as NumCast>::from(self.divisor).field_unwrap()?;
        Ok(rounded * divisor)
    }
}

impl Roundable for i128 {
    fn is_exact(dividend: Self, divisor: Self) -> bool {
        dividend.rem_euclid(divisor) == 0
    }

    fn compare_remainder(dividend: Self, divisor: Self) -> Ordering {
        // Doubling the remainder keeps odd divisors exact.
        ((dividend.abs() % divisor) * 2).cmp(&divisor)
    }

    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool {
        Roundable::result_floor(dividend, divisor).rem_euclid(2) == 0
    }

    fn result_floor(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128
    }

    fn result_ceil(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128 + 1
    }
}

impl Roundable for i64 {
    fn is_exact(dividend: Self, divisor: Self) -> bool {
        dividend.rem_euclid(divisor) == 0
    }

    fn compare_remainder(dividend: Self, divisor: Self) -> Ordering {
        ((<i128 as From<i64>>::from(dividend.abs()) % <i128 as From<i64>>::from(divisor)) * 2)
            .cmp(&<i128 as From<i64>>::from(divisor))
    }

    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool {
        Roundable::result_floor(dividend, divisor).rem_euclid(2) == 0
    }

    fn result_floor(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128
    }

    fn result_ceil(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128 + 1
    }
}

/// Rounds a tick count to a multiple of `unit_ticks` under `mode`.
///
/// The result must fit back into the `i64` tick range; a boundary past
/// either end is an overflow.
pub(crate) fn round_ticks(
    ticks: i64,
    unit_ticks: NonZeroI64,
    mode: RoundingMode,
) -> FieldResult<i64> {
    let rounded =
        IncrementRounder::<i128>::from_signed_num(<i128 as From<i64>>::from(ticks), unit_ticks)?
            .round(mode)?;
    i64::try_from(rounded).map_err(|_| {
        FieldError::overflow().with_message("rounded instant exceeded the valid tick range.")
    })
}

/// Applies the unsigned rounding mode to the magnitude of the quotient.
fn apply_unsigned_rounding_mode<T: Roundable>(
    dividend: T,
    divisor: T,
    unsigned_mode: UnsignedRoundingMode,
) -> u128 {
    if Roundable::is_exact(dividend, divisor) {
        return Roundable::result_floor(dividend, divisor);
    }

    if unsigned_mode == UnsignedRoundingMode::Zero {
        return Roundable::result_floor(dividend, divisor);
    };
    if unsigned_mode == UnsignedRoundingMode::Infinity {
        return Roundable::result_ceil(dividend, divisor);
    };

    match Roundable::compare_remainder(dividend, divisor) {
        Ordering::Less => Roundable::result_floor(dividend, divisor),
        Ordering::Greater => Roundable::result_ceil(dividend, divisor),
        Ordering::Equal => {
            if unsigned_mode == UnsignedRoundingMode::HalfZero {
                return Roundable::result_floor(dividend, divisor);
            };
            if unsigned_mode == UnsignedRoundingMode::HalfInfinity {
                return Roundable::result_ceil(dividend, divisor);
            };
            debug_assert!(unsigned_mode == UnsignedRoundingMode::HalfEven);
            // The even candidate counted in whole units from zero.
            if Roundable::is_even_cardinal(dividend, divisor) {
                return Roundable::result_floor(dividend, divisor);
            }
            Roundable::result_ceil(dividend, divisor)
        }
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Debug;
    use core::num::NonZeroI64;

    use super::{round_ticks, IncrementRounder, Roundable, RoundingMode};

    #[derive(Debug)]
    struct TestCase<T> {
        x: T,
        increment: i64,
        floor: i128,
        ceiling: i128,
        half_floor: i128,
        half_ceiling: i128,
        half_even: i128,
    }

    impl<T: Roundable + Debug> TestCase<T> {
        fn run(&self) {
            let rounder =
                IncrementRounder::from_signed_num(self.x, NonZeroI64::new(self.increment).unwrap())
                    .unwrap();
            assert_eq!(
                self.floor,
                rounder.round(RoundingMode::Floor).unwrap(),
                "Testing {:?}/{:?} with mode Floor",
                self.x,
                self.increment
            );
            assert_eq!(
                self.ceiling,
                rounder.round(RoundingMode::Ceiling).unwrap(),
                "Testing {:?}/{:?} with mode Ceiling",
                self.x,
                self.increment
            );
            assert_eq!(
                self.half_floor,
                rounder.round(RoundingMode::HalfFloor).unwrap(),
                "Testing {:?}/{:?} with mode HalfFloor",
                self.x,
                self.increment
            );
            assert_eq!(
                self.half_ceiling,
                rounder.round(RoundingMode::HalfCeiling).unwrap(),
                "Testing {:?}/{:?} with mode HalfCeiling",
                self.x,
                self.increment
            );
            assert_eq!(
                self.half_even,
                rounder.round(RoundingMode::HalfEven).unwrap(),
                "Testing {:?}/{:?} with mode HalfEven",
                self.x,
                self.increment
            );
        }
    }

    #[test]
    fn basic_rounding_cases() {
        const CASES: &[TestCase<i128>] = &[
            TestCase {
                x: 100,
                increment: 10,
                floor: 100,
                ceiling: 100,
                half_floor: 100,
                half_ceiling: 100,
                half_even: 100,
            },
            TestCase {
                x: 101,
                increment: 10,
                floor: 100,
                ceiling: 110,
                half_floor: 100,
                half_ceiling: 100,
                half_even: 100,
            },
            TestCase {
                x: 105,
                increment: 10,
                floor: 100,
                ceiling: 110,
                half_floor: 100,
                half_ceiling: 110,
                half_even: 100,
            },
            TestCase {
                x: 107,
                increment: 10,
                floor: 100,
                ceiling: 110,
                half_floor: 110,
                half_ceiling: 110,
                half_even: 110,
            },
            TestCase {
                x: -101,
                increment: 10,
                floor: -110,
                ceiling: -100,
                half_floor: -100,
                half_ceiling: -100,
                half_even: -100,
            },
            TestCase {
                x: -105,
                increment: 10,
                floor: -110,
                ceiling: -100,
                half_floor: -110,
                half_ceiling: -100,
                half_even: -100,
            },
            TestCase {
                x: -107,
                increment: 10,
                floor: -110,
                ceiling: -100,
                half_floor: -110,
                half_ceiling: -110,
                half_even: -110,
            },
        ];

        for case in CASES {
            case.run();
        }
    }

    #[test]
    fn odd_divisor_midpoint_is_not_a_tie() {
        // 4/3 is below the midpoint; every half mode resolves down.
        TestCase {
            x: 4i64,
            increment: 3,
            floor: 3,
            ceiling: 6,
            half_floor: 3,
            half_ceiling: 3,
            half_even: 3,
        }
        .run();

        TestCase {
            x: -14i64,
            increment: 3,
            floor: -15,
            ceiling: -12,
            half_floor: -15,
            half_ceiling: -15,
            half_even: -15,
        }
        .run();
    }

    #[test]
    fn half_even_resolves_to_even_unit_count() {
        // 90 is halfway between 60 and 120; 120 is the even multiple.
        assert_eq!(
            round_ticks(90, NonZeroI64::new(60).unwrap(), RoundingMode::HalfEven).unwrap(),
            120
        );
        // 30 is halfway between 0 and 60; 0 is the even multiple.
        assert_eq!(
            round_ticks(30, NonZeroI64::new(60).unwrap(), RoundingMode::HalfEven).unwrap(),
            0
        );
        assert_eq!(
            round_ticks(-90, NonZeroI64::new(60).unwrap(), RoundingMode::HalfEven).unwrap(),
            -120
        );
    }

    #[test]
    fn boundary_overflow_is_reported() {
        assert!(round_ticks(
            i64::MAX - 2,
            NonZeroI64::new(60).unwrap(),
            RoundingMode::Ceiling
        )
        .is_err());
        assert_eq!(
            round_ticks(i64::MIN, NonZeroI64::new(1).unwrap(), RoundingMode::Floor).unwrap(),
            i64::MIN
        );
    }
}
