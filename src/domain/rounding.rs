//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the crate.
///
/// The pool always rounds against the caller: amounts the caller pays
/// round [`Up`](Self::Up), amounts the caller receives round
/// [`Down`](Self::Down).
///
/// # Examples
///
/// ```
/// use xy_amm::domain::Rounding;
///
/// assert_eq!(Rounding::Up.div(10, 3), Some(4));
/// assert_eq!(Rounding::Down.div(10, 3), Some(3));
/// assert_eq!(Rounding::Down.div(10, 0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ceiling.
    Up,
    /// Floor.
    Down,
}

impl Rounding {
    /// Divides `numerator` by `denominator` in this direction.
    ///
    /// Returns `None` when `denominator` is zero.  The ceiling branch uses
    /// quotient-plus-remainder so it cannot overflow near `u128::MAX`.
    #[must_use]
    pub const fn div(self, numerator: u128, denominator: u128) -> Option<u128> {
        if denominator == 0 {
            return None;
        }
        let q = numerator / denominator;
        match self {
            Self::Down => Some(q),
            Self::Up => {
                if numerator % denominator == 0 {
                    Some(q)
                } else {
                    // q < numerator here, so q + 1 cannot wrap
                    Some(q + 1)
                }
            }
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_division_agrees() {
        assert_eq!(Rounding::Up.div(12, 4), Some(3));
        assert_eq!(Rounding::Down.div(12, 4), Some(3));
    }

    #[test]
    fn remainder_splits_directions() {
        assert_eq!(Rounding::Up.div(7, 2), Some(4));
        assert_eq!(Rounding::Down.div(7, 2), Some(3));
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(Rounding::Up.div(1, 0), None);
        assert_eq!(Rounding::Down.div(0, 0), None);
    }

    #[test]
    fn ceiling_near_max() {
        assert_eq!(Rounding::Up.div(u128::MAX, 2), Some(u128::MAX / 2 + 1));
        assert_eq!(Rounding::Up.div(u128::MAX, 1), Some(u128::MAX));
    }

    #[test]
    fn flip_is_involutive() {
        assert_eq!(Rounding::Up.flip(), Rounding::Down);
        assert_eq!(Rounding::Up.flip().flip(), Rounding::Up);
    }
}
