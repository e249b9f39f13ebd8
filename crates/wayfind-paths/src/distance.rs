use std::fmt;
use std::ops::{Add, Sub};

use wayfind_core::Position;

use crate::config::CostModel;

/// A fixed-point cost in hundredths of a grid step.
///
/// Equal estimates compare equal, so frontier tie-breaks are exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost(pub i64);

impl Cost {
    pub const ZERO: Self = Cost(0);
    /// Distance of a cell not reached yet.
    pub const INFINITY: Self = Cost(i64::MAX);

    /// The cost in grid steps.
    pub fn steps(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_infinite(self) -> bool {
        self == Self::INFINITY
    }
}

impl Add for Cost {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Cost(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Cost {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Cost(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            return write!(f, "inf");
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        let v = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", v / 100, v % 100)
    }
}

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Octile-style estimate between two positions.
///
/// Pairs of row and column moves are priced as one diagonal step, the rest
/// as straight steps, even though movement itself stays 4-connected.
#[inline]
pub fn octile(a: Position, b: Position, model: &CostModel) -> Cost {
    let drow = i64::from((a.row - b.row).abs());
    let dcol = i64::from((a.col - b.col).abs());
    let straight = (drow - dcol).abs();
    let diagonal = ((drow + dcol) - straight).abs() / 2;
    Cost(straight * model.straight + diagonal * model.diagonal)
}

/// Extra cost contributed by a cell weight.
#[inline]
pub fn weight_cost(weight: u32, model: &CostModel) -> Cost {
    let scaled = i64::from(weight) * model.straight;
    Cost(scaled.checked_div(model.weight_divisor).unwrap_or(0))
}
