use super::PathError;
use crate::core::{
    math::{Transform, Vector2},
    traits::Real,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rule deciding whether a point is inside a path from its winding number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum WindingRule {
    /// Inside when the winding number is odd.
    EvenOdd,
    /// Inside when the winding number is not zero.
    #[default]
    NonZero,
}

impl WindingRule {
    /// # Examples
    ///
    /// ```
    /// # use bezier_area::path::*;
    /// assert!(WindingRule::NonZero.is_in(2));
    /// assert!(!WindingRule::EvenOdd.is_in(2));
    /// assert!(WindingRule::EvenOdd.is_in(-1));
    /// ```
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            WindingRule::EvenOdd => winding_number % 2 != 0,
            WindingRule::NonZero => winding_number != 0,
        }
    }
}

impl TryFrom<i32> for WindingRule {
    type Error = PathError;

    /// Classic integer codes: `0` is even-odd, `1` is nonzero.
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WindingRule::EvenOdd),
            1 => Ok(WindingRule::NonZero),
            other => Err(PathError::UnknownWindingRule(other)),
        }
    }
}

/// One path drawing command with absolute coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum PathCmd<T = f64> {
    MoveTo(Vector2<T>),
    LineTo(Vector2<T>),
    QuadTo {
        ctrl: Vector2<T>,
        to: Vector2<T>,
    },
    CubicTo {
        ctrl1: Vector2<T>,
        ctrl2: Vector2<T>,
        to: Vector2<T>,
    },
    /// Close the current contour with a line back to its move-to point.
    Close,
}

impl<T> PathCmd<T>
where
    T: Real,
{
    /// Point the command leaves the pen at (`None` for [PathCmd::Close]).
    #[inline]
    pub fn end_point(&self) -> Option<Vector2<T>> {
        match *self {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => Some(p),
            PathCmd::QuadTo { to, .. } | PathCmd::CubicTo { to, .. } => Some(to),
            PathCmd::Close => None,
        }
    }

    /// `true` if every coordinate of the command is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => p.is_finite(),
            PathCmd::QuadTo { ctrl, to } => ctrl.is_finite() && to.is_finite(),
            PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                ctrl1.is_finite() && ctrl2.is_finite() && to.is_finite()
            }
            PathCmd::Close => true,
        }
    }

    /// Command with every point mapped through `transform`.
    pub fn transformed(&self, transform: &Transform<T>) -> Self {
        match *self {
            PathCmd::MoveTo(p) => PathCmd::MoveTo(transform.apply(p)),
            PathCmd::LineTo(p) => PathCmd::LineTo(transform.apply(p)),
            PathCmd::QuadTo { ctrl, to } => PathCmd::QuadTo {
                ctrl: transform.apply(ctrl),
                to: transform.apply(to),
            },
            PathCmd::CubicTo { ctrl1, ctrl2, to } => PathCmd::CubicTo {
                ctrl1: transform.apply(ctrl1),
                ctrl2: transform.apply(ctrl2),
                to: transform.apply(to),
            },
            PathCmd::Close => PathCmd::Close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn winding_rule_codes() {
        assert_eq!(WindingRule::try_from(0_i32), Ok(WindingRule::EvenOdd));
        assert_eq!(WindingRule::try_from(1_i32), Ok(WindingRule::NonZero));
        assert_eq!(
            WindingRule::try_from(7_i32),
            Err(PathError::UnknownWindingRule(7))
        );
    }

    #[test]
    fn finite_checks_every_point() {
        let cmd = PathCmd::CubicTo {
            ctrl1: vec2(0.0, 0.0),
            ctrl2: vec2(f64::INFINITY, 1.0),
            to: vec2(1.0, 1.0),
        };
        assert!(!cmd.is_finite());
        assert!(PathCmd::<f64>::Close.is_finite());
        assert_eq!(cmd.end_point(), Some(vec2(1.0, 1.0)));
    }
}
