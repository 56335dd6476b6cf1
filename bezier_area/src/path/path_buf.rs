use super::{PathCmd, PathSource, WindingRule};
use crate::core::{
    math::{vec2, Transform},
    traits::Real,
};
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Owned sequence of path commands with a winding rule.
///
/// # Examples
///
/// ```
/// # use bezier_area::path::*;
/// let mut path = Path::new(WindingRule::EvenOdd);
/// path.move_to(0.0, 0.0)
///     .line_to(4.0, 0.0)
///     .quad_to(6.0, 2.0, 4.0, 4.0)
///     .cubic_to(3.0, 5.0, 1.0, 5.0, 0.0, 4.0)
///     .close();
/// assert_eq!(path.len(), 5);
/// assert_eq!(path.winding_rule(), WindingRule::EvenOdd);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Path<T = f64> {
    commands: Vec<PathCmd<T>>,
    winding_rule: WindingRule,
}

impl<T> Path<T>
where
    T: Real,
{
    pub fn new(winding_rule: WindingRule) -> Self {
        Self {
            commands: Vec::new(),
            winding_rule,
        }
    }

    pub fn with_capacity(capacity: usize, winding_rule: WindingRule) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            winding_rule,
        }
    }

    /// Axis aligned rectangle with top left corner at `(x, y)` (nonzero rule).
    pub fn rect(x: T, y: T, width: T, height: T) -> Self {
        let mut path = Self::with_capacity(5, WindingRule::NonZero);
        path.move_to(x, y)
            .line_to(x + width, y)
            .line_to(x + width, y + height)
            .line_to(x, y + height)
            .close();
        path
    }

    /// Ellipse centered at `(cx, cy)` approximated with four cubic curves (nonzero rule).
    pub fn ellipse(cx: T, cy: T, rx: T, ry: T) -> Self {
        // control point distance for a quarter circle of unit radius
        let k = T::from(0.552_284_749_830_793_4).unwrap();
        let (kx, ky) = (rx * k, ry * k);
        let mut path = Self::with_capacity(6, WindingRule::NonZero);
        path.move_to(cx + rx, cy)
            .cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry)
            .cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy)
            .cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry)
            .cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy)
            .close();
        path
    }

    #[inline]
    pub fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    #[inline]
    pub fn set_winding_rule(&mut self, winding_rule: WindingRule) {
        self.winding_rule = winding_rule;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn commands(&self) -> &[PathCmd<T>] {
        &self.commands
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PathCmd<T>> + '_ {
        self.commands.iter()
    }

    #[inline]
    pub fn push(&mut self, cmd: PathCmd<T>) -> &mut Self {
        self.commands.push(cmd);
        self
    }

    pub fn move_to(&mut self, x: T, y: T) -> &mut Self {
        self.push(PathCmd::MoveTo(vec2(x, y)))
    }

    pub fn line_to(&mut self, x: T, y: T) -> &mut Self {
        self.push(PathCmd::LineTo(vec2(x, y)))
    }

    pub fn quad_to(&mut self, cx: T, cy: T, x: T, y: T) -> &mut Self {
        self.push(PathCmd::QuadTo {
            ctrl: vec2(cx, cy),
            to: vec2(x, y),
        })
    }

    pub fn cubic_to(&mut self, c1x: T, c1y: T, c2x: T, c2y: T, x: T, y: T) -> &mut Self {
        self.push(PathCmd::CubicTo {
            ctrl1: vec2(c1x, c1y),
            ctrl2: vec2(c2x, c2y),
            to: vec2(x, y),
        })
    }

    pub fn close(&mut self) -> &mut Self {
        self.push(PathCmd::Close)
    }

    /// Copy of this path with every point mapped through `transform`.
    pub fn transformed(&self, transform: &Transform<T>) -> Self {
        Self {
            commands: self
                .commands
                .iter()
                .map(|cmd| cmd.transformed(transform))
                .collect(),
            winding_rule: self.winding_rule,
        }
    }
}

impl<T> Index<usize> for Path<T> {
    type Output = PathCmd<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.commands[index]
    }
}

impl<T> Extend<PathCmd<T>> for Path<T> {
    fn extend<I: IntoIterator<Item = PathCmd<T>>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

impl<T> PathSource for Path<T>
where
    T: Real,
{
    type Num = T;

    #[inline]
    fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    #[inline]
    fn iter_commands(&self) -> impl Iterator<Item = PathCmd<T>> + '_ {
        self.commands.iter().copied()
    }
}
