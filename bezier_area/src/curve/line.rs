use super::{orderof, Direction};
use crate::core::{
    math::{min_max, vec2, Vector2},
    traits::Real,
};
use std::cmp::Ordering;

/// Straight, non horizontal curve stored top (`y0`) to bottom (`y1`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line<T = f64> {
    x0: T,
    y0: T,
    x1: T,
    y1: T,
    xmin: T,
    xmax: T,
    direction: Direction,
}

impl<T> Line<T>
where
    T: Real,
{
    /// Line from `(x0, y0)` down to `(x1, y1)`, requires `y0 <= y1`.
    pub fn new(x0: T, y0: T, x1: T, y1: T, direction: Direction) -> Self {
        debug_assert!(y0 <= y1, "line must be stored top to bottom");
        let (xmin, xmax) = min_max(x0, x1);
        Self {
            x0,
            y0,
            x1,
            y1,
            xmin,
            xmax,
            direction,
        }
    }

    /// Line drawn from `p0` to `p1`, `None` if it is horizontal.
    pub fn from_points(p0: Vector2<T>, p1: Vector2<T>) -> Option<Self> {
        match p0.y.partial_cmp(&p1.y)? {
            Ordering::Less => Some(Self::new(p0.x, p0.y, p1.x, p1.y, Direction::Increasing)),
            Ordering::Greater => Some(Self::new(p1.x, p1.y, p0.x, p0.y, Direction::Decreasing)),
            Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn top(&self) -> Vector2<T> {
        vec2(self.x0, self.y0)
    }

    #[inline]
    pub fn bot(&self) -> Vector2<T> {
        vec2(self.x1, self.y1)
    }

    #[inline]
    pub fn x_min(&self) -> T {
        self.xmin
    }

    #[inline]
    pub fn x_max(&self) -> T {
        self.xmax
    }

    pub fn x_for_t(&self, t: T) -> T {
        self.x0 + t * (self.x1 - self.x0)
    }

    pub fn y_for_t(&self, t: T) -> T {
        self.y0 + t * (self.y1 - self.y0)
    }

    pub fn dx_for_t(&self, t: T, deriv: u32) -> T {
        match deriv {
            0 => self.x_for_t(t),
            1 => self.x1 - self.x0,
            _ => T::zero(),
        }
    }

    pub fn dy_for_t(&self, t: T, deriv: u32) -> T {
        match deriv {
            0 => self.y_for_t(t),
            1 => self.y1 - self.y0,
            _ => T::zero(),
        }
    }

    pub fn t_for_y(&self, y: T) -> T {
        if y <= self.y0 {
            return T::zero();
        }
        if y >= self.y1 {
            return T::one();
        }
        (y - self.y0) / (self.y1 - self.y0)
    }

    pub fn x_for_y(&self, y: T) -> T {
        if self.x0 == self.x1 || y <= self.y0 {
            return self.x0;
        }
        if y >= self.y1 {
            return self.x1;
        }
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }

    pub fn with_direction(&self, direction: Direction) -> Self {
        Self {
            direction,
            ..*self
        }
    }

    pub fn sub_curve(&self, ystart: T, yend: T, direction: Direction) -> Self {
        if ystart == self.y0 && yend == self.y1 {
            return self.with_direction(direction);
        }
        if self.x0 == self.x1 {
            return Self::new(self.x0, ystart, self.x1, yend, direction);
        }
        let num = self.x0 - self.x1;
        let denom = self.y0 - self.y1;
        let xstart = self.x0 + (ystart - self.y0) * num / denom;
        let xend = self.x0 + (yend - self.y0) * num / denom;
        Self::new(xstart, ystart, xend, yend, direction)
    }

    /// Analytic ordering of two lines over `yrange`, narrowing `yrange[1]` to their crossing.
    pub fn compare_to(&self, other: &Line<T>, yrange: &mut [T; 2]) -> Ordering {
        assert!(
            yrange[1] > yrange[0],
            "invalid y range {:?} entering line comparison",
            yrange
        );
        yrange[1] = num_traits::real::Real::min(
            num_traits::real::Real::min(yrange[1], self.y1),
            other.y1,
        );
        assert!(
            yrange[1] > yrange[0],
            "backstepping from {:?} to {:?}",
            yrange[0],
            yrange[1]
        );

        if self.xmax <= other.xmin {
            return if self.xmin == other.xmax {
                Ordering::Equal
            } else {
                Ordering::Less
            };
        }
        if self.xmin >= other.xmax {
            return Ordering::Greater;
        }

        let dxa = self.x1 - self.x0;
        let dya = self.y1 - self.y0;
        let dxb = other.x1 - other.x0;
        let dyb = other.y1 - other.y0;
        let denom = dxb * dya - dxa * dyb;
        let y = if denom != T::zero() {
            let num = (self.x0 - other.x0) * dya * dyb - self.y0 * dxa * dyb + other.y0 * dxb * dya;
            let y = num / denom;
            if y <= yrange[0] {
                // crossing is above the range, order by the bottoms
                num_traits::real::Real::min(self.y1, other.y1)
            } else {
                if y < yrange[1] {
                    yrange[1] = y;
                }
                num_traits::real::Real::max(self.y0, other.y0)
            }
        } else {
            num_traits::real::Real::max(self.y0, other.y0)
        };

        orderof(self.x_for_y(y), other.x_for_y(y))
    }
}
