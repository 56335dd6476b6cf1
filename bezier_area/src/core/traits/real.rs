use super::FuzzyOrd;
use static_aabb2d_index::IndexableNum;

/// Real number type the engine is generic over (implemented for `f32` and `f64`).
///
/// Besides the usual float operations it must be indexable by `static_aabb2d_index` so curve
/// bounds can be loaded into a spatial index.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyOrd
    + std::default::Default
    + std::fmt::Debug
    + IndexableNum
    + 'static
{
    #[inline]
    fn tau() -> Self {
        Self::from(std::f64::consts::TAU).unwrap()
    }

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn three() -> Self {
        Self::two() + Self::one()
    }

    #[inline]
    fn four() -> Self {
        Self::two() + Self::two()
    }

    /// `true` if the value is neither NaN nor infinite.
    #[inline]
    fn is_finite(self) -> bool {
        self.abs() <= num_traits::real::Real::max_value()
    }

    /// Smallest positive normal value, used as the floor for relative y steps.
    #[inline]
    fn tiny() -> Self {
        num_traits::real::Real::min_positive_value()
    }

    #[inline]
    fn min_value() -> Self {
        num_traits::real::Real::min_value()
    }

    #[inline]
    fn max_value() -> Self {
        num_traits::real::Real::max_value()
    }
}

impl Real for f32 {
    #[inline]
    fn tau() -> Self {
        std::f32::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn three() -> Self {
        3.0f32
    }

    #[inline]
    fn four() -> Self {
        4.0f32
    }
}

impl Real for f64 {
    #[inline]
    fn tau() -> Self {
        std::f64::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn three() -> Self {
        3.0f64
    }

    #[inline]
    fn four() -> Self {
        4.0f64
    }
}
