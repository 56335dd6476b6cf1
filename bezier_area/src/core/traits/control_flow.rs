use static_aabb2d_index as aabb_index;

/// Trait for control flow inside visiting methods.
///
/// Visitors passed to [Body::visit_boundary_segments](crate::area::Body::visit_boundary_segments)
/// may return `()` to always continue or [Control](crate::core::Control) to stop early.
///
/// # Examples
///
/// ```
/// # use bezier_area::core::*;
/// # use bezier_area::area::*;
/// # use bezier_area::path::*;
/// let body = Body::from_source(&Path::rect(0.0, 0.0, 4.0, 4.0)).unwrap();
/// let mut visited = 0;
/// body.visit_boundary_segments(&mut |_seg| {
///     visited += 1;
///     Control::Break(())
/// });
///
/// assert_eq!(visited, 1);
/// ```
pub trait ControlFlow {
    /// Constructs state indicating to continue iteration/visiting.
    fn continuing() -> Self;

    /// Returns `true` if control flow should break/stop iteration.
    fn should_break(&self) -> bool;
}

impl<C> ControlFlow for C
where
    C: aabb_index::ControlFlow,
{
    #[inline]
    fn continuing() -> Self {
        C::continuing()
    }

    #[inline]
    fn should_break(&self) -> bool {
        self.should_break()
    }
}
