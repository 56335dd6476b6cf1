//! Shared numeric traits, math helpers and visiting control flow used by the area engine.

use self::traits::ControlFlow;
pub mod math;
pub mod traits;

/// Control flow returned from visitor closures (spatial index queries, segment visiting).
#[derive(Debug)]
pub enum Control<B = ()> {
    /// Keep visiting.
    Continue,
    /// Stop visiting and hand back a value.
    Break(B),
}

impl<B> Default for Control<B> {
    #[inline]
    fn default() -> Self {
        Control::Continue
    }
}

impl<B> ControlFlow for Control<B> {
    #[inline]
    fn continuing() -> Self {
        Control::Continue
    }

    #[inline]
    fn should_break(&self) -> bool {
        matches!(*self, Control::Break(_))
    }
}
