use crate::{
    core::{math::Transform, traits::Real},
    curve::Curve,
    path::PathCmd,
};
use std::iter::FusedIterator;

/// Iterator exporting curves as path commands.
///
/// Consecutive curves sharing an end point are drawn as one run. A gap between curves inside a
/// contour is bridged with a line, and each contour ends with [PathCmd::Close] (before the next
/// start point or at the end of the list).
#[derive(Debug, Clone)]
pub struct BodyCommands<'a, T = f64> {
    curves: &'a [Curve<T>],
    index: usize,
    junction: bool,
    transform: Option<Transform<T>>,
}

impl<'a, T> BodyCommands<'a, T>
where
    T: Real,
{
    pub(crate) fn new(curves: &'a [Curve<T>], transform: Option<Transform<T>>) -> Self {
        Self {
            curves,
            index: 0,
            junction: false,
            transform,
        }
    }
}

impl<'a, T> Iterator for BodyCommands<'a, T>
where
    T: Real,
{
    type Item = PathCmd<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let cmd = if self.junction {
            self.junction = false;
            match self.curves.get(self.index) {
                Some(c) if c.order() != 0 => PathCmd::LineTo(c.start()),
                _ => PathCmd::Close,
            }
        } else {
            let c = self.curves.get(self.index)?;
            self.index += 1;
            self.junction = match self.curves.get(self.index) {
                Some(n) => n.order() == 0 || c.end() != n.start(),
                None => true,
            };
            c.segment()
        };

        Some(match &self.transform {
            Some(t) => cmd.transformed(t),
            None => cmd,
        })
    }
}

impl<'a, T> FusedIterator for BodyCommands<'a, T> where T: Real {}
