//! Path protocol: the command sequences bodies are built from and exported as.
mod command;
mod error;
mod path_buf;

pub use command::{PathCmd, WindingRule};
pub use error::PathError;
pub use path_buf::Path;

use crate::core::traits::Real;

/// Anything that can be read as a sequence of [PathCmd] under a [WindingRule].
///
/// Implemented by [Path] and by [Body](crate::area::Body) (which exports its curves), so
/// ingestion and relationship queries work the same for both.
pub trait PathSource {
    type Num: Real;

    /// Rule used to decide which regions the commands enclose.
    fn winding_rule(&self) -> WindingRule;

    /// Iterate the commands in order.
    fn iter_commands(&self) -> impl Iterator<Item = PathCmd<Self::Num>> + '_;
}
