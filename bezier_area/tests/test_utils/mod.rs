#![allow(dead_code)]
mod body_test_properties;
mod path_modifiers;

pub use body_test_properties::*;
pub use path_modifiers::*;
