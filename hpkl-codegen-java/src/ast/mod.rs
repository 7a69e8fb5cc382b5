//! Java declaration builders.
//!
//! Builders hold already-rendered type names, so rendering needs no context.

mod class;
mod enums;
mod members;

pub use class::{Class, NestedType};
pub use enums::{Enum, EnumConstant};
pub use members::{Field, Method, Param};
