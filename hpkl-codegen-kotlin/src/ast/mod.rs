//! Kotlin declaration builders.
//!
//! Builders hold already-rendered type names, so rendering needs no context.

mod alias;
mod class;
mod enums;
mod members;

pub use alias::TypeAlias;
pub use class::{Class, ClassKind, NestedType};
pub use enums::{EnumClass, EnumConstant};
pub use members::{Function, Param, Property};
