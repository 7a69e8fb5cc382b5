//! Module schema model for the hpkl code generators.
//!
//! A [`ModuleSchema`] is the structural description of one configuration module:
//! its module class, nested classes, and type aliases. Schemas are produced by an
//! external evaluator and are read-only from the generators' point of view.
//!
//! # Module Organization
//!
//! - [`ModuleSchema`] - One module's classes and type aliases, in declaration order
//! - [`Registry`] - Arena owning every class and alias a schema can reference
//! - [`TypeRef`] - Closed algebra of type references
//! - [`Value`] - Evaluated default values
//! - [`document`] - JSON interchange format emitted by the evaluator
//! - [`testing`] - Fixture builders (feature-gated)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod class;
mod error;
mod module;
mod registry;
mod types;
mod value;

pub mod document;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use class::{Annotation, BuiltinClass, ClassDef, ClassOrigin, PropertyDef};
pub use document::{EmbeddedDefaults, LoadedSchema, SchemaDocument};
pub use error::{Error, Result};
pub use module::ModuleSchema;
pub use registry::Registry;
pub use types::{AliasId, ClassId, StdlibAlias, TypeAliasDef, TypeParameter, TypeRef, Variance};
pub use value::{DataSize, DataSizeUnit, Duration, DurationUnit, ObjectValue, Value};
