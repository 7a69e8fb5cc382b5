//! Shared code generation utilities for the hpkl code generators.
//!
//! This crate provides the target-independent pieces used by the language
//! generators (`hpkl-codegen-java`, `hpkl-codegen-kotlin`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`naming`] - Module name mapping and reserved-word renaming
//! - [`enums`] - Enum constant normalization and collision detection
//! - [`layout`] - Effective property layout of a class
//! - [`literals`] - Integer widths and literal text helpers
//! - [`defaults`] - Default value lookup
//! - [`imports`] - Qualified type names and import collection
//! - [`language`] - Language-specific abstractions (LanguageCodegen, GeneratedFile)

pub mod builder;
pub mod defaults;
pub mod enums;
pub mod imports;
pub mod language;
pub mod layout;
pub mod literals;
pub mod naming;

mod error;
mod options;

pub use error::{Error, Result};
pub use options::GeneratorOptions;
