mod class_emitter;
mod generator;
mod naming;
mod type_mapper;
mod types;
mod values;

pub mod ast;

pub use ast::{Class, ClassKind, EnumClass, EnumConstant, Function, NestedType, Param, Property, TypeAlias};
pub use generator::Generator;
pub use hpkl_codegen::language::{GeneratedFile, LanguageCodegen};
pub use naming::{KOTLIN_KEYWORDS, KOTLIN_NAMING, escape};
pub use type_mapper::{KotlinClasses, KotlinTypeMapper};
pub use types::KotlinType;
pub use values::KotlinValueRenderer;
