mod class_emitter;
mod generator;
mod naming;
mod type_mapper;
mod types;
mod values;

pub mod ast;

pub use ast::{Class, Enum, EnumConstant, Field, Method, NestedType, Param};
pub use generator::Generator;
pub use hpkl_codegen::language::{GeneratedFile, LanguageCodegen};
pub use naming::JAVA_NAMING;
pub use type_mapper::{JavaClasses, JavaTypeMapper};
pub use types::{JavaType, Primitive};
pub use values::JavaValueRenderer;
