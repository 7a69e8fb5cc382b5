//! Kotlin type names.

use hpkl_codegen::imports::{ClassName, ImportCollector};

/// A Kotlin type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum KotlinType {
    Class {
        name: ClassName,
        arguments: Vec<KotlinType>,
        nullable: bool,
    },
    /// A type parameter of a generic type alias.
    Variable { name: String, nullable: bool },
}

impl KotlinType {
    pub fn class(name: ClassName) -> Self {
        Self::Class {
            name,
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn parameterized(name: ClassName, arguments: Vec<KotlinType>) -> Self {
        Self::Class {
            name,
            arguments,
            nullable: false,
        }
    }

    pub fn kotlin(simple_name: &str) -> Self {
        Self::class(ClassName::new("kotlin", simple_name))
    }

    pub fn collection(simple_name: &str, arguments: Vec<KotlinType>) -> Self {
        Self::parameterized(ClassName::new("kotlin.collections", simple_name), arguments)
    }

    pub fn any() -> Self {
        Self::kotlin("Any")
    }

    /// `Any?`, the type of unknown values.
    pub fn any_nullable() -> Self {
        Self::any().nullable()
    }

    pub fn string() -> Self {
        Self::kotlin("String")
    }

    pub fn nullable(self) -> Self {
        match self {
            Self::Class {
                name, arguments, ..
            } => Self::Class {
                name,
                arguments,
                nullable: true,
            },
            Self::Variable { name, .. } => Self::Variable {
                name,
                nullable: true,
            },
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Class { nullable, .. } | Self::Variable { nullable, .. } => *nullable,
        }
    }

    /// Render the type, registering every class it references.
    pub fn render(&self, imports: &mut ImportCollector) -> String {
        let mut out = match self {
            Self::Variable { name, .. } => name.clone(),
            Self::Class {
                name, arguments, ..
            } => {
                let mut out = imports.reference(name);
                if !arguments.is_empty() {
                    let arguments: Vec<String> =
                        arguments.iter().map(|arg| arg.render(imports)).collect();
                    out.push('<');
                    out.push_str(&arguments.join(", "));
                    out.push('>');
                }
                out
            }
        };
        if self.is_nullable() {
            out.push('?');
        }
        out
    }
}
