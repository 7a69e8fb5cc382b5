//! Java type names.

use hpkl_codegen::imports::{ClassName, ImportCollector};

/// A primitive Java type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Double,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
        }
    }

    /// The `java.lang` wrapper class.
    pub fn wrapper(self) -> ClassName {
        let simple = match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Double => "Double",
        };
        ClassName::new("java.lang", simple)
    }
}

/// A Java type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum JavaType {
    Primitive(Primitive),
    Void,
    Class {
        name: ClassName,
        arguments: Vec<JavaType>,
        /// Type annotation, e.g. the non-null marker.
        annotation: Option<ClassName>,
    },
    /// `? extends T`
    Wildcard(Box<JavaType>),
    Variable(String),
}

impl JavaType {
    pub fn class(name: ClassName) -> Self {
        Self::Class {
            name,
            arguments: Vec::new(),
            annotation: None,
        }
    }

    pub fn parameterized(name: ClassName, arguments: Vec<JavaType>) -> Self {
        Self::Class {
            name,
            arguments,
            annotation: None,
        }
    }

    pub fn object() -> Self {
        Self::class(ClassName::new("java.lang", "Object"))
    }

    pub fn string() -> Self {
        Self::class(ClassName::new("java.lang", "String"))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// The reference form of a primitive; other types are unchanged.
    pub fn boxed(self) -> Self {
        match self {
            Self::Primitive(primitive) => Self::class(primitive.wrapper()),
            Self::Void => Self::class(ClassName::new("java.lang", "Void")),
            other => other,
        }
    }

    pub fn box_if(self, boxed: bool) -> Self {
        if boxed { self.boxed() } else { self }
    }

    /// Attach a type annotation. Only class types can carry one.
    pub fn annotated(self, with: ClassName) -> Self {
        match self {
            Self::Class {
                name, arguments, ..
            } => Self::Class {
                name,
                arguments,
                annotation: Some(with),
            },
            other => other,
        }
    }

    /// Render the type, registering every class it references.
    pub fn render(&self, imports: &mut ImportCollector) -> String {
        match self {
            Self::Primitive(primitive) => primitive.keyword().to_string(),
            Self::Void => "void".to_string(),
            Self::Variable(name) => name.clone(),
            Self::Wildcard(bound) => format!("? extends {}", bound.render(imports)),
            Self::Class {
                name,
                arguments,
                annotation,
            } => {
                let mut out = imports.reference(name);
                if let Some(annotation) = annotation {
                    let marker = format!("@{}", imports.reference(annotation));
                    // A type annotation goes right before the simple name.
                    out = match out.rsplit_once('.') {
                        Some((qualifier, simple)) => format!("{}.{} {}", qualifier, marker, simple),
                        None => format!("{} {}", marker, out),
                    };
                }
                if !arguments.is_empty() {
                    let arguments: Vec<String> =
                        arguments.iter().map(|arg| arg.render(imports)).collect();
                    out.push('<');
                    out.push_str(&arguments.join(", "));
                    out.push('>');
                }
                out
            }
        }
    }
}
