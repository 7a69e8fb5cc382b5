//! Type references and type aliases.

use std::collections::HashMap;

/// Handle to a class owned by a [`Registry`](crate::Registry).
///
/// Identity comparisons between classes go through this handle, never through names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) usize);

/// Handle to a type alias owned by a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AliasId(pub(crate) usize);

/// A reference to a type, as written on a property or inside another type.
///
/// The algebra is closed: every consumer matches on it exhaustively, so adding a
/// variant is a compile error wherever it is not handled.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// The unknown type (no annotation).
    Unknown,
    /// The bottom type.
    Nothing,
    /// A single string literal type, e.g. `"Seeds"`.
    StringLiteral(String),
    /// A class, possibly parameterized.
    Class {
        class: ClassId,
        type_arguments: Vec<TypeRef>,
    },
    /// `T?`
    Nullable(Box<TypeRef>),
    /// A refinement such as `Int(isPositive)`. Not representable in target type systems.
    Constrained(Box<TypeRef>),
    /// A type alias, possibly parameterized.
    Alias {
        alias: AliasId,
        type_arguments: Vec<TypeRef>,
    },
    /// A function type. No target surface supports these.
    Function,
    /// `A|B|C`
    Union(Vec<TypeRef>),
    /// A type parameter, e.g. `T` on the right-hand side of a generic alias.
    TypeVariable(String),
}

impl TypeRef {
    /// Reference a class without type arguments.
    pub fn class(class: ClassId) -> Self {
        Self::Class {
            class,
            type_arguments: Vec::new(),
        }
    }

    /// Reference a parameterized class.
    pub fn generic(class: ClassId, type_arguments: Vec<TypeRef>) -> Self {
        Self::Class {
            class,
            type_arguments,
        }
    }

    /// Reference a builtin class.
    pub fn builtin(builtin: crate::BuiltinClass) -> Self {
        Self::class(builtin.id())
    }

    /// Reference a parameterized builtin class, e.g. `List<String>`.
    pub fn builtin_of(builtin: crate::BuiltinClass, type_arguments: Vec<TypeRef>) -> Self {
        Self::generic(builtin.id(), type_arguments)
    }

    /// Reference a type alias without type arguments.
    pub fn alias(alias: AliasId) -> Self {
        Self::Alias {
            alias,
            type_arguments: Vec::new(),
        }
    }

    /// Reference a well-known standard library alias.
    pub fn stdlib_alias(alias: StdlibAlias) -> Self {
        Self::alias(alias.id())
    }

    /// Wrap in [`TypeRef::Nullable`].
    pub fn nullable(inner: TypeRef) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Wrap in [`TypeRef::Constrained`].
    pub fn constrained(inner: TypeRef) -> Self {
        Self::Constrained(Box::new(inner))
    }

    /// Create a string literal type.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::StringLiteral(value.into())
    }

    /// Create a union of string literal types.
    pub fn literal_union<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Union(literals.into_iter().map(Self::literal).collect())
    }

    /// Type arguments of a class or alias reference; empty for every other variant.
    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            Self::Class { type_arguments, .. } | Self::Alias { type_arguments, .. } => {
                type_arguments
            }
            _ => &[],
        }
    }

    /// Strip nullability and refinements.
    pub fn unwrap_refinements(&self) -> &TypeRef {
        match self {
            Self::Nullable(inner) | Self::Constrained(inner) => inner.unwrap_refinements(),
            other => other,
        }
    }

    /// Whether `null` is a value of this type, looking through refinements.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Nullable(_) => true,
            Self::Constrained(inner) => inner.is_nullable(),
            _ => false,
        }
    }

    /// Replace type variables bound in `bindings`; unbound variables are kept.
    pub fn substitute(&self, bindings: &HashMap<&str, TypeRef>) -> TypeRef {
        let all = |types: &[TypeRef]| types.iter().map(|t| t.substitute(bindings)).collect();
        match self {
            Self::TypeVariable(name) => bindings
                .get(name.as_str())
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::Class {
                class,
                type_arguments,
            } => Self::Class {
                class: *class,
                type_arguments: all(type_arguments),
            },
            Self::Alias {
                alias,
                type_arguments,
            } => Self::Alias {
                alias: *alias,
                type_arguments: all(type_arguments),
            },
            Self::Nullable(inner) => Self::nullable(inner.substitute(bindings)),
            Self::Constrained(inner) => Self::constrained(inner.substitute(bindings)),
            Self::Union(members) => Self::Union(all(members)),
            Self::Unknown
            | Self::Nothing
            | Self::StringLiteral(_)
            | Self::Function => self.clone(),
        }
    }
}

/// Variance of a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    Covariant,
    Contravariant,
    #[default]
    Invariant,
}

/// A declared type parameter of a generic type alias.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: String,
    pub variance: Variance,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>, variance: Variance) -> Self {
        Self {
            name: name.into(),
            variance,
        }
    }
}

/// A type alias declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDef {
    /// e.g. `org.mod#Diet`
    pub qualified_name: String,
    pub simple_name: String,
    /// Name of the declaring module, e.g. `org.mod`.
    pub module_name: String,
    pub aliased_type: TypeRef,
    pub type_parameters: Vec<TypeParameter>,
    /// Library-defined aliases can be referenced but never re-emitted.
    pub is_standard_library_member: bool,
    pub doc_comment: Option<String>,
}

impl TypeAliasDef {
    pub fn new(module_name: &str, simple_name: &str, aliased_type: TypeRef) -> Self {
        Self {
            qualified_name: format!("{}#{}", module_name, simple_name),
            simple_name: simple_name.to_string(),
            module_name: module_name.to_string(),
            aliased_type,
            type_parameters: Vec::new(),
            is_standard_library_member: false,
            doc_comment: None,
        }
    }

    /// Bind this alias's type parameters to `type_arguments` positionally.
    ///
    /// Missing arguments are bound to [`TypeRef::Unknown`]; surplus arguments are ignored.
    pub fn bindings<'a>(&'a self, type_arguments: &[TypeRef]) -> HashMap<&'a str, TypeRef> {
        self.type_parameters
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let arg = type_arguments.get(i).cloned().unwrap_or(TypeRef::Unknown);
                (param.name.as_str(), arg)
            })
            .collect()
    }
}

/// Standard library aliases that every registry knows about.
///
/// These sit at fixed positions in the registry so they can be referenced
/// without a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdlibAlias {
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
    UInt,
    DurationUnit,
    DataSizeUnit,
    Uri,
    NonNull,
}

impl StdlibAlias {
    pub const ALL: [StdlibAlias; 11] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt,
        Self::DurationUnit,
        Self::DataSizeUnit,
        Self::Uri,
        Self::NonNull,
    ];

    pub fn simple_name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt => "UInt",
            Self::DurationUnit => "DurationUnit",
            Self::DataSizeUnit => "DataSizeUnit",
            Self::Uri => "Uri",
            Self::NonNull => "NonNull",
        }
    }

    pub fn qualified_name(self) -> String {
        format!("pkl.base#{}", self.simple_name())
    }

    pub fn id(self) -> AliasId {
        AliasId(self as usize)
    }

    /// Look up a well-known alias by its qualified name, e.g. `pkl.base#UInt8`.
    pub fn from_qualified_name(name: &str) -> Option<Self> {
        let simple = name.strip_prefix("pkl.base#")?;
        Self::ALL.into_iter().find(|alias| alias.simple_name() == simple)
    }

    pub(crate) fn definition(self) -> TypeAliasDef {
        use crate::BuiltinClass;

        let int = || TypeRef::constrained(TypeRef::builtin(BuiltinClass::Int));
        let aliased = match self {
            Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::UInt8
            | Self::UInt16
            | Self::UInt32
            | Self::UInt => int(),
            Self::DurationUnit => {
                TypeRef::literal_union(["ns", "us", "ms", "s", "min", "h", "d"])
            }
            Self::DataSizeUnit => TypeRef::literal_union([
                "b", "kb", "kib", "mb", "mib", "gb", "gib", "tb", "tib", "pb", "pib",
            ]),
            Self::Uri => TypeRef::builtin(BuiltinClass::String),
            Self::NonNull => TypeRef::constrained(TypeRef::builtin(BuiltinClass::Any)),
        };
        let mut alias = TypeAliasDef::new("pkl.base", self.simple_name(), aliased);
        alias.is_standard_library_member = true;
        alias
    }
}
