//! Class and property declarations.

use indexmap::IndexMap;

use crate::{ClassId, TypeRef, Value};

/// Classes built into the language's base library.
///
/// Each builtin occupies the registry slot equal to its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinClass {
    Any,
    Typed,
    Dynamic,
    Module,
    Annotation,
    Deprecated,
    Boolean,
    String,
    Number,
    Int,
    Float,
    Duration,
    DataSize,
    Pair,
    Collection,
    List,
    Listing,
    Set,
    Map,
    Mapping,
    Class,
    Regex,
    Version,
}

impl BuiltinClass {
    pub const ALL: [BuiltinClass; 23] = [
        Self::Any,
        Self::Typed,
        Self::Dynamic,
        Self::Module,
        Self::Annotation,
        Self::Deprecated,
        Self::Boolean,
        Self::String,
        Self::Number,
        Self::Int,
        Self::Float,
        Self::Duration,
        Self::DataSize,
        Self::Pair,
        Self::Collection,
        Self::List,
        Self::Listing,
        Self::Set,
        Self::Map,
        Self::Mapping,
        Self::Class,
        Self::Regex,
        Self::Version,
    ];

    pub fn simple_name(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Typed => "Typed",
            Self::Dynamic => "Dynamic",
            Self::Module => "Module",
            Self::Annotation => "Annotation",
            Self::Deprecated => "Deprecated",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Number => "Number",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Duration => "Duration",
            Self::DataSize => "DataSize",
            Self::Pair => "Pair",
            Self::Collection => "Collection",
            Self::List => "List",
            Self::Listing => "Listing",
            Self::Set => "Set",
            Self::Map => "Map",
            Self::Mapping => "Mapping",
            Self::Class => "Class",
            Self::Regex => "Regex",
            Self::Version => "Version",
        }
    }

    pub fn qualified_name(self) -> String {
        format!("pkl.base#{}", self.simple_name())
    }

    /// Look up a builtin by simple name (`Int`) or qualified name (`pkl.base#Int`).
    pub fn from_name(name: &str) -> Option<Self> {
        let simple = name.strip_prefix("pkl.base#").unwrap_or(name);
        Self::ALL.into_iter().find(|b| b.simple_name() == simple)
    }

    pub fn id(self) -> ClassId {
        ClassId(self as usize)
    }

    pub(crate) fn superclass(self) -> Option<BuiltinClass> {
        match self {
            Self::Any => None,
            Self::Module | Self::Annotation | Self::Dynamic => Some(Self::Typed),
            Self::Deprecated => Some(Self::Annotation),
            Self::Int | Self::Float => Some(Self::Number),
            Self::List | Self::Set => Some(Self::Collection),
            _ => Some(Self::Any),
        }
    }

    pub(crate) fn definition(self) -> ClassDef {
        let mut class = ClassDef::new("pkl.base", self.simple_name());
        class.qualified_name = self.qualified_name();
        class.origin = ClassOrigin::Builtin(self);
        class.superclass = self.superclass().map(BuiltinClass::id);
        class.is_abstract = matches!(
            self,
            Self::Any | Self::Typed | Self::Module | Self::Annotation | Self::Number | Self::Collection
        );
        class.is_open = matches!(self, Self::Module | Self::Annotation);
        if self == Self::Deprecated {
            class.properties.insert(
                "message".to_string(),
                PropertyDef::new(
                    "message",
                    TypeRef::nullable(TypeRef::builtin(Self::String)),
                ),
            );
        }
        class
    }
}

/// Where a class comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOrigin {
    /// A builtin base class with dedicated target mappings.
    Builtin(BuiltinClass),
    /// Any other class defined by a `pkl:` library module.
    StandardLibrary,
    /// A user-defined class.
    User,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    /// `org.mod` for a module class, `org.mod#Person` for a nested class.
    pub qualified_name: String,
    pub simple_name: String,
    pub module_name: String,
    pub origin: ClassOrigin,
    pub superclass: Option<ClassId>,
    pub is_abstract: bool,
    pub is_open: bool,
    /// Whether this is the class of a module (as opposed to a class declared inside one).
    pub is_module_class: bool,
    /// Properties declared by this class only, in declaration order.
    pub properties: IndexMap<String, PropertyDef>,
    pub annotations: Vec<Annotation>,
    pub doc_comment: Option<String>,
}

impl ClassDef {
    /// Create a user class nested in `module_name`.
    pub fn new(module_name: &str, simple_name: &str) -> Self {
        Self {
            qualified_name: format!("{}#{}", module_name, simple_name),
            simple_name: simple_name.to_string(),
            module_name: module_name.to_string(),
            origin: ClassOrigin::User,
            superclass: None,
            is_abstract: false,
            is_open: false,
            is_module_class: false,
            properties: IndexMap::new(),
            annotations: Vec::new(),
            doc_comment: None,
        }
    }

    /// Create the class of module `module_name`.
    ///
    /// Its simple name is the last dot-separated segment of the module name.
    pub fn module(module_name: &str) -> Self {
        let simple = module_name.rsplit('.').next().unwrap_or(module_name);
        let mut class = Self::new(module_name, simple);
        class.qualified_name = module_name.to_string();
        class.is_module_class = true;
        class
    }

    pub fn builtin(&self) -> Option<BuiltinClass> {
        match self.origin {
            ClassOrigin::Builtin(builtin) => Some(builtin),
            _ => None,
        }
    }

    pub fn is(&self, builtin: BuiltinClass) -> bool {
        self.origin == ClassOrigin::Builtin(builtin)
    }

    pub fn is_standard_library(&self) -> bool {
        !matches!(self.origin, ClassOrigin::User)
    }

    /// The deprecation annotation, if present.
    pub fn deprecation(&self) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.is_deprecation())
    }
}

/// A property declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub simple_name: String,
    pub ty: TypeRef,
    /// Hidden properties are never emitted.
    pub is_hidden: bool,
    pub annotations: Vec<Annotation>,
    pub doc_comment: Option<String>,
}

impl PropertyDef {
    pub fn new(simple_name: &str, ty: TypeRef) -> Self {
        Self {
            simple_name: simple_name.to_string(),
            ty,
            is_hidden: false,
            annotations: Vec::new(),
            doc_comment: None,
        }
    }

    pub fn deprecation(&self) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.is_deprecation())
    }
}

/// An annotation applied to a class or property.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Qualified name of the annotation class, e.g. `pkl.base#Deprecated`.
    pub class_name: String,
    pub properties: IndexMap<String, Value>,
}

impl Annotation {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            properties: IndexMap::new(),
        }
    }

    /// `@Deprecated { message = ... }`
    pub fn deprecated(message: Option<&str>) -> Self {
        let mut annotation = Self::new(BuiltinClass::Deprecated.qualified_name());
        if let Some(message) = message {
            annotation
                .properties
                .insert("message".to_string(), Value::String(message.to_string()));
        }
        annotation
    }

    pub fn is_deprecation(&self) -> bool {
        BuiltinClass::from_name(&self.class_name) == Some(BuiltinClass::Deprecated)
    }

    /// The `message` property of a deprecation, if it is a string.
    pub fn message(&self) -> Option<&str> {
        match self.properties.get("message") {
            Some(Value::String(message)) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_from_name() {
        assert_eq!(BuiltinClass::from_name("Int"), Some(BuiltinClass::Int));
        assert_eq!(
            BuiltinClass::from_name("pkl.base#Listing"),
            Some(BuiltinClass::Listing)
        );
        assert_eq!(BuiltinClass::from_name("Person"), None);
    }

    #[test]
    fn test_module_class_naming() {
        let class = ClassDef::module("org.example.config");
        assert_eq!(class.qualified_name, "org.example.config");
        assert_eq!(class.simple_name, "config");
        assert!(class.is_module_class);
    }

    #[test]
    fn test_nested_class_naming() {
        let class = ClassDef::new("org.mod", "Person");
        assert_eq!(class.qualified_name, "org.mod#Person");
        assert!(!class.is_standard_library());
    }

    #[test]
    fn test_deprecation_message() {
        let annotation = Annotation::deprecated(Some("use other"));
        assert!(annotation.is_deprecation());
        assert_eq!(annotation.message(), Some("use other"));
        assert_eq!(Annotation::deprecated(None).message(), None);
    }
}
