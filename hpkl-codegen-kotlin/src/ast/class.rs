//! Kotlin class and object declarations.

use hpkl_codegen::builder::{CodeFragment, Renderable};

use super::members::modifier_prefix;
use super::{EnumClass, Function, Param, Property};

/// What kind of type a [`Class`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    DataClass,
    Object,
    CompanionObject,
}

/// A type nested inside a class.
#[derive(Debug, Clone)]
pub enum NestedType {
    Class(Class),
    Enum(EnumClass),
}

impl Renderable for NestedType {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Self::Class(class) => class.to_fragments(),
            Self::Enum(enum_class) => enum_class.to_fragments(),
        }
    }
}

/// A class, data class, or object declaration.
///
/// The primary constructor is written one parameter per line. Body members
/// render as properties, functions, nested types, then the companion object.
/// A class without body members has no braces.
#[derive(Debug, Clone)]
pub struct Class {
    pub name: String,
    pub kind: ClassKind,
    pub doc: Option<String>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub params: Vec<Param>,
    pub superclass: Option<String>,
    pub super_args: Vec<String>,
    pub interfaces: Vec<String>,
    pub properties: Vec<Property>,
    pub functions: Vec<Function>,
    pub nested: Vec<NestedType>,
    pub companion: Option<Box<Class>>,
}

impl Class {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            doc: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            params: Vec::new(),
            superclass: None,
            super_args: Vec::new(),
            interfaces: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            nested: Vec::new(),
            companion: None,
        }
    }

    pub fn companion_object() -> Self {
        Self::new("", ClassKind::CompanionObject)
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn modifier(mut self, modifier: &'static str) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Extend `superclass`, passing `args` to its constructor.
    pub fn extends(mut self, superclass: impl Into<String>, args: Vec<String>) -> Self {
        self.superclass = Some(superclass.into());
        self.super_args = args;
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn nested(mut self, nested: NestedType) -> Self {
        self.nested.push(nested);
        self
    }

    pub fn companion(mut self, companion: Class) -> Self {
        self.companion = Some(Box::new(companion));
        self
    }

    fn declaration(&self) -> String {
        let mut declaration = modifier_prefix(&self.modifiers);
        match self.kind {
            ClassKind::Class => declaration.push_str("class "),
            ClassKind::DataClass => declaration.push_str("data class "),
            ClassKind::Object => declaration.push_str("object "),
            ClassKind::CompanionObject => {
                declaration.push_str("companion object");
                return declaration;
            }
        }
        declaration.push_str(&self.name);
        declaration
    }

    fn supertypes(&self) -> String {
        let mut supertypes = Vec::new();
        if let Some(superclass) = &self.superclass {
            supertypes.push(format!("{}({})", superclass, self.super_args.join(", ")));
        }
        supertypes.extend(self.interfaces.iter().cloned());
        if supertypes.is_empty() {
            String::new()
        } else {
            format!(" : {}", supertypes.join(", "))
        }
    }

    fn body(&self) -> Vec<CodeFragment> {
        let members: Vec<&dyn Renderable> = self
            .properties
            .iter()
            .map(|p| p as &dyn Renderable)
            .chain(self.functions.iter().map(|f| f as &dyn Renderable))
            .chain(self.nested.iter().map(|n| n as &dyn Renderable))
            .chain(self.companion.iter().map(|c| c as &dyn Renderable))
            .collect();
        separated(&members)
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        for annotation in &self.annotations {
            fragments.push(CodeFragment::line(annotation));
        }

        let body = self.body();
        let header_end = if self.params.is_empty() {
            format!("{}{}", self.declaration(), self.supertypes())
        } else {
            fragments.push(CodeFragment::line(format!("{}(", self.declaration())));
            let last = self.params.len() - 1;
            let params = self
                .params
                .iter()
                .enumerate()
                .flat_map(|(index, param)| param.list_entry(index == last))
                .collect();
            fragments.push(CodeFragment::indent(params));
            format!("){}", self.supertypes())
        };

        if body.is_empty() {
            fragments.push(CodeFragment::line(header_end));
        } else {
            fragments.push(CodeFragment::braced(format!("{} {{", header_end), body));
        }
        fragments
    }
}

/// Member fragments with a blank line between members.
pub(crate) fn separated(members: &[&dyn Renderable]) -> Vec<CodeFragment> {
    let mut body = Vec::new();
    for (index, member) in members.iter().enumerate() {
        if index > 0 {
            body.push(CodeFragment::blank());
        }
        body.extend(member.to_fragments());
    }
    body
}

#[cfg(test)]
mod tests {
    use hpkl_codegen::builder::CodeBuilder;

    use super::*;

    fn build(class: &Class) -> String {
        let mut builder = CodeBuilder::default();
        builder.emit(class);
        builder.build()
    }

    #[test]
    fn test_data_class_without_body() {
        let class = Class::new("Point", ClassKind::DataClass)
            .param(Param::new("x", "Long").binding("val"))
            .param(Param::new("y", "Long").binding("val"));
        assert_eq!(
            build(&class),
            "data class Point(\n  val x: Long,\n  val y: Long\n)\n"
        );
    }

    #[test]
    fn test_object() {
        let class = Class::new("Config", ClassKind::Object).doc(Some("Settings.".to_string()));
        assert_eq!(build(&class), "/**\n * Settings.\n */\nobject Config\n");
    }

    #[test]
    fn test_supertypes_and_companion() {
        let class = Class::new("Circle", ClassKind::Class)
            .param(Param::new("name", "String"))
            .param(Param::new("radius", "Double").binding("val"))
            .extends("Shape", vec!["name".to_string()])
            .implements("Serializable")
            .companion(
                Class::companion_object().property(
                    Property::new("serialVersionUID", "Long", "0L")
                        .modifier("private")
                        .modifier("const"),
                ),
            );
        assert_eq!(
            build(&class),
            "class Circle(\n  name: String,\n  val radius: Double\n) : Shape(name), Serializable {\n  companion object {\n    private const val serialVersionUID: Long = 0L\n  }\n}\n"
        );
    }

    #[test]
    fn test_abstract_class_without_params() {
        let class = Class::new("Base", ClassKind::Class)
            .modifier("abstract")
            .function(Function::new("describe").returns("String").statement("return \"base\""));
        assert_eq!(
            build(&class),
            "abstract class Base {\n  fun describe(): String {\n    return \"base\"\n  }\n}\n"
        );
    }
}
