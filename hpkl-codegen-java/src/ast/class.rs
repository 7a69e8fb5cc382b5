//! Java class declarations.

use hpkl_codegen::builder::{CodeFragment, Renderable};

use super::members::modifier_prefix;
use super::{Enum, Field, Method};

/// A type nested inside a class.
#[derive(Debug, Clone)]
pub enum NestedType {
    Class(Class),
    Enum(Enum),
}

impl Renderable for NestedType {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Self::Class(class) => class.to_fragments(),
            Self::Enum(enum_decl) => enum_decl.to_fragments(),
        }
    }
}

/// A class declaration.
///
/// Members render in declaration-kind order: fields, constructors, methods,
/// then nested types, each separated by a blank line.
#[derive(Debug, Clone)]
pub struct Class {
    pub name: String,
    pub doc: Option<String>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub fields: Vec<Field>,
    pub constructors: Vec<Method>,
    pub methods: Vec<Method>,
    pub nested: Vec<NestedType>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            nested: Vec::new(),
        }
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

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.extends = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn constructor(mut self, constructor: Method) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn nested(mut self, nested: NestedType) -> Self {
        self.nested.push(nested);
        self
    }

    fn header(&self) -> String {
        let mut header = modifier_prefix(&self.modifiers);
        header.push_str("class ");
        header.push_str(&self.name);
        if let Some(superclass) = &self.extends {
            header.push_str(" extends ");
            header.push_str(superclass);
        }
        if !self.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&self.implements.join(", "));
        }
        header.push_str(" {");
        header
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

        let members: Vec<&dyn Renderable> = self
            .fields
            .iter()
            .map(|f| f as &dyn Renderable)
            .chain(self.constructors.iter().map(|c| c as &dyn Renderable))
            .chain(self.methods.iter().map(|m| m as &dyn Renderable))
            .chain(self.nested.iter().map(|n| n as &dyn Renderable))
            .collect();
        fragments.push(CodeFragment::braced(self.header(), separated(&members)));
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

    #[test]
    fn test_empty_class() {
        let mut builder = CodeBuilder::default();
        builder.emit(&Class::new("Empty").modifier("public").modifier("final"));
        assert_eq!(builder.build(), "public final class Empty {\n}\n");
    }

    #[test]
    fn test_member_order() {
        let class = Class::new("Point")
            .modifier("public")
            .extends("Shape")
            .implements("Serializable")
            .method(Method::new("hashCode", "int").statement("return 1;"))
            .constructor(Method::constructor("Point").modifier("public"))
            .field(Field::new("x", "long").modifier("public"));
        let mut builder = CodeBuilder::default();
        builder.emit(&class);
        assert_eq!(
            builder.build(),
            "public class Point extends Shape implements Serializable {\n  public long x;\n\n  public Point() {\n  }\n\n  int hashCode() {\n    return 1;\n  }\n}\n"
        );
    }

    #[test]
    fn test_doc_and_annotations() {
        let class = Class::new("Old")
            .doc(Some("Legacy.".to_string()))
            .annotation("@Deprecated");
        let mut builder = CodeBuilder::default();
        builder.emit(&class);
        assert_eq!(
            builder.build(),
            "/**\n * Legacy.\n */\n@Deprecated\nclass Old {\n}\n"
        );
    }
}
