//! Java enum declarations backed by string values.

use hpkl_codegen::builder::{CodeFragment, Renderable};

use super::class::separated;
use super::{Field, Method, Param};

/// One constant and the literal it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub name: String,
    /// Quoted Java string literal.
    pub value: String,
}

/// An enum whose constants carry their source literal, returned by `toString`.
#[derive(Debug, Clone)]
pub struct Enum {
    pub name: String,
    pub doc: Option<String>,
    pub constants: Vec<EnumConstant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            constants: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.push(EnumConstant {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for (index, constant) in self.constants.iter().enumerate() {
            if index > 0 {
                body.push(CodeFragment::blank());
            }
            let terminator = if index + 1 == self.constants.len() { ";" } else { "," };
            body.push(CodeFragment::line(format!(
                "{}({}){}",
                constant.name, constant.value, terminator
            )));
        }
        if self.constants.is_empty() {
            body.push(CodeFragment::line(";"));
        }

        let field = Field::new("value", "String").modifier("private");
        let constructor = Method::constructor(&self.name)
            .modifier("private")
            .param(Param::new("value", "String"))
            .statement("this.value = value;");
        let to_string = Method::new("toString", "String")
            .annotation("@Override")
            .modifier("public")
            .statement("return this.value;");
        body.push(CodeFragment::blank());
        let members: [&dyn Renderable; 3] = [&field, &constructor, &to_string];
        body.extend(separated(&members));

        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        fragments.push(CodeFragment::braced(
            format!("public enum {} {{", self.name),
            body,
        ));
        fragments
    }
}
