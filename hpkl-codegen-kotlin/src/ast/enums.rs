//! Kotlin enum classes backed by string values.

use hpkl_codegen::builder::{CodeFragment, Renderable};

/// One constant and the literal it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub name: String,
    /// Quoted Kotlin string literal.
    pub value: String,
}

/// An enum class whose constants carry their source literal, returned by `toString`.
#[derive(Debug, Clone)]
pub struct EnumClass {
    pub name: String,
    pub doc: Option<String>,
    pub constants: Vec<EnumConstant>,
}

impl EnumClass {
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

impl Renderable for EnumClass {
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
        body.push(CodeFragment::blank());
        body.push(CodeFragment::line("override fun toString() = value"));

        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        fragments.push(CodeFragment::line(format!("enum class {}(", self.name)));
        fragments.push(CodeFragment::indent(vec![CodeFragment::line(
            "val value: String",
        )]));
        fragments.push(CodeFragment::braced(") {", body));
        fragments
    }
}
