//! Parameters, properties, and functions.

use hpkl_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A function or constructor parameter.
///
/// A primary constructor parameter with a binding (`val` or `var`) also
/// declares a property.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub binding: Option<&'static str>,
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            binding: None,
            default: None,
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

    /// Declare a property: `val` or `var`.
    pub fn binding(mut self, binding: &'static str) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The parameter on a single line, without its doc comment.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(annotation);
            out.push(' ');
        }
        out.push_str(&modifier_prefix(&self.modifiers));
        if let Some(binding) = self.binding {
            out.push_str(binding);
            out.push(' ');
        }
        out.push_str(&format!("{}: {}", self.name, self.ty));
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }

    /// Fragments of one entry in a multi-line parameter list.
    pub(crate) fn list_entry(&self, last: bool) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        let separator = if last { "" } else { "," };
        fragments.push(CodeFragment::line(format!("{}{}", self.render(), separator)));
        fragments
    }
}

/// A property declared in a class body.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub ty: String,
    pub modifiers: Vec<&'static str>,
    pub initializer: String,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, initializer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            modifiers: Vec::new(),
            initializer: initializer.into(),
        }
    }

    pub fn modifier(mut self, modifier: &'static str) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

impl Renderable for Property {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!(
            "{}val {}: {} = {}",
            modifier_prefix(&self.modifiers),
            self.name,
            self.ty,
            self.initializer
        ))]
    }
}

/// A member function.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub returns: Option<String>,
    pub doc: Option<String>,
    pub modifiers: Vec<&'static str>,
    pub params: Vec<Param>,
    pub body: Vec<CodeFragment>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            returns: None,
            doc: None,
            modifiers: Vec::new(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = Some(returns.into());
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

    /// Add a statement line to the body.
    pub fn statement(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::default();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Function {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        let params: Vec<String> = self.params.iter().map(Param::render).collect();
        let mut header = format!(
            "{}fun {}({})",
            modifier_prefix(&self.modifiers),
            self.name,
            params.join(", ")
        );
        if let Some(returns) = &self.returns {
            header.push_str(": ");
            header.push_str(returns);
        }
        header.push_str(" {");
        fragments.push(CodeFragment::braced(header, self.body.clone()));
        fragments
    }
}

pub(crate) fn modifier_prefix(modifiers: &[&str]) -> String {
    let mut prefix = modifiers.join(" ");
    if !prefix.is_empty() {
        prefix.push(' ');
    }
    prefix
}
