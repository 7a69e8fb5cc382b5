//! Fields, parameters, and methods.

use hpkl_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A field of a Java class.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub initializer: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            initializer: None,
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

    pub fn initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }
}

impl Renderable for Field {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        for annotation in &self.annotations {
            fragments.push(CodeFragment::line(annotation));
        }
        let mut line = modifier_prefix(&self.modifiers);
        line.push_str(&format!("{} {}", self.ty, self.name));
        if let Some(initializer) = &self.initializer {
            line.push_str(" = ");
            line.push_str(initializer);
        }
        line.push(';');
        fragments.push(CodeFragment::line(line));
        fragments
    }
}

/// A method or constructor parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
    pub annotations: Vec<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations: Vec::new(),
        }
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(annotation);
            out.push(' ');
        }
        out.push_str(&self.ty);
        out.push(' ');
        out.push_str(&self.name);
        out
    }
}

/// A method, or a constructor when it has no return type.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub returns: Option<String>,
    pub doc: Option<String>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub params: Vec<Param>,
    pub body: Vec<CodeFragment>,
}

impl Method {
    pub fn new(name: impl Into<String>, returns: impl Into<String>) -> Self {
        Self {
            returns: Some(returns.into()),
            ..Self::constructor(name)
        }
    }

    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            name: class_name.into(),
            returns: None,
            doc: None,
            annotations: Vec::new(),
            modifiers: Vec::new(),
            params: Vec::new(),
            body: Vec::new(),
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

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Add a statement line to the body.
    pub fn statement(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add an arbitrary fragment to the body.
    pub fn fragment(mut self, fragment: CodeFragment) -> Self {
        self.body.push(fragment);
        self
    }

    /// Build the method as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::default();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Method {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        for annotation in &self.annotations {
            fragments.push(CodeFragment::line(annotation));
        }
        let mut header = modifier_prefix(&self.modifiers);
        if let Some(returns) = &self.returns {
            header.push_str(returns);
            header.push(' ');
        }
        let params: Vec<String> = self.params.iter().map(Param::render).collect();
        header.push_str(&format!("{}({})", self.name, params.join(", ")));
        if self.body.is_empty() {
            fragments.push(CodeFragment::line(format!("{} {{", header)));
            fragments.push(CodeFragment::line("}"));
        } else {
            fragments.push(CodeFragment::braced(format!("{} {{", header), self.body.clone()));
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field() {
        let mut builder = CodeBuilder::default();
        builder.emit(
            &Field::new("port", "long")
                .annotation("@Deprecated")
                .modifier("public")
                .modifier("final")
                .initializer("8080L"),
        );
        assert_eq!(builder.build(), "@Deprecated\npublic final long port = 8080L;\n");
    }

    #[test]
    fn test_method() {
        let method = Method::new("getName", "@NonNull String")
            .annotation("@Override")
            .modifier("public")
            .statement("return name;");
        assert_eq!(
            method.build(),
            "@Override\npublic @NonNull String getName() {\n  return name;\n}\n"
        );
    }

    #[test]
    fn test_constructor_with_params() {
        let ctor = Method::constructor("Point")
            .modifier("public")
            .param(Param::new("x", "long").annotation("@Named(\"x\")"))
            .param(Param::new("y", "long"))
            .statement("this.x = x;")
            .statement("this.y = y;");
        assert_eq!(
            ctor.build(),
            "public Point(@Named(\"x\") long x, long y) {\n  this.x = x;\n  this.y = y;\n}\n"
        );
    }

    #[test]
    fn test_empty_body() {
        let ctor = Method::constructor("Point").modifier("protected");
        assert_eq!(ctor.build(), "protected Point() {\n}\n");
    }
}
