//! Top-level type aliases.

use hpkl_codegen::builder::{CodeFragment, Renderable};

/// `typealias Name<out A> = Target`
#[derive(Debug, Clone)]
pub struct TypeAlias {
    pub name: String,
    pub doc: Option<String>,
    /// Type parameters with their variance modifier, e.g. `out A`.
    pub type_parameters: Vec<String>,
    pub aliased: String,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, aliased: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            type_parameters: Vec::new(),
            aliased: aliased.into(),
        }
    }

    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn type_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.type_parameters.push(parameter.into());
        self
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        let parameters = if self.type_parameters.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_parameters.join(", "))
        };
        fragments.push(CodeFragment::line(format!(
            "typealias {}{} = {}",
            self.name, parameters, self.aliased
        )));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use hpkl_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_generic_alias() {
        let alias = TypeAlias::new("Pairs", "Map<A, B>")
            .type_parameter("out A")
            .type_parameter("B");
        let mut builder = CodeBuilder::default();
        builder.emit(&alias);
        assert_eq!(builder.build(), "typealias Pairs<out A, B> = Map<A, B>\n");
    }
}
