//! Indented text output.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates generated source text at a current indentation level.
///
/// ```
/// use hpkl_codegen::builder::{CodeBuilder, Indent};
///
/// let mut builder = CodeBuilder::new(Indent::FOUR_SPACES);
/// builder
///     .push_line("class Main {")
///     .push_indent()
///     .push_line("int x = 1;")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "class Main {\n    int x = 1;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Write `text` at the current indentation.
    ///
    /// Multi-line text is indented line by line; empty lines stay empty.
    pub fn push_line(&mut self, text: &str) -> &mut Self {
        for line in text.split('\n') {
            if !line.is_empty() {
                for _ in 0..self.level {
                    self.buffer.push_str(self.indent.as_str());
                }
                self.buffer.push_str(line);
            }
            self.buffer.push('\n');
        }
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Write a `/** ... */` comment. Trailing whitespace is dropped.
    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        self.push_line("/**");
        for line in text.trim_end().lines().map(str::trim_end) {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line));
            }
        }
        self.push_line(" */")
    }

    /// Write a declaration node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply(fragment);
        }
        self
    }

    fn apply(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(line) => {
                self.push_line(&line);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Braced { header, body } => {
                self.push_line(&header);
                self.apply_indented(body);
                self.push_line("}");
            }
            CodeFragment::Indent(fragments) => self.apply_indented(fragments),
            CodeFragment::Doc(text) => {
                self.push_doc(&text);
            }
        }
    }

    fn apply_indented(&mut self, fragments: Vec<CodeFragment>) {
        self.push_indent();
        for fragment in fragments {
            self.apply(fragment);
        }
        self.push_dedent();
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Method;

    impl Renderable for Method {
        fn to_fragments(&self) -> Vec<CodeFragment> {
            vec![
                CodeFragment::doc("Entry point.\n\nRuns once.  "),
                CodeFragment::braced(
                    "void main() {",
                    vec![
                        CodeFragment::line("run();"),
                        CodeFragment::blank(),
                        CodeFragment::indent(vec![CodeFragment::line(".then();")]),
                    ],
                ),
            ]
        }
    }

    #[test]
    fn test_emit_fragments() {
        let mut builder = CodeBuilder::default();
        builder.emit(&Method);
        assert_eq!(
            builder.build(),
            "/**\n * Entry point.\n *\n * Runs once.\n */\nvoid main() {\n  run();\n\n    .then();\n}\n"
        );
    }

    #[test]
    fn test_tab_indent() {
        let mut builder = CodeBuilder::new(Indent::Tab);
        builder.push_indent().push_line("int x;");
        assert_eq!(builder.build(), "\tint x;\n");
    }

    #[test]
    fn test_multiline_push_reindents() {
        let mut builder = CodeBuilder::default();
        builder.push_indent().push_line("a(\n  b\n\n)");
        assert_eq!(builder.build(), "  a(\n    b\n\n  )\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::default();
        builder.push_dedent().push_line("package foo;").push_blank();
        assert_eq!(builder.build(), "package foo;\n\n");
    }
}
