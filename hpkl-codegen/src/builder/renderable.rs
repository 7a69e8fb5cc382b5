//! Declaration nodes rendered as code fragments.

/// One piece of a rendered declaration.
///
/// Declaration nodes describe themselves as fragments; [`CodeBuilder`]
/// turns fragments into indented text.
///
/// [`CodeBuilder`]: super::CodeBuilder
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A line at the current indentation.
    Line(String),
    Blank,
    /// A header line, the body one level deeper, then a closing `}`.
    Braced {
        header: String,
        body: Vec<CodeFragment>,
    },
    /// The contained fragments one level deeper, without delimiters.
    Indent(Vec<CodeFragment>),
    /// A `/** ... */` comment, one ` * ` line per text line.
    Doc(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::Braced {
            header: header.into(),
            body,
        }
    }

    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    pub fn doc(s: impl Into<String>) -> Self {
        Self::Doc(s.into())
    }
}

/// A declaration that can be written out through a `CodeBuilder`.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.as_ref().to_fragments()
    }
}
