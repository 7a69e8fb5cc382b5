use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

/// Result type for hpkl-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the document content and filename so that resolution errors can
/// point back into the schema document.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a serde_json error.
    pub fn parse_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = (source.line() > 0).then(|| {
            let offset = SourceOffset::from_location(&self.src, source.line(), source.column());
            SourceSpan::new(offset, 0)
        });
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an error for a class name that resolves to nothing.
    pub fn unknown_class(
        &self,
        name: impl Into<String>,
        referenced_by: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::UnknownClass {
            src: self.named_source(),
            span: self.span_of(&name),
            name,
            referenced_by: referenced_by.into(),
        })
    }

    /// Create an error for a type alias name that resolves to nothing.
    pub fn unknown_alias(
        &self,
        name: impl Into<String>,
        referenced_by: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::UnknownAlias {
            src: self.named_source(),
            span: self.span_of(&name),
            name,
            referenced_by: referenced_by.into(),
        })
    }

    /// Create an error for two declarations with the same qualified name.
    pub fn duplicate_declaration(&self, name: impl Into<String>) -> Box<Error> {
        let name = name.into();
        Box::new(Error::DuplicateDeclaration {
            src: self.named_source(),
            span: self.span_of(&name),
            name,
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Locate the first occurrence of `name` as a JSON string.
    fn span_of(&self, name: &str) -> Option<SourceSpan> {
        let needle = format!("\"{}\"", name);
        self.src
            .find(&needle)
            .map(|offset| SourceSpan::new((offset + 1).into(), name.len()))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(hpkl::schema::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema document")]
    #[diagnostic(code(hpkl::schema::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown class '{name}' referenced by '{referenced_by}'")]
    #[diagnostic(
        code(hpkl::schema::unknown_class),
        help("declare the class in 'classes' or list it under 'imports'")
    )]
    UnknownClass {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        name: String,
        referenced_by: String,
    },

    #[error("unknown type alias '{name}' referenced by '{referenced_by}'")]
    #[diagnostic(
        code(hpkl::schema::unknown_alias),
        help("declare the alias in 'typeAliases' or list it under 'imports'")
    )]
    UnknownAlias {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: Option<SourceSpan>,
        name: String,
        referenced_by: String,
    },

    #[error("'{name}' is declared more than once")]
    #[diagnostic(code(hpkl::schema::duplicate_declaration))]
    DuplicateDeclaration {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        name: String,
    },

    #[error("{message}")]
    #[diagnostic(code(hpkl::schema::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
