use thiserror::Error;

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort generation of a module.
///
/// Generation is fail-fast: the first error raised while emitting any class or
/// alias of a module is returned, and no files are produced for that module.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A generator option is malformed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A type has no representation in the target language.
    #[error("{0}")]
    UnsupportedType(String),

    /// Two literals of an enum-representable alias normalize to the same constant.
    #[error(
        "cannot generate enum class for type alias `{alias}` because string literal types \"{first}\" and \"{second}\" would both be converted to enum constant name `{constant}`"
    )]
    EnumCollision {
        alias: String,
        first: String,
        second: String,
        constant: String,
    },

    /// A literal has no valid enum constant form.
    #[error(
        "cannot generate enum class for type alias `{alias}` because string literal type \"{literal}\" cannot be converted to a valid enum constant name"
    )]
    InvalidEnumConstant { alias: String, literal: String },

    /// Standard library modules are never generated.
    #[error("cannot generate code for a standard library module (`{uri}`)")]
    StandardLibraryModule { uri: String },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedType(message.into())
    }
}
