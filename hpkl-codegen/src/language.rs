//! Language-agnostic code generation traits.

use crate::Result;

/// Trait for language-specific code generators.
///
/// A generator is bound to one module schema; it either produces every file of
/// that module or fails as a whole.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "java", "kotlin")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "java", "kt")
    fn file_extension(&self) -> &'static str;

    /// Generate the files of the module.
    fn generate(&self) -> Result<Vec<GeneratedFile>>;
}

/// A generated source file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Relative path from the output directory, `/`-separated
    pub path: String,
    /// File content
    pub content: String,
}

/// Relative output path of a top-level type, e.g. `java/com/acme/Config.java`.
pub fn source_path(root: &str, package: &str, type_name: &str, extension: &str) -> String {
    let mut path = String::from(root);
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        path.push('/');
        path.push_str(segment);
    }
    path.push('/');
    path.push_str(type_name);
    path.push('.');
    path.push_str(extension);
    path
}
