//! Java-specific naming conventions.

use hpkl_codegen::naming::NamingConvention;

/// Java naming conventions.
///
/// Property names that collide with a keyword are prefixed with `_`.
pub const JAVA_NAMING: NamingConvention = NamingConvention {
    reserved_words: &[
        "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "double", "do", "else", "enum", "extends", "false",
        "final", "finally", "float", "for", "goto", "if", "implements", "import", "instanceof",
        "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
        "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized",
        "this", "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
    ],
};
