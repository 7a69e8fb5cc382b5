//! Kotlin identifiers.

use std::borrow::Cow;

use hpkl_codegen::naming::NamingConvention;

/// Kotlin hard keywords. These are escaped with backticks, never renamed.
pub const KOTLIN_KEYWORDS: &[&str] = &[
    "as",
    "break",
    "class",
    "continue",
    "do",
    "else",
    "false",
    "for",
    "fun",
    "if",
    "in",
    "interface",
    "is",
    "null",
    "object",
    "package",
    "return",
    "super",
    "this",
    "throw",
    "true",
    "try",
    "typealias",
    "typeof",
    "val",
    "var",
    "when",
    "while",
];

/// Kotlin keeps property names as declared; see [`escape`].
pub const KOTLIN_NAMING: NamingConvention = NamingConvention {
    reserved_words: &[],
};

/// Wrap `name` in backticks if it is a keyword or not a plain identifier.
pub fn escape(name: &str) -> Cow<'_, str> {
    if is_plain_identifier(name) && !KOTLIN_KEYWORDS.contains(&name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{}`", name))
    }
}

/// `$name` inside a string template, or `${`name`}` when escaping is needed.
pub fn template_reference(name: &str) -> String {
    match escape(name) {
        Cow::Borrowed(plain) => format!("${}", plain),
        Cow::Owned(escaped) => format!("${{{}}}", escaped),
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("name"), "name");
        assert_eq!(escape("_private"), "_private");
        assert_eq!(escape("object"), "`object`");
        assert_eq!(escape("first-name"), "`first-name`");
        assert_eq!(escape("1st"), "`1st`");
    }

    #[test]
    fn test_template_reference() {
        assert_eq!(template_reference("name"), "$name");
        assert_eq!(template_reference("in"), "${`in`}");
    }

    #[test]
    fn test_nothing_is_renamed() {
        assert!(!KOTLIN_NAMING.is_reserved("class"));
    }
}
