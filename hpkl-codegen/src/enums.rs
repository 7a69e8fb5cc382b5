//! Enum constants for enum-representable type aliases.

use indexmap::IndexMap;

use crate::{Error, Result};

/// One constant of a generated enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    /// Normalized constant name, e.g. `A_B`.
    pub name: String,
    /// The original literal, used as the serialized value.
    pub literal: String,
}

/// Normalize a string literal to an enum constant name.
///
/// Letters are uppercased, a lowercase-to-uppercase boundary and every run of
/// non-alphanumeric characters become a single `_`, and a leading digit is
/// guarded with `_`. Returns `None` when the literal has no alphanumeric character.
///
/// ```
/// use hpkl_codegen::enums::enum_constant_name;
///
/// assert_eq!(enum_constant_name("A B").as_deref(), Some("A_B"));
/// assert_eq!(enum_constant_name("camelCase").as_deref(), Some("CAMEL_CASE"));
/// assert_eq!(enum_constant_name("1st").as_deref(), Some("_1ST"));
/// assert_eq!(enum_constant_name("--"), None);
/// ```
pub fn enum_constant_name(literal: &str) -> Option<String> {
    let mut name = String::with_capacity(literal.len() + 2);
    let mut separator_pending = false;
    let mut previous_lowercase = false;
    let mut has_alphanumeric = false;

    for ch in literal.chars() {
        if ch.is_alphanumeric() {
            if separator_pending || (previous_lowercase && ch.is_uppercase()) {
                name.push('_');
            }
            separator_pending = false;
            name.extend(ch.to_uppercase());
            previous_lowercase = ch.is_lowercase();
            has_alphanumeric = true;
        } else {
            separator_pending = true;
            previous_lowercase = false;
        }
    }
    if !has_alphanumeric {
        return None;
    }
    if separator_pending {
        name.push('_');
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    Some(name)
}

/// Compute the constants of the enum generated for alias `alias_name`.
///
/// Constants keep the order of `literals`. Fails if a literal cannot be
/// normalized or if two literals normalize to the same name, whichever literal
/// comes first.
pub fn enum_constants<'a, I>(alias_name: &str, literals: I) -> Result<Vec<EnumConstant>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_name: IndexMap<String, &str> = IndexMap::new();
    for literal in literals {
        let name = enum_constant_name(literal).ok_or_else(|| Error::InvalidEnumConstant {
            alias: alias_name.to_string(),
            literal: literal.to_string(),
        })?;
        if let Some(first) = by_name.get(&name) {
            return Err(Error::EnumCollision {
                alias: alias_name.to_string(),
                first: first.to_string(),
                second: literal.to_string(),
                constant: name,
            });
        }
        by_name.insert(name, literal);
    }
    Ok(by_name
        .into_iter()
        .map(|(name, literal)| EnumConstant {
            name,
            literal: literal.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let cases = [
            ("Seeds", "SEEDS"),
            ("hello world", "HELLO_WORLD"),
            ("a--b", "A_B"),
            ("PascalCase", "PASCAL_CASE"),
            ("UPPER", "UPPER"),
            ("-x", "_X"),
            ("x.", "X_"),
            ("v2", "V2"),
            ("42", "_42"),
        ];
        for (literal, expected) in cases {
            assert_eq!(enum_constant_name(literal).as_deref(), Some(expected), "{literal}");
        }
    }

    #[test]
    fn test_normalization_fails_without_alphanumerics() {
        assert_eq!(enum_constant_name(""), None);
        assert_eq!(enum_constant_name("_"), None);
        assert_eq!(enum_constant_name("!?"), None);
    }

    #[test]
    fn test_constants_keep_literal_order() {
        let constants = enum_constants("Diet", ["Seeds", "Berries", "Insects"]).unwrap();
        let names: Vec<_> = constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["SEEDS", "BERRIES", "INSECTS"]);
        assert_eq!(constants[1].literal, "Berries");
    }

    #[test]
    fn test_collision_is_order_independent() {
        let forward = enum_constants("Sep", ["A B", "A-B"]).unwrap_err();
        let backward = enum_constants("Sep", ["A-B", "A B"]).unwrap_err();

        assert_eq!(
            forward,
            Error::EnumCollision {
                alias: "Sep".into(),
                first: "A B".into(),
                second: "A-B".into(),
                constant: "A_B".into(),
            }
        );
        assert!(matches!(backward, Error::EnumCollision { ref constant, .. } if constant == "A_B"));
    }

    #[test]
    fn test_invalid_literal() {
        let err = enum_constants("Odd", ["ok", "--"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot generate enum class for type alias `Odd` because string literal type \"--\" cannot be converted to a valid enum constant name"
        );
    }
}
