//! `hpkl.toml` options file.
//!
//! Top-level keys apply to every target; the `[java]` and `[kotlin]` tables
//! override them for one target.
//!
//! ```toml
//! indent = "    "
//! generate-doc-comments = true
//!
//! [java]
//! generate-getters = true
//!
//! [kotlin]
//! mutable-properties = true
//!
//! [renames]
//! "org.example." = "com.acme.config."
//! ```

use std::path::Path;

use eyre::{Context, Result};
use hpkl_codegen::GeneratorOptions;
use serde::Deserialize;
use toml::{Table, Value};

use crate::language::Target;

/// Options file name looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "hpkl.toml";

#[derive(Debug, Default, Deserialize)]
pub struct HpklToml {
    #[serde(default)]
    java: Table,
    #[serde(default)]
    kotlin: Table,
    #[serde(flatten)]
    shared: Table,
}

impl HpklToml {
    pub fn open(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        Self::parse(&src).wrap_err_with(|| format!("invalid options file '{}'", path.display()))
    }

    pub fn parse(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Generator options for `target`.
    pub fn options(&self, target: Target) -> Result<GeneratorOptions> {
        let overrides = match target {
            Target::Java => &self.java,
            Target::Kotlin => &self.kotlin,
        };
        let mut merged = self.shared.clone();
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
        Value::Table(merged)
            .try_into()
            .wrap_err_with(|| format!("invalid options for target '{}'", target.config_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
indent = "    "
generate-doc-comments = true

[java]
generate-getters = true
indent = "\t"

[kotlin]
mutable-properties = true

[renames]
"org.example." = "com.acme."
"#;

    #[test]
    fn test_shared_keys_apply_to_both_targets() {
        let config = HpklToml::parse(CONFIG).unwrap();

        let kotlin = config.options(Target::Kotlin).unwrap();
        assert_eq!(kotlin.indent, "    ");
        assert!(kotlin.generate_doc_comments);
        assert!(kotlin.mutable_properties);
        assert!(!kotlin.generate_getters);
        assert_eq!(kotlin.renames["org.example."], "com.acme.");
    }

    #[test]
    fn test_target_table_overrides_shared_keys() {
        let config = HpklToml::parse(CONFIG).unwrap();

        let java = config.options(Target::Java).unwrap();
        assert_eq!(java.indent, "\t");
        assert!(java.generate_getters);
        assert!(!java.mutable_properties);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = HpklToml::parse("").unwrap();
        assert_eq!(
            config.options(Target::Java).unwrap(),
            GeneratorOptions::default()
        );
    }

    #[test]
    fn test_wrong_value_type_is_rejected() {
        let config = HpklToml::parse("generate-getters = \"yes\"").unwrap();
        let err = config.options(Target::Java).unwrap_err();
        assert!(err.to_string().contains("invalid options for target 'java'"));
    }
}
