use indexmap::IndexMap;
use serde::Deserialize;

use crate::builder::Indent;
use crate::imports::ClassName;
use crate::naming::NameMapper;
use crate::{Error, Result};

/// Options shared by the Java and Kotlin generators.
///
/// Class-name options left unset fall back to the target language's defaults.
///
/// ```
/// use hpkl_codegen::GeneratorOptions;
///
/// let options = GeneratorOptions {
///     generate_getters: true,
///     ..Default::default()
/// };
/// assert_eq!(options.indent, "  ");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorOptions {
    /// One level of indentation: a tab or up to eight spaces.
    pub indent: String,
    pub duration_class: Option<String>,
    pub duration_unit_class: Option<String>,
    pub data_size_class: Option<String>,
    pub data_size_unit_class: Option<String>,
    /// Java only; Kotlin always uses `kotlin.Pair`.
    pub pair_class: Option<String>,
    pub generate_getters: bool,
    pub generate_setters: bool,
    pub generate_empty_constructor: bool,
    pub generate_doc_comments: bool,
    pub generate_framework_config: bool,
    pub framework_config_annotation_name: String,
    /// Annotation placed on constructor parameters with the original property name.
    pub parameter_annotation: Option<String>,
    pub non_null_annotation: Option<String>,
    pub implement_serializable: bool,
    /// Module name prefix to replacement, longest prefix wins.
    pub renames: IndexMap<String, String>,
    pub generate_annotation_classes: bool,
    pub set_default_values: bool,
    /// Function converting ISO-8601 text to the configured duration class.
    pub duration_converter: Option<String>,
    /// Function converting a byte count to the configured data size class.
    pub data_size_converter: Option<String>,
    /// Kotlin only: `var` properties and no copy methods.
    pub mutable_properties: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            duration_class: None,
            duration_unit_class: None,
            data_size_class: None,
            data_size_unit_class: None,
            pair_class: None,
            generate_getters: false,
            generate_setters: false,
            generate_empty_constructor: false,
            generate_doc_comments: false,
            generate_framework_config: false,
            framework_config_annotation_name: "SpringConfigProperties".to_string(),
            parameter_annotation: None,
            non_null_annotation: None,
            implement_serializable: false,
            renames: IndexMap::new(),
            generate_annotation_classes: false,
            set_default_values: false,
            duration_converter: None,
            data_size_converter: None,
            mutable_properties: false,
        }
    }
}

impl GeneratorOptions {
    /// The validated indentation.
    pub fn indent(&self) -> Result<Indent> {
        Indent::parse(&self.indent).ok_or_else(|| {
            Error::configuration(format!(
                "`indent` must be a tab or one to eight spaces, got {:?}",
                self.indent
            ))
        })
    }

    pub fn name_mapper(&self) -> NameMapper {
        NameMapper::new(self.renames.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Resolve a class-name option, using `default` when unset.
    ///
    /// Configured names must be fully qualified.
    pub fn class_option(option: &str, value: Option<&str>, default: &str) -> Result<ClassName> {
        let name = value.unwrap_or(default);
        ClassName::best_guess(name).ok_or_else(|| {
            Error::configuration(format!(
                "`{}` must be a fully qualified class name, got `{}`",
                option, name
            ))
        })
    }

    /// Resolve an optional class-name option.
    pub fn optional_class_option(option: &str, value: Option<&str>) -> Result<Option<ClassName>> {
        value
            .map(|name| Self::class_option(option, Some(name), name))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_kebab_case() {
        let options: GeneratorOptions = toml::from_str(
            r#"
            indent = "    "
            generate-getters = true
            duration-class = "java.time.Duration"
            non-null-annotation = "org.jspecify.annotations.NonNull"

            [renames]
            "org.example." = "com.acme."
            "#,
        )
        .unwrap();

        assert!(options.generate_getters);
        assert!(!options.generate_setters);
        assert_eq!(options.indent().unwrap(), Indent::FOUR_SPACES);
        assert_eq!(options.duration_class.as_deref(), Some("java.time.Duration"));
        assert_eq!(options.framework_config_annotation_name, "SpringConfigProperties");
        assert_eq!(
            options.name_mapper().map("org.example.app"),
            ("com.acme".to_string(), "App".to_string())
        );
    }

    #[test]
    fn test_invalid_indent() {
        let options = GeneratorOptions {
            indent: "x".to_string(),
            ..Default::default()
        };
        assert!(matches!(options.indent(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_class_options_must_be_qualified() {
        let name = GeneratorOptions::class_option("duration-class", None, "java.time.Duration")
            .unwrap();
        assert_eq!(name.canonical(), "java.time.Duration");

        let err = GeneratorOptions::optional_class_option("non-null-annotation", Some("NonNull"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: `non-null-annotation` must be a fully qualified class name, got `NonNull`"
        );
        assert_eq!(
            GeneratorOptions::optional_class_option("named", None).unwrap(),
            None
        );
    }
}
