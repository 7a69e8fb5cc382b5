//! Default value lookup.
//!
//! Defaults are evaluated outside of this crate. A generator asks a
//! [`DefaultValueSource`] once per class; a failed lookup is logged and the
//! class is generated without defaults.

use hpkl_schema::{ClassDef, EmbeddedDefaults, ModuleSchema, Value};
use indexmap::IndexMap;
use thiserror::Error;

/// Property name to evaluated default value.
pub type DefaultValues = IndexMap<String, Value>;

/// Failure of a default value lookup. Never aborts generation.
#[derive(Debug, Error, PartialEq)]
pub enum DefaultLookupError {
    #[error("evaluation failed: {0}")]
    Evaluation(String),
    #[error("no default values recorded for `{0}`")]
    Unavailable(String),
}

/// A request for the defaults of one class.
#[derive(Debug, Clone, Copy)]
pub struct DefaultsRequest<'a> {
    pub module_uri: &'a str,
    /// Qualified name of the class, e.g. `org.mod#Person`.
    pub class_name: &'a str,
    pub simple_name: &'a str,
    pub is_module_class: bool,
}

impl<'a> DefaultsRequest<'a> {
    pub fn new(schema: &'a ModuleSchema, class: &'a ClassDef) -> Self {
        Self {
            module_uri: &schema.module_uri,
            class_name: &class.qualified_name,
            simple_name: &class.simple_name,
            is_module_class: class.is_module_class,
        }
    }

    /// The expression an evaluator runs inside the module to list the defaults.
    pub fn expression(&self) -> String {
        let class = if self.is_module_class {
            "module.getClass()"
        } else {
            self.simple_name
        };
        format!(
            "import(\"pkl:reflect\").Class({}).properties.map((k,v) -> Pair(k, v.defaultValue))",
            class
        )
    }
}

/// Evaluates the default values of a class.
pub trait DefaultValueSource {
    fn default_values(
        &self,
        request: &DefaultsRequest<'_>,
    ) -> Result<DefaultValues, DefaultLookupError>;
}

impl<F> DefaultValueSource for F
where
    F: Fn(&DefaultsRequest<'_>) -> Result<DefaultValues, DefaultLookupError>,
{
    fn default_values(
        &self,
        request: &DefaultsRequest<'_>,
    ) -> Result<DefaultValues, DefaultLookupError> {
        self(request)
    }
}

/// Defaults precomputed by the evaluator and embedded in the schema document.
impl DefaultValueSource for EmbeddedDefaults {
    fn default_values(
        &self,
        request: &DefaultsRequest<'_>,
    ) -> Result<DefaultValues, DefaultLookupError> {
        self.get(request.class_name)
            .cloned()
            .ok_or_else(|| DefaultLookupError::Unavailable(request.class_name.to_string()))
    }
}

/// Fetch the defaults of a class, swallowing failures.
///
/// Returns an empty map when no source is attached or the lookup fails; a
/// failure is logged as a warning.
pub fn lookup_defaults(
    source: Option<&dyn DefaultValueSource>,
    request: &DefaultsRequest<'_>,
) -> DefaultValues {
    let Some(source) = source else {
        return DefaultValues::new();
    };
    match source.default_values(request) {
        Ok(values) => {
            tracing::debug!(class = request.class_name, count = values.len(), "loaded defaults");
            values
        }
        Err(err) => {
            tracing::warn!(
                class = request.class_name,
                module = request.module_uri,
                "default values unavailable, generating without them: {}",
                err
            );
            DefaultValues::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use hpkl_schema::testing::ModuleBuilder;

    use super::*;

    #[test]
    fn test_expressions() {
        let mut module = ModuleBuilder::new("org.mod");
        let person = module.class("Person").id();
        let schema = module.build();

        let request = DefaultsRequest::new(&schema, schema.module_class());
        assert_eq!(
            request.expression(),
            "import(\"pkl:reflect\").Class(module.getClass()).properties.map((k,v) -> Pair(k, v.defaultValue))"
        );
        let request = DefaultsRequest::new(&schema, schema.class(person));
        assert_eq!(
            request.expression(),
            "import(\"pkl:reflect\").Class(Person).properties.map((k,v) -> Pair(k, v.defaultValue))"
        );
        assert_eq!(request.class_name, "org.mod#Person");
    }

    #[test]
    fn test_failed_lookup_is_swallowed() {
        let schema = ModuleBuilder::new("org.mod").build();
        let request = DefaultsRequest::new(&schema, schema.module_class());
        fn failing(_: &DefaultsRequest<'_>) -> Result<DefaultValues, DefaultLookupError> {
            Err(DefaultLookupError::Evaluation("boom".into()))
        }

        assert!(lookup_defaults(Some(&failing as &dyn DefaultValueSource), &request).is_empty());
        assert!(lookup_defaults(None, &request).is_empty());
    }

    #[test]
    fn test_embedded_defaults() {
        let schema = ModuleBuilder::new("org.mod").build();
        let request = DefaultsRequest::new(&schema, schema.module_class());

        let mut embedded = EmbeddedDefaults::default();
        assert_eq!(
            embedded.default_values(&request),
            Err(DefaultLookupError::Unavailable("org.mod".into()))
        );

        let mut values = DefaultValues::new();
        values.insert("port".into(), Value::Int(8080));
        embedded.insert("org.mod".to_string(), values);
        assert_eq!(embedded.default_values(&request).unwrap()["port"], Value::Int(8080));
    }
}
