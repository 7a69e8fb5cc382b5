use indexmap::IndexMap;

use crate::{AliasId, ClassDef, ClassId, PropertyDef, Registry, TypeAliasDef};

/// The schema of one module.
///
/// `classes` and `type_aliases` hold the declarations of this module only, in
/// declaration order; the registry also owns everything they reference.
#[derive(Debug, Clone)]
pub struct ModuleSchema {
    /// Dotted module name, e.g. `org.example.config`.
    pub module_name: String,
    pub module_uri: String,
    pub module_class: ClassId,
    pub classes: IndexMap<String, ClassId>,
    pub type_aliases: IndexMap<String, AliasId>,
    pub registry: Registry,
}

impl ModuleSchema {
    pub fn class(&self, id: ClassId) -> &ClassDef {
        self.registry.class(id)
    }

    pub fn alias(&self, id: AliasId) -> &TypeAliasDef {
        self.registry.alias(id)
    }

    pub fn module_class(&self) -> &ClassDef {
        self.class(self.module_class)
    }

    /// Identity check against this module's class.
    pub fn is_module_class(&self, id: ClassId) -> bool {
        id == self.module_class
    }

    /// The URI scheme, e.g. `file` or `pkl`.
    pub fn uri_scheme(&self) -> &str {
        self.module_uri
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .unwrap_or("")
    }

    /// Modules of the standard library cannot be generated.
    pub fn is_standard_library(&self) -> bool {
        self.uri_scheme() == "pkl"
    }

    /// Classes declared in this module, module class excluded.
    pub fn declared_classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> + '_ {
        self.classes.values().map(|id| (*id, self.class(*id)))
    }

    /// Type aliases declared in this module.
    pub fn declared_aliases(&self) -> impl Iterator<Item = (AliasId, &TypeAliasDef)> + '_ {
        self.type_aliases.values().map(|id| (*id, self.alias(*id)))
    }

    /// Merged properties of a class, see [`Registry::all_properties`].
    pub fn all_properties(&self, id: ClassId) -> IndexMap<&str, &PropertyDef> {
        self.registry.all_properties(id)
    }
}

/// URI assumed for a module whose document does not name one.
pub(crate) fn default_module_uri(module_name: &str) -> String {
    format!("file:///{}.pkl", module_name.replace('.', "/"))
}

#[cfg(test)]
mod tests {
    use crate::testing::ModuleBuilder;

    #[test]
    fn test_uri_scheme() {
        let mut builder = ModuleBuilder::new("org.mod");
        builder.uri("pkl:base");
        let schema = builder.build();
        assert_eq!(schema.uri_scheme(), "pkl");
        assert!(schema.is_standard_library());

        let schema = ModuleBuilder::new("org.mod").build();
        assert_eq!(schema.uri_scheme(), "file");
        assert!(!schema.is_standard_library());
    }

    #[test]
    fn test_module_class_identity() {
        let mut builder = ModuleBuilder::new("org.mod");
        let person = builder.class("Person").id();
        let schema = builder.build();

        assert!(schema.is_module_class(schema.module_class));
        assert!(!schema.is_module_class(person));
        assert_eq!(schema.module_class().simple_name, "mod");
    }
}
