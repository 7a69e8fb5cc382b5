//! Effective property layout of a class.

use hpkl_schema::{BuiltinClass, ClassDef, ClassId, PropertyDef, Registry};
use indexmap::IndexMap;

use crate::naming::NamingConvention;

/// The properties a generated class declares, inherits, and exposes.
///
/// Keys are target-language names (reserved words already renamed); hidden
/// properties never appear.
#[derive(Debug, Clone)]
pub struct PropertyLayout<'s> {
    superclass: Option<ClassId>,
    super_properties: IndexMap<String, &'s PropertyDef>,
    own_properties: IndexMap<String, &'s PropertyDef>,
    properties: IndexMap<String, &'s PropertyDef>,
}

impl<'s> PropertyLayout<'s> {
    pub fn new(registry: &'s Registry, id: ClassId, naming: &NamingConvention) -> Self {
        let superclass = emitted_superclass(registry, id);
        let super_properties = match superclass {
            Some(superclass) => naming.rename_reserved(
                registry
                    .all_properties(superclass)
                    .into_iter()
                    .filter(|(_, property)| !property.is_hidden),
            ),
            None => IndexMap::new(),
        };
        let own: Vec<(&String, &PropertyDef)> = registry
            .class(id)
            .properties
            .iter()
            .filter(|(_, property)| !property.is_hidden)
            .collect();
        // Renamed own properties must not land on an inherited name they do
        // not override.
        let inherited: Vec<String> = super_properties
            .iter()
            .filter(|(_, property)| !own.iter().any(|(name, _)| **name == property.simple_name))
            .map(|(name, _)| name.clone())
            .collect();
        let own_properties = naming.rename_reserved_avoiding(own, inherited);

        let mut properties = super_properties.clone();
        for (name, property) in &own_properties {
            properties.insert(name.clone(), *property);
        }

        Self {
            superclass,
            super_properties,
            own_properties,
            properties,
        }
    }

    /// The superclass that appears in generated code.
    pub fn superclass(&self) -> Option<ClassId> {
        self.superclass
    }

    /// Visible properties of the superclass, in its order.
    pub fn super_properties(&self) -> &IndexMap<String, &'s PropertyDef> {
        &self.super_properties
    }

    /// Visible properties declared by the class itself, overrides included.
    pub fn own_properties(&self) -> &IndexMap<String, &'s PropertyDef> {
        &self.own_properties
    }

    /// Effective properties: superclass order first, overrides in place, then
    /// purely own properties in declaration order.
    pub fn properties(&self) -> &IndexMap<String, &'s PropertyDef> {
        &self.properties
    }

    /// Whether `name` is declared by a superclass.
    pub fn is_inherited(&self, name: &str) -> bool {
        self.super_properties.contains_key(name)
    }

    /// Whether `name` is declared by the class itself.
    pub fn is_own(&self, name: &str) -> bool {
        self.own_properties.contains_key(name)
    }

    /// A class cannot be instantiated if it is abstract, or if it is a closed
    /// module class without properties.
    pub fn is_instantiable(&self, class: &ClassDef) -> bool {
        !(class.is_abstract
            || (class.is_module_class && !class.is_open && self.properties.is_empty()))
    }
}

/// The superclass of `id` that generated code extends.
///
/// The implicit roots `Typed` and `Module` are never emitted.
pub fn emitted_superclass(registry: &Registry, id: ClassId) -> Option<ClassId> {
    registry.class(id).superclass.filter(|superclass| {
        let superclass = registry.class(*superclass);
        !(superclass.is(BuiltinClass::Typed) || superclass.is(BuiltinClass::Module))
    })
}

/// Whether a class is an annotation, i.e. its superclass chain reaches the
/// library `Annotation` class.
pub fn is_annotation_class(registry: &Registry, id: ClassId) -> bool {
    registry
        .ancestry(id)
        .any(|(_, class)| class.is(BuiltinClass::Annotation))
}

#[cfg(test)]
mod tests {
    use hpkl_schema::testing::*;

    use super::*;

    const NAMING: NamingConvention = NamingConvention {
        reserved_words: &["class"],
    };

    #[test]
    fn test_effective_properties_merge_overrides() {
        let mut module = ModuleBuilder::new("org.mod");
        let base = module
            .class("Base")
            .open()
            .property("a", string())
            .property("b", string())
            .hidden("secret", string())
            .id();
        let derived = module
            .class("Derived")
            .extends(base)
            .property("c", int())
            .property("a", int())
            .id();
        let schema = module.build();

        let layout = PropertyLayout::new(&schema.registry, derived, &NAMING);
        let names: Vec<_> = layout.properties().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(layout.properties()["a"].ty, int());
        assert!(layout.is_inherited("a"));
        assert!(layout.is_own("a"));
        assert!(!layout.is_own("b"));
        assert_eq!(layout.superclass(), Some(base));
    }

    #[test]
    fn test_reserved_names_renamed() {
        let mut module = ModuleBuilder::new("org.mod");
        let id = module.class("Thing").property("class", string()).id();
        let schema = module.build();

        let layout = PropertyLayout::new(&schema.registry, id, &NAMING);
        assert_eq!(layout.own_properties()["_class"].simple_name, "class");
    }

    #[test]
    fn test_renamed_own_property_keeps_inherited_one() {
        let mut module = ModuleBuilder::new("org.mod");
        let base = module.class("Base").open().property("_class", string()).id();
        let derived = module
            .class("Derived")
            .extends(base)
            .property("class", int())
            .id();
        let schema = module.build();

        let layout = PropertyLayout::new(&schema.registry, derived, &NAMING);
        let names: Vec<_> = layout.properties().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["_class", "__class"]);
        assert_eq!(layout.properties()["_class"].ty, string());
        assert_eq!(layout.properties()["__class"].simple_name, "class");
        assert!(!layout.is_own("_class"));
    }

    #[test]
    fn test_reserved_override_keeps_inherited_name() {
        let mut module = ModuleBuilder::new("org.mod");
        let base = module.class("Base").open().property("class", string()).id();
        let derived = module
            .class("Derived")
            .extends(base)
            .property("class", string())
            .id();
        let schema = module.build();

        let layout = PropertyLayout::new(&schema.registry, derived, &NAMING);
        let names: Vec<_> = layout.properties().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["_class"]);
        assert!(layout.is_own("_class"));
        assert!(layout.is_inherited("_class"));
    }

    #[test]
    fn test_implicit_roots_not_emitted() {
        let mut module = ModuleBuilder::new("org.mod");
        let id = module.class("Thing").id();
        let schema = module.build();

        assert_eq!(emitted_superclass(&schema.registry, id), None);
        assert_eq!(emitted_superclass(&schema.registry, schema.module_class), None);
    }

    #[test]
    fn test_instantiability() {
        let mut module = ModuleBuilder::new("org.mod");
        let shape = module.class("Shape").abstract_class().id();
        let point = module.class("Point").id();
        let schema = module.build();
        let registry = &schema.registry;

        let layout = |id| PropertyLayout::new(registry, id, &NAMING);
        assert!(!layout(shape).is_instantiable(schema.class(shape)));
        assert!(layout(point).is_instantiable(schema.class(point)));
        assert!(!layout(schema.module_class).is_instantiable(schema.module_class()));
    }

    #[test]
    fn test_open_module_class_is_instantiable() {
        let mut module = ModuleBuilder::new("org.mod");
        module.module_class().open();
        let schema = module.build();

        let layout = PropertyLayout::new(&schema.registry, schema.module_class, &NAMING);
        assert!(layout.is_instantiable(schema.module_class()));
    }

    #[test]
    fn test_annotation_class_detection() {
        let mut module = ModuleBuilder::new("org.mod");
        let marker = module
            .class("Marker")
            .extends(BuiltinClass::Annotation.id())
            .id();
        let special = module.class("Special").extends(marker).id();
        let plain = module.class("Plain").id();
        let schema = module.build();

        assert!(is_annotation_class(&schema.registry, marker));
        assert!(is_annotation_class(&schema.registry, special));
        assert!(!is_annotation_class(&schema.registry, plain));
    }
}
