//! Fixture builders for tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.
//!
//! ```ignore
//! use hpkl_schema::testing::*;
//!
//! let mut module = ModuleBuilder::new("org.mod");
//! let address = module
//!     .class("Address")
//!     .property("street", nullable(string()))
//!     .id();
//! module.module_class().property("home", class(address));
//! let schema = module.build();
//! ```

use indexmap::IndexMap;

use crate::module::default_module_uri;
use crate::{
    AliasId, Annotation, BuiltinClass, ClassDef, ClassId, ClassOrigin, ModuleSchema, PropertyDef,
    Registry, StdlibAlias, TypeAliasDef, TypeParameter, TypeRef, Variance,
};

/// Builds a [`ModuleSchema`] declaration by declaration.
pub struct ModuleBuilder {
    registry: Registry,
    module_name: String,
    module_uri: String,
    module_class: ClassId,
    classes: IndexMap<String, ClassId>,
    type_aliases: IndexMap<String, AliasId>,
}

impl ModuleBuilder {
    pub fn new(module_name: &str) -> Self {
        let mut registry = Registry::new();
        let module_class = declare(&mut registry, module_class_def(module_name));
        Self {
            registry,
            module_name: module_name.to_string(),
            module_uri: default_module_uri(module_name),
            module_class,
            classes: IndexMap::new(),
            type_aliases: IndexMap::new(),
        }
    }

    pub fn uri(&mut self, uri: &str) -> &mut Self {
        self.module_uri = uri.to_string();
        self
    }

    pub fn module_class(&mut self) -> ClassBuilder<'_> {
        ClassBuilder {
            registry: &mut self.registry,
            id: self.module_class,
        }
    }

    /// Declare a class in this module, or reopen it if already declared.
    pub fn class(&mut self, simple_name: &str) -> ClassBuilder<'_> {
        let id = match self.classes.get(simple_name) {
            Some(id) => *id,
            None => {
                let mut class = ClassDef::new(&self.module_name, simple_name);
                class.superclass = Some(BuiltinClass::Typed.id());
                let id = declare(&mut self.registry, class);
                self.classes.insert(simple_name.to_string(), id);
                id
            }
        };
        ClassBuilder {
            registry: &mut self.registry,
            id,
        }
    }

    /// Reopen any registered class.
    pub fn edit(&mut self, id: ClassId) -> ClassBuilder<'_> {
        ClassBuilder {
            registry: &mut self.registry,
            id,
        }
    }

    /// Register a class declared by another module.
    pub fn import_class(&mut self, module_name: &str, simple_name: &str) -> ClassBuilder<'_> {
        let mut class = ClassDef::new(module_name, simple_name);
        class.superclass = Some(BuiltinClass::Typed.id());
        let id = declare(&mut self.registry, class);
        ClassBuilder {
            registry: &mut self.registry,
            id,
        }
    }

    /// Register the module class of another module.
    pub fn import_module_class(&mut self, module_name: &str) -> ClassBuilder<'_> {
        let id = declare(&mut self.registry, module_class_def(module_name));
        ClassBuilder {
            registry: &mut self.registry,
            id,
        }
    }

    /// Register a non-builtin standard library class such as `pkl.base#IntSeq`.
    pub fn stdlib_class(&mut self, qualified_name: &str) -> ClassId {
        let (module, simple) = qualified_name
            .split_once('#')
            .unwrap_or(("pkl.base", qualified_name));
        let mut class = ClassDef::new(module, simple);
        class.origin = ClassOrigin::StandardLibrary;
        class.superclass = Some(BuiltinClass::Any.id());
        declare(&mut self.registry, class)
    }

    pub fn alias(&mut self, simple_name: &str, aliased_type: TypeRef) -> AliasId {
        self.generic_alias(simple_name, &[], aliased_type)
    }

    pub fn generic_alias(
        &mut self,
        simple_name: &str,
        type_parameters: &[(&str, Variance)],
        aliased_type: TypeRef,
    ) -> AliasId {
        let mut alias = TypeAliasDef::new(&self.module_name, simple_name, aliased_type);
        alias.type_parameters = type_parameters
            .iter()
            .map(|(name, variance)| TypeParameter::new(*name, *variance))
            .collect();
        let id = self
            .registry
            .add_alias(alias)
            .unwrap_or_else(|| panic!("type alias '{}' declared twice", simple_name));
        self.type_aliases.insert(simple_name.to_string(), id);
        id
    }

    /// Register a standard library alias that is not one of the well-known ones.
    pub fn stdlib_alias(&mut self, simple_name: &str, aliased_type: TypeRef) -> AliasId {
        let mut alias = TypeAliasDef::new("pkl.base", simple_name, aliased_type);
        alias.is_standard_library_member = true;
        self.registry
            .add_alias(alias)
            .unwrap_or_else(|| panic!("type alias '{}' declared twice", simple_name))
    }

    pub fn set_alias_doc(&mut self, id: AliasId, doc: &str) {
        self.registry.alias_mut(id).doc_comment = Some(doc.to_string());
    }

    pub fn build(self) -> ModuleSchema {
        ModuleSchema {
            module_name: self.module_name,
            module_uri: self.module_uri,
            module_class: self.module_class,
            classes: self.classes,
            type_aliases: self.type_aliases,
            registry: self.registry,
        }
    }
}

fn module_class_def(module_name: &str) -> ClassDef {
    let mut class = ClassDef::module(module_name);
    class.superclass = Some(BuiltinClass::Module.id());
    class
}

fn declare(registry: &mut Registry, class: ClassDef) -> ClassId {
    let name = class.qualified_name.clone();
    registry
        .add_class(class)
        .unwrap_or_else(|| panic!("class '{}' declared twice", name))
}

/// Configures one class of a [`ModuleBuilder`].
pub struct ClassBuilder<'a> {
    registry: &'a mut Registry,
    id: ClassId,
}

impl ClassBuilder<'_> {
    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn property(self, name: &str, ty: TypeRef) -> Self {
        self.property_def(PropertyDef::new(name, ty))
    }

    pub fn hidden(self, name: &str, ty: TypeRef) -> Self {
        let mut property = PropertyDef::new(name, ty);
        property.is_hidden = true;
        self.property_def(property)
    }

    pub fn deprecated_property(self, name: &str, ty: TypeRef, message: Option<&str>) -> Self {
        let mut property = PropertyDef::new(name, ty);
        property.annotations.push(Annotation::deprecated(message));
        self.property_def(property)
    }

    pub fn documented_property(self, name: &str, ty: TypeRef, doc: &str) -> Self {
        let mut property = PropertyDef::new(name, ty);
        property.doc_comment = Some(doc.to_string());
        self.property_def(property)
    }

    pub fn property_def(self, property: PropertyDef) -> Self {
        self.registry
            .class_mut(self.id)
            .properties
            .insert(property.simple_name.clone(), property);
        self
    }

    pub fn extends(self, superclass: ClassId) -> Self {
        self.registry.class_mut(self.id).superclass = Some(superclass);
        self
    }

    pub fn abstract_class(self) -> Self {
        self.registry.class_mut(self.id).is_abstract = true;
        self
    }

    pub fn open(self) -> Self {
        self.registry.class_mut(self.id).is_open = true;
        self
    }

    pub fn doc(self, doc: &str) -> Self {
        self.registry.class_mut(self.id).doc_comment = Some(doc.to_string());
        self
    }

    pub fn annotate(self, annotation: Annotation) -> Self {
        self.registry.class_mut(self.id).annotations.push(annotation);
        self
    }

    pub fn deprecated(self, message: Option<&str>) -> Self {
        self.annotate(Annotation::deprecated(message))
    }
}

pub fn string() -> TypeRef {
    TypeRef::builtin(BuiltinClass::String)
}

pub fn int() -> TypeRef {
    TypeRef::builtin(BuiltinClass::Int)
}

pub fn float() -> TypeRef {
    TypeRef::builtin(BuiltinClass::Float)
}

pub fn boolean() -> TypeRef {
    TypeRef::builtin(BuiltinClass::Boolean)
}

pub fn any() -> TypeRef {
    TypeRef::builtin(BuiltinClass::Any)
}

pub fn duration() -> TypeRef {
    TypeRef::builtin(BuiltinClass::Duration)
}

pub fn data_size() -> TypeRef {
    TypeRef::builtin(BuiltinClass::DataSize)
}

pub fn regex() -> TypeRef {
    TypeRef::builtin(BuiltinClass::Regex)
}

pub fn nullable(inner: TypeRef) -> TypeRef {
    TypeRef::nullable(inner)
}

pub fn list(element: TypeRef) -> TypeRef {
    TypeRef::builtin_of(BuiltinClass::List, vec![element])
}

pub fn listing(element: TypeRef) -> TypeRef {
    TypeRef::builtin_of(BuiltinClass::Listing, vec![element])
}

pub fn set(element: TypeRef) -> TypeRef {
    TypeRef::builtin_of(BuiltinClass::Set, vec![element])
}

pub fn map(key: TypeRef, value: TypeRef) -> TypeRef {
    TypeRef::builtin_of(BuiltinClass::Map, vec![key, value])
}

pub fn mapping(key: TypeRef, value: TypeRef) -> TypeRef {
    TypeRef::builtin_of(BuiltinClass::Mapping, vec![key, value])
}

pub fn pair(first: TypeRef, second: TypeRef) -> TypeRef {
    TypeRef::builtin_of(BuiltinClass::Pair, vec![first, second])
}

pub fn class(id: ClassId) -> TypeRef {
    TypeRef::class(id)
}

pub fn alias(id: AliasId) -> TypeRef {
    TypeRef::alias(id)
}

pub fn alias_of(id: AliasId, type_arguments: Vec<TypeRef>) -> TypeRef {
    TypeRef::Alias {
        alias: id,
        type_arguments,
    }
}

pub fn width(alias: StdlibAlias) -> TypeRef {
    TypeRef::stdlib_alias(alias)
}

pub fn literals(values: &[&str]) -> TypeRef {
    TypeRef::literal_union(values.iter().copied())
}

pub fn variable(name: &str) -> TypeRef {
    TypeRef::TypeVariable(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let mut module = ModuleBuilder::new("org.mod");
        module.class("B");
        module.class("A");
        module.alias("Z", string());
        module.alias("Y", int());
        let schema = module.build();

        assert_eq!(schema.classes.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(schema.type_aliases.keys().collect::<Vec<_>>(), vec!["Z", "Y"]);
    }

    #[test]
    fn test_recursive_class() {
        let mut module = ModuleBuilder::new("org.mod");
        let node = module.class("Node").id();
        module
            .class("Node")
            .property("next", nullable(class(node)));
        let schema = module.build();

        let next = &schema.class(node).properties["next"];
        assert_eq!(next.ty, nullable(class(node)));
    }
}
