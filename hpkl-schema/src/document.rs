//! JSON interchange format for module schemas.
//!
//! The evaluator describes one module per document. Names inside a document are
//! resolved in this order: qualified names (`org.mod#Person`, `pkl.base#Int`,
//! `other.mod`), classes and aliases declared by the document, then builtins by
//! simple name (`Int`, `List`, `UInt8`).
//!
//! ```json
//! {
//!   "moduleName": "org.mod",
//!   "moduleClass": { "properties": { "person": { "type": { "kind": "class", "name": "Person" } } } },
//!   "classes": [
//!     {
//!       "name": "Person",
//!       "properties": {
//!         "name": { "type": { "kind": "class", "name": "String" } },
//!         "age": { "type": { "kind": "nullable", "type": { "kind": "alias", "name": "UInt8" } } }
//!       },
//!       "defaults": { "name": "Pigeon", "age": null }
//!     }
//!   ],
//!   "typeAliases": [
//!     { "name": "Diet", "type": { "kind": "union", "members": [
//!       { "kind": "string-literal", "value": "Seeds" },
//!       { "kind": "string-literal", "value": "Berries" }
//!     ] } }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SourceContext;
use crate::module::default_module_uri;
use crate::{
    AliasId, Annotation, BuiltinClass, ClassDef, ClassId, ClassOrigin, DataSize, Duration, Error,
    ModuleSchema, ObjectValue, PropertyDef, Registry, Result, StdlibAlias, TypeAliasDef,
    TypeParameter, TypeRef, Value, Variance,
};

/// Top-level schema document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    pub module_name: String,
    #[serde(default)]
    pub module_uri: Option<String>,
    #[serde(default)]
    pub module_class: ClassEntry,
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
    #[serde(default)]
    pub type_aliases: Vec<AliasEntry>,
    #[serde(default)]
    pub imports: Imports,
}

/// A class declaration. `name` is a simple name for local classes and a
/// qualified name for imported ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "open")]
    pub is_open: bool,
    /// Marks an imported class as coming from the standard library.
    #[serde(default)]
    pub stdlib: bool,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyEntry>,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
    #[serde(default)]
    pub doc_comment: Option<String>,
    /// Evaluated default values, when the evaluator computed them.
    #[serde(default)]
    pub defaults: Option<IndexMap<String, ValueEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEntry {
    #[serde(rename = "type")]
    pub ty: TypeEntry,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
    #[serde(default)]
    pub doc_comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub aliased_type: TypeEntry,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterEntry>,
    #[serde(default)]
    pub stdlib: bool,
    #[serde(default)]
    pub doc_comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeParameterEntry {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationEntry {
    pub class: String,
    #[serde(default)]
    pub properties: IndexMap<String, ValueEntry>,
}

/// Declarations from other modules that this module references.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Imports {
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
    #[serde(default)]
    pub type_aliases: Vec<AliasEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeEntry {
    Unknown,
    Nothing,
    StringLiteral {
        value: String,
    },
    Class {
        name: String,
        #[serde(default)]
        args: Vec<TypeEntry>,
    },
    Nullable {
        #[serde(rename = "type")]
        inner: Box<TypeEntry>,
    },
    Constrained {
        #[serde(rename = "type")]
        inner: Box<TypeEntry>,
    },
    Alias {
        name: String,
        #[serde(default)]
        args: Vec<TypeEntry>,
    },
    Function,
    Union {
        members: Vec<TypeEntry>,
    },
    TypeVariable {
        name: String,
    },
}

/// A value as it appears in a document. Plain JSON scalars and arrays map
/// directly; durations, data sizes, maps, and objects are tagged with `kind`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ValueEntry {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ValueEntry>),
    Tagged(TaggedValue),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaggedValue {
    Duration(Duration),
    DataSize(DataSize),
    Map {
        entries: Vec<(ValueEntry, ValueEntry)>,
    },
    Object {
        class: String,
        #[serde(default)]
        properties: IndexMap<String, ValueEntry>,
    },
}

/// Default values embedded in a schema document, keyed by qualified class name.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedDefaults {
    by_class: HashMap<String, IndexMap<String, Value>>,
}

impl EmbeddedDefaults {
    pub fn get(&self, qualified_class_name: &str) -> Option<&IndexMap<String, Value>> {
        self.by_class.get(qualified_class_name)
    }

    pub fn insert(&mut self, qualified_class_name: String, values: IndexMap<String, Value>) {
        self.by_class.insert(qualified_class_name, values);
    }

    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }
}

/// A resolved document.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub schema: ModuleSchema,
    pub defaults: EmbeddedDefaults,
}

impl SchemaDocument {
    /// Read and resolve a document from disk.
    pub fn load(path: &Path) -> Result<LoadedSchema> {
        let src = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::parse(&src, &path.display().to_string())
    }

    /// Parse and resolve a document.
    pub fn parse(src: &str, filename: &str) -> Result<LoadedSchema> {
        let ctx = SourceContext::new(src, filename);
        let document: SchemaDocument =
            serde_json::from_str(src).map_err(|e| ctx.parse_error(e))?;
        document.resolve(&ctx)
    }

    fn resolve(self, ctx: &SourceContext) -> Result<LoadedSchema> {
        let mut resolver = Resolver {
            ctx,
            registry: Registry::new(),
            local_classes: IndexMap::new(),
            local_aliases: IndexMap::new(),
        };

        // Declare every class and alias first so that bodies can reference
        // each other in any order.
        let mut module_class = ClassDef::module(&self.module_name);
        module_class.superclass = Some(BuiltinClass::Module.id());
        let module_class_id = resolver.declare_class(module_class)?;

        let mut class_ids = Vec::with_capacity(self.classes.len());
        for entry in &self.classes {
            let id = resolver.declare_class(ClassDef::new(&self.module_name, &entry.name))?;
            resolver.local_classes.insert(entry.name.clone(), id);
            class_ids.push(id);
        }
        let mut import_ids = Vec::with_capacity(self.imports.classes.len());
        for entry in &self.imports.classes {
            import_ids.push(resolver.declare_class(imported_class(entry))?);
        }

        let mut alias_ids = Vec::with_capacity(self.type_aliases.len());
        for entry in &self.type_aliases {
            let alias = TypeAliasDef::new(&self.module_name, &entry.name, TypeRef::Unknown);
            let id = resolver.declare_alias(alias)?;
            resolver.local_aliases.insert(entry.name.clone(), id);
            alias_ids.push(id);
        }
        let mut imported_alias_ids = Vec::with_capacity(self.imports.type_aliases.len());
        for entry in &self.imports.type_aliases {
            imported_alias_ids.push(resolver.declare_alias(imported_alias(entry))?);
        }

        let mut defaults = EmbeddedDefaults::default();
        resolver.define_class(module_class_id, &self.module_class, &mut defaults)?;
        for (id, entry) in class_ids.iter().zip(&self.classes) {
            resolver.define_class(*id, entry, &mut defaults)?;
        }
        for (id, entry) in import_ids.iter().zip(&self.imports.classes) {
            resolver.define_class(*id, entry, &mut defaults)?;
        }
        for (id, entry) in alias_ids.iter().zip(&self.type_aliases) {
            resolver.define_alias(*id, entry)?;
        }
        for (id, entry) in imported_alias_ids.iter().zip(&self.imports.type_aliases) {
            resolver.define_alias(*id, entry)?;
        }

        for id in std::iter::once(module_class_id)
            .chain(class_ids.iter().copied())
            .chain(import_ids.iter().copied())
        {
            if resolver.registry.has_superclass_cycle(id) {
                let name = &resolver.registry.class(id).qualified_name;
                return Err(ctx.validation_error(format!(
                    "superclass chain of '{}' contains a cycle",
                    name
                )));
            }
        }

        let schema = ModuleSchema {
            module_uri: self
                .module_uri
                .unwrap_or_else(|| default_module_uri(&self.module_name)),
            module_name: self.module_name,
            module_class: module_class_id,
            classes: resolver.local_classes,
            type_aliases: resolver.local_aliases,
            registry: resolver.registry,
        };
        Ok(LoadedSchema { schema, defaults })
    }
}

fn imported_class(entry: &ClassEntry) -> ClassDef {
    let mut class = match entry.name.split_once('#') {
        Some((module, simple)) => ClassDef::new(module, simple),
        None => ClassDef::module(&entry.name),
    };
    if entry.stdlib {
        class.origin = ClassOrigin::StandardLibrary;
    }
    class
}

fn imported_alias(entry: &AliasEntry) -> TypeAliasDef {
    let (module, simple) = entry
        .name
        .split_once('#')
        .unwrap_or(("", entry.name.as_str()));
    let mut alias = TypeAliasDef::new(module, simple, TypeRef::Unknown);
    alias.is_standard_library_member = entry.stdlib;
    alias
}

struct Resolver<'a> {
    ctx: &'a SourceContext,
    registry: Registry,
    local_classes: IndexMap<String, ClassId>,
    local_aliases: IndexMap<String, AliasId>,
}

impl Resolver<'_> {
    fn declare_class(&mut self, class: ClassDef) -> Result<ClassId> {
        let name = class.qualified_name.clone();
        self.registry
            .add_class(class)
            .ok_or_else(|| self.ctx.duplicate_declaration(name))
    }

    fn declare_alias(&mut self, alias: TypeAliasDef) -> Result<AliasId> {
        let name = alias.qualified_name.clone();
        self.registry
            .add_alias(alias)
            .ok_or_else(|| self.ctx.duplicate_declaration(name))
    }

    fn define_class(
        &mut self,
        id: ClassId,
        entry: &ClassEntry,
        defaults: &mut EmbeddedDefaults,
    ) -> Result<()> {
        let referenced_by = self.registry.class(id).qualified_name.clone();
        let is_module_class = self.registry.class(id).is_module_class;

        let superclass = match &entry.superclass {
            Some(name) => self.class_named(name, &referenced_by)?,
            None if is_module_class => BuiltinClass::Module.id(),
            None => BuiltinClass::Typed.id(),
        };

        let mut properties = IndexMap::new();
        for (name, property) in &entry.properties {
            let mut def = PropertyDef::new(name, self.type_of(&property.ty, &referenced_by)?);
            def.is_hidden = property.hidden;
            def.doc_comment = property.doc_comment.clone();
            def.annotations = self.annotations(&property.annotations, &referenced_by)?;
            properties.insert(name.clone(), def);
        }
        let annotations = self.annotations(&entry.annotations, &referenced_by)?;

        if let Some(values) = &entry.defaults {
            let mut resolved = IndexMap::new();
            for (name, value) in values {
                resolved.insert(name.clone(), self.value_of(value, &referenced_by)?);
            }
            defaults.insert(referenced_by.clone(), resolved);
        }

        let class = self.registry.class_mut(id);
        class.superclass = Some(superclass);
        class.is_abstract = entry.is_abstract;
        class.is_open = entry.is_open;
        class.properties = properties;
        class.annotations = annotations;
        class.doc_comment = entry.doc_comment.clone();
        Ok(())
    }

    fn define_alias(&mut self, id: AliasId, entry: &AliasEntry) -> Result<()> {
        let referenced_by = self.registry.alias(id).qualified_name.clone();
        let aliased_type = self.type_of(&entry.aliased_type, &referenced_by)?;

        let alias = self.registry.alias_mut(id);
        alias.aliased_type = aliased_type;
        alias.type_parameters = entry
            .type_parameters
            .iter()
            .map(|p| TypeParameter::new(&p.name, p.variance))
            .collect();
        alias.doc_comment = entry.doc_comment.clone();
        Ok(())
    }

    fn class_named(&mut self, name: &str, referenced_by: &str) -> Result<ClassId> {
        if let Some(id) = self.registry.find_class(name) {
            return Ok(id);
        }
        if let Some(id) = self.local_classes.get(name) {
            return Ok(*id);
        }
        if let Some(builtin) = BuiltinClass::from_name(name) {
            return Ok(builtin.id());
        }
        // Library classes without dedicated mappings are registered on first use.
        if let Some((module, simple)) = name.split_once('#')
            && module.starts_with("pkl.")
        {
            let mut class = ClassDef::new(module, simple);
            class.origin = ClassOrigin::StandardLibrary;
            class.superclass = Some(BuiltinClass::Any.id());
            return self.declare_class(class);
        }
        Err(self.ctx.unknown_class(name, referenced_by))
    }

    fn alias_named(&self, name: &str, referenced_by: &str) -> Result<AliasId> {
        if let Some(id) = self.registry.find_alias(name) {
            return Ok(id);
        }
        if let Some(id) = self.local_aliases.get(name) {
            return Ok(*id);
        }
        if let Some(alias) = StdlibAlias::ALL.iter().find(|a| a.simple_name() == name) {
            return Ok(alias.id());
        }
        Err(self.ctx.unknown_alias(name, referenced_by))
    }

    fn type_of(&mut self, entry: &TypeEntry, referenced_by: &str) -> Result<TypeRef> {
        Ok(match entry {
            TypeEntry::Unknown => TypeRef::Unknown,
            TypeEntry::Nothing => TypeRef::Nothing,
            TypeEntry::StringLiteral { value } => TypeRef::StringLiteral(value.clone()),
            TypeEntry::Class { name, args } => TypeRef::Class {
                class: self.class_named(name, referenced_by)?,
                type_arguments: self.types_of(args, referenced_by)?,
            },
            TypeEntry::Nullable { inner } => TypeRef::nullable(self.type_of(inner, referenced_by)?),
            TypeEntry::Constrained { inner } => {
                TypeRef::constrained(self.type_of(inner, referenced_by)?)
            }
            TypeEntry::Alias { name, args } => TypeRef::Alias {
                alias: self.alias_named(name, referenced_by)?,
                type_arguments: self.types_of(args, referenced_by)?,
            },
            TypeEntry::Function => TypeRef::Function,
            TypeEntry::Union { members } => TypeRef::Union(self.types_of(members, referenced_by)?),
            TypeEntry::TypeVariable { name } => TypeRef::TypeVariable(name.clone()),
        })
    }

    fn types_of(&mut self, entries: &[TypeEntry], referenced_by: &str) -> Result<Vec<TypeRef>> {
        entries
            .iter()
            .map(|entry| self.type_of(entry, referenced_by))
            .collect()
    }

    fn annotations(
        &mut self,
        entries: &[AnnotationEntry],
        referenced_by: &str,
    ) -> Result<Vec<Annotation>> {
        let mut annotations = Vec::with_capacity(entries.len());
        for entry in entries {
            let class = self.class_named(&entry.class, referenced_by)?;
            let mut annotation = Annotation::new(self.registry.class(class).qualified_name.clone());
            for (name, value) in &entry.properties {
                annotation
                    .properties
                    .insert(name.clone(), self.value_of(value, referenced_by)?);
            }
            annotations.push(annotation);
        }
        Ok(annotations)
    }

    fn value_of(&mut self, entry: &ValueEntry, referenced_by: &str) -> Result<Value> {
        Ok(match entry {
            ValueEntry::Null => Value::Null,
            ValueEntry::Boolean(value) => Value::Boolean(*value),
            ValueEntry::Int(value) => Value::Int(*value),
            ValueEntry::Float(value) => Value::Float(*value),
            ValueEntry::String(value) => Value::String(value.clone()),
            ValueEntry::List(items) => Value::List(
                items
                    .iter()
                    .map(|item| self.value_of(item, referenced_by))
                    .collect::<Result<_>>()?,
            ),
            ValueEntry::Tagged(TaggedValue::Duration(duration)) => Value::Duration(*duration),
            ValueEntry::Tagged(TaggedValue::DataSize(size)) => Value::DataSize(*size),
            ValueEntry::Tagged(TaggedValue::Map { entries }) => {
                let mut resolved = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    resolved.push((
                        self.value_of(key, referenced_by)?,
                        self.value_of(value, referenced_by)?,
                    ));
                }
                Value::Map(resolved)
            }
            ValueEntry::Tagged(TaggedValue::Object { class, properties }) => {
                let id = self.class_named(class, referenced_by)?;
                let mut resolved = IndexMap::new();
                for (name, value) in properties {
                    resolved.insert(name.clone(), self.value_of(value, referenced_by)?);
                }
                Value::Object(ObjectValue {
                    class_name: self.registry.class(id).qualified_name.clone(),
                    properties: resolved,
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSON: &str = r#"{
        "moduleName": "org.mod",
        "moduleClass": {
            "properties": {
                "person": { "type": { "kind": "class", "name": "Person" } }
            }
        },
        "classes": [
            {
                "name": "Person",
                "properties": {
                    "name": { "type": { "kind": "class", "name": "String" } },
                    "age": { "type": { "kind": "nullable", "type": { "kind": "alias", "name": "UInt8" } } },
                    "diet": { "type": { "kind": "alias", "name": "Diet" } }
                },
                "defaults": {
                    "name": "Pigeon",
                    "age": null,
                    "timeout": { "kind": "duration", "value": 1, "unit": "s" }
                }
            }
        ],
        "typeAliases": [
            {
                "name": "Diet",
                "type": { "kind": "union", "members": [
                    { "kind": "string-literal", "value": "Seeds" },
                    { "kind": "string-literal", "value": "Berries" }
                ] }
            }
        ]
    }"#;

    #[test]
    fn test_parse_resolves_names() {
        let loaded = SchemaDocument::parse(PERSON, "person.json").unwrap();
        let schema = &loaded.schema;

        assert_eq!(schema.module_name, "org.mod");
        assert_eq!(schema.module_uri, "file:///org/mod.pkl");

        let person = schema.classes["Person"];
        let class = schema.class(person);
        assert_eq!(class.qualified_name, "org.mod#Person");
        assert_eq!(class.superclass, Some(BuiltinClass::Typed.id()));
        assert_eq!(
            class.properties["age"].ty,
            TypeRef::nullable(TypeRef::stdlib_alias(StdlibAlias::UInt8))
        );

        let module_class = schema.module_class();
        assert_eq!(module_class.properties["person"].ty, TypeRef::class(person));
        assert_eq!(module_class.superclass, Some(BuiltinClass::Module.id()));
    }

    #[test]
    fn test_parse_collects_defaults() {
        let loaded = SchemaDocument::parse(PERSON, "person.json").unwrap();
        let defaults = loaded.defaults.get("org.mod#Person").unwrap();

        assert_eq!(defaults["name"], Value::String("Pigeon".into()));
        assert_eq!(defaults["age"], Value::Null);
        assert_eq!(
            defaults["timeout"],
            Value::Duration(Duration::new(1.0, crate::DurationUnit::Seconds))
        );
        assert!(loaded.defaults.get("org.mod").is_none());
    }

    #[test]
    fn test_integer_and_float_values() {
        let src = r#"{
            "moduleName": "m",
            "moduleClass": { "defaults": { "a": 10, "b": 1.5, "c": [1, 2], "d": { "kind": "map", "entries": [[1, "x"]] } } }
        }"#;
        let loaded = SchemaDocument::parse(src, "m.json").unwrap();
        let defaults = loaded.defaults.get("m").unwrap();

        assert_eq!(defaults["a"], Value::Int(10));
        assert_eq!(defaults["b"], Value::Float(1.5));
        assert_eq!(defaults["c"], Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(
            defaults["d"],
            Value::Map(vec![(Value::Int(1), Value::String("x".into()))])
        );
    }

    #[test]
    fn test_unknown_class_is_reported() {
        let src = r#"{
            "moduleName": "org.mod",
            "classes": [
                { "name": "A", "properties": { "b": { "type": { "kind": "class", "name": "Missing" } } } }
            ]
        }"#;
        let err = SchemaDocument::parse(src, "m.json").unwrap_err();
        assert!(matches!(*err, Error::UnknownClass { ref name, .. } if name == "Missing"));
    }

    #[test]
    fn test_stdlib_classes_registered_on_use() {
        let src = r#"{
            "moduleName": "org.mod",
            "moduleClass": { "properties": { "seq": { "type": { "kind": "class", "name": "pkl.base#IntSeq" } } } }
        }"#;
        let loaded = SchemaDocument::parse(src, "m.json").unwrap();
        let schema = &loaded.schema;
        let TypeRef::Class { class, .. } = &schema.module_class().properties["seq"].ty else {
            panic!("expected class type");
        };
        assert_eq!(schema.class(*class).origin, ClassOrigin::StandardLibrary);
    }

    #[test]
    fn test_superclass_cycle_is_rejected() {
        let src = r#"{
            "moduleName": "org.mod",
            "classes": [
                { "name": "A", "superclass": "B" },
                { "name": "B", "superclass": "A" }
            ]
        }"#;
        let err = SchemaDocument::parse(src, "m.json").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_duplicate_class_is_rejected() {
        let src = r#"{ "moduleName": "org.mod", "classes": [ { "name": "A" }, { "name": "A" } ] }"#;
        let err = SchemaDocument::parse(src, "m.json").unwrap_err();
        assert!(matches!(*err, Error::DuplicateDeclaration { .. }));
    }

    #[test]
    fn test_imported_module_class() {
        let src = r#"{
            "moduleName": "org.app",
            "moduleClass": { "properties": { "base": { "type": { "kind": "class", "name": "org.lib#Base" } } } },
            "imports": { "classes": [ { "name": "org.lib#Base", "open": true } ] }
        }"#;
        let loaded = SchemaDocument::parse(src, "m.json").unwrap();
        let id = loaded.schema.registry.find_class("org.lib#Base").unwrap();
        let class = loaded.schema.class(id);
        assert_eq!(class.module_name, "org.lib");
        assert!(class.is_open);
        assert!(loaded.schema.classes.is_empty());
    }

    #[test]
    fn test_parse_error_has_location() {
        let err = SchemaDocument::parse("{ \"moduleName\": ", "m.json").unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }
}
