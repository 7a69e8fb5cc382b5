//! Arena of class and alias declarations.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::{
    AliasId, BuiltinClass, ClassDef, ClassId, PropertyDef, StdlibAlias, TypeAliasDef, TypeRef,
};

/// Owns every class and type alias reachable from a schema.
///
/// Builtin classes and well-known standard library aliases are registered on
/// construction at fixed positions, see [`BuiltinClass::id`] and [`StdlibAlias::id`].
#[derive(Debug, Clone)]
pub struct Registry {
    classes: Vec<ClassDef>,
    aliases: Vec<TypeAliasDef>,
    class_index: HashMap<String, ClassId>,
    alias_index: HashMap<String, AliasId>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Self {
            classes: Vec::new(),
            aliases: Vec::new(),
            class_index: HashMap::new(),
            alias_index: HashMap::new(),
        };
        for builtin in BuiltinClass::ALL {
            registry.insert_class(builtin.definition());
        }
        for alias in StdlibAlias::ALL {
            registry.insert_alias(alias.definition());
        }
        registry
    }

    /// Register a class. Returns `None` if the qualified name is already taken.
    pub fn add_class(&mut self, class: ClassDef) -> Option<ClassId> {
        if self.class_index.contains_key(&class.qualified_name) {
            return None;
        }
        Some(self.insert_class(class))
    }

    /// Register a type alias. Returns `None` if the qualified name is already taken.
    pub fn add_alias(&mut self, alias: TypeAliasDef) -> Option<AliasId> {
        if self.alias_index.contains_key(&alias.qualified_name) {
            return None;
        }
        Some(self.insert_alias(alias))
    }

    fn insert_class(&mut self, class: ClassDef) -> ClassId {
        let id = ClassId(self.classes.len());
        self.class_index.insert(class.qualified_name.clone(), id);
        self.classes.push(class);
        id
    }

    fn insert_alias(&mut self, alias: TypeAliasDef) -> AliasId {
        let id = AliasId(self.aliases.len());
        self.alias_index.insert(alias.qualified_name.clone(), id);
        self.aliases.push(alias);
        id
    }

    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.0]
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassDef {
        &mut self.classes[id.0]
    }

    pub fn alias(&self, id: AliasId) -> &TypeAliasDef {
        &self.aliases[id.0]
    }

    pub(crate) fn alias_mut(&mut self, id: AliasId) -> &mut TypeAliasDef {
        &mut self.aliases[id.0]
    }

    pub fn find_class(&self, qualified_name: &str) -> Option<ClassId> {
        self.class_index.get(qualified_name).copied()
    }

    pub fn find_alias(&self, qualified_name: &str) -> Option<AliasId> {
        self.alias_index.get(qualified_name).copied()
    }

    /// The class followed by its superclasses, most derived first.
    pub fn ancestry(&self, id: ClassId) -> impl Iterator<Item = (ClassId, &ClassDef)> + '_ {
        std::iter::successors(Some(id), move |current| self.class(*current).superclass)
            .map(move |id| (id, self.class(id)))
    }

    /// Whether `id` is `ancestor` or transitively extends it.
    pub fn is_subclass_of(&self, id: ClassId, ancestor: ClassId) -> bool {
        self.ancestry(id).any(|(current, _)| current == ancestor)
    }

    /// Whether the superclass chain of `id` contains a cycle.
    pub fn has_superclass_cycle(&self, id: ClassId) -> bool {
        let mut seen = Vec::new();
        let mut current = Some(id);
        while let Some(class) = current {
            if seen.contains(&class) {
                return true;
            }
            seen.push(class);
            current = self.class(class).superclass;
        }
        false
    }

    /// All properties of a class including inherited ones.
    ///
    /// Superclass properties come first; an override keeps the position of the
    /// property it overrides. Hidden properties are included.
    pub fn all_properties(&self, id: ClassId) -> IndexMap<&str, &PropertyDef> {
        let chain: Vec<_> = self.ancestry(id).collect();
        let mut properties = IndexMap::new();
        for (_, class) in chain.into_iter().rev() {
            for (name, property) in &class.properties {
                properties.insert(name.as_str(), property);
            }
        }
        properties
    }

    /// The literals of a type that is a union of distinct string literals.
    ///
    /// Aliases and refinements are looked through. Returns `None` for any other type,
    /// including a union that repeats a literal.
    pub fn enum_literals(&self, ty: &TypeRef) -> Option<IndexSet<String>> {
        match ty {
            TypeRef::Union(members) => {
                let mut literals = IndexSet::new();
                for member in members {
                    match self.resolve_alias(member) {
                        TypeRef::StringLiteral(literal) => {
                            if !literals.insert(literal.clone()) {
                                return None;
                            }
                        }
                        _ => return None,
                    }
                }
                Some(literals)
            }
            TypeRef::Alias { alias, .. } => self.enum_literals(&self.alias(*alias).aliased_type),
            TypeRef::Constrained(inner) => self.enum_literals(inner),
            _ => None,
        }
    }

    /// Whether `alias` is generated as an enum of its own.
    ///
    /// An alias whose literals come from another declared alias only refers to
    /// that alias's enum. Library aliases are never generated, so an alias of
    /// one still declares its own enum.
    pub fn declares_enum(&self, alias: &TypeAliasDef) -> bool {
        if self.enum_literals(&alias.aliased_type).is_none() {
            return false;
        }
        match alias.aliased_type.unwrap_refinements() {
            TypeRef::Alias { alias: target, .. } => self.alias(*target).is_standard_library_member,
            _ => true,
        }
    }

    /// Whether every value of `ty` is a string: string literals, `String`, and unions
    /// and aliases made only of those.
    pub fn is_representable_as_string(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::StringLiteral(_) => true,
            TypeRef::Class { class, .. } => self.class(*class).is(BuiltinClass::String),
            TypeRef::Union(members) => members.iter().all(|m| self.is_representable_as_string(m)),
            TypeRef::Alias { alias, .. } => {
                self.is_representable_as_string(&self.alias(*alias).aliased_type)
            }
            TypeRef::Constrained(inner) => self.is_representable_as_string(inner),
            TypeRef::Unknown
            | TypeRef::Nothing
            | TypeRef::Nullable(_)
            | TypeRef::Function
            | TypeRef::TypeVariable(_) => false,
        }
    }

    /// Follow non-generic alias references down to a non-alias type.
    fn resolve_alias<'a>(&'a self, ty: &'a TypeRef) -> &'a TypeRef {
        match ty {
            TypeRef::Alias { alias, .. } => self.resolve_alias(&self.alias(*alias).aliased_type),
            TypeRef::Constrained(inner) => self.resolve_alias(inner),
            other => other,
        }
    }
}
