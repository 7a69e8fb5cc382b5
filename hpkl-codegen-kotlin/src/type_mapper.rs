//! Kotlin type mapper implementation.

use hpkl_codegen::imports::ClassName;
use hpkl_codegen::literals::{KOTLIN_DURATION, KOTLIN_DURATION_UNIT, NATIVE_DATA_SIZE, NATIVE_DATA_SIZE_UNIT};
use hpkl_codegen::naming::NameMapper;
use hpkl_codegen::{Error, GeneratorOptions, Result};
use hpkl_schema::{AliasId, BuiltinClass, ClassDef, ClassId, Registry, StdlibAlias, TypeAliasDef, TypeRef};

use crate::types::KotlinType;

/// Class names configured for the built-in value types.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinClasses {
    pub duration: ClassName,
    pub duration_unit: ClassName,
    pub data_size: ClassName,
    pub data_size_unit: ClassName,
}

impl KotlinClasses {
    /// Resolve and validate the class-name options.
    pub fn from_options(options: &GeneratorOptions) -> Result<Self> {
        Ok(Self {
            duration: GeneratorOptions::class_option(
                "duration-class",
                options.duration_class.as_deref(),
                KOTLIN_DURATION,
            )?,
            duration_unit: GeneratorOptions::class_option(
                "duration-unit-class",
                options.duration_unit_class.as_deref(),
                KOTLIN_DURATION_UNIT,
            )?,
            data_size: GeneratorOptions::class_option(
                "data-size-class",
                options.data_size_class.as_deref(),
                NATIVE_DATA_SIZE,
            )?,
            data_size_unit: GeneratorOptions::class_option(
                "data-size-unit-class",
                options.data_size_unit_class.as_deref(),
                NATIVE_DATA_SIZE_UNIT,
            )?,
        })
    }
}

/// Maps schema types to Kotlin types.
///
/// Aliases that are not enums are referenced by name; the generator emits them
/// as top-level `typealias` declarations.
#[derive(Debug, Clone)]
pub struct KotlinTypeMapper<'s> {
    registry: &'s Registry,
    names: NameMapper,
    classes: KotlinClasses,
}

impl<'s> KotlinTypeMapper<'s> {
    pub fn new(registry: &'s Registry, names: NameMapper, classes: KotlinClasses) -> Self {
        Self {
            registry,
            names,
            classes,
        }
    }

    pub fn registry(&self) -> &'s Registry {
        self.registry
    }

    pub fn classes(&self) -> &KotlinClasses {
        &self.classes
    }

    /// `(package, top-level type)` of a module.
    pub fn module_type(&self, module_name: &str) -> ClassName {
        let (package, type_name) = self.names.map(module_name);
        ClassName::new(package, type_name)
    }

    /// Name of the generated class for a schema class.
    pub fn class_name(&self, class: &ClassDef) -> ClassName {
        let module = self.module_type(&class.module_name);
        if class.is_module_class {
            module
        } else {
            module.nested(&class.simple_name)
        }
    }

    /// Name of the type generated for an alias: a nested enum class, or a
    /// top-level type alias in the module's package.
    pub fn alias_name(&self, alias: &TypeAliasDef) -> ClassName {
        let module = self.module_type(&alias.module_name);
        if self.registry.declares_enum(alias) {
            module.nested(&alias.simple_name)
        } else {
            ClassName::new(module.package(), &alias.simple_name)
        }
    }

    /// Type of a property, parameter, or alias right-hand side.
    pub fn map(&self, ty: &TypeRef) -> Result<KotlinType> {
        let mapped = match ty {
            TypeRef::Unknown => KotlinType::any_nullable(),
            TypeRef::Nothing => KotlinType::kotlin("Nothing"),
            TypeRef::StringLiteral(_) => KotlinType::string(),
            TypeRef::Class {
                class,
                type_arguments,
            } => self.map_class(*class, type_arguments)?,
            TypeRef::Nullable(inner) => self.map(inner)?.nullable(),
            TypeRef::Constrained(inner) => self.map(inner)?,
            TypeRef::Alias {
                alias,
                type_arguments,
            } => self.map_alias(*alias, type_arguments)?,
            TypeRef::Function => {
                return Err(Error::unsupported(
                    "Pkl function types are not supported by the Kotlin code generator.",
                ));
            }
            TypeRef::Union(_) => {
                if !self.registry.is_representable_as_string(ty) {
                    return Err(Error::unsupported(
                        "Pkl union types are not supported by the Kotlin code generator.",
                    ));
                }
                KotlinType::string()
            }
            TypeRef::TypeVariable(name) => KotlinType::Variable {
                name: name.clone(),
                nullable: false,
            },
        };
        Ok(mapped)
    }

    fn map_class(&self, id: ClassId, type_arguments: &[TypeRef]) -> Result<KotlinType> {
        let class = self.registry.class(id);
        let Some(builtin) = class.builtin() else {
            if class.is_standard_library() {
                return Err(unsupported_class(&class.qualified_name));
            }
            return Ok(KotlinType::class(self.class_name(class)));
        };

        let mapped = match builtin {
            BuiltinClass::Any => KotlinType::any_nullable(),
            BuiltinClass::Typed | BuiltinClass::Dynamic => KotlinType::any(),
            BuiltinClass::Boolean => KotlinType::kotlin("Boolean"),
            BuiltinClass::String => KotlinType::string(),
            BuiltinClass::Number | BuiltinClass::Float => KotlinType::kotlin("Double"),
            BuiltinClass::Int => KotlinType::kotlin("Long"),
            BuiltinClass::Duration => KotlinType::class(self.classes.duration.clone()),
            BuiltinClass::DataSize => KotlinType::class(self.classes.data_size.clone()),
            BuiltinClass::Pair => KotlinType::parameterized(
                ClassName::new("kotlin", "Pair"),
                vec![
                    self.argument(type_arguments, 0)?,
                    self.argument(type_arguments, 1)?,
                ],
            ),
            BuiltinClass::Collection => {
                KotlinType::collection("Collection", vec![self.argument(type_arguments, 0)?])
            }
            BuiltinClass::List | BuiltinClass::Listing => {
                KotlinType::collection("List", vec![self.argument(type_arguments, 0)?])
            }
            BuiltinClass::Set => {
                KotlinType::collection("Set", vec![self.argument(type_arguments, 0)?])
            }
            BuiltinClass::Map | BuiltinClass::Mapping => KotlinType::collection(
                "Map",
                vec![
                    self.argument(type_arguments, 0)?,
                    self.argument(type_arguments, 1)?,
                ],
            ),
            BuiltinClass::Module => KotlinType::class(ClassName::new("org.pkl.core", "PModule")),
            BuiltinClass::Class => KotlinType::class(ClassName::new("org.pkl.core", "PClass")),
            BuiltinClass::Regex => KotlinType::class(ClassName::new("kotlin.text", "Regex")),
            BuiltinClass::Version => KotlinType::class(ClassName::new("org.pkl.core", "Version")),
            BuiltinClass::Annotation | BuiltinClass::Deprecated => {
                return Err(unsupported_class(&class.qualified_name));
            }
        };
        Ok(mapped)
    }

    fn map_alias(&self, id: AliasId, type_arguments: &[TypeRef]) -> Result<KotlinType> {
        let alias = self.registry.alias(id);
        let mapped = match StdlibAlias::from_qualified_name(&alias.qualified_name) {
            Some(StdlibAlias::NonNull) => KotlinType::any(),
            Some(StdlibAlias::Int8) => KotlinType::kotlin("Byte"),
            Some(StdlibAlias::Int16 | StdlibAlias::UInt8) => KotlinType::kotlin("Short"),
            Some(StdlibAlias::Int32 | StdlibAlias::UInt16) => KotlinType::kotlin("Int"),
            Some(StdlibAlias::UInt32 | StdlibAlias::UInt) => KotlinType::kotlin("Long"),
            Some(StdlibAlias::DurationUnit) => {
                KotlinType::class(self.classes.duration_unit.clone())
            }
            Some(StdlibAlias::DataSizeUnit) => {
                KotlinType::class(self.classes.data_size_unit.clone())
            }
            Some(StdlibAlias::Uri) => KotlinType::class(ClassName::new("java.net", "URI")),
            None if self.registry.declares_enum(alias) => {
                if alias.is_standard_library_member {
                    return Err(Error::unsupported(format!(
                        "Standard library typealias `{}` is not supported by Kotlin code generator. \
                         If you think this is an omission, please let us know.",
                        alias.qualified_name
                    )));
                }
                KotlinType::class(self.alias_name(alias))
            }
            // Library aliases are never emitted, so they cannot be referenced by name.
            None if alias.is_standard_library_member => {
                let expanded = alias
                    .aliased_type
                    .substitute(&alias.bindings(type_arguments));
                return self.map(&expanded);
            }
            None => {
                let arguments = if alias.type_parameters.is_empty() {
                    Vec::new()
                } else if type_arguments.is_empty() {
                    vec![KotlinType::any_nullable(); alias.type_parameters.len()]
                } else {
                    type_arguments
                        .iter()
                        .map(|argument| self.map(argument))
                        .collect::<Result<_>>()?
                };
                KotlinType::parameterized(self.alias_name(alias), arguments)
            }
        };
        Ok(mapped)
    }

    fn argument(&self, type_arguments: &[TypeRef], index: usize) -> Result<KotlinType> {
        match type_arguments.get(index) {
            Some(argument) => self.map(argument),
            None => Ok(KotlinType::any_nullable()),
        }
    }
}

fn unsupported_class(qualified_name: &str) -> Error {
    Error::unsupported(format!(
        "Standard library class `{}` is not supported by Kotlin code generator. \
         If you think this is an omission, please let us know.",
        qualified_name
    ))
}

#[cfg(test)]
mod tests {
    use hpkl_codegen::imports::ImportCollector;
    use hpkl_schema::testing::*;
    use hpkl_schema::{ModuleSchema, Variance};

    use super::*;

    fn render_with(schema: &ModuleSchema, options: &GeneratorOptions, ty: &TypeRef) -> Result<String> {
        let classes = KotlinClasses::from_options(options)?;
        let mapper = KotlinTypeMapper::new(&schema.registry, NameMapper::default(), classes);
        let mut imports = ImportCollector::new(
            mapper.module_type("org.mod"),
            &["kotlin", "kotlin.collections", "kotlin.text"],
        );
        Ok(mapper.map(ty)?.render(&mut imports))
    }

    fn render(schema: &ModuleSchema, ty: &TypeRef) -> Result<String> {
        render_with(schema, &GeneratorOptions::default(), ty)
    }

    fn empty() -> ModuleSchema {
        ModuleBuilder::new("org.mod").build()
    }

    #[test]
    fn test_scalars() {
        let schema = empty();
        assert_eq!(render(&schema, &int()).unwrap(), "Long");
        assert_eq!(render(&schema, &float()).unwrap(), "Double");
        assert_eq!(render(&schema, &boolean()).unwrap(), "Boolean");
        assert_eq!(render(&schema, &string()).unwrap(), "String");
        assert_eq!(render(&schema, &any()).unwrap(), "Any?");
        assert_eq!(render(&schema, &TypeRef::Unknown).unwrap(), "Any?");
        assert_eq!(render(&schema, &TypeRef::Nothing).unwrap(), "Nothing");
        assert_eq!(render(&schema, &regex()).unwrap(), "Regex");
    }

    #[test]
    fn test_nullable_and_containers() {
        let schema = empty();
        assert_eq!(render(&schema, &nullable(int())).unwrap(), "Long?");
        assert_eq!(
            render(&schema, &listing(nullable(string()))).unwrap(),
            "List<String?>"
        );
        assert_eq!(
            render(&schema, &TypeRef::builtin(BuiltinClass::Mapping)).unwrap(),
            "Map<Any?, Any?>"
        );
        assert_eq!(
            render(&schema, &pair(string(), set(int()))).unwrap(),
            "Pair<String, Set<Long>>"
        );
    }

    #[test]
    fn test_width_aliases() {
        let schema = empty();
        assert_eq!(render(&schema, &width(StdlibAlias::Int8)).unwrap(), "Byte");
        assert_eq!(render(&schema, &width(StdlibAlias::UInt8)).unwrap(), "Short");
        assert_eq!(render(&schema, &width(StdlibAlias::UInt16)).unwrap(), "Int");
        assert_eq!(render(&schema, &width(StdlibAlias::UInt32)).unwrap(), "Long");
        assert_eq!(
            render(&schema, &nullable(width(StdlibAlias::Int32))).unwrap(),
            "Int?"
        );
    }

    #[test]
    fn test_configured_value_classes() {
        let schema = empty();
        assert_eq!(render(&schema, &duration()).unwrap(), "Duration");
        assert_eq!(
            render(&schema, &width(StdlibAlias::DurationUnit)).unwrap(),
            "DurationUnit"
        );
        assert_eq!(render(&schema, &data_size()).unwrap(), "DataSize");

        let options = GeneratorOptions {
            duration_class: Some("java.time.Duration".to_string()),
            ..Default::default()
        };
        assert_eq!(render_with(&schema, &options, &duration()).unwrap(), "Duration");

        let invalid = GeneratorOptions {
            data_size_class: Some("Size".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            render_with(&schema, &invalid, &data_size()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_aliases_are_referenced_by_name() {
        let mut module = ModuleBuilder::new("org.mod");
        let diet = module.alias("Diet", literals(&["Seeds", "Berries"]));
        let names = module.alias("Names", list(string()));
        let pairs = module.generic_alias(
            "Pairs",
            &[("A", Variance::Covariant), ("B", Variance::Invariant)],
            map(variable("A"), variable("B")),
        );
        let schema = module.build();

        assert_eq!(render(&schema, &alias(diet)).unwrap(), "Diet");
        assert_eq!(render(&schema, &nullable(alias(names))).unwrap(), "Names?");
        assert_eq!(
            render(&schema, &alias_of(pairs, vec![string(), int()])).unwrap(),
            "Pairs<String, Long>"
        );
        assert_eq!(render(&schema, &alias(pairs)).unwrap(), "Pairs<Any?, Any?>");
    }

    #[test]
    fn test_user_classes_are_nested() {
        let mut module = ModuleBuilder::new("org.mod");
        let address = module.class("Address").id();
        let schema = module.build();
        assert_eq!(render(&schema, &class(address)).unwrap(), "Address");
        assert_eq!(render(&schema, &list(class(address))).unwrap(), "List<Address>");
    }

    #[test]
    fn test_unsupported_types() {
        let mut module = ModuleBuilder::new("org.mod");
        let int_seq = module.stdlib_class("pkl.base#IntSeq");
        let schema = module.build();

        assert_eq!(
            render(&schema, &TypeRef::Function).unwrap_err().to_string(),
            "Pkl function types are not supported by the Kotlin code generator."
        );
        assert_eq!(
            render(&schema, &TypeRef::Union(vec![string(), int()]))
                .unwrap_err()
                .to_string(),
            "Pkl union types are not supported by the Kotlin code generator."
        );
        assert_eq!(
            render(&schema, &class(int_seq)).unwrap_err().to_string(),
            "Standard library class `pkl.base#IntSeq` is not supported by Kotlin code generator. \
             If you think this is an omission, please let us know."
        );
        assert_eq!(
            render(&schema, &literals(&["a", "b"])).unwrap(),
            "String"
        );
    }
}
