//! Java type mapper implementation.

use hpkl_codegen::imports::ClassName;
use hpkl_codegen::naming::NameMapper;
use hpkl_codegen::{Error, GeneratorOptions, Result};
use hpkl_schema::{
    AliasId, BuiltinClass, ClassDef, ClassId, Registry, StdlibAlias, TypeAliasDef, TypeRef,
};

use crate::types::{JavaType, Primitive};

const DEFAULT_DURATION_UNIT: &str = "java.time.temporal.ChronoUnit";
const DEFAULT_PAIR: &str = "org.pkl.core.Pair";
const DEFAULT_NON_NULL: &str = "org.pkl.config.java.mapper.NonNull";

/// Class names configured for the built-in value types.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaClasses {
    pub duration: ClassName,
    pub duration_unit: ClassName,
    pub data_size: ClassName,
    pub data_size_unit: ClassName,
    pub pair: ClassName,
    pub non_null: ClassName,
    pub parameter_annotation: Option<ClassName>,
}

impl JavaClasses {
    /// Resolve and validate the class-name options.
    pub fn from_options(options: &GeneratorOptions) -> Result<Self> {
        use hpkl_codegen::literals::{NATIVE_DATA_SIZE, NATIVE_DATA_SIZE_UNIT, NATIVE_DURATION};

        Ok(Self {
            duration: GeneratorOptions::class_option(
                "duration-class",
                options.duration_class.as_deref(),
                NATIVE_DURATION,
            )?,
            duration_unit: GeneratorOptions::class_option(
                "duration-unit-class",
                options.duration_unit_class.as_deref(),
                DEFAULT_DURATION_UNIT,
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
            pair: GeneratorOptions::class_option(
                "pair-class",
                options.pair_class.as_deref(),
                DEFAULT_PAIR,
            )?,
            non_null: GeneratorOptions::class_option(
                "non-null-annotation",
                options.non_null_annotation.as_deref(),
                DEFAULT_NON_NULL,
            )?,
            parameter_annotation: GeneratorOptions::optional_class_option(
                "parameter-annotation",
                options.parameter_annotation.as_deref(),
            )?,
        })
    }
}

/// Maps schema types to Java types.
///
/// Nullable and type-argument positions box primitives; every other reference
/// type carries the non-null annotation.
#[derive(Debug, Clone)]
pub struct JavaTypeMapper<'s> {
    registry: &'s Registry,
    names: NameMapper,
    classes: JavaClasses,
}

impl<'s> JavaTypeMapper<'s> {
    pub fn new(registry: &'s Registry, names: NameMapper, classes: JavaClasses) -> Self {
        Self {
            registry,
            names,
            classes,
        }
    }

    pub fn registry(&self) -> &'s Registry {
        self.registry
    }

    pub fn classes(&self) -> &JavaClasses {
        &self.classes
    }

    /// `(package, top-level type)` of a module.
    pub fn module_type(&self, module_name: &str) -> ClassName {
        let (package, type_name) = self.names.map(module_name);
        ClassName::new(package, type_name)
    }

    /// Name of the generated class for a schema class.
    ///
    /// Module classes are top-level; every other class is nested in its module's class.
    pub fn class_name(&self, class: &ClassDef) -> ClassName {
        let module = self.module_type(&class.module_name);
        if class.is_module_class {
            module
        } else {
            module.nested(&class.simple_name)
        }
    }

    /// Name of the nested enum generated for an alias.
    pub fn enum_name(&self, alias: &TypeAliasDef) -> ClassName {
        self.module_type(&alias.module_name).nested(&alias.simple_name)
    }

    /// Type of a field, parameter, or return value.
    pub fn map(&self, ty: &TypeRef) -> Result<JavaType> {
        self.map_type(ty, false, false, false)
    }

    /// Type of a generic argument, with `? extends` for abstract or open classes.
    pub fn map_argument(&self, ty: &TypeRef) -> Result<JavaType> {
        let base = self.map_type(ty, false, true, true)?;
        if let TypeRef::Class { class, .. } = ty {
            let class = self.registry.class(*class);
            if class.is_abstract || class.is_open {
                return Ok(JavaType::Wildcard(Box::new(base)));
            }
        }
        Ok(base)
    }

    fn map_type(
        &self,
        ty: &TypeRef,
        nullable: bool,
        boxed: bool,
        type_argument: bool,
    ) -> Result<JavaType> {
        let mapped = match ty {
            TypeRef::Unknown => JavaType::object(),
            TypeRef::Nothing => return Ok(JavaType::Void),
            TypeRef::StringLiteral(_) => JavaType::string(),
            TypeRef::Class {
                class,
                type_arguments,
            } => return self.map_class(*class, type_arguments, nullable, boxed, type_argument),
            TypeRef::Nullable(inner) => return self.map_type(inner, true, true, type_argument),
            TypeRef::Constrained(inner) => {
                return self.map_type(inner, nullable, boxed, type_argument);
            }
            TypeRef::Alias {
                alias,
                type_arguments,
            } => return self.map_alias(*alias, type_arguments, nullable, boxed, type_argument),
            TypeRef::Function => {
                return Err(Error::unsupported(
                    "Pkl function types are not supported by the Java code generator.",
                ));
            }
            TypeRef::Union(_) => {
                if !self.registry.is_representable_as_string(ty) {
                    return Err(Error::unsupported(
                        "Pkl union types are not supported by the Java code generator.",
                    ));
                }
                JavaType::string()
            }
            TypeRef::TypeVariable(name) => JavaType::Variable(name.clone()),
        };
        Ok(self.nullable_if(mapped, nullable, type_argument))
    }

    fn map_class(
        &self,
        id: ClassId,
        type_arguments: &[TypeRef],
        nullable: bool,
        boxed: bool,
        type_argument: bool,
    ) -> Result<JavaType> {
        let class = self.registry.class(id);
        let Some(builtin) = class.builtin() else {
            if class.is_standard_library() {
                return Err(unsupported_class(&class.qualified_name));
            }
            let name = JavaType::class(self.class_name(class));
            return Ok(self.nullable_if(name, nullable, type_argument));
        };

        let primitive = |primitive| JavaType::Primitive(primitive).box_if(boxed);
        let mapped = match builtin {
            BuiltinClass::Any => return Ok(JavaType::object()),
            BuiltinClass::Typed | BuiltinClass::Dynamic => JavaType::object(),
            BuiltinClass::Boolean => primitive(Primitive::Boolean),
            BuiltinClass::String => JavaType::string(),
            BuiltinClass::Number | BuiltinClass::Float => primitive(Primitive::Double),
            BuiltinClass::Int => primitive(Primitive::Long),
            BuiltinClass::Duration => JavaType::class(self.classes.duration.clone()),
            BuiltinClass::DataSize => JavaType::class(self.classes.data_size.clone()),
            BuiltinClass::Pair => JavaType::parameterized(
                self.classes.pair.clone(),
                vec![
                    self.argument(type_arguments, 0)?,
                    self.argument(type_arguments, 1)?,
                ],
            ),
            BuiltinClass::Collection => JavaType::parameterized(
                ClassName::new("java.util", "Collection"),
                vec![self.argument(type_arguments, 0)?],
            ),
            BuiltinClass::List | BuiltinClass::Listing => JavaType::parameterized(
                ClassName::new("java.util", "List"),
                vec![self.argument(type_arguments, 0)?],
            ),
            BuiltinClass::Set => JavaType::parameterized(
                ClassName::new("java.util", "Set"),
                vec![self.argument(type_arguments, 0)?],
            ),
            BuiltinClass::Map | BuiltinClass::Mapping => JavaType::parameterized(
                ClassName::new("java.util", "Map"),
                vec![
                    self.argument(type_arguments, 0)?,
                    self.argument(type_arguments, 1)?,
                ],
            ),
            BuiltinClass::Module => JavaType::class(ClassName::new("org.pkl.core", "PModule")),
            BuiltinClass::Class => JavaType::class(ClassName::new("org.pkl.core", "PClass")),
            BuiltinClass::Regex => JavaType::class(ClassName::new("java.util.regex", "Pattern")),
            BuiltinClass::Version => JavaType::class(ClassName::new("org.pkl.core", "Version")),
            BuiltinClass::Annotation | BuiltinClass::Deprecated => {
                return Err(unsupported_class(&class.qualified_name));
            }
        };
        Ok(self.nullable_if(mapped, nullable, type_argument))
    }

    fn map_alias(
        &self,
        id: AliasId,
        type_arguments: &[TypeRef],
        nullable: bool,
        boxed: bool,
        type_argument: bool,
    ) -> Result<JavaType> {
        let alias = self.registry.alias(id);
        let primitive = |primitive| JavaType::Primitive(primitive).box_if(boxed);
        let mapped = match StdlibAlias::from_qualified_name(&alias.qualified_name) {
            Some(StdlibAlias::NonNull) => JavaType::object(),
            Some(StdlibAlias::Int8) => primitive(Primitive::Byte),
            Some(StdlibAlias::Int16 | StdlibAlias::UInt8) => primitive(Primitive::Short),
            Some(StdlibAlias::Int32 | StdlibAlias::UInt16) => primitive(Primitive::Int),
            Some(StdlibAlias::UInt32 | StdlibAlias::UInt) => primitive(Primitive::Long),
            Some(StdlibAlias::DurationUnit) => JavaType::class(self.classes.duration_unit.clone()),
            Some(StdlibAlias::DataSizeUnit) => {
                JavaType::class(self.classes.data_size_unit.clone())
            }
            Some(StdlibAlias::Uri) => JavaType::class(ClassName::new("java.net", "URI")),
            None if self.registry.declares_enum(alias) => {
                if alias.is_standard_library_member {
                    return Err(Error::unsupported(format!(
                        "Standard library typealias `{}` is not supported by Java code generator. \
                         If you think this is an omission, please let us know.",
                        alias.qualified_name
                    )));
                }
                JavaType::class(self.enum_name(alias))
            }
            None => {
                let expanded = alias
                    .aliased_type
                    .substitute(&alias.bindings(type_arguments));
                return self.map_type(&expanded, nullable, boxed, type_argument);
            }
        };
        Ok(self.nullable_if(mapped, nullable, type_argument))
    }

    fn argument(&self, type_arguments: &[TypeRef], index: usize) -> Result<JavaType> {
        match type_arguments.get(index) {
            Some(argument) => self.map_argument(argument),
            None => Ok(JavaType::object()),
        }
    }

    fn nullable_if(&self, ty: JavaType, nullable: bool, type_argument: bool) -> JavaType {
        if type_argument || (ty.is_primitive() && nullable) {
            ty.boxed()
        } else if ty.is_primitive() || nullable {
            ty
        } else {
            ty.annotated(self.classes.non_null.clone())
        }
    }
}

fn unsupported_class(qualified_name: &str) -> Error {
    Error::unsupported(format!(
        "Standard library class `{}` is not supported by Java code generator. \
         If you think this is an omission, please let us know.",
        qualified_name
    ))
}
