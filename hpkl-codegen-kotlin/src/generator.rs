use hpkl_codegen::builder::{CodeBuilder, Indent};
use hpkl_codegen::defaults::DefaultValueSource;
use hpkl_codegen::enums::enum_constants;
use hpkl_codegen::imports::ImportCollector;
use hpkl_codegen::language::{GeneratedFile, LanguageCodegen, source_path};
use hpkl_codegen::layout::is_annotation_class;
use hpkl_codegen::literals::quote;
use hpkl_codegen::{Error, GeneratorOptions, Result};
use hpkl_schema::{ClassId, ModuleSchema, TypeAliasDef, Variance};
use tracing::debug;

use crate::ast::{Class, ClassKind, EnumClass, NestedType, TypeAlias};
use crate::class_emitter::ClassEmitter;
use crate::type_mapper::{KotlinClasses, KotlinTypeMapper};

/// Packages whose classes are never imported.
const IMPLICIT_PACKAGES: &[&str] = &["kotlin", "kotlin.collections", "kotlin.text", "java.lang"];

/// Kotlin code generator producing one source file per module.
///
/// The module type is the top-level declaration of the file, with every other
/// class and every enum class nested inside it. Kotlin has no nested type
/// aliases, so the remaining aliases are declared at the top of the file.
pub struct Generator<'a> {
    schema: &'a ModuleSchema,
    options: &'a GeneratorOptions,
    indent: Indent,
    mapper: KotlinTypeMapper<'a>,
    defaults: Option<&'a dyn DefaultValueSource>,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn generate(&self) -> Result<Vec<GeneratedFile>> {
        Ok(vec![self.module_file()?])
    }
}

impl<'a> Generator<'a> {
    /// Create a generator, validating the options.
    pub fn new(schema: &'a ModuleSchema, options: &'a GeneratorOptions) -> Result<Self> {
        let indent = options.indent()?;
        let classes = KotlinClasses::from_options(options)?;
        let mapper = KotlinTypeMapper::new(&schema.registry, options.name_mapper(), classes);
        Ok(Self {
            schema,
            options,
            indent,
            mapper,
            defaults: None,
        })
    }

    /// Look up default values in `source` when `set-default-values` is on.
    pub fn with_defaults(mut self, source: &'a dyn DefaultValueSource) -> Self {
        self.defaults = Some(source);
        self
    }

    pub(crate) fn schema(&self) -> &'a ModuleSchema {
        self.schema
    }

    pub(crate) fn options(&self) -> &'a GeneratorOptions {
        self.options
    }

    pub(crate) fn mapper(&self) -> &KotlinTypeMapper<'a> {
        &self.mapper
    }

    pub(crate) fn defaults(&self) -> Option<&'a dyn DefaultValueSource> {
        self.defaults
    }

    /// KDoc text when doc comments are on.
    pub(crate) fn doc(&self, doc_comment: Option<&str>) -> Option<String> {
        if !self.options.generate_doc_comments {
            return None;
        }
        doc_comment.map(|doc| kdoc(doc.trim_end()))
    }

    /// Generate the source file of the module.
    pub fn module_file(&self) -> Result<GeneratedFile> {
        if self.schema.is_standard_library() {
            return Err(Error::StandardLibraryModule {
                uri: self.schema.module_uri.clone(),
            });
        }

        let file_class = self.mapper.class_name(self.schema.module_class());
        let mut imports = ImportCollector::new(file_class.clone(), IMPLICIT_PACKAGES);

        let nested_classes: Vec<ClassId> = self
            .schema
            .declared_classes()
            .filter(|(id, _)| {
                self.options.generate_annotation_classes
                    || !is_annotation_class(&self.schema.registry, *id)
            })
            .map(|(id, _)| id)
            .collect();
        let mut enum_aliases = Vec::new();
        let mut type_aliases = Vec::new();
        for (_, alias) in self.schema.declared_aliases() {
            let literals = self.schema.registry.enum_literals(&alias.aliased_type);
            match literals.filter(|_| self.schema.registry.declares_enum(alias)) {
                Some(literals) => enum_aliases.push((alias, literals)),
                None => type_aliases.push(alias),
            }
        }
        for id in &nested_classes {
            imports.declare_nested(&self.schema.class(*id).simple_name);
        }
        for (alias, _) in &enum_aliases {
            imports.declare_nested(&alias.simple_name);
        }

        let mut module_type = self.module_type(&mut imports)?;

        for id in nested_classes {
            let class = ClassEmitter::new(self, id).emit(&mut imports)?;
            module_type = module_type.nested(NestedType::Class(class));
        }

        for (alias, literals) in enum_aliases {
            let constants = enum_constants(&alias.simple_name, literals.iter().map(String::as_str))?;
            let mut decl = EnumClass::new(&alias.simple_name).doc(self.doc(alias.doc_comment.as_deref()));
            for constant in constants {
                decl = decl.constant(constant.name, quote(&constant.literal, true));
            }
            debug!(alias = %alias.qualified_name, "emitted enum class");
            module_type = module_type.nested(NestedType::Enum(decl));
        }

        let mut aliases = Vec::new();
        imports.set_nested_scope(false);
        for alias in type_aliases {
            aliases.push(self.type_alias(alias, &mut imports)?);
        }
        imports.set_nested_scope(true);

        let content = self.render_file(file_class.package(), &imports, &aliases, &module_type);
        let path = source_path("kotlin", file_class.package(), file_class.simple_name(), "kt");
        debug!(module = %self.schema.module_name, path = %path, "generated kotlin file");
        Ok(GeneratedFile { path, content })
    }

    /// A module without visible own properties that cannot be extended is an
    /// `object`.
    fn module_type(&self, imports: &mut ImportCollector) -> Result<Class> {
        let module_class = self.schema.module_class();
        let has_properties = module_class
            .properties
            .values()
            .any(|property| !property.is_hidden);
        if has_properties || module_class.is_open || module_class.is_abstract {
            return ClassEmitter::new(self, self.schema.module_class).emit(imports);
        }
        let name = self.mapper.class_name(module_class);
        debug!(module = %self.schema.module_name, "module emitted as object");
        Ok(Class::new(name.simple_name(), ClassKind::Object)
            .doc(self.doc(module_class.doc_comment.as_deref())))
    }

    fn type_alias(&self, alias: &TypeAliasDef, imports: &mut ImportCollector) -> Result<TypeAlias> {
        let aliased = self.mapper.map(&alias.aliased_type)?.render(imports);
        let mut decl = TypeAlias::new(&alias.simple_name, aliased)
            .doc(self.doc(alias.doc_comment.as_deref()));
        for parameter in &alias.type_parameters {
            decl = decl.type_parameter(match parameter.variance {
                Variance::Covariant => format!("out {}", parameter.name),
                Variance::Contravariant => format!("in {}", parameter.name),
                Variance::Invariant => parameter.name.clone(),
            });
        }
        debug!(alias = %alias.qualified_name, "emitted type alias");
        Ok(decl)
    }

    fn render_file(
        &self,
        package: &str,
        imports: &ImportCollector,
        aliases: &[TypeAlias],
        module_type: &Class,
    ) -> String {
        let mut builder = CodeBuilder::new(self.indent);
        if !package.is_empty() {
            builder.push_line(&format!("package {}", package)).push_blank();
        }
        let imports = imports.imports();
        if !imports.is_empty() {
            for import in &imports {
                builder.push_line(&format!("import {}", import));
            }
            builder.push_blank();
        }
        for alias in aliases {
            builder.emit(alias).push_blank();
        }
        builder.emit(module_type);
        builder.build()
    }
}

/// Make a doc comment safe to place inside `/** */`.
pub(crate) fn kdoc(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

#[cfg(test)]
mod tests {
    use hpkl_schema::testing::*;

    use super::*;

    #[test]
    fn test_kdoc_escape() {
        assert_eq!(kdoc("ends */ here"), "ends *&#47; here");
    }

    #[test]
    fn test_standard_library_module_rejected() {
        let mut module = ModuleBuilder::new("pkl.base");
        module.uri("pkl:base");
        let schema = module.build();
        let options = GeneratorOptions::default();
        let err = Generator::new(&schema, &options)
            .unwrap()
            .generate()
            .unwrap_err();
        assert!(matches!(err, Error::StandardLibraryModule { .. }));
    }

    #[test]
    fn test_output_path() {
        let schema = ModuleBuilder::new("org.example.config").build();
        let options = GeneratorOptions::default();
        let generator = Generator::new(&schema, &options).unwrap();
        assert_eq!(generator.language(), "kotlin");
        assert_eq!(generator.file_extension(), "kt");
        let file = generator.module_file().unwrap();
        assert_eq!(file.path, "kotlin/org/example/Config.kt");
        assert_eq!(file.content, "package org.example\n\nobject Config\n");
    }

    #[test]
    fn test_invalid_class_option_rejected() {
        let schema = ModuleBuilder::new("org.mod").build();
        let options = GeneratorOptions {
            duration_unit_class: Some("DurationUnit".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Generator::new(&schema, &options),
            Err(Error::Configuration(_))
        ));
    }
}
