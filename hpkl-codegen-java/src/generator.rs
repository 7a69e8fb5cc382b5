use hpkl_codegen::builder::{CodeBuilder, CodeFragment, Indent};
use hpkl_codegen::defaults::DefaultValueSource;
use hpkl_codegen::enums::enum_constants;
use hpkl_codegen::imports::{ClassName, ImportCollector};
use hpkl_codegen::language::{GeneratedFile, LanguageCodegen, source_path};
use hpkl_codegen::layout::is_annotation_class;
use hpkl_codegen::literals::quote;
use hpkl_codegen::{Error, GeneratorOptions, Result};
use hpkl_schema::{BuiltinClass, ClassId, ModuleSchema};
use tracing::debug;

use crate::ast::{Class, Enum, Method, NestedType, Param};
use crate::class_emitter::ClassEmitter;
use crate::type_mapper::{JavaClasses, JavaTypeMapper};

/// Packages whose classes are never imported.
const IMPLICIT_PACKAGES: &[&str] = &["java.lang"];

/// Java code generator producing one source file per module.
///
/// The module class is the top-level class of the file; every other class and
/// every enum-representable type alias becomes a nested type.
pub struct Generator<'a> {
    schema: &'a ModuleSchema,
    options: &'a GeneratorOptions,
    indent: Indent,
    mapper: JavaTypeMapper<'a>,
    defaults: Option<&'a dyn DefaultValueSource>,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "java"
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn generate(&self) -> Result<Vec<GeneratedFile>> {
        Ok(vec![self.module_file()?])
    }
}

impl<'a> Generator<'a> {
    /// Create a generator, validating the options.
    pub fn new(schema: &'a ModuleSchema, options: &'a GeneratorOptions) -> Result<Self> {
        let indent = options.indent()?;
        let classes = JavaClasses::from_options(options)?;
        let mapper = JavaTypeMapper::new(&schema.registry, options.name_mapper(), classes);
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

    pub(crate) fn mapper(&self) -> &JavaTypeMapper<'a> {
        &self.mapper
    }

    pub(crate) fn defaults(&self) -> Option<&'a dyn DefaultValueSource> {
        self.defaults
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
        let enum_aliases: Vec<_> = self
            .schema
            .declared_aliases()
            .filter(|(_, alias)| self.schema.registry.declares_enum(alias))
            .filter_map(|(_, alias)| {
                self.schema
                    .registry
                    .enum_literals(&alias.aliased_type)
                    .map(|literals| (alias, literals))
            })
            .collect();
        for id in &nested_classes {
            imports.declare_nested(&self.schema.class(*id).simple_name);
        }
        for (alias, _) in &enum_aliases {
            imports.declare_nested(&alias.simple_name);
        }

        let mut module_class =
            ClassEmitter::new(self, self.schema.module_class).emit(&mut imports)?;

        for id in nested_classes {
            let class = ClassEmitter::new(self, id).emit(&mut imports)?;
            module_class = module_class.nested(NestedType::Class(class));
        }

        for (alias, literals) in enum_aliases {
            let constants = enum_constants(&alias.simple_name, literals.iter().map(String::as_str))?;
            let mut decl = Enum::new(&alias.simple_name);
            if self.options.generate_doc_comments {
                decl = decl.doc(alias.doc_comment.as_deref().map(javadoc));
            }
            for constant in constants {
                decl = decl.constant(constant.name, quote(&constant.literal, false));
            }
            debug!(alias = %alias.qualified_name, "emitted enum");
            module_class = module_class.nested(NestedType::Enum(decl));
        }

        if self.needs_append_property() {
            module_class = module_class.method(self.append_property(&mut imports));
        }

        let content = self.render_file(file_class.package(), &imports, &module_class);
        let path = source_path("java", file_class.package(), file_class.simple_name(), "java");
        debug!(module = %self.schema.module_name, path = %path, "generated java file");
        Ok(GeneratedFile { path, content })
    }

    /// The `toString` helper lives in the first module class of a hierarchy and
    /// is inherited from there.
    fn needs_append_property(&self) -> bool {
        self.schema
            .module_class()
            .superclass
            .is_some_and(|superclass| self.schema.class(superclass).is(BuiltinClass::Module))
    }

    fn append_property(&self, imports: &mut ImportCollector) -> Method {
        let module_class = self.schema.module_class();
        let access = if module_class.is_open || module_class.is_abstract {
            "protected"
        } else {
            "private"
        };
        let objects = imports.reference(&ClassName::new("java.util", "Objects"));
        Method::new("appendProperty", "void")
            .modifier(access)
            .modifier("static")
            .param(Param::new("builder", "StringBuilder"))
            .param(Param::new("name", "String"))
            .param(Param::new("value", "Object"))
            .statement(r#"builder.append("\n  ").append(name).append(" = ");"#)
            .statement(format!(
                r#"String[] lines = {}.toString(value).split("\n");"#,
                objects
            ))
            .statement("builder.append(lines[0]);")
            .fragment(CodeFragment::braced(
                "for (int i = 1; i < lines.length; i++) {",
                vec![CodeFragment::line(
                    r#"builder.append("\n  ").append(lines[i]);"#,
                )],
            ))
    }

    fn render_file(&self, package: &str, imports: &ImportCollector, class: &Class) -> String {
        let mut builder = CodeBuilder::new(self.indent);
        if !package.is_empty() {
            builder.push_line(&format!("package {};", package)).push_blank();
        }
        let imports = imports.imports();
        if !imports.is_empty() {
            for import in &imports {
                builder.push_line(&format!("import {};", import));
            }
            builder.push_blank();
        }
        builder.emit(class);
        builder.build()
    }
}

/// Make a doc comment safe to place inside `/** */`.
pub(crate) fn javadoc(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

#[cfg(test)]
mod tests {
    use hpkl_schema::testing::*;

    use super::*;

    #[test]
    fn test_javadoc_escape() {
        assert_eq!(javadoc("a */ b"), "a *&#47; b");
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
        assert_eq!(
            err.to_string(),
            "cannot generate code for a standard library module (`pkl:base`)"
        );
    }

    #[test]
    fn test_invalid_indent_rejected() {
        let schema = ModuleBuilder::new("org.mod").build();
        let options = GeneratorOptions {
            indent: "\t\t".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Generator::new(&schema, &options),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_output_path() {
        let schema = ModuleBuilder::new("org.example.config").build();
        let options = GeneratorOptions::default();
        let generator = Generator::new(&schema, &options).unwrap();
        assert_eq!(generator.language(), "java");
        let file = generator.module_file().unwrap();
        assert_eq!(file.path, "java/org/example/Config.java");
    }
}
