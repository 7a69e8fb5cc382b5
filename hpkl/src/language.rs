//! Target language dispatch.

use clap::ValueEnum;
use hpkl_codegen::defaults::DefaultValueSource;
use hpkl_codegen::language::{GeneratedFile, LanguageCodegen};
use hpkl_codegen::{GeneratorOptions, Result};
use hpkl_codegen_java::Generator as JavaGenerator;
use hpkl_codegen_kotlin::Generator as KotlinGenerator;
use hpkl_schema::ModuleSchema;

/// Language of the generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Java,
    Kotlin,
}

impl Target {
    /// Name of the options table for this target in `hpkl.toml`.
    pub fn config_key(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
        }
    }

    /// Generate the files of one module.
    pub fn generate(
        self,
        schema: &ModuleSchema,
        options: &GeneratorOptions,
        defaults: &dyn DefaultValueSource,
    ) -> Result<Vec<GeneratedFile>> {
        let generator: Box<dyn LanguageCodegen + '_> = match self {
            Self::Java => Box::new(JavaGenerator::new(schema, options)?.with_defaults(defaults)),
            Self::Kotlin => Box::new(KotlinGenerator::new(schema, options)?.with_defaults(defaults)),
        };
        generator.generate()
    }
}

#[cfg(test)]
mod tests {
    use hpkl_schema::{EmbeddedDefaults, SchemaDocument};

    use super::*;

    #[test]
    fn test_targets_write_to_language_roots() {
        let loaded = SchemaDocument::parse(
            r#"{ "moduleName": "org.example.app", "moduleClass": { "properties": {} } }"#,
            "app.json",
        )
        .unwrap();
        let options = GeneratorOptions::default();
        let defaults = EmbeddedDefaults::default();

        let java = Target::Java
            .generate(&loaded.schema, &options, &defaults)
            .unwrap();
        assert_eq!(java[0].path, "java/org/example/App.java");

        let kotlin = Target::Kotlin
            .generate(&loaded.schema, &options, &defaults)
            .unwrap();
        assert_eq!(kotlin[0].path, "kotlin/org/example/App.kt");
    }
}
