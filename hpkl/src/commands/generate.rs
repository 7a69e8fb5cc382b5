use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result, bail};
use hpkl_codegen::GeneratorOptions;
use hpkl_codegen::language::GeneratedFile;
use hpkl_schema::SchemaDocument;
use tracing::{debug, info};

use crate::config::{DEFAULT_CONFIG, HpklToml};
use crate::language::Target;

#[derive(Args)]
pub struct GenerateCommand {
    /// Target language
    #[arg(value_enum)]
    pub language: Target,

    /// Schema documents to generate, one module each
    #[arg(required = true)]
    pub schemas: Vec<PathBuf>,

    /// Path to the options file (defaults to ./hpkl.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    ///
    /// Every module is generated even when an earlier one fails; the command
    /// fails afterwards if any module did.
    pub fn run(&self) -> Result<()> {
        let options = self.options()?;

        let mut generated = 0;
        let mut failed = 0;
        for path in &self.schemas {
            match self.generate_module(path, &options) {
                Ok(files) => generated += files.len(),
                Err(err) => {
                    eprintln!("{:?}", err);
                    failed += 1;
                }
            }
        }

        println!();
        if self.dry_run {
            println!("── Summary ──");
            println!("{} files would be generated", generated);
        } else {
            println!("Generated {} files into {}", generated, self.output.display());
        }

        if failed > 0 {
            bail!("{} of {} modules failed to generate", failed, self.schemas.len());
        }
        Ok(())
    }

    fn options(&self) -> Result<GeneratorOptions> {
        let config = match &self.config {
            Some(path) => HpklToml::open(path)?,
            None if Path::new(DEFAULT_CONFIG).exists() => HpklToml::open(Path::new(DEFAULT_CONFIG))?,
            None => HpklToml::default(),
        };
        config.options(self.language)
    }

    fn generate_module(&self, path: &Path, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        let loaded = SchemaDocument::load(path)
            .map_err(|e| eyre::eyre!("{:?}", miette::Report::new(*e)))?;
        debug!(
            module = %loaded.schema.module_name,
            embedded_defaults = !loaded.defaults.is_empty(),
            "loaded schema"
        );

        let files = self
            .language
            .generate(&loaded.schema, options, &loaded.defaults)
            .wrap_err_with(|| format!("failed to generate module '{}'", loaded.schema.module_name))?;

        if self.dry_run {
            for file in &files {
                println!("── {} ──", file.path);
                println!("{}", file.content);
            }
        } else {
            for file in &files {
                self.write_file(file)?;
            }
        }
        Ok(files)
    }

    fn write_file(&self, file: &GeneratedFile) -> Result<()> {
        let target = self.output.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
        }
        std::fs::write(&target, &file.content)
            .wrap_err_with(|| format!("failed to write '{}'", target.display()))?;
        info!(path = %target.display(), "wrote file");
        Ok(())
    }
}
