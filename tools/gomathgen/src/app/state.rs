use anyhow::{Context, Result};
use log::info;

use crate::app::config::GeneratorConfig;
use crate::cli::CliArgs;
use crate::emit;
use crate::model::{self, DeclarationModel};
use crate::scanner;

/// Central application context carried through a single run.
pub struct AppContext {
    pub config: GeneratorConfig,
}

impl AppContext {
    pub fn new(args: &CliArgs) -> Self {
        Self {
            config: GeneratorConfig::load(args),
        }
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Scan, classify and aggregate; nothing is written.
    pub fn build_model(&self) -> Result<DeclarationModel> {
        let source = match &self.config.package_dir {
            Some(dir) => scanner::list_package_dir(dir)?,
            None => scanner::resolve_package(&self.config.package)?,
        };
        info!(
            "scanning {} file(s) of package {} in {}",
            source.files.len(),
            self.config.package,
            source.dir.display()
        );
        let scanned = scanner::scan_package(&source)?;
        Ok(model::build_model(scanned, &self.config))
    }

    pub fn generate(&mut self) -> Result<()> {
        let model = self.build_model()?;
        info!(
            "{} function(s) ({} generic), {} constant(s), {} variable(s), {} type(s)",
            model.functions.len(),
            model.generic_count(),
            model.constants.len(),
            model.variables.len(),
            model.types.len()
        );
        emit::emit_modules(&model, &self.config)?;
        info!("core files generated successfully");
        Ok(())
    }

    pub fn print_manifest(&mut self) -> Result<()> {
        let model = self.build_model()?;
        let json = serde_json::to_string_pretty(&model).context("serialising declaration model")?;
        println!("{json}");
        Ok(())
    }
}
