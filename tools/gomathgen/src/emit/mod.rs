//! Emitter: renders the four modules and writes them one after another.
//! A failure stops the run; modules already written stay on disk.

pub mod templates;

use std::fmt;
use std::path::PathBuf;

use log::info;

use crate::app::config::{GeneratorConfig, OutputFiles};
use crate::errors::{GenError, Result};
use crate::model::DeclarationModel;
use crate::workspace::fs::write_file;

pub use templates::HEADER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Functions,
    Constants,
    Variables,
    Types,
}

impl ModuleKind {
    /// Emission order.
    pub const ALL: [ModuleKind; 4] = [
        ModuleKind::Functions,
        ModuleKind::Constants,
        ModuleKind::Variables,
        ModuleKind::Types,
    ];

    pub fn file_name(self, files: &OutputFiles) -> &str {
        match self {
            ModuleKind::Functions => &files.functions,
            ModuleKind::Constants => &files.constants,
            ModuleKind::Variables => &files.variables,
            ModuleKind::Types => &files.types,
        }
    }

    pub fn render(
        self,
        model: &DeclarationModel,
        config: &GeneratorConfig,
    ) -> std::result::Result<String, fmt::Error> {
        match self {
            ModuleKind::Functions => templates::render_functions(&model.functions, config),
            ModuleKind::Constants => templates::render_constants(&model.constants, config),
            ModuleKind::Variables => templates::render_variables(&model.variables, config),
            ModuleKind::Types => templates::render_types(&model.types, config),
        }
    }

    fn entries(self, model: &DeclarationModel) -> usize {
        match self {
            ModuleKind::Functions => model.functions.len(),
            ModuleKind::Constants => model.constants.len(),
            ModuleKind::Variables => model.variables.len(),
            ModuleKind::Types => model.types.len(),
        }
    }
}

pub fn emit_modules(model: &DeclarationModel, config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(ModuleKind::ALL.len());
    for kind in ModuleKind::ALL {
        let file_name = kind.file_name(&config.files);
        let contents = kind
            .render(model, config)
            .map_err(|source| GenError::Template {
                module: file_name.to_string(),
                source,
            })?;
        let path = config.out_dir().join(file_name);
        write_file(&path, &contents)?;
        info!("wrote {} ({} entries)", path.display(), kind.entries(model));
        written.push(path);
    }
    Ok(written)
}
