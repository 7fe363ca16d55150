use std::path::{Path, PathBuf};

use log::debug;

use crate::cli::CliArgs;

const DEFAULT_PACKAGE: &str = "math";
const DEFAULT_NATIVE_FLOAT: &str = "float64";
const DEFAULT_CONSTRAINT: &str = "Number";
const DEFAULT_TYPE_PARAM: &str = "N";

/// File names of the four generated modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub functions: String,
    pub constants: String,
    pub variables: String,
    pub types: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            functions: "core_functions.go".to_string(),
            constants: "core_consts.go".to_string(),
            variables: "core_vars.go".to_string(),
            types: "core_types.go".to_string(),
        }
    }
}

/// Generator configuration: built-in defaults with CLI overrides applied on top.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Import path of the package being wrapped.
    pub package: String,
    /// Package clause written into every generated module.
    pub output_package: String,
    /// The only type a parameter or result may have for a generic wrapper.
    pub native_float: String,
    /// Constraint interface the type parameter is bound by.
    pub constraint: String,
    pub type_param: String,
    pub out_dir: PathBuf,
    pub package_dir: Option<PathBuf>,
    pub files: OutputFiles,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            output_package: DEFAULT_PACKAGE.to_string(),
            native_float: DEFAULT_NATIVE_FLOAT.to_string(),
            constraint: DEFAULT_CONSTRAINT.to_string(),
            type_param: DEFAULT_TYPE_PARAM.to_string(),
            out_dir: PathBuf::from("."),
            package_dir: None,
            files: OutputFiles::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(args: &CliArgs) -> Self {
        let mut config = Self::default();
        config.apply_cli_overrides(args);
        debug!("configuration: {config:?}");
        config
    }

    fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(dir) = &args.out_dir {
            self.out_dir = dir.clone();
        }
        if let Some(dir) = &args.package_dir {
            self.package_dir = Some(dir.clone());
        }
    }

    /// Identifier generated code uses to reach the wrapped package (`math` for `math`).
    pub fn qualifier(&self) -> &str {
        self.package.rsplit('/').next().unwrap_or(&self.package)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}
