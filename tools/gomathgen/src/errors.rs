use std::path::PathBuf;

use gomathgen_parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("cannot resolve package `{package}`: {reason}")]
    Resolution { package: String, reason: String },
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("rendering template for {module}")]
    Template {
        module: String,
        #[source]
        source: std::fmt::Error,
    },
    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;
