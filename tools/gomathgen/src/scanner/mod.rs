//! Declaration scanner: locates the package sources and collects the exported
//! top-level declarations of every file.

pub mod resolve;

use std::path::PathBuf;

use gomathgen_parser::{is_exported, parse, Decl, DeclKeyword, FuncDecl, GenDecl, Spec};
use log::{debug, warn};

use crate::errors::{GenError, Result};
use crate::workspace::fs::read_source;

pub use resolve::{list_package_dir, parse_go_list, resolve_package, PackageSource};

/// Exported declarations bucketed by kind, in file then source order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScannedDecls {
    pub functions: Vec<FuncDecl>,
    pub constants: Vec<GenDecl>,
    pub variables: Vec<GenDecl>,
    pub types: Vec<GenDecl>,
}

impl ScannedDecls {
    fn absorb(&mut self, decls: Vec<Decl>) {
        for decl in decls {
            match decl {
                Decl::Func(func) => {
                    if func.is_method() || !is_exported(&func.name) {
                        continue;
                    }
                    self.functions.push(func);
                }
                Decl::Gen(gen) => {
                    if !exports_any(&gen) {
                        continue;
                    }
                    match gen.keyword {
                        DeclKeyword::Const => self.constants.push(gen),
                        DeclKeyword::Var => self.variables.push(gen),
                        DeclKeyword::Type => self.types.push(gen),
                        DeclKeyword::Import => {}
                    }
                }
            }
        }
    }
}

fn exports_any(gen: &GenDecl) -> bool {
    gen.specs.iter().any(|spec| match spec {
        Spec::Value(value) => value.names.iter().any(|n| is_exported(n)),
        Spec::Type(ty) => is_exported(&ty.name),
        Spec::Import(_) => false,
    })
}

pub fn scan_package(source: &PackageSource) -> Result<ScannedDecls> {
    let mut sources = Vec::with_capacity(source.files.len());
    for path in &source.files {
        sources.push((path.clone(), read_source(path)?));
    }
    scan_sources(sources)
}

/// Parses every file before collecting anything, so one bad file leaves no
/// partial result behind.
pub fn scan_sources<I>(sources: I) -> Result<ScannedDecls>
where
    I: IntoIterator<Item = (PathBuf, String)>,
{
    let mut parsed = Vec::new();
    for (path, text) in sources {
        let file = parse(&text).map_err(|source| GenError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!(
            "parsed {} (package {}, {} declaration(s))",
            path.display(),
            file.package,
            file.decls.len()
        );
        parsed.push((path, file));
    }

    let mut scanned = ScannedDecls::default();
    let package = parsed.first().map(|(_, f)| f.package.clone());
    for (path, file) in parsed {
        if Some(&file.package) != package.as_ref() {
            warn!(
                "{} declares package {} which differs from the rest",
                path.display(),
                file.package
            );
        }
        scanned.absorb(file.decls);
    }
    Ok(scanned)
}
