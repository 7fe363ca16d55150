use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;
use serde::Deserialize;

use crate::errors::{GenError, Result};

/// Source directory of a Go package and the files that make it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSource {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListPackage {
    #[serde(default)]
    dir: PathBuf,
    #[serde(default)]
    go_files: Vec<String>,
    #[serde(default)]
    error: Option<GoListError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListError {
    err: String,
}

/// Asks the Go toolchain where `package` lives. `GoFiles` already honours
/// build constraints for the host platform and leaves out test files.
pub fn resolve_package(package: &str) -> Result<PackageSource> {
    let output = Command::new("go")
        .args(["list", "-json", package])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|err| resolution(package, format!("running `go list`: {err}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(resolution(
            package,
            format!("`go list` exited with {}: {}", output.status, stderr.trim()),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_go_list(package, &stdout)
}

pub fn parse_go_list(package: &str, json: &str) -> Result<PackageSource> {
    let listed: GoListPackage = serde_json::from_str(json)
        .map_err(|err| resolution(package, format!("malformed `go list` output: {err}")))?;
    if let Some(error) = listed.error {
        return Err(resolution(package, error.err));
    }
    if listed.dir.as_os_str().is_empty() {
        return Err(resolution(package, "no source directory reported".to_string()));
    }
    debug!("resolved {package} to {}", listed.dir.display());
    let files = listed
        .go_files
        .iter()
        .map(|file| listed.dir.join(file))
        .collect();
    Ok(PackageSource {
        dir: listed.dir,
        files,
    })
}

/// Lists the buildable Go files of a directory without the toolchain: test
/// files and files constrained with `ignore` are skipped, the rest sorted.
pub fn list_package_dir(dir: &Path) -> Result<PackageSource> {
    let package = dir.display().to_string();
    let entries = fs::read_dir(dir)
        .map_err(|err| resolution(&package, format!("reading directory: {err}")))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| resolution(&package, format!("reading directory: {err}")))?
            .path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".go") || name.ends_with("_test.go") || !path.is_file() {
            continue;
        }
        let header = fs::read_to_string(&path).map_err(|source| GenError::Io {
            path: path.clone(),
            source,
        })?;
        if is_ignored(&header) {
            debug!("skipping {} (build-ignored)", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();

    if files.is_empty() {
        return Err(resolution(&package, "no Go source files found".to_string()));
    }
    Ok(PackageSource {
        dir: dir.to_path_buf(),
        files,
    })
}

// Only the comment block before the package clause can carry build constraints.
fn is_ignored(source: &str) -> bool {
    source
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("package "))
        .any(|line| {
            let constraint = line
                .strip_prefix("//go:build")
                .or_else(|| line.strip_prefix("// +build"));
            matches!(constraint, Some(expr) if expr.split_whitespace().any(|t| t == "ignore"))
        })
}

fn resolution(package: &str, reason: String) -> GenError {
    GenError::Resolution {
        package: package.to_string(),
        reason,
    }
}
