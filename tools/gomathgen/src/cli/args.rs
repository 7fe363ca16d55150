use std::path::PathBuf;

use clap::Parser;

/// Generate generic wrappers around Go's standard math package.
///
/// With no arguments the four core_*.go modules are regenerated in the
/// current directory from the math package the Go toolchain resolves.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "gomathgen", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory the generated modules are written to
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Scan this directory instead of asking `go list` for the package
    #[arg(long, value_name = "DIR")]
    pub package_dir: Option<PathBuf>,

    /// Print the declaration model as JSON instead of writing files
    #[arg(long)]
    pub manifest: bool,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
