use std::io::Write;

use anyhow::{Context, Result};
use env_logger::Env;
use log::LevelFilter;

use crate::cli::CliArgs;

pub fn init(args: &CliArgs) -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_level(level_for(args.verbose))
        .format(|buf, record| {
            writeln!(
                buf,
                "[gomathgen {}] {}",
                record.level().as_str().to_lowercase(),
                record.args()
            )
        })
        .try_init()
        .context("initialising logger")
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), LevelFilter::Info);
        assert_eq!(level_for(1), LevelFilter::Debug);
        assert_eq!(level_for(5), LevelFilter::Trace);
    }
}
