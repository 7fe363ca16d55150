use anyhow::Result;

use crate::app::AppContext;
use crate::cli::CliArgs;

/// Dispatch parsed CLI flags into application actions.
pub fn handle_command(ctx: &mut AppContext, args: &CliArgs) -> Result<()> {
    if args.manifest {
        ctx.print_manifest()
    } else {
        ctx.generate()
    }
}
