pub mod app;
pub mod classify;
pub mod cli;
pub mod emit;
pub mod errors;
pub mod logging;
pub mod model;
pub mod scanner;
pub mod workspace;

pub fn run() -> Result<(), anyhow::Error> {
    let args = cli::parse();
    logging::init(&args)?;
    let mut ctx = app::AppContext::new(&args);
    cli::handle_command(&mut ctx, &args)
}
