use clap::Parser;

use crate::cli::{CliArgs, Commands};

mod cli;
mod commands;
mod progress;

pub type CliResult<T> = anubis_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let options = args.jector_options();
    let show_progress = !args.quiet;

    match args.command {
        Commands::Inject(inject) => inject.run(options, show_progress),
        Commands::Eject(eject) => eject.run(options, show_progress),
        Commands::Capacity(capacity) => capacity.run(options),
    }
}
