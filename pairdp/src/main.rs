mod args;
mod commands;
mod io;

use args::{Cli, SubCommands};

use clap::Parser;
use env_logger::Env;

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v
    let level = cli.command.run_args().common_args.log_level();
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match cli.command {
        SubCommands::Edit(args) => commands::edit(&args)?,
        SubCommands::Count(args) => commands::count(&args)?,
        SubCommands::Trace(args) => commands::trace(&args)?,
        SubCommands::Global(args) => commands::global(&args)?,
        SubCommands::Lcs(args) => commands::lcs(&args)?,
        SubCommands::Lis(args) => commands::lis(&args)?,
        SubCommands::Sseq(args) => commands::sseq(&args)?,
    }
    Ok(())
}
