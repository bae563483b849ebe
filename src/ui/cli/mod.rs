// Wed Oct 14 2026 - Alex

pub mod args;
pub mod commands;
pub mod handler;

pub use args::{Args, LinkArgs, SymbolsArgs};
pub use commands::{Command, CommandExecutor};
pub use handler::CommandHandler;

use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn run() -> anyhow::Result<()> {
    let args = parse_args();
    CommandHandler::new().execute(args)
}
