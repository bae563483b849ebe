// Wed Oct 14 2026 - Alex

use super::args::{Args, Command};
use super::commands::CommandExecutor;
use crate::utils::logging::LoggingUtils;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;

        let executor: &dyn CommandExecutor = match &args.command {
            Command::Symbols(symbols) => symbols,
            Command::Link(link) => link,
        };
        log::debug!("Running {}", executor.name());
        executor.execute()
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match &args.log_level {
            Some(level) => LoggingUtils::level_from_str(level)
                .ok_or_else(|| anyhow::anyhow!("Unknown log level: {}", level))?,
            None if args.verbose == 0 && std::env::var_os("RUST_LOG").is_some() => {
                LoggingUtils::init_from_env();
                return Ok(());
            }
            None => LoggingUtils::level_from_verbosity(args.verbose),
        };

        LoggingUtils::init_logger_with_color(level, !args.no_color);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
