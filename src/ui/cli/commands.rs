// Wed Oct 14 2026 - Alex

pub use super::args::Command;

use super::args::{LinkArgs, SymbolsArgs};
use crate::config::Config;
use crate::linker::Linker;
use crate::version_script::{parse_api_level, VersionScriptParser};
use anyhow::{anyhow, Context};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufReader, Write};

pub trait CommandExecutor {
    fn execute(&self) -> anyhow::Result<()>;
    fn name(&self) -> &'static str;
}

impl CommandExecutor for SymbolsArgs {
    fn execute(&self) -> anyhow::Result<()> {
        let api_level = parse_api_level(&self.api).ok_or_else(|| anyhow!("Bad api level: {}", self.api))?;
        let file = File::open(&self.version_script)
            .with_context(|| format!("Failed to open {}", self.version_script.display()))?;

        let script = self.version_script.display().to_string();
        let handler = move |line: usize, message: &str| {
            eprintln!("{} {}:{}: {}", "[!]".red(), script, line, message);
        };

        let mut parser = VersionScriptParser::new(BufReader::new(file), &self.arch, api_level)
            .with_excluded_symbol_versions(self.excluded_symbol_versions.iter().cloned())
            .with_excluded_symbol_tags(self.excluded_symbol_tags.iter().cloned())
            .with_error_handler(Box::new(handler));
        parser.parse()?;

        let exports = parser.into_exported_symbol_set();
        log::info!("{} exports {} entries", self.version_script.display(), exports.len());

        match &self.output {
            Some(path) => {
                let file = File::create(path)?;
                serde_json::to_writer_pretty(file, &exports)?;
            }
            None => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                serde_json::to_writer_pretty(&mut out, &exports)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "symbols"
    }
}

impl LinkArgs {
    /// Applies command-line options on top of `config`.
    pub fn merge_into(&self, mut config: Config) -> Config {
        if !self.dumps.is_empty() {
            config.dump_files = self.dumps.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(script) = &self.version_script {
            config.version_script = Some(script.clone());
            config.so_file = None;
        }
        if let Some(so) = &self.so {
            config.so_file = Some(so.clone());
            config.version_script = None;
        }
        config.exported_header_dirs.extend(self.exported_header_dirs.iter().cloned());
        if let Some(arch) = &self.arch {
            config.arch = arch.clone();
        }
        if let Some(api) = &self.api {
            config.api = api.clone();
        }
        if let Some(format) = &self.text_format {
            config.text_format = format.clone();
        }
        config.excluded_symbol_versions.extend(self.excluded_symbol_versions.iter().cloned());
        config.excluded_symbol_tags.extend(self.excluded_symbol_tags.iter().cloned());
        config.no_filter |= self.no_filter;
        if self.compact {
            config.pretty = false;
        }
        config
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let base = match &self.config {
            Some(path) => Config::load(path).with_context(|| format!("Failed to load {}", path.display()))?,
            None => Config::default(),
        };
        Ok(self.merge_into(base))
    }
}

impl CommandExecutor for LinkArgs {
    fn execute(&self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        config.validate().map_err(|e| anyhow!(e))?;

        let linker = Linker::from_config(&config)?;
        let stats = linker.link(&config.dump_files, &config.output)?;

        println!(
            "{} Linked {} dumps into {} ({} functions, {} variables, {} types)",
            "[+]".green(),
            config.dump_files.len(),
            config.output.display(),
            stats.functions,
            stats.global_vars,
            stats.types
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "link"
    }
}
