// Wed Oct 14 2026 - Alex

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "header-abi-linker")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Links per-source ABI dumps and resolves exported symbols from version scripts", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the symbols a version script exports, as JSON.
    Symbols(SymbolsArgs),
    /// Merge dumps and keep only exported functions and variables.
    Link(LinkArgs),
}

#[derive(Parser, Debug)]
pub struct SymbolsArgs {
    #[arg(long)]
    pub version_script: PathBuf,

    #[arg(long)]
    pub arch: String,

    #[arg(long, default_value = "current")]
    pub api: String,

    #[arg(long = "exclude-version")]
    pub excluded_symbol_versions: Vec<String>,

    #[arg(long = "exclude-tag")]
    pub excluded_symbol_tags: Vec<String>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct LinkArgs {
    pub dumps: Vec<PathBuf>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, conflicts_with = "so")]
    pub version_script: Option<PathBuf>,

    #[arg(long)]
    pub so: Option<PathBuf>,

    /// Only keep entities declared in headers under this directory.
    #[arg(short = 'I', long = "exported-header-dir")]
    pub exported_header_dirs: Vec<PathBuf>,

    #[arg(long)]
    pub arch: Option<String>,

    #[arg(long)]
    pub api: Option<String>,

    #[arg(long = "exclude-version")]
    pub excluded_symbol_versions: Vec<String>,

    #[arg(long = "exclude-tag")]
    pub excluded_symbol_tags: Vec<String>,

    #[arg(long)]
    pub no_filter: bool,

    #[arg(long)]
    pub text_format: Option<String>,

    #[arg(long)]
    pub compact: bool,

    /// JSON file providing defaults for every option above.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
