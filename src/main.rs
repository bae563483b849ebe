// Wed Oct 14 2026 - Alex

use colored::Colorize;
use header_abi_util::ui::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "[!]".red(), e);
        for cause in e.chain().skip(1) {
            eprintln!("    {} {}", "caused by:".dimmed(), cause);
        }
        std::process::exit(1);
    }
}
