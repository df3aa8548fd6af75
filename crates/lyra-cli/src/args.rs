use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "lyra")]
#[command(bin_name = "lyra")]
#[command(version, about, long_about = None)]
pub struct LyraCliArgs {
    /// The path of the Lyra script to run. Starts a REPL when omitted.
    pub path: Option<PathBuf>,

    /// Print the disassembled chunk before executing it.
    #[arg(long)]
    pub disassemble: bool,
}
