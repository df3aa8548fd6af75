use std::process::exit;

use clap::Parser;

use crate::args::LyraCliArgs;

pub mod args;
pub mod commands;

fn main() {
    env_logger::init();
    let args = LyraCliArgs::parse();
    exit(commands::execute(&args));
}
