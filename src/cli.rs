//! Command-line interface.

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flappy-board",
    about = "Flap through the pipes. Space to jump (and to restart), q to quit.",
    version,
    after_help = "EXAMPLES:
    flappy-board                          Play with the classic settings
    flappy-board --seed 42                Same pipes every run
    flappy-board --print-config > my.toml Start a config file
    flappy-board -c my.toml --mute        Play with your own settings, silently"
)]
pub struct Args {
    /// TOML config file (defaults are used for anything it leaves out)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for pipe placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable sound
    #[arg(long)]
    pub mute: bool,

    /// Write a log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", requires = "log_file")]
    pub log_level: LevelFilter,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
