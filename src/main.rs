use anyhow::{Context, Result};
use clap::Parser;
use flappy_board::app::{self, Options};
use flappy_board::cli::Args;
use flappy_board::{Config, logging};

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::default().to_toml()?);
        return Ok(());
    }

    if let Some(path) = &args.log_file {
        logging::init(path, args.log_level)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
    }

    let config = Config::load_or_default(args.config.as_deref())?;
    log::info!("starting with {config:?}");

    app::run(
        config,
        Options {
            seed: args.seed,
            mute: args.mute,
        },
    )
}
