//! Standalone `paint` binary; same flags as `arcade paint`.

use anyhow::Result;
use clap::Parser;

use tui_arcade::games::GameKind;
use tui_arcade::{launch, RunArgs};

#[derive(Parser, Debug)]
#[command(name = "paint")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    launch(GameKind::Paint, &cli.run)
}
