//! Standalone `invaders` binary; same flags as `arcade invaders`.

use anyhow::Result;
use clap::Parser;

use tui_arcade::games::GameKind;
use tui_arcade::{launch, RunArgs};

#[derive(Parser, Debug)]
#[command(name = "invaders")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    launch(GameKind::Invaders, &cli.run)
}
