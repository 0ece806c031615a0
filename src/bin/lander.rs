//! Standalone `lander` binary; same flags as `arcade lander`.

use anyhow::Result;
use clap::Parser;

use tui_arcade::games::GameKind;
use tui_arcade::{launch, RunArgs};

#[derive(Parser, Debug)]
#[command(name = "lander")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    launch(GameKind::Lander, &cli.run)
}
