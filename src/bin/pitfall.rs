//! Standalone `pitfall` binary; same flags as `arcade pitfall`.

use anyhow::Result;
use clap::Parser;

use tui_arcade::games::GameKind;
use tui_arcade::{launch, RunArgs};

#[derive(Parser, Debug)]
#[command(name = "pitfall")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    launch(GameKind::Pitfall, &cli.run)
}
