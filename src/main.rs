//! `arcade <game> [flags]`: pick any of the demos.

use anyhow::Result;
use clap::{Parser, Subcommand};

use tui_arcade::games::GameKind;
use tui_arcade::{launch, RunArgs};

#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(about = "Tiny pixel-buffer arcade demos in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Land on the flat pad without running out of fuel
    Lander(RunArgs),
    /// Shoot down the invaders before they reach the cannon
    Invaders(RunArgs),
    /// Run and jump over the pits
    Pitfall(RunArgs),
    /// Two ships, one cave (WASD and arrows)
    Cave(RunArgs),
    /// Draw with the arrow keys
    Paint(RunArgs),
    /// List the games
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (kind, args) = match cli.command {
        Commands::Lander(args) => (GameKind::Lander, args),
        Commands::Invaders(args) => (GameKind::Invaders, args),
        Commands::Pitfall(args) => (GameKind::Pitfall, args),
        Commands::Cave(args) => (GameKind::Cave, args),
        Commands::Paint(args) => (GameKind::Paint, args),
        Commands::List => {
            for kind in GameKind::ALL {
                println!("{kind}");
            }
            return Ok(());
        }
    };
    launch(kind, &args)
}
