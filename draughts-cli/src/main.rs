//! Draughts CLI - harness around the rule engine
//!
//! Commands:
//! - play: hotseat game on the terminal
//! - selfplay: seeded random playouts with statistics

use clap::{Parser, Subcommand};

mod play;
mod selfplay;

#[derive(Parser)]
#[command(name = "draughts")]
#[command(about = "Turn-based board-game engine harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hotseat game on the terminal
    Play(play::PlayArgs),
    /// Run seeded random playouts
    Selfplay(selfplay::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(&args),
        Commands::Selfplay(args) => selfplay::run(&args),
    }
}
