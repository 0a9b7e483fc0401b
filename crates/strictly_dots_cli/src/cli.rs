//! Command-line interface for strictly_dots.

use clap::{Parser, Subcommand};

/// Strictly Dots - dots and boxes rules engine and replay viewer
#[derive(Parser, Debug)]
#[command(name = "strictly_dots")]
#[command(about = "Dots and boxes replay decoder and hot-seat game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a replay and print its frames
    Replay {
        /// Replay text (`size_x,size_y,player,x,y,dir,...`). Read from stdin if omitted.
        text: Option<String>,

        /// Read the replay text from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<std::path::PathBuf>,

        /// Path to a decoder config file (TOML)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Keep decoding after an illegal move and report every violation
        #[arg(long)]
        all_violations: bool,

        /// Print only this frame (0 is the empty board)
        #[arg(long)]
        frame: Option<usize>,

        /// Emit the decoded replay as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a two-player game in the terminal
    Play {
        /// Number of box columns
        #[arg(long, default_value = "3")]
        width: usize,

        /// Number of box rows
        #[arg(long, default_value = "3")]
        height: usize,
    },
}
