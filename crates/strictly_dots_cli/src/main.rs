//! Strictly Dots - command-line front end
//!
//! Decodes replays frame by frame and runs hot-seat games on stdin.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;
use strictly_dots::{
    DecoderConfig, Direction, GameSession, Replay, ReplayDecoder, ViolationMode,
};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            text,
            file,
            config,
            all_violations,
            frame,
            json,
        } => run_replay(text, file, config, all_violations, frame, json),
        Command::Play { width, height } => run_play(width, height),
    }
}

/// Decode a replay and print it
#[instrument(skip(text))]
fn run_replay(
    text: Option<String>,
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    all_violations: bool,
    frame: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut decoder_config = match config {
        Some(path) => DecoderConfig::from_file(&path)?,
        None => DecoderConfig::default(),
    };
    if all_violations {
        decoder_config = decoder_config.with_violation_mode(ViolationMode::ReportAll);
    }
    debug!(?decoder_config, "Decoder configured");

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read replay file {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read replay from stdin")?;
            buffer
        }
    };

    let replay = ReplayDecoder::new(decoder_config).decode(&text)?;
    info!(frames = replay.frames().len(), "Replay ready");

    if json {
        println!("{}", serde_json::to_string_pretty(&replay)?);
        return Ok(());
    }

    match frame {
        Some(index) => {
            let Some(board) = replay.frame(index) else {
                bail!(
                    "Frame {} does not exist (replay has frames 0..={})",
                    index,
                    replay.total_moves()
                );
            };
            println!("Frame {}/{}", index, replay.total_moves());
            println!("{}", board);
        }
        None => print_frames(&replay),
    }
    print_summary(&replay);
    Ok(())
}

fn print_frames(replay: &Replay) {
    for (index, board) in replay.frames().iter().enumerate() {
        if index == 0 {
            println!("Frame 0: empty {}x{} board", replay.size_x(), replay.size_y());
        } else {
            // Skipped illegal moves in report-all mode have no frame, so
            // frames are numbered rather than paired with moves
            println!("Frame {}", index);
        }
        println!("{}\n", board);
    }
}

fn print_summary(replay: &Replay) {
    let [first, second] = replay.scores();
    println!(
        "Moves: {}  Applied: {}  Score: {} - {}",
        replay.moves().len(),
        replay.total_moves(),
        first,
        second
    );
    for violation in replay.violations() {
        println!("Violation: {}", violation);
    }
    if *replay.unchecked_moves() > 0 {
        println!("Not decoded after the violation: {} move(s)", replay.unchecked_moves());
    }
    match replay.outcome() {
        Some(outcome) => println!("Result: {}", outcome),
        None => println!("Result: undecided"),
    }
}

/// Run a hot-seat game on stdin
#[instrument]
fn run_play(width: usize, height: usize) -> Result<()> {
    let mut session = GameSession::new(width, height)?;
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Enter moves as `<h|v> <x> <y>`, or `quit`.");
    while !session.is_finished() {
        println!("{}", session.board());
        let [first, second] = session.scores();
        print!(
            "Score {} - {}. {} to move> ",
            first,
            second,
            session.current_player()
        );
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            warn!("Input closed before the game finished");
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            break;
        }

        match parse_move(input) {
            Ok((direction, x, y)) => match session.play(direction, x, y) {
                Ok(next) if next == session => println!("That line is already taken."),
                Ok(next) => session = next,
                Err(err) => println!("{}", err),
            },
            Err(err) => println!("{}", err),
        }
    }

    println!("{}", session.board());
    if let Some(outcome) = session.outcome() {
        println!("Result: {}", outcome);
    }
    println!("Replay: {}", session.to_replay());
    Ok(())
}

/// Parses `<dir> <x> <y>`.
fn parse_move(input: &str) -> Result<(Direction, usize, usize)> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [dir, x, y] = parts.as_slice() else {
        bail!("Expected `<h|v> <x> <y>`, got {:?}", input);
    };
    let direction: Direction = dir.parse()?;
    let x = x.parse().with_context(|| format!("Invalid x: {}", x))?;
    let y = y.parse().with_context(|| format!("Invalid y: {}", y))?;
    Ok((direction, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_accepts_letters_and_codes() {
        assert_eq!(parse_move("h 1 2").unwrap(), (Direction::Horizontal, 1, 2));
        assert_eq!(parse_move("  V 0 0 ").unwrap(), (Direction::Vertical, 0, 0));
        assert_eq!(parse_move("1 3 1").unwrap(), (Direction::Vertical, 3, 1));
    }

    #[test]
    fn test_parse_move_rejects_garbage() {
        assert!(parse_move("h 1").is_err());
        assert!(parse_move("d 1 1").is_err());
        assert!(parse_move("h -1 0").is_err());
    }

    #[test]
    fn test_cli_parses_replay_flags() {
        let cli = Cli::try_parse_from(["strictly_dots", "replay", "1,1", "--all-violations", "--json"])
            .unwrap();
        match cli.command {
            Command::Replay {
                text,
                all_violations,
                json,
                ..
            } => {
                assert_eq!(text.as_deref(), Some("1,1"));
                assert!(all_violations);
                assert!(json);
            }
            Command::Play { .. } => panic!("Expected replay command"),
        }
    }
}
