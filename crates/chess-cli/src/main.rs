//! Chess CLI - drives the rules engine from the command line.
//!
//! Counts perft nodes, lists the legal moves of a square, or plays a seeded
//! random game and prints the result.

use std::path::PathBuf;

use anyhow::Context;
use chess_core::{Color, GameProperties, Location, Placement};
use chess_engine::{perft, perft_divide, BoardState, Game, GameResult};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Chess CLI - perft, move listing and random self-play.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Drives the chess rules engine from the command line")]
struct Args {
    /// TOML file with game properties (pawn direction, square colors)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes of the move tree
    Perft {
        /// Search depth in plies
        #[arg(long, default_value = "3")]
        depth: u32,

        /// Piece placement to start from (defaults to the standard setup)
        #[arg(long)]
        placement: Option<String>,

        /// Side to move ("white" or "black")
        #[arg(long, default_value = "white")]
        side: Color,

        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// List the legal moves of the piece on a square
    Moves {
        /// Square such as "e2"
        square: String,

        /// Piece placement to use (defaults to the standard setup)
        #[arg(long)]
        placement: Option<String>,
    },
    /// Play random legal moves until the game ends
    Play {
        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Stop after this many plies
        #[arg(long, default_value = "200")]
        max_plies: usize,

        /// Print the move history as JSON instead of coordinates
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let properties = match &args.config {
        Some(path) => {
            tracing::info!("Loading properties from {:?}", path);
            GameProperties::load(path)
                .with_context(|| format!("loading properties from {}", path.display()))?
        }
        None => GameProperties::default(),
    };

    match args.command {
        Command::Perft {
            depth,
            placement,
            side,
            divide,
        } => run_perft(properties, placement.as_deref(), side, depth, divide),
        Command::Moves { square, placement } => {
            run_moves(properties, placement.as_deref(), &square)
        }
        Command::Play {
            seed,
            max_plies,
            json,
        } => run_play(properties, seed, max_plies, json),
    }
}

fn build_board(properties: GameProperties, placement: Option<&str>) -> anyhow::Result<BoardState> {
    match placement {
        Some(text) => {
            let placement = Placement::parse(text).context("invalid placement")?;
            Ok(BoardState::from_placement(&placement, properties))
        }
        None => Ok(BoardState::standard(properties)),
    }
}

fn run_perft(
    properties: GameProperties,
    placement: Option<&str>,
    side: Color,
    depth: u32,
    divide: bool,
) -> anyhow::Result<()> {
    let board = build_board(properties, placement)?;
    tracing::info!("Running perft to depth {} with {} to move", depth, side);

    if divide {
        let results = perft_divide(&board, side, depth);
        for (m, nodes) in &results {
            println!("{}: {}", m, nodes);
        }
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        println!();
        println!("Nodes searched: {}", total);
    } else {
        println!("Nodes searched: {}", perft(&board, side, depth));
    }
    Ok(())
}

fn run_moves(
    properties: GameProperties,
    placement: Option<&str>,
    square: &str,
) -> anyhow::Result<()> {
    let board = build_board(properties, placement)?;
    let location = Location::from_algebraic(square)
        .with_context(|| format!("invalid square: {}", square))?;

    println!("{}", board);
    println!();
    match board.valid_moves(location) {
        None => println!("No piece on {}", location),
        Some(moves) => {
            let names: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
            println!("{} legal move(s): {}", moves.len(), names.join(" "));
        }
    }
    Ok(())
}

fn run_play(
    properties: GameProperties,
    seed: u64,
    max_plies: usize,
    json: bool,
) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::with_properties(properties);
    tracing::info!("Playing random game with seed {}", seed);

    while !game.is_game_over() && game.history().len() < max_plies {
        let moves = game.all_legal_moves();
        let Some(&m) = moves.as_slice().choose(&mut rng) else {
            break;
        };
        game.play(m)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(game.history())?);
    } else {
        let line: Vec<String> = game.history().iter().map(|m| m.to_uci()).collect();
        println!("{}", line.join(" "));
    }
    println!();
    println!("{}", game.board());
    println!();
    match game.result() {
        Some(GameResult::Checkmate { winner }) => println!("Checkmate, {} wins", winner),
        Some(GameResult::Stalemate) => println!("Stalemate"),
        None => println!("Stopped after {} plies", game.history().len()),
    }
    Ok(())
}
