#![warn(clippy::pedantic)]

mod net;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{
    eyre::WrapErr,
    owo_colors::OwoColorize,
};
use cube3::{Action, Cube3, CubeState, SolverConfig, apply_sequence, check_legality, parse_sequence};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};

const EXPLANATION: &str = "\
A state is 54 color letters, nine per face, in the order
TOP, FRONT, RIGHT, BACK, LEFT, BOTTOM.

Hold the cube with the face you call FRONT towards you. TOP, BOTTOM, RIGHT
and LEFT are read after a single 90 degree turn that brings them to the
front. BACK is read after turning FRONT to RIGHT and then RIGHT to BACK.

Each face is read row by row, starting at the top row, left to right.
The letters are r, g, b, w, y and o. Spaces and newlines are ignored.";

/// Solves a 3x3x3 cube layer by layer
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The solver configuration file to use, in TOML format.
    #[arg(long, short = 'c', value_name = "SOLVER_CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube, reading its state from stdin if none is given
    Solve {
        /// The 54 color letters of the cube
        state: Option<String>,
        /// Print every move to stderr as it is made
        #[arg(long)]
        trace: bool,
        /// Print a colored net of the cube before solving
        #[arg(long)]
        net: bool,
    },
    /// Print the state reached by applying moves to the solved cube
    Scramble {
        /// The move sequence to apply, e.g. "R U' F2". Random if omitted.
        moves: Option<String>,
        /// How many random moves to make
        #[arg(long, short, default_value_t = 25)]
        length: usize,
        /// Seed for the random moves
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Report whether a state can be reached from the solved cube
    Check {
        /// The 54 color letters of the cube
        state: Option<String>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = match &cli.config {
        Some(path) => SolverConfig::from_path(path)?,
        None => SolverConfig::default(),
    };
    info!("Using {config:?}");

    match cli.command {
        Commands::Solve { state, trace, net } => {
            let state = read_state(state)?;
            if net {
                println!("{}\n", net::render(&state));
            }
            solve(state, config, trace)?;
        }
        Commands::Scramble {
            moves,
            length,
            seed,
        } => {
            let moves = match moves {
                Some(moves) => parse_sequence(&moves)?,
                None => random_moves(length, seed),
            };
            eprintln!("{}", moves.iter().join(" ").dimmed());
            println!("{}", apply_sequence(&CubeState::solved(), moves));
        }
        Commands::Check { state } => {
            let state = read_state(state)?;
            match check_legality(&state) {
                Ok(()) => println!("{}", "Legal".green()),
                Err(e) => return Err(e).wrap_err("Illegal state"),
            }
        }
    }

    Ok(())
}

fn prompt(message: &str) -> io::Result<String> {
    println!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn read_state(state: Option<String>) -> color_eyre::Result<CubeState> {
    let text = match state {
        Some(text) => text,
        None => {
            let answer = prompt("Do you need an explanation? (y/n)")?;
            if answer.trim().eq_ignore_ascii_case("y") {
                println!("{EXPLANATION}\n");
            }
            prompt("Enter the state:")?
        }
    };
    text.parse::<CubeState>()
        .wrap_err("Could not read the cube state")
}

fn random_moves(length: usize, seed: Option<u64>) -> Vec<Action> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    (0..length)
        .map(|_| Action::LAYER_TURNS[rng.usize(..Action::LAYER_TURNS.len())])
        .collect()
}

fn solve(state: CubeState, config: SolverConfig, trace: bool) -> color_eyre::Result<()> {
    let mut cube = Cube3::with_config(state, config);
    if trace {
        let mut count = 0;
        cube.set_observer(Box::new(move |action: Action, state: &CubeState| {
            count += 1;
            eprintln!("{count:>4} {action:<4} {state}");
        }));
    }

    let result = cube.solve();
    let moves = cube.moves_performed();
    if !moves.is_empty() {
        println!("{}", moves.iter().join(" "));
    }
    result?;

    println!("{} moves", moves.len());
    println!("{}", "Solved!".green());
    Ok(())
}
