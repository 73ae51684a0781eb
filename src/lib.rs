#![deny(clippy::all)]

use clap::{value_t, App, Arg};

use lazy_static::lazy_static;
use searcher::SearchOptions;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::collections::HashMap;
use std::fs::File;
use std::io;

pub mod puzzles;

type Error = anyhow::Error;
type Actor = Box<dyn (Fn(Box<dyn io::Read>, &SearchOptions) -> Result<(), Error>) + Send + Sync + 'static>;

lazy_static! {
    static ref SOLVERS: HashMap<&'static str, Actor> = {
        let mut s: HashMap<&'static str, Actor> = HashMap::new();
        s.insert("hills", Box::new(puzzles::hills::main));
        s.insert("maze", Box::new(puzzles::maze::main));
        s.insert("labels", Box::new(puzzles::labels::main));
        s
    };
}

pub fn solver() -> Result<(), Error> {
    let matches = App::new("pathsearch")
        .version("0.1")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Solve search puzzles with generalized graph searches")
        .arg(
            Arg::with_name("puzzle")
                .value_name("PUZZLE")
                .required(true)
                .takes_value(true)
                .possible_values(&["hills", "maze", "labels"]),
        )
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .required(false)
                .takes_value(true)
                .help("Puzzle input, or - for stdin"),
        )
        .arg(
            Arg::with_name("limit")
                .long("limit")
                .value_name("STATES")
                .takes_value(true)
                .help("Give up after exploring this many states"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Log search progress (repeat for more)"),
        )
        .get_matches();

    init_tracing(matches.occurrences_of("verbose"))?;

    let puzzle = matches.value_of("puzzle").unwrap_or_default();
    let options = SearchOptions {
        limit: if matches.is_present("limit") {
            Some(value_t!(matches, "limit", usize)?)
        } else {
            None
        },
        ..SearchOptions::default()
    };
    debug!(puzzle, ?options, "starting");

    let reader = get_input_reader(puzzle, matches.value_of("input"))?;

    match SOLVERS.get(puzzle) {
        None => Err(PuzzleError::PuzzleNotFound(puzzle.to_string()).into()),
        Some(actor) => actor(reader, &options),
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over the verbosity count.
pub fn init_tracing(verbosity: u64) -> Result<(), Error> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init()?;
    Ok(())
}

type IOResult<T> = std::io::Result<T>;
type BoxedRead = Box<dyn ::std::io::Read + 'static>;

pub fn get_input_reader(puzzle: &str, filename: Option<&str>) -> Result<BoxedRead, Error> {
    let reader: Box<dyn ::std::io::Read + 'static> = match filename {
        Some("-") => Box::new(::std::io::stdin()),
        Some(path) => {
            let f: File = File::open(path).map_err(PuzzleError::InputNotFound)?;
            Box::new(f)
        }
        None => get_default_input(puzzle)
            .map_err(|e| PuzzleError::DefaultInputNotFound(puzzle.to_string(), e))?,
    };
    Ok(reader)
}

pub fn get_default_input(puzzle: &str) -> IOResult<BoxedRead> {
    let mut p = ::std::path::PathBuf::from("puzzles");
    p.push(puzzle);
    p.push("input.txt");

    let f = File::open(p)?;

    Ok(Box::new(f))
}

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("No puzzle named {0}")]
    PuzzleNotFound(String),

    #[error("Input not found: puzzles/{0}/input.txt")]
    DefaultInputNotFound(String, #[source] io::Error),

    #[error("Input not found")]
    InputNotFound(#[from] io::Error),
}
