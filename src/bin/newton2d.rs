// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Command line driver: solves `f = g = 0` from one guess or over a grid of
//! guesses and prints whitespace-separated numbers on stdout.

use clap::{Parser, Subcommand, ValueEnum};
use newton2d::newton::{NewtonParams, NewtonResult, NewtonSystem};
use newton2d::polynomial::Polynomial2D;
use newton2d::scan::{scan_grid, Grid, GridSample};
use std::io::{self, BufWriter, Read, Write};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Verbosity level
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    /// No log output
    Quiet,
    /// Warnings only
    Normal,
    /// One line per solve
    Debug,
    /// One line per iteration
    Trace,
}

/// What `rect` prints after each initial guess
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum RectOutput {
    /// `x0 y0 x y`
    Root,
    /// `x0 y0 iterations`
    Iter,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Solve from a single guess and print `x y error` for every iterate
    One {
        #[arg(allow_negative_numbers = true)]
        x0: f64,
        #[arg(allow_negative_numbers = true)]
        y0: f64,
    },
    /// Solve from every point of a grid of guesses
    Rect {
        #[arg(value_enum)]
        output: RectOutput,
        #[arg(allow_negative_numbers = true)]
        x_start: f64,
        #[arg(allow_negative_numbers = true)]
        x_end: f64,
        #[arg(allow_negative_numbers = true)]
        y_start: f64,
        #[arg(allow_negative_numbers = true)]
        y_end: f64,
        #[arg(allow_negative_numbers = true)]
        step: f64,
    },
}

/// Newton-Raphson solver for two polynomial equations in x and y
#[derive(Parser, Debug, Clone)]
#[command(name = "newton2d")]
#[command(version)]
#[command(after_help = "Without a subcommand, one command such as `one 2 1` is read from stdin.")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// First equation, `f(x, y) = 0`
    #[arg(long, default_value = "x^2 + y^2 - 9")]
    f: String,

    /// Second equation, `g(x, y) = 0`
    #[arg(long, default_value = "x^2 - 3*x*y + y^2 - 9")]
    g: String,

    /// Maximum Newton steps per initial guess
    #[arg(long, default_value = "10000")]
    max_steps: usize,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value = "normal")]
    verbosity: Verbosity,
}

/// a command given on stdin, using the same syntax as the subcommands
#[derive(Parser, Debug)]
#[command(name = "newton2d", no_binary_name = true)]
struct StdinCommand {
    #[command(subcommand)]
    command: Command,
}

fn parse_stdin_command(input: &str) -> io::Result<Command> {
    StdinCommand::try_parse_from(input.split_whitespace())
        .map(|parsed| parsed.command)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))
}

fn write_history<W: Write>(out: &mut W, result: &NewtonResult) -> io::Result<()> {
    for entry in &result.history {
        writeln!(out, "{} {} {}", entry.x, entry.y, entry.error)?;
    }
    Ok(())
}

fn write_sample<W: Write>(out: &mut W, sample: &GridSample, output: RectOutput) -> io::Result<()> {
    write!(out, "{} {} ", sample.x0, sample.y0)?;
    match output {
        RectOutput::Root => writeln!(out, "{} {}", sample.result.root.0, sample.result.root.1),
        RectOutput::Iter => writeln!(out, "{}", sample.result.iterations),
    }
}

fn run<W: Write>(args: &Args, command: &Command, out: &mut W) -> io::Result<()> {
    let f: Polynomial2D = args.f.parse()?;
    let g: Polynomial2D = args.g.parse()?;
    debug!(%f, %g, "solving system");
    let system = NewtonSystem::new(f, g);
    let params = NewtonParams::new().with_max_steps(args.max_steps);
    match *command {
        Command::One { x0, y0 } => {
            let result = system.solve(x0, y0, &params.with_history(true));
            write_history(out, &result)?;
        }
        Command::Rect {
            output,
            x_start,
            x_end,
            y_start,
            y_end,
            step,
        } => {
            let grid = Grid::new(x_start, x_end, y_start, y_end, step)?;
            for sample in scan_grid(&system, &grid, &params)? {
                write_sample(out, &sample, output)?;
            }
        }
    }
    out.flush()
}

fn main() {
    let args = Args::parse();

    if args.verbosity > Verbosity::Quiet {
        let level = match args.verbosity {
            Verbosity::Trace => Level::TRACE,
            Verbosity::Debug => Level::DEBUG,
            _ => Level::WARN,
        };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(io::stderr)
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to set tracing subscriber: {}", e);
            std::process::exit(1);
        }
    }

    let command = match &args.command {
        Some(command) => Ok(command.clone()),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .and_then(|_| parse_stdin_command(&input))
        }
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = command.and_then(|command| run(&args, &command, &mut out)) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
