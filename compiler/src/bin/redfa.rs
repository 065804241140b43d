//! Compiles the alphabet and expression in an input file into a DFA and
//! writes it out as a Graphviz digraph.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use regex_dfa_compiler::{build, parse, synthesize, to_postfix, write_dot, CompileError, ParseErr};

#[derive(Parser)]
#[command(name = "redfa")]
#[command(about = "Compile a regular expression directly into a DFA")]
#[command(version)]
struct Cli {
    /// File holding the alphabet on its first line and the expression on its
    /// second
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Output file for the DOT graph (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the postfix expression, position tables and states to stderr
    #[arg(short, long)]
    debug: bool,

    /// Report whether the compiled automaton accepts a string. May be
    /// repeated
    #[arg(short = 'm', long = "match", value_name = "STRING")]
    matches: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write output: {0}")]
    Write(#[from] io::Error),

    #[error("invalid input: {0}")]
    Parse(#[from] ParseErr),

    #[error("malformed expression: {0}")]
    Compile(#[from] CompileError),
}

fn main() -> ExitCode {
    match run(&Cli::parse(), io::stdout().lock(), io::stderr().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("redfa: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<O: Write, E: Write>(cli: &Cli, mut stdout: O, mut stderr: E) -> Result<(), CliError> {
    let text = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;

    let source = parse(&text)?;
    let postfix = to_postfix(&source.expression)?;
    let tree = build(postfix.as_ref())?;

    if cli.debug {
        write!(
            stderr,
            "DEBUG
--------
postfix: {}
{}--------
",
            postfix, tree
        )?;
    }

    let dfa = synthesize(&tree)?;

    if cli.debug {
        writeln!(stderr, "{}--------", dfa)?;
    }

    match &cli.output {
        Some(path) => write_dot(&dfa, io::BufWriter::new(fs::File::create(path)?))?,
        None => write_dot(&dfa, &mut stdout)?,
    }

    for input in &cli.matches {
        let verdict = match regex_dfa_runtime::run(&dfa, input) {
            true => "accept",
            false => "reject",
        };
        writeln!(stdout, "{}\t{}", verdict, input)?;
    }

    Ok(())
}
