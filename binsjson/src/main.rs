//! sjson command-line tool for checking JSON documents against the strict
//! parser.
//!
//! Usage: sjson [OPTIONS] [FILE|DIR]...
//!
//! Each input is parsed independently. Success prints `<name>: ok` (or the
//! parsed tree with `--dump` / `--native`); failure prints a source excerpt
//! (or `<name>:<line>:<column>: <detail>` with `--short`). Directories are
//! expanded to the `.json` files they contain.
//!
//! Exit status is 0 when every input parses, 1 when any input is malformed,
//! and 2 for usage or I/O errors.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as ClapParser;
use libsjson::{parse_with_limits, Limits, ParseError, Value, DEFAULT_MAX_DEPTH};
use tracing::*;

mod logging;
mod report;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON files or directories to check. Reads stdin when none is given or for `-`.
    files: Vec<PathBuf>,

    /// Print the parsed value tree instead of `ok`.
    #[arg(long, conflicts_with = "native")]
    dump: bool,

    /// Print the parsed document as pretty JSON instead of `ok`.
    #[arg(long)]
    native: bool,

    /// Report each failure on one line.
    #[arg(long)]
    short: bool,

    /// Maximum nesting of objects and arrays.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Reject inputs larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    max_size: Option<usize>,

    /// Print nothing for inputs that parse.
    #[arg(short, long)]
    quiet: bool,

    /// More log output; repeat for trace level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn limits(&self) -> Limits {
        Limits::default()
            .with_max_depth(self.max_depth)
            .with_max_input_size(self.max_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> anyhow::Result<String> {
        match self {
            Input::Stdin => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read stdin")?;
                Ok(buffer)
            }
            Input::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read file `{}`", path.display())),
        }
    }
}

/// Resolve command-line paths into the inputs to check, in order.
fn collect_inputs(files: &[PathBuf]) -> anyhow::Result<Vec<Input>> {
    if files.is_empty() {
        return Ok(vec![Input::Stdin]);
    }

    let mut inputs = Vec::new();
    for path in files {
        if path.as_os_str() == "-" {
            inputs.push(Input::Stdin);
        } else if path.is_dir() {
            inputs.extend(json_files_in(path)?.into_iter().map(Input::File));
        } else {
            inputs.push(Input::File(path.clone()));
        }
    }
    Ok(inputs)
}

/// The `.json` files directly inside `dir`, sorted by name.
fn json_files_in(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory `{}`", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory `{}`", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "expanded directory");
    Ok(files)
}

fn print_value(args: &Args, name: &str, value: &Value) -> anyhow::Result<()> {
    if args.quiet {
        return Ok(());
    }
    if args.dump {
        println!("{:#?}", value);
    } else if args.native {
        let text = serde_json::to_string_pretty(&value.to_native())
            .with_context(|| format!("failed to render `{}` as JSON", name))?;
        println!("{}", text);
    } else {
        println!("{}: ok", name);
    }
    Ok(())
}

fn print_error(args: &Args, name: &str, text: &str, err: &ParseError) -> anyhow::Result<()> {
    if args.short {
        eprintln!("{}", report::format_short(name, err));
    } else {
        let path = name.to_string();
        report::eprint(&path, text, err).context("failed to write diagnostic")?;
    }
    Ok(())
}

/// Check every input. `Ok(false)` means at least one was malformed.
fn run(args: &Args) -> anyhow::Result<bool> {
    let limits = args.limits();
    let mut all_ok = true;

    for input in collect_inputs(&args.files)? {
        let name = input.name();
        let text = input.read()?;
        debug!(%name, len = text.len(), "checking input");

        match parse_with_limits(&text, limits) {
            Ok(value) => print_value(args, &name, &value)?,
            Err(err) => {
                all_ok = false;
                print_error(args, &name, &text, &err)?;
            }
        }
    }

    Ok(all_ok)
}

/// Process status for the outcome of [`run`].
fn exit_status(outcome: &anyhow::Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::setup_logging(args.verbose);
    debug!(?args);

    let outcome = run(&args);
    if let Err(e) = &outcome {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(exit_status(&outcome))
}
