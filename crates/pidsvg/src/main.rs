// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use pico_args::Arguments;

const DEFAULT_GRID_STEP: u32 = 10;

const HELP: &str = "\
pidsvg converts Proteus P&ID documents into SVG.

USAGE:
  pidsvg [OPTIONS] <in-xml> <out-svg>  # from file to file
  pidsvg [OPTIONS] <in-xml> -c         # from file to stdout
  pidsvg [OPTIONS] - <out-svg>         # from stdin to file
  pidsvg [OPTIONS] - -c                # from stdin to stdout

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information
  -c                                Prints the output SVG to the stdout

  --debug                           Draws a bounding box around each element
                                    that has an extent
  --background                      Fills the canvas with the drawing color
  --grid[=STEP]                     Draws a background grid with a specified step.
                                    Each 10th line is bold.
                                    Only '--grid=STEP' sets the step, '--grid STEP' is an error
                                    [values: 1..4294967295 (inclusive)] [default: 10]

  --indent INDENT                   Sets the XML nodes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: 4]
  --attrs-indent INDENT             Sets the XML attributes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: none]
  --coordinates-precision NUM       Set the coordinates numeric precision.
                                    Smaller precision can lead to a malformed output in some cases
                                    [values: 2..8 (inclusive)] [default: 8]
  --quiet                           Disables warnings

ARGS:
  <in-xml>                          Input file
  <out-svg>                         Output file
";

#[derive(Debug)]
struct Args {
    debug: bool,
    background: bool,
    grid: Option<u32>,

    indent: pidsvg::Indent,
    attrs_indent: pidsvg::Indent,
    coordinates_precision: Option<u8>,

    quiet: bool,

    input: String,
    output: String,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let raw_args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let mut input = Arguments::from_vec(raw_args.clone());

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    if let Some(step) = detached_grid_step(&raw_args) {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("grid STEP must be set as '--grid={}'", step),
        });
    }

    // A bare `--grid` must be checked first, since `--grid=STEP` is a separate key.
    let grid = if input.contains("--grid") {
        Some(DEFAULT_GRID_STEP)
    } else {
        input.opt_value_from_fn("--grid", parse_grid_step)?
    };

    Ok(Args {
        debug: input.contains("--debug"),
        background: input.contains("--background"),
        grid,

        indent: input
            .opt_value_from_fn("--indent", parse_indent)?
            .unwrap_or(pidsvg::Indent::Spaces(4)),
        attrs_indent: input
            .opt_value_from_fn("--attrs-indent", parse_indent)?
            .unwrap_or(pidsvg::Indent::None),
        coordinates_precision: input
            .opt_value_from_fn("--coordinates-precision", parse_precision)?,

        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

/// Finds a `--grid STEP` pair, which would otherwise be parsed
/// as a bare `--grid` followed by an input file.
fn detached_grid_step(args: &[OsString]) -> Option<&str> {
    args.windows(2).find_map(|pair| {
        if pair[0] != "--grid" {
            return None;
        }

        let step = pair[1].to_str()?;
        step.parse::<u32>().ok().map(|_| step)
    })
}

fn parse_grid_step(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid grid STEP")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("grid STEP cannot be zero".to_string())
    }
}

fn parse_indent(s: &str) -> Result<pidsvg::Indent, String> {
    let indent = match s {
        "none" => pidsvg::Indent::None,
        "0" => pidsvg::Indent::Spaces(0),
        "1" => pidsvg::Indent::Spaces(1),
        "2" => pidsvg::Indent::Spaces(2),
        "3" => pidsvg::Indent::Spaces(3),
        "4" => pidsvg::Indent::Spaces(4),
        "tabs" => pidsvg::Indent::Tabs,
        _ => return Err("invalid INDENT value".to_string()),
    };

    Ok(indent)
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;

    if (2..=8).contains(&n) {
        Ok(n)
    } else {
        Err("precision NUM cannot be smaller than 2 or larger than 8".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom<'a> {
    Stdin,
    File(&'a str),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo<'a> {
    Stdout,
    File(&'a str),
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let in_xml = if args.input == "-" {
        InputFrom::Stdin
    } else if args.input == "-c" {
        return Err("-c should be set after input".to_string());
    } else {
        InputFrom::File(&args.input)
    };

    let out_svg = if args.output == "-c" {
        OutputTo::Stdout
    } else {
        OutputTo::File(&args.output)
    };

    let opt = pidsvg::Options {
        debug: args.debug,
        background: args.background,
    };

    let input_xml = match in_xml {
        InputFrom::Stdin => load_stdin(),
        InputFrom::File(path) => std::fs::read(path).map_err(|e| e.to_string()),
    }?;

    let scene = pidsvg::Scene::from_data(&input_xml, &opt).map_err(|e| match e.kind() {
        pidsvg::ErrorKind::SchemaMismatch => format!("not a valid Proteus document cause {}", e),
        _ => e.to_string(),
    })?;

    let xml_opt = pidsvg::WriteOptions {
        grid: args.grid,
        coordinates_precision: args.coordinates_precision.unwrap_or(8),
        use_single_quote: false,
        indent: args.indent,
        attributes_indent: args.attrs_indent,
    };

    let s = scene.to_string(&xml_opt);
    match out_svg {
        OutputTo::Stdout => {
            io::stdout()
                .write_all(s.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(path) => {
            let mut f =
                File::create(path).map_err(|_| "failed to create the output file".to_string())?;
            f.write_all(s.as_bytes())
                .map_err(|_| "failed to write to the output file".to_string())?;
        }
    }

    Ok(())
}

fn load_stdin() -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_end(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
