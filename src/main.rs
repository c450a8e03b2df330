//! Fingerprint comparison command line tool
//!
//! Fingerprints two audio files with `fpcalc` and plots their bitwise
//! difference. With two paths the figure is opened in the system image
//! viewer; a third path saves it instead.

use fpdiff::{run, CompareConfig, CompareError, Fpcalc, Outcome, SaveToFile, ShowInViewer};
use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

/// Command line arguments structure
#[derive(Debug)]
struct Args {
    first: PathBuf,
    second: PathBuf,
    output: Option<PathBuf>,
    config: CompareConfig,
    verbose: bool,
    #[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
    report: Option<PathBuf>,
}

/// What the command line asked for
#[derive(Debug)]
enum Invocation {
    Compare(Box<Args>),
    /// Wrong number of positional arguments
    Usage,
    /// Explicit `-h`
    Help,
}

impl Args {
    /// Parse arguments (without the program name). Options may appear
    /// anywhere before `--`; everything else is positional, including a
    /// dash-prefixed argument that is not one of the options above.
    fn parse(argv: &[String]) -> Result<Invocation, String> {
        let mut config = CompareConfig::new();
        let mut verbose = false;
        let mut report = None;
        let mut positional = Vec::new();
        let mut options_done = false;

        let mut i = 0;
        while i < argv.len() {
            let arg = &argv[i];
            i += 1;

            if options_done || !arg.starts_with('-') || arg == "-" {
                positional.push(PathBuf::from(arg));
                continue;
            }

            match arg.as_str() {
                "--" => options_done = true,
                "-h" => return Ok(Invocation::Help),
                "-q" => {
                    config.quiet = true;
                    verbose = false;
                }
                "-v" => {
                    verbose = true;
                    config.quiet = false;
                }
                "-t" => config.tool = value(argv, &mut i, arg)?.to_string(),
                "-l" => config.length_secs = parse_number(value(argv, &mut i, arg)?, "length")?,
                "-W" => config.figure.width = parse_number(value(argv, &mut i, arg)?, "width")?,
                "-H" => config.figure.height = parse_number(value(argv, &mut i, arg)?, "height")?,
                "-f" => config.figure.font_path = Some(PathBuf::from(value(argv, &mut i, arg)?)),
                "-r" => {
                    let path = PathBuf::from(value(argv, &mut i, arg)?);
                    if cfg!(feature = "diagnostics") {
                        report = Some(path);
                    } else {
                        return Err("Option -r requires the diagnostics feature".to_string());
                    }
                }
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let mut positional = positional.into_iter();
        let (first, second, output) = match (
            positional.next(),
            positional.next(),
            positional.next(),
            positional.next(),
        ) {
            (Some(first), Some(second), output, None) => (first, second, output),
            _ => return Ok(Invocation::Usage),
        };

        Ok(Invocation::Compare(Box::new(Args {
            first,
            second,
            output,
            config,
            verbose,
            report,
        })))
    }
}

fn value<'a>(argv: &'a [String], i: &mut usize, option: &str) -> Result<&'a str, String> {
    let v = argv
        .get(*i)
        .ok_or_else(|| format!("Option {} requires a value", option))?;
    *i += 1;
    Ok(v)
}

fn parse_number(raw: &str, what: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("Invalid {}: {}", what, raw))
}

/// Print the one-line usage message
fn print_usage(program: &str) {
    println!("Usage: {} audio1.wav audio2.wav [plot.png]", program);
}

/// Print usage plus the option list
fn print_help(program: &str) {
    print_usage(program);
    println!();
    println!("Options:");
    println!(" -h            this help message");
    println!(" -t <tool>     fingerprinting tool, default fpcalc");
    println!(" -l <secs>     seconds of audio to fingerprint, default 120");
    println!(" -W <px>       figure width, default 1600");
    println!(" -H <px>       figure height, default 900");
    println!(" -f <font>     TrueType font for titles and labels");
    println!(" -r <file>     write a JSON report (diagnostics builds)");
    println!(" -q            quiet mode");
    println!(" -v            verbose mode");
    println!(" --            treat every following argument as a path");
    println!();
    println!("Without plot.png the figure is written to fpdiff-*.png in the temp");
    println!("directory and opened in the image viewer; that file is not removed.");
}

fn compare(args: &Args) -> Result<(), CompareError> {
    args.config.validate()?;

    let source = Fpcalc::from_config(&args.config);
    let mut stdout = io::stdout();
    let outcome = match &args.output {
        Some(path) => {
            let sink = SaveToFile {
                path: path.clone(),
                config: args.config.figure.clone(),
            };
            run(&args.config, &source, &sink, &args.first, &args.second, &mut stdout)?
        }
        None => {
            let sink = ShowInViewer {
                config: args.config.figure.clone(),
            };
            run(&args.config, &source, &sink, &args.first, &args.second, &mut stdout)?
        }
    };

    #[cfg(feature = "diagnostics")]
    if let (Outcome::Compared(comparison), Some(path)) = (&outcome, &args.report) {
        fpdiff::report::ComparisonReport::new(&args.first, &args.second, comparison)
            .write_to(path)?;
    }

    if let Outcome::Compared(comparison) = &outcome {
        log::debug!(
            "Compared {} frames, {} of them padded",
            comparison.summary.frames,
            comparison.summary.padded_frames()
        );
    }
    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("fpdiff");

    let args = match Args::parse(argv.get(1..).unwrap_or(&[])) {
        Ok(Invocation::Compare(args)) => args,
        Ok(Invocation::Usage) => {
            print_usage(program);
            return;
        }
        Ok(Invocation::Help) => {
            print_help(program);
            return;
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage(program);
            process::exit(1);
        }
    };

    // Initialize logger with minimal output (only errors by default)
    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Error
        })
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    if let Err(err) = compare(&args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
