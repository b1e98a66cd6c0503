use ansi_term::Style;
use basic::mach::{Options, Translator};
use clap::{App, Arg, ArgMatches};
use slog::{o, Drain, Level, Logger};
use slog_term::{FullFormat, TermDecorator};
use std::io::{IsTerminal, Read, Write};

enum Error {
    IO(std::io::Error),
    Translate(basic::lang::Error),
    Usage(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

impl From<basic::lang::Error> for Error {
    fn from(e: basic::lang::Error) -> Error {
        Error::Translate(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IO(e) => write!(f, "{}", e),
            Error::Translate(e) => write!(f, "{}", e),
            Error::Usage(s) => write!(f, "{}", s),
        }
    }
}

fn parse_arguments() -> ArgMatches<'static> {
    App::new("basicc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translates line-numbered BASIC into x86-64 NASM assembly")
        .arg(
            Arg::with_name("source")
                .help("BASIC source file, or - for standard input")
                .value_name("SOURCE")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Write assembly here instead of standard output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max-variables")
                .help("Variable table capacity")
                .long("max-variables")
                .value_name("N")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max-strings")
                .help("String literal capacity")
                .long("max-strings")
                .value_name("N")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .help("Log more, repeat for trace output")
                .short("v")
                .multiple(true),
        )
        .get_matches()
}

fn logger(verbosity: u64) -> Logger {
    let level = match verbosity {
        0 => Level::Warning,
        1 => Level::Debug,
        _ => Level::Trace,
    };
    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(level).fuse();
    Logger::root(drain, o!())
}

fn limit(args: &ArgMatches, name: &str, default: usize) -> Result<usize, Error> {
    match args.value_of(name) {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| Error::Usage(format!("INVALID --{} VALUE {}", name, s))),
    }
}

fn run(args: &ArgMatches, logger: &Logger) -> Result<(), Error> {
    let defaults = Options::default();
    let options = Options {
        max_variables: limit(args, "max-variables", defaults.max_variables)?,
        max_strings: limit(args, "max-strings", defaults.max_strings)?,
    };

    let source = match args.value_of("source") {
        None | Some("-") => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
        Some(path) => std::fs::read_to_string(path)?,
    };

    let mut translator = Translator::new(options, logger.clone());
    let asm = translator.translate(&source)?;

    match args.value_of("output") {
        Some(path) => std::fs::write(path, asm)?,
        None => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            stdout.write_all(asm.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let args = parse_arguments();
    let status = {
        let logger = logger(args.occurrences_of("verbose"));
        match run(&args, &logger) {
            Ok(()) => 0,
            Err(e) => {
                let msg = format!("Error: {}", e);
                if std::io::stderr().is_terminal() {
                    eprintln!("{}", Style::new().bold().paint(msg));
                } else {
                    eprintln!("{}", msg);
                }
                1
            }
        }
    };
    std::process::exit(status);
}
