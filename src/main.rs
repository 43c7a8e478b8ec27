use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process::ExitCode;

use fatigue_damage::app_logic::{self, Options};
use fatigue_damage::logging::{init_logging, LogLevel};
use fatigue_damage::report::Format;

fn cli() -> Command {
    Command::new("fatigue-damage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rainflow counting and Miner's rule damage of a stress signal")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Path to the input file with one stress value per line")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Path to the output file for the damage history")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("range")
                .short('r')
                .long("range")
                .help("Width of the stress range bins [default: 10]")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .help("Number of leading samples reported with zero damage [default: 20]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("YAML or TOML file with histogram, window and material settings")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("bins")
                .short('b')
                .long("bins")
                .help("Also write the bin table of the whole signal to this path")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format, csv or json")
                .default_value("csv")
                .value_parser(|s: &str| s.parse::<Format>().map_err(|e| e.to_string())),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity, may be repeated")
                .action(ArgAction::Count),
        )
        .after_help(
            "Flags given on the command line override the values of the configuration file. \
             Set RUST_LOG for fine grained log filtering.",
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(LogLevel::from_verbosity(matches.get_count("verbose")));

    let options = Options {
        input: matches.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
        output: matches.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        bins: matches.get_one::<PathBuf>("bins").cloned(),
        width: matches.get_one::<f64>("range").copied(),
        start: matches.get_one::<usize>("start").copied(),
        format: matches.get_one::<Format>("format").copied().unwrap_or_default(),
    };

    match app_logic::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
