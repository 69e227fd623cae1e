use std::io::Write;
use std::num::IntErrorKind;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use serde::Serialize;

use pcd_types::{Channel, PointXyz, RangeError, Rgb};

#[derive(Parser, Debug)]
#[command(
    name = "ptypes",
    about = "Construct point records and print their description",
    author = "MIERUNE Inc.",
    version = "0.0.1"
)]
struct Cli {
    /// Print the record as JSON instead of its text form
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// A 3D coordinate point
    Xyz {
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
    },
    /// An 8-bit RGB colour; components outside 0..=255 are rejected
    Rgb {
        #[arg(allow_negative_numbers = true, value_parser = parse_component)]
        r: Component,
        #[arg(allow_negative_numbers = true, value_parser = parse_component)]
        g: Component,
        #[arg(allow_negative_numbers = true, value_parser = parse_component)]
        b: Component,
    },
    /// A 16-bit RGB colour, scaled down to 8 bits
    Rgb16 { r: u16, g: u16, b: u16 },
}

/// A colour component as given on the command line.
#[derive(Debug, Clone, PartialEq)]
enum Component {
    Value(i64),
    /// An integer too wide for i64, kept as typed
    Overflow(String),
}

fn parse_component(s: &str) -> Result<Component, String> {
    match s.parse::<i64>() {
        Ok(value) => Ok(Component::Value(value)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(Component::Overflow(s.to_string()))
        }
        Err(e) => Err(e.to_string()),
    }
}

impl Component {
    fn to_u8(&self, channel: Channel) -> Result<u8, AppError> {
        match self {
            Component::Value(value) => u8::try_from(*value).map_err(|_| {
                AppError::Range(RangeError {
                    channel,
                    value: *value,
                })
            }),
            Component::Overflow(text) => Err(AppError::Overflow {
                channel,
                text: text.clone(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("{channel} component {text} is out of range 0..=255")]
    Overflow { channel: Channel, text: String },
    #[error("failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Record {
    Xyz(PointXyz),
    Rgb(Rgb),
}

impl Record {
    fn from_command(command: &Command) -> Result<Self, AppError> {
        let record = match command {
            Command::Xyz { x, y, z } => Record::Xyz(PointXyz::new(*x, *y, *z)),
            Command::Rgb { r, g, b } => Record::Rgb(Rgb::new(
                r.to_u8(Channel::Red)?,
                g.to_u8(Channel::Green)?,
                b.to_u8(Channel::Blue)?,
            )),
            Command::Rgb16 { r, g, b } => Record::Rgb(Rgb::from_rgb16(*r, *g, *b)),
        };
        Ok(record)
    }

    fn describe(&self, json: bool) -> Result<String, serde_json::Error> {
        match self {
            Record::Xyz(p) if json => to_json(p),
            Record::Rgb(c) if json => to_json(c),
            Record::Xyz(p) => Ok(p.to_string()),
            Record::Rgb(c) => Ok(c.to_string()),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn run(args: &Cli) -> Result<String, AppError> {
    let record = Record::from_command(&args.command)?;
    log::info!("constructed {:?}", record);
    Ok(record.describe(args.json)?)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level_filter(args.verbose))
        .parse_default_env()
        .init();

    log::debug!("arguments: {:?}", args);

    match run(&args) {
        Ok(description) => {
            println!("{}", description);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
