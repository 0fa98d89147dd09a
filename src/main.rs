use std::io::BufRead;

use clap::{Parser, Subcommand};
use guid_codec::{Guid, GuidError, Notation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{decode_wire_hex, describe_order, generate, parse_guid, wire_hex, GuidReport};
use config::RunConfig;

#[derive(Parser)]
#[command(name = "guid")]
#[command(about = "Parse, convert and generate 128-bit GUIDs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random (version 4) GUIDs
    New {
        /// How many GUIDs to generate
        #[arg(long, short, default_value_t = 1)]
        count: usize,
        /// Output notation: N, D, B, P or X
        #[arg(long, short, value_parser = parse_notation)]
        notation: Option<Notation>,
    },
    /// Parse a GUID and show it in every notation
    Parse {
        /// GUID text (read from stdin when omitted)
        text: Option<String>,
        /// Only accept this notation
        #[arg(long, value_parser = parse_notation)]
        exact: Option<Notation>,
        /// Report field overflow separately from format errors
        #[arg(long)]
        strict: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a GUID to another notation
    Format {
        /// GUID text (read from stdin when omitted)
        text: Option<String>,
        /// Output notation: N, D, B, P or X
        #[arg(long, short, value_parser = parse_notation)]
        notation: Option<Notation>,
    },
    /// Print the 16 wire bytes of a GUID
    Bytes {
        /// GUID text (read from stdin when omitted)
        text: Option<String>,
    },
    /// Build a GUID from a dump of its 16 wire bytes
    FromBytes {
        /// 32 hex digits
        hex: String,
        /// Output notation: N, D, B, P or X
        #[arg(long, short, value_parser = parse_notation)]
        notation: Option<Notation>,
    },
    /// Compare two GUIDs
    Compare {
        left: String,
        right: String,
    },
}

fn parse_notation(value: &str) -> Result<Notation, GuidError> {
    value.parse()
}

/// Returns `text` if given, otherwise the first line of stdin. `None` if stdin is empty.
fn read_input(text: Option<String>) -> anyhow::Result<Option<String>> {
    if text.is_some() {
        return Ok(text);
    }
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    Ok((read > 0).then_some(line))
}

/// Main entry point for the `guid` tool
///
/// # Environment Variables
/// - `GUID_DEFAULT_NOTATION`: notation used when `--notation` is not given (default: "D")
/// - `GUID_UPPERCASE`: print uppercase hex when set to true/1/yes (default: false)
/// - `RUST_LOG`: tracing filter, logs go to stderr
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("guid=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = RunConfig::from_env()?;
    tracing::debug!(
        default_notation = %config.default_notation(),
        uppercase = config.uppercase(),
        "resolved configuration"
    );

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::New { count, notation }) => {
            tracing::info!(count, "generating GUIDs");
            println!("{}", generate(count, notation, &config));
        }
        Some(Commands::Parse {
            text,
            exact,
            strict,
            json,
        }) => {
            let text = read_input(text)?;
            let guid = parse_guid(text.as_deref(), exact, strict)?;
            let report = GuidReport::new(guid, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.to_text());
            }
        }
        Some(Commands::Format { text, notation }) => {
            let text = read_input(text)?;
            let guid = Guid::parse_nullable(text.as_deref())?;
            println!("{}", config.render(&guid, notation));
        }
        Some(Commands::Bytes { text }) => {
            let text = read_input(text)?;
            let guid = Guid::parse_nullable(text.as_deref())?;
            println!("{}", wire_hex(&guid));
        }
        Some(Commands::FromBytes { hex, notation }) => {
            let guid = decode_wire_hex(&hex)?;
            println!("{}", config.render(&guid, notation));
        }
        Some(Commands::Compare { left, right }) => {
            let left = Guid::parse(&left)?;
            let right = Guid::parse(&right)?;
            println!("{}", describe_order(&left, &right));
        }
        None => {
            println!("Use 'guid --help' for commands");
        }
    }

    Ok(())
}
