use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use rds::config::load_config;
use rds::encoding::TextEncodable;
use rds::session::EncodingSession;
use rds::time::{Clock, FixedClock, SystemClock};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rdsencode")]
#[command(about = "Encode RDS groups from an XML station configuration")]
#[command(version)]
struct Cli {
    /// XML station configuration (root element <rds>)
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
    output: OutputFormat,

    /// Local time offset in hours for the clock-time group [default: host time zone]
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<f64>,

    /// Encode the clock-time group for this instant (RFC 3339) instead of now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Concatenated 13-byte group buffers
    Raw,
    /// One upper-case hex group per line
    Hex,
    /// One base64 group per line
    Base64,
    /// JSON document with groups and diagnostics
    Json,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loaded = match load_config(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => fail(&e.to_string()),
    };

    let utc = cli.at.unwrap_or_else(Utc::now);
    let offset = cli
        .utc_offset
        .unwrap_or_else(|| SystemClock.now().local_offset_hours);
    let mut session = EncodingSession::with_clock(FixedClock::new(utc, offset));
    session.configure(loaded.configuration);

    if let Err(e) = session.encode() {
        fail(&e.to_string());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match cli.output {
        OutputFormat::Raw => out.write_all(&session.to_bytes()),
        OutputFormat::Hex | OutputFormat::Base64 => {
            session.groups().iter().try_for_each(|group| {
                let line = if cli.output == OutputFormat::Hex {
                    group.encode_hex()
                } else {
                    group.encode_base64()
                }
                .map_err(io::Error::other)?;
                writeln!(out, "{line}")
            })
        }
        OutputFormat::Json => {
            let diagnostics: Vec<String> =
                loaded.diagnostics.iter().map(|d| d.to_string()).collect();
            let output = json!({
                "status": "success",
                "diagnostics": diagnostics,
                "groups": session.groups(),
            });
            writeln!(out, "{output:#}")
        }
    };

    if let Err(e) = written.and_then(|()| out.flush()) {
        eprintln!("Error writing output: {e}");
        process::exit(1);
    }
}
