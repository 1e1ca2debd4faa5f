//! gdtlink CLI
//!
//! Command-line harness for poking parameters on a DUT.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use gdtlink::{Config, ParamValue, ParameterClient, SetOutcome, StdContext};
use tracing_subscriber::{fmt, EnvFilter};

/// gdtlink CLI
#[derive(Parser, Debug)]
#[command(name = "gdtlink-cli")]
#[command(about = "Read and write DUT parameters over the debug-tool protocol")]
#[command(version)]
struct Args {
    /// DUT address
    #[arg(short = 'H', long, default_value = "192.168.1.1")]
    host: String,

    /// DUT debug port
    #[arg(short, long, default_value = "9998")]
    port: u16,

    /// Network interface to reach the DUT through (also the cache key)
    #[arg(short, long)]
    interface: Option<String>,

    /// Directory for value-store cache files
    #[arg(short, long, default_value = ".")]
    cache_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a parameter's current value
    Get {
        /// The parameter id
        param: String,
    },

    /// Set a parameter to a value
    Set {
        /// The parameter id
        param: String,

        /// The value literal (bool, integer, or text)
        value: String,

        /// Read the value back and verify the edit was applied
        #[arg(long)]
        verify: bool,
    },

    /// Look up a parameter's type
    Type {
        /// The parameter id
        param: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gdtlink=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let mut builder = Config::builder()
        .host(&args.host)
        .port(args.port)
        .cache_dir(&args.cache_dir);
    if let Some(interface) = &args.interface {
        builder = builder.interface(interface);
    }
    let config = builder.build();

    let client = ParameterClient::new(config, Arc::new(StdContext));

    let result = match args.command {
        Commands::Get { param } => client.get_value(&param).map(|value| {
            println!("{value}");
        }),
        Commands::Set {
            param,
            value,
            verify,
        } => client
            .set_value(&param, parse_value_literal(&value), verify)
            .map(|outcome| match outcome {
                SetOutcome::Verified => println!("verified"),
                SetOutcome::Unconfirmed => println!("sent (unconfirmed)"),
            }),
        Commands::Type { param } => client.get_param_type(&param).map(|kind| {
            println!("{kind}");
        }),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Parse a value literal: bool, then integer, then text
fn parse_value_literal(literal: &str) -> ParamValue {
    match literal {
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        other => {
            if let Ok(v) = other.parse::<i64>() {
                ParamValue::Int(v)
            } else if let Ok(v) = other.parse::<u64>() {
                ParamValue::UInt(v)
            } else {
                ParamValue::Text(other.to_string())
            }
        }
    }
}
