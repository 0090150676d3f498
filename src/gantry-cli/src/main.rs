//! Gantry - pluggable command-line dispatch.
//!
//! The binary builds the command registry from the builtin groups, binds it
//! into a clap-backed parser, runs exactly one invocation, and maps the
//! outcome to a process exit code. Discovered command modules plug in
//! through the same `GroupSpec` shape the builtins use.

use std::process::ExitCode;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use gantry_clap::ClapParser;
use gantry_dispatch::{CommandRegistry, Helper, HelpText, bind};

mod builtin;
mod text;

/// Initialize logging from `GANTRY_LOG`, falling back to `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("GANTRY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> gantry_dispatch::Outcome {
    let registry = Arc::new(CommandRegistry::build(builtin::groups())?);

    let commands: Vec<&str> = registry.keys().collect();
    let helper = Helper::new().with_context("commands", json!(commands));

    let mut parser = ClapParser::new("gantry");
    let help = HelpText::new(text::USAGE, text::EPILOG);
    bind(registry, &mut parser, helper, &help)?;

    parser.run(std::env::args()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(Value::Null) => ExitCode::SUCCESS,
        Ok(Value::String(text)) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(value) => {
            match serde_json::to_string_pretty(&value) {
                Ok(rendered) => println!("{rendered}"),
                Err(_) => println!("{value}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.composite_key() {
                Some(key) => tracing::error!(key = %key, "{err}"),
                None => tracing::error!("{err}"),
            }
            eprintln!("gantry: {err}");
            ExitCode::FAILURE
        }
    }
}
