use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod errors;
mod services;
mod utils;

use errors::ConvertError;

/// Zero-argument command: input and output both travel through the clipboard.
#[derive(Parser, Debug)]
#[command(name = "url2md")]
#[command(about = "Convert the URL on the clipboard into clean Markdown", version)]
struct Args {}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging only if LOG_LEVEL environment variable is set
    if let Ok(log_level) = std::env::var("LOG_LEVEL") {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
            )
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();
    }

    let _args = Args::parse();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Linear pipeline: read clipboard, validate, fetch, convert, write back.
///
/// The clipboard is only written on full success; every failure leaves it
/// untouched and surfaces as a single stderr diagnostic.
async fn run() -> Result<(), ConvertError> {
    let clipboard = utils::read_clipboard()?;
    let candidate = clipboard.trim();

    if !services::is_valid_url(candidate) {
        return Err(ConvertError::InvalidUrl {
            content: candidate.to_string(),
        });
    }

    println!("Converting {candidate} to Markdown...");

    let client = utils::build_client()?;
    let markdown = services::url_to_markdown(&client, candidate).await?;

    utils::write_clipboard(&markdown)?;
    println!("✅ Markdown copied to clipboard");

    Ok(())
}
