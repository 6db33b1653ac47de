//! Command-line front end: answers one icon request against a collection file.
//!
//! ```text
//! icon-render mdi.json home -P height=24 -P color=red > home.svg
//! icon-render mdi.json icons --format js -P icons=home,account
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use icon_render::{Collection, Config, Format, IconError, OutputFormatter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "icon-render", version, about = "Render icons from an icon collection")]
struct Args {
    /// Collection JSON file
    collection: PathBuf,

    /// Icon name for `svg`, or `icons` for bulk output
    query: String,

    /// Output format: svg, json or js
    #[arg(short, long, default_value = "svg", value_parser = parse_format)]
    format: Format,

    /// Prefix expected when the file does not declare one (defaults to the file stem)
    #[arg(long)]
    prefix: Option<String>,

    /// Request parameter as key=value, repeatable
    #[arg(short = 'P', long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_format(value: &str) -> Result<Format, String> {
    value.parse().map_err(|e: IconError| e.to_string())
}

fn parse_param(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, value)) => Ok((key.to_owned(), value.to_owned())),
        None => Err(format!("expected key=value, got {value:?}")),
    }
}

fn run(args: Args) -> icon_render::Result<String> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let prefix = args.prefix.clone().or_else(|| {
        args.collection
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_owned)
    });

    let text = std::fs::read_to_string(&args.collection).map_err(|source| IconError::Io {
        path: args.collection.clone(),
        source,
    })?;
    let collection = Collection::from_json(&text, prefix.as_deref())?;
    tracing::debug!(
        "loaded {} with {} entries",
        collection.prefix(),
        collection.len()
    );

    let formatter = OutputFormatter::new(&config)?;
    let response = formatter.query(&collection, &args.query, args.format, args.params)?;
    Ok(response.body)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(body) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error ({}): {err}", err.status());
            ExitCode::FAILURE
        }
    }
}
