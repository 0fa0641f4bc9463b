//! `flatjson` CLI: read, query and edit flat JSON-like documents.
//!
//! ## Usage
//!
//! ```sh
//! # Re-serialize a document (stdin → stdout)
//! echo "{ name : 'Alice', age : 30 }" | flatjson format
//!
//! # Convert to standard JSON
//! flatjson format --json -i data.txt
//!
//! # Read a value by path
//! flatjson get 'orders[0].id' -i data.txt
//!
//! # Update a leaf and write the result to a file
//! flatjson set 'orders[0].id' 42 -i data.txt -o data.txt
//!
//! # Remove by path, or the first matching key anywhere in the tree
//! flatjson delete address.zip -i data.txt
//! flatjson remove-anywhere etag -i data.txt
//! ```
//!
//! Logging goes to stderr; adjust verbosity with `-v`/`-q` (repeatable) or `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use flatjson_core::{
    parse_with, remove_first_found_anywhere, serialize_value, Document, Mutate,
    Navigate, NavigateMut, ParserConfig, Value,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "flatjson",
    version,
    about = "Read, query and edit flat JSON-like documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = flatjson_core::parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Emit standard JSON instead of the flat format
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and serialize it again
    Format {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the value at a dot/array-notation path (e.g. `items[2].name`)
    Get {
        path: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Replace the scalar at a path and print the document
    Set {
        path: String,
        /// New value, written in the document grammar (42, 1.5, true, null, 'text')
        value: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Remove the entry or element at a path and print the document
    Delete {
        path: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Remove the first entry with this key found anywhere (pre-order search)
    RemoveAnywhere {
        key: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbose);

    let config = ParserConfig {
        max_depth: cli.max_depth,
    };

    match cli.command {
        Commands::Format { input, output } => {
            let doc = load_document(&input, &config)?;
            emit(doc.root(), &output)?;
        }
        Commands::Get {
            path,
            input,
            output,
        } => {
            let doc = load_document(&input, &config)?;
            let value = doc
                .by_path(&path)
                .with_context(|| format!("Failed to resolve path '{}'", path))?;
            emit(value, &output)?;
        }
        Commands::Set {
            path,
            value,
            input,
            output,
        } => {
            let mut doc = load_document(&input, &config)?;
            let new_value = flatjson_core::parser::parse_value_with(&value, &config)
                .with_context(|| format!("Failed to parse value '{}'", value))?;
            doc.by_path_mut(&path)
                .update(new_value)
                .with_context(|| format!("Failed to update '{}'", path))?;
            emit(doc.root(), &output)?;
        }
        Commands::Delete {
            path,
            input,
            output,
        } => {
            let mut doc = load_document(&input, &config)?;
            doc.remove_at_path(&path)
                .with_context(|| format!("Failed to delete '{}'", path))?;
            emit(doc.root(), &output)?;
        }
        Commands::RemoveAnywhere { key, input, output } => {
            let mut doc = load_document(&input, &config)?;
            remove_first_found_anywhere(&mut doc, &key)
                .with_context(|| format!("Failed to remove '{}'", key))?;
            emit(doc.root(), &output)?;
        }
    }

    Ok(())
}

/// `-v`/`-q` flags pick the level; `RUST_LOG`, when set, overrides it.
fn init_logging(verbose: &Verbosity<WarnLevel>) {
    env_logger::Builder::new()
        .filter_level(verbose.log_level_filter())
        .parse_default_env()
        .init();
}

fn load_document(args: &InputArgs, config: &ParserConfig) -> Result<Document> {
    let text = read_input(args.input.as_deref())?;
    let doc = parse_with(&text, config).context("Failed to parse document")?;
    log::info!("loaded document with {} top-level entries", doc.root().len());
    Ok(doc)
}

/// Read the whole input and drop every `\n` and `\r`, so documents may be
/// spread over several lines.
fn read_input(path: Option<&str>) -> Result<String> {
    let mut text = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    text.retain(|c| c != '\n' && c != '\r');
    Ok(text)
}

fn emit(value: &Value, args: &OutputArgs) -> Result<()> {
    let content = if args.json {
        serde_json::to_string_pretty(&serde_json::Value::from(value))?
    } else {
        serialize_value(value).context("Failed to serialize document")?
    };
    write_output(args.output.as_deref(), &content)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
