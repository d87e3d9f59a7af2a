use std::fs::File;
use std::io::{self, Read, Write, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jsonappend::{JsonWriter, WriterOptions};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "jsonappend-cli",
    about = "Re-emit JSON documents as compact, HTML-safe JSON",
    version
)]
struct Args {
    /// Write one document per line (default)
    #[arg(long, overrides_with = "no_lines")]
    lines: bool,

    /// Separate documents with a single space instead of newlines
    #[arg(long, overrides_with = "lines")]
    no_lines: bool,

    /// Output buffer size in bytes
    #[arg(long)]
    buffer_size: Option<usize>,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jsonappend_cli=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            let mut f =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }

    let mut options = WriterOptions::default();
    if let Some(size) = args.buffer_size {
        options.capacity = size;
    }
    let separator = if args.no_lines && !args.lines {
        b' '
    } else {
        b'\n'
    };

    let stdout = io::stdout();
    let mut writer = JsonWriter::with_options(stdout.lock(), options);
    let count = reencode(&buf, &mut writer, separator)?;
    writer.flush().context("writing output")?;

    info!(documents = count, bytes = buf.len(), "re-encoded input");
    Ok(())
}

/// Writes every whitespace-separated document in `input`, returning how
/// many there were.
fn reencode<W: Write>(input: &str, writer: &mut JsonWriter<W>, separator: u8) -> Result<usize> {
    let stream = serde_json::Deserializer::from_str(input).into_iter::<Value>();
    let mut count = 0;
    for (index, doc) in stream.enumerate() {
        let doc = doc.with_context(|| format!("parsing document {}", index + 1))?;
        if index > 0 && separator != b'\n' {
            writer.write_raw_byte(separator);
        }
        emit(writer, &doc);
        if separator == b'\n' {
            writer.write_raw_byte(b'\n');
        }
        if let Some(err) = writer.error() {
            return Err(anyhow::Error::new(err.clone())
                .context(format!("encoding document {}", index + 1)));
        }
        debug!(document = index + 1, "document written");
        count += 1;
    }
    if count > 0 && separator != b'\n' {
        writer.write_raw_byte(b'\n');
    }
    Ok(count)
}

/// Walks `value` in input order; objects keep their key order.
fn emit<W: Write>(writer: &mut JsonWriter<W>, value: &Value) {
    match value {
        Value::Null => writer.write_null(),
        Value::Bool(b) => writer.write_bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                writer.write_i64(i);
            } else if let Some(u) = n.as_u64() {
                writer.write_u64(u);
            } else {
                writer.write_f64(n.as_f64().unwrap_or(f64::NAN));
            }
        }
        Value::String(s) => writer.write_str(s),
        Value::Array(items) => {
            writer.write_raw_byte(b'[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    writer.write_raw_byte(b',');
                }
                emit(writer, item);
            }
            writer.write_raw_byte(b']');
        }
        Value::Object(map) => {
            writer.write_raw_byte(b'{');
            for (idx, (key, item)) in map.iter().enumerate() {
                if idx > 0 {
                    writer.write_raw_byte(b',');
                }
                writer.write_field_name(key);
                emit(writer, item);
            }
            writer.write_raw_byte(b'}');
        }
    }
}
