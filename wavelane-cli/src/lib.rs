//! # Wavelane CLI
//!
//! Reads a lane document (JSON), composites it with the built-in symbol
//! library, and writes SVG (or PNG with the `raster` feature).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assemble;
pub mod document;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wavelane_core::SymbolLibrary;
use wavelane_renderer::{ExportConfig, ExportFormat, SceneExporter};

pub use assemble::{assemble, Assembly};
pub use document::WaveDocument;

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// SVG markup.
    Svg,
    /// PNG image (requires the `raster` feature).
    Png,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => Self::Svg,
            Format::Png => Self::Png,
        }
    }
}

/// Render timing-diagram lanes to SVG.
#[derive(Debug, Parser)]
#[command(name = "wavelane", version, about)]
pub struct Cli {
    /// Lane document (JSON); reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Output file; writes stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Horizontal scale, overriding the document config.
    #[arg(long, env = "WAVELANE_HSCALE")]
    pub hscale: Option<f64>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    pub format: Format,

    /// CSS file embedded into the SVG.
    #[arg(long)]
    pub style: Option<PathBuf>,
}

/// Initialize structured tracing on stderr with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: warn,wavelane_cli=info).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,wavelane_cli=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Load, composite and export according to `cli`.
///
/// # Errors
///
/// Returns an error if the document cannot be read or parsed, references an
/// unknown symbol, or the output cannot be encoded or written.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut doc = WaveDocument::load(cli.input.as_deref())?;
    if let Some(hscale) = cli.hscale {
        doc.config.hscale = hscale;
    }

    let style = cli
        .style
        .as_deref()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read style {}", path.display()))
        })
        .transpose()?;

    let library = SymbolLibrary::builtin();
    let assembly = assemble(&doc, &library).context("failed to composite lanes")?;

    let exporter = SceneExporter::new(ExportConfig {
        style,
        ..ExportConfig::default()
    });
    let bytes = exporter.export(&assembly.scene, cli.format.into())?;

    match &cli.output {
        Some(path) => std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(&bytes)
            .context("failed to write stdout")?,
    }
    tracing::info!(bytes = bytes.len(), format = ?cli.format, "diagram written");
    Ok(())
}
