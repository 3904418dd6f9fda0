//! # Wavelane Renderer
//!
//! Serializes composited lane scenes to vector markup.
//!
//! ## Export Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   Scene                     │
//! ├─────────────────────────────────────────────┤
//! │          SceneExporter (SVG markup)         │
//! ├──────────────────────┬──────────────────────┤
//! │  SVG bytes           │  PNG (raster feature)│
//! └──────────────────────┴──────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SceneExporter};
