//! # Wavelane Core
//!
//! Lane compositing for digital timing diagrams: turns parsed lane rows
//! (symbol ids, labels, attributes) into positioned glyphs in a scene graph.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               LaneCompositor                │
//! ├──────────────────────┬──────────────────────┤
//! │  Symbol Library      │  Slew Transform      │
//! │  - Templates         │  - Ramp edges        │
//! │  - Edge kinds        │  - Arrow rotation    │
//! ├──────────────────────┼──────────────────────┤
//! │  Marker Detector     │  Extents             │
//! │  - Data runs         │  - Phase offset      │
//! │  - Label placement   │  - Viewport clamp    │
//! ├──────────────────────┴──────────────────────┤
//! │          Scene Graph (groups, paths, text)  │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod compositor;
pub mod context;
pub mod element;
pub mod error;
pub mod lane;
pub mod marker;
pub mod scene;
pub mod slew;
pub mod template;
pub mod text;

pub use compositor::{LaneComposition, LaneCompositor};
pub use context::{LaneExtents, LaneRenderContext, GLYPH_GUTTER};
pub use element::{
    Element, ElementId, ElementKind, PathData, Point, TextAnchor, Transform, TransformOp,
};
pub use error::{LaneError, LaneResult};
pub use lane::{LaneAttrs, LaneRow};
pub use marker::{DataRunCenters, FixedMarkers, MarkerRule};
pub use scene::{Scene, SceneCheckpoint};
pub use slew::{Slewing, DEFAULT_SLEW};
pub use template::{EdgeKind, GlyphPart, SymbolLibrary, SymbolLookup, SymbolTemplate};
pub use text::{parse_markup, Baseline, FixedAdvance, RichText, RunStyle, TextMetrics, TextRun};

/// Wavelane core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
