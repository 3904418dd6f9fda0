//! Symbol templates and the library that resolves symbol ids to them.
//!
//! A template is drawn in a local 20×20 cell with `y = 0` at the high level
//! and `y = 20` at the low level. Clock glyphs expose two typed extension
//! points: the `edge_path` that the slew transform rewrites, and an optional
//! `direction_marker` arrow that is rotated to stay on the slanted edge.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Element, LaneError, LaneResult, PathData, Transform};

/// Template cell height in local units.
pub const CELL_HEIGHT: f64 = 20.0;

/// Template cell width in local units.
pub const CELL_WIDTH: f64 = 20.0;

/// Clock-edge classification, resolved once when a template is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Positive clock edge (`pclk`, `Pclk`).
    Rising,
    /// Negative clock edge (`nclk`, `Nclk`).
    Falling,
    /// Anything else.
    #[default]
    Other,
}

impl EdgeKind {
    /// Classify a symbol id; both case variants of each clock edge match.
    #[must_use]
    pub fn classify(id: &str) -> Self {
        match id {
            "pclk" | "Pclk" => Self::Rising,
            "nclk" | "Nclk" => Self::Falling,
            _ => Self::Other,
        }
    }

    /// Whether this is a rising or falling clock edge.
    #[must_use]
    pub fn is_clock(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// One drawable part of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphPart {
    /// Geometry in local cell coordinates.
    pub data: PathData,
    /// Skin class (`s1` stroke, `s2`… fills, `s9` arrow).
    pub class: Option<String>,
    /// Local transform of the part.
    #[serde(default)]
    pub transform: Transform,
}

impl GlyphPart {
    /// Part with a class and no transform.
    #[must_use]
    pub fn new(data: PathData, class: &str) -> Self {
        Self {
            data,
            class: Some(class.to_string()),
            transform: Transform::identity(),
        }
    }

    /// Scene element for this part.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::path(self.data.clone(), self.class.as_deref()).with_transform(self.transform.clone())
    }
}

/// A named glyph definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolTemplate {
    /// Parts drawn beneath the extension points.
    #[serde(default)]
    pub body: Vec<GlyphPart>,
    /// Edge stroke rewritten by the slew transform.
    #[serde(default)]
    pub edge_path: Option<GlyphPart>,
    /// Direction arrow kept tangent to a slewed edge.
    #[serde(default)]
    pub direction_marker: Option<GlyphPart>,
    /// Whether a run of this symbol carries a value label.
    #[serde(default)]
    pub data: bool,
    #[serde(skip)]
    edge: EdgeKind,
}

impl SymbolTemplate {
    /// Template with the given body parts.
    #[must_use]
    pub fn new(body: Vec<GlyphPart>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Set the edge-path extension point.
    #[must_use]
    pub fn with_edge_path(mut self, part: GlyphPart) -> Self {
        self.edge_path = Some(part);
        self
    }

    /// Set the direction-marker extension point.
    #[must_use]
    pub fn with_direction_marker(mut self, part: GlyphPart) -> Self {
        self.direction_marker = Some(part);
        self
    }

    /// Mark the template as data-bearing.
    #[must_use]
    pub fn data_bearing(mut self) -> Self {
        self.data = true;
        self
    }

    /// Clock-edge kind assigned at registration.
    #[must_use]
    pub fn edge(&self) -> EdgeKind {
        self.edge
    }
}

/// Resolves symbol ids to templates.
pub trait SymbolLookup {
    /// Template registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if no template is registered under `id`.
    fn lookup(&self, id: &str) -> LaneResult<&SymbolTemplate>;
}

/// In-memory template library keyed by symbol id.
#[derive(Debug, Clone, Default)]
pub struct SymbolLibrary {
    templates: HashMap<String, SymbolTemplate>,
}

impl SymbolLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, classifying its clock edge from `id`.
    ///
    /// Returns the template previously registered under `id`, if any.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        mut template: SymbolTemplate,
    ) -> Option<SymbolTemplate> {
        let id = id.into();
        template.edge = EdgeKind::classify(&id);
        tracing::trace!(symbol = %id, edge = ?template.edge, "registered symbol template");
        self.templates.insert(id, template)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Library with the standard level, clock and data glyphs.
    #[must_use]
    pub fn builtin() -> Self {
        let mut lib = Self::new();

        let low = || GlyphPart::new(PathData::polyline(&[(0.0, 20.0), (20.0, 20.0)]), "s1");
        let high = || GlyphPart::new(PathData::polyline(&[(0.0, 0.0), (20.0, 0.0)]), "s1");
        let cell = |class: &str| {
            GlyphPart::new(
                PathData::polygon(&[(20.0, 20.0), (0.0, 20.0), (0.0, 0.0), (20.0, 0.0)]),
                class,
            )
        };
        let rising =
            || GlyphPart::new(PathData::polyline(&[(0.0, 20.0), (0.0, 0.0), (20.0, 0.0)]), "s1");
        let falling =
            || GlyphPart::new(PathData::polyline(&[(0.0, 0.0), (0.0, 20.0), (20.0, 20.0)]), "s1");

        for id in ["0", "000"] {
            lib.register(id, SymbolTemplate::new(vec![low()]));
        }
        for id in ["1", "111"] {
            lib.register(id, SymbolTemplate::new(vec![high()]));
        }
        lib.register("x", SymbolTemplate::new(vec![cell("s3"), high(), low()]));
        lib.register(
            "z",
            SymbolTemplate::new(vec![GlyphPart::new(
                PathData::polyline(&[(0.0, 10.0), (20.0, 10.0)]),
                "s6",
            )]),
        );

        lib.register("pclk", SymbolTemplate::default().with_edge_path(rising()));
        lib.register("nclk", SymbolTemplate::default().with_edge_path(falling()));
        lib.register(
            "Pclk",
            SymbolTemplate::default()
                .with_edge_path(rising())
                .with_direction_marker(GlyphPart::new(
                    PathData::Raw("M-3,12 0,3 3,12 C 1,11 -1,11 -3,12 z".to_string()),
                    "s9",
                )),
        );
        lib.register(
            "Nclk",
            SymbolTemplate::default()
                .with_edge_path(falling())
                .with_direction_marker(GlyphPart::new(
                    PathData::Raw("M-3,8 0,17 3,8 C 1,9 -1,9 -3,8 z".to_string()),
                    "s9",
                )),
        );

        for n in 2..=9 {
            let class = format!("s{n}");
            lib.register(
                format!("vvv-{n}"),
                SymbolTemplate::new(vec![cell(&class), high(), low()]).data_bearing(),
            );
        }
        lib
    }
}

impl SymbolLookup for SymbolLibrary {
    fn lookup(&self, id: &str) -> LaneResult<&SymbolTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| LaneError::UnknownSymbol(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_case_variants() {
        assert_eq!(EdgeKind::classify("pclk"), EdgeKind::Rising);
        assert_eq!(EdgeKind::classify("Pclk"), EdgeKind::Rising);
        assert_eq!(EdgeKind::classify("nclk"), EdgeKind::Falling);
        assert_eq!(EdgeKind::classify("Nclk"), EdgeKind::Falling);
        assert_eq!(EdgeKind::classify("PCLK"), EdgeKind::Other);
        assert_eq!(EdgeKind::classify("vvv-2"), EdgeKind::Other);
    }

    #[test]
    fn test_register_resolves_edge_kind() {
        let mut lib = SymbolLibrary::new();
        let previous = lib.register("Nclk", SymbolTemplate::default());
        assert!(previous.is_none());
        let template = lib.lookup("Nclk").expect("registered");
        assert_eq!(template.edge(), EdgeKind::Falling);
        assert!(template.edge().is_clock());
    }

    #[test]
    fn test_unknown_symbol_error() {
        let lib = SymbolLibrary::builtin();
        let err = lib.lookup("nope").expect_err("should fail");
        assert!(matches!(err, LaneError::UnknownSymbol(ref id) if id == "nope"));
    }

    #[test]
    fn test_builtin_contents() {
        let lib = SymbolLibrary::builtin();
        assert!(lib.contains("000"));
        assert!(lib.contains("vvv-9"));
        assert!(lib.lookup("vvv-3").expect("data").data);
        assert!(!lib.lookup("111").expect("level").data);

        let arrowed = lib.lookup("Pclk").expect("Pclk");
        assert!(arrowed.direction_marker.is_some());
        assert!(arrowed.edge_path.is_some());
        assert!(lib.lookup("pclk").expect("pclk").direction_marker.is_none());
    }

    #[test]
    fn test_library_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SymbolLibrary>();
    }
}
