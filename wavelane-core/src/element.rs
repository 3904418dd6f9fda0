//! Scene elements - the building blocks of a composited lane.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::TextRun;

/// Identifier of an element within one [`Scene`](crate::Scene).
///
/// Ids are allocated sequentially by the owning scene, so two scenes built
/// from identical inputs carry identical ids.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ElementId(u64);

impl ElementId {
    /// Create from a raw index.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw index.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in local glyph coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows downwards).
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Path geometry for a glyph stroke or fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PathData {
    /// Open polyline through absolute points.
    Polyline(Vec<Point>),
    /// Closed polygon through absolute points.
    Polygon(Vec<Point>),
    /// Raw SVG path data, kept verbatim.
    Raw(String),
}

impl PathData {
    /// Open polyline from coordinate pairs.
    #[must_use]
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        Self::Polyline(points.iter().copied().map(Point::from).collect())
    }

    /// Closed polygon from coordinate pairs.
    #[must_use]
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        Self::Polygon(points.iter().copied().map(Point::from).collect())
    }

    /// Points of a polyline or polygon; `None` for raw path data.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Self::Polyline(points) | Self::Polygon(points) => Some(points),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(d) => f.write_str(d),
            Self::Polyline(points) | Self::Polygon(points) => {
                for (idx, p) in points.iter().enumerate() {
                    let cmd = if idx == 0 { "M" } else { " L" };
                    write!(f, "{cmd}{},{}", p.x, p.y)?;
                }
                if matches!(self, Self::Polygon(_)) {
                    f.write_str(" Z")?;
                }
                Ok(())
            }
        }
    }
}

/// One step of an element transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum TransformOp {
    /// Translate by `(x, y)`.
    Translate {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// Rotate around the local origin, in degrees.
    Rotate {
        /// Angle in degrees, clockwise in screen space.
        degrees: f64,
    },
}

/// Ordered list of transform steps, applied left to right as in SVG.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform(Vec<TransformOp>);

impl Transform {
    /// Identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Pure translation.
    #[must_use]
    pub fn translate(x: f64, y: f64) -> Self {
        Self(vec![TransformOp::Translate { x, y }])
    }

    /// Pure rotation.
    #[must_use]
    pub fn rotate(degrees: f64) -> Self {
        Self(vec![TransformOp::Rotate { degrees }])
    }

    /// Append a rotation after the existing steps.
    #[must_use]
    pub fn then_rotate(mut self, degrees: f64) -> Self {
        self.0.push(TransformOp::Rotate { degrees });
        self
    }

    /// Whether there are no steps.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.0.is_empty()
    }

    /// The steps in application order.
    #[must_use]
    pub fn ops(&self) -> &[TransformOp] {
        &self.0
    }

    /// Net translation, ignoring rotations.
    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        self.0.iter().fold((0.0, 0.0), |(ax, ay), op| match op {
            TransformOp::Translate { x, y } => (ax + x, ay + y),
            TransformOp::Rotate { .. } => (ax, ay),
        })
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, op) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            match op {
                TransformOp::Translate { x, y } => write!(f, "translate({x},{y})")?,
                TransformOp::Rotate { degrees } => write!(f, "rotate({degrees})")?,
            }
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// The type of content an element contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ElementKind {
    /// A container group for other elements.
    Group {
        /// Optional document id (e.g. `wavelane_0_0`).
        name: Option<String>,
        /// Style class, e.g. the symbol id of a glyph instance.
        class: Option<String>,
        /// Child element IDs in paint order.
        children: Vec<ElementId>,
    },

    /// A stroked or filled path.
    Path {
        /// Path geometry.
        data: PathData,
        /// Style class used by the skin.
        class: Option<String>,
    },

    /// A text label made of styled runs.
    Text {
        /// Styled runs.
        runs: Vec<TextRun>,
        /// Anchor x.
        x: f64,
        /// Anchor y (baseline).
        y: f64,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Style class used by the skin.
        class: Option<String>,
        /// Whether whitespace is preserved verbatim.
        preserve_space: bool,
    },
}

/// A scene element with content and transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Identifier, assigned by the scene on insertion.
    pub id: ElementId,
    /// Element content type.
    pub kind: ElementKind,
    /// Placement relative to the parent.
    pub transform: Transform,
    /// Optional parent group.
    pub parent: Option<ElementId>,
}

impl Element {
    /// Create a new element with the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::default(),
            kind,
            transform: Transform::identity(),
            parent: None,
        }
    }

    /// Empty group.
    #[must_use]
    pub fn group(name: Option<String>) -> Self {
        Self::new(ElementKind::Group {
            name,
            class: None,
            children: Vec::new(),
        })
    }

    /// Empty unnamed group carrying a class.
    #[must_use]
    pub fn classed_group(class: &str) -> Self {
        Self::new(ElementKind::Group {
            name: None,
            class: Some(class.to_string()),
            children: Vec::new(),
        })
    }

    /// Path with an optional class.
    #[must_use]
    pub fn path(data: PathData, class: Option<&str>) -> Self {
        Self::new(ElementKind::Path {
            data,
            class: class.map(str::to_string),
        })
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Whether this element is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group { .. })
    }

    /// Children of a group; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        match &self.kind {
            ElementKind::Group { children, .. } => children,
            _ => &[],
        }
    }
}
