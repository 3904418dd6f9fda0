//! Slewed clock edges.
//!
//! A slewed edge is drawn as a ramp spanning `s` local units instead of a
//! vertical step. When the glyph has a direction arrow it is rotated by the
//! ramp angle so it stays on the slanted segment.

use serde::{Deserialize, Serialize};

use crate::template::{CELL_HEIGHT, CELL_WIDTH};
use crate::{EdgeKind, LaneError, LaneResult, PathData, SymbolTemplate, Transform};

/// Slope distance used when a lane declares `slewing: true`.
pub const DEFAULT_SLEW: f64 = 16.0;

/// A validated `slewing` lane attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub enum Slewing {
    /// `true`: use [`DEFAULT_SLEW`].
    Default,
    /// Explicit slope distance in local units. Build it with
    /// [`Slewing::from_distance`] to reject non-finite values up front.
    Distance(f64),
}

impl Slewing {
    /// Explicit slope distance `s`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::InvalidSlew`] if `s` is NaN or infinite.
    pub fn from_distance(s: f64) -> LaneResult<Self> {
        if s.is_finite() {
            Ok(Self::Distance(s))
        } else {
            Err(LaneError::InvalidSlew(s.to_string()))
        }
    }

    /// Slope distance in local units.
    #[must_use]
    pub fn distance(self) -> f64 {
        match self {
            Self::Default => DEFAULT_SLEW,
            Self::Distance(s) => s,
        }
    }
}

impl TryFrom<serde_json::Value> for Slewing {
    type Error = LaneError;

    fn try_from(value: serde_json::Value) -> LaneResult<Self> {
        match value {
            serde_json::Value::Bool(true) => Ok(Self::Default),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(s) => Self::from_distance(s),
                None => Err(LaneError::InvalidSlew(n.to_string())),
            },
            other => Err(LaneError::InvalidSlew(other.to_string())),
        }
    }
}

impl From<Slewing> for serde_json::Value {
    fn from(slewing: Slewing) -> Self {
        match slewing {
            Slewing::Default => Self::Bool(true),
            Slewing::Distance(s) => serde_json::json!(s),
        }
    }
}

/// Ramp angle in degrees for slope distance `s` over one cell height.
#[must_use]
pub fn angle_deg(s: f64) -> f64 {
    s.atan2(CELL_HEIGHT).to_degrees()
}

/// Slewed edge path for a clock edge; `None` for non-clock kinds.
#[must_use]
pub fn slewed_edge(kind: EdgeKind, s: f64) -> Option<PathData> {
    match kind {
        EdgeKind::Falling => Some(PathData::polyline(&[
            (0.0, 0.0),
            (s, CELL_HEIGHT),
            (CELL_WIDTH, 0.0),
        ])),
        EdgeKind::Rising => Some(PathData::polyline(&[
            (0.0, CELL_HEIGHT),
            (s, 0.0),
            (CELL_WIDTH, 0.0),
        ])),
        EdgeKind::Other => None,
    }
}

/// Direction-marker transform for a slewed clock edge; `None` for non-clock
/// kinds.
#[must_use]
pub fn marker_transform(kind: EdgeKind, s: f64) -> Option<Transform> {
    let angle = angle_deg(s);
    match kind {
        EdgeKind::Falling => Some(Transform::rotate(-angle)),
        EdgeKind::Rising => Some(Transform::translate(s, 0.0).then_rotate(angle)),
        EdgeKind::Other => None,
    }
}

/// Apply `slewing` to a template, returning the parts to instantiate.
///
/// Non-clock templates come back unchanged, as do all templates when the
/// slope distance is not finite.
#[must_use]
pub fn apply(template: &SymbolTemplate, slewing: Slewing) -> SymbolTemplate {
    let kind = template.edge();
    let s = slewing.distance();
    let mut out = template.clone();
    if !s.is_finite() {
        tracing::warn!(slew = s, "ignoring non-finite slew distance");
        return out;
    }

    if let (Some(edge), Some(data)) = (out.edge_path.as_mut(), slewed_edge(kind, s)) {
        edge.data = data;
    }
    if let (Some(marker), Some(transform)) =
        (out.direction_marker.as_mut(), marker_transform(kind, s))
    {
        marker.transform = transform;
    }
    if kind.is_clock() {
        tracing::trace!(edge = ?kind, slew = s, "slewed clock edge");
    }
    out
}
