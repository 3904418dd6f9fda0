//! Shared layout constants for one diagram.

use serde::{Deserialize, Serialize};

/// Width in pixels reserved after the glyph area.
pub const GLYPH_GUTTER: f64 = 20.0;

/// Layout constants shared by every lane of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneRenderContext {
    /// Y of the first row.
    pub y0: f64,
    /// Vertical pitch between rows.
    pub yo: f64,
    /// Cell width in pixels.
    pub xs: f64,
    /// Horizontal scale applied by the assembler.
    pub hscale: f64,
    /// X of the right edge of the title column.
    pub tgo: f64,
    /// Baseline y of titles and labels within a row.
    pub ym: f64,
    /// Horizontal nudge applied to labels.
    pub xlabel: f64,
    /// First visible cell.
    pub xmin_cfg: f64,
    /// Last visible cell.
    pub xmax_cfg: f64,
    /// Visible cells, written by [`apply_extents`](Self::apply_extents).
    pub xmax: f64,
    /// Glyph extent, written by [`apply_extents`](Self::apply_extents).
    pub xg: f64,
}

impl Default for LaneRenderContext {
    fn default() -> Self {
        Self {
            y0: 5.0,
            yo: 30.0,
            xs: 20.0,
            hscale: 1.0,
            tgo: -10.0,
            ym: 15.0,
            xlabel: 6.0,
            xmin_cfg: 0.0,
            xmax_cfg: 1e12,
            xmax: 1.0,
            xg: 120.0,
        }
    }
}

impl LaneRenderContext {
    /// Number of cells the configured viewport shows.
    #[must_use]
    pub fn window(&self) -> f64 {
        self.xmax_cfg - self.xmin_cfg
    }

    /// Phase offset of a row, in cells, from its declared start time.
    ///
    /// Positive phases round forward to the next half-cell boundary;
    /// non-positive phases shift right by twice their magnitude.
    #[must_use]
    pub fn phase_offset(phase: f64) -> f64 {
        if phase > 0.0 {
            (2.0 * phase).ceil() - 2.0 * phase
        } else {
            0.0 - 2.0 * phase
        }
    }

    /// Write folded extents onto the context, clamping to the viewport.
    #[allow(clippy::cast_precision_loss)]
    pub fn apply_extents(&mut self, extents: &LaneExtents) {
        self.xmax = (extents.max_cells as f64).min(self.window());
        self.xg = extents.glyph_extent;
    }
}

/// Extents observed by one composition call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneExtents {
    /// Longest symbol list among drawn rows.
    pub max_cells: usize,
    /// Glyph extent; always the gutter width.
    pub glyph_extent: f64,
}

impl Default for LaneExtents {
    fn default() -> Self {
        Self {
            max_cells: 0,
            glyph_extent: GLYPH_GUTTER,
        }
    }
}

impl LaneExtents {
    /// Fold the extents of another call into this one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            max_cells: self.max_cells.max(other.max_cells),
            glyph_extent: self.glyph_extent.max(other.glyph_extent),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport(width: f64) -> LaneRenderContext {
        LaneRenderContext {
            xmax_cfg: width,
            ..LaneRenderContext::default()
        }
    }

    #[test]
    fn test_phase_offset_examples() {
        assert_eq!(LaneRenderContext::phase_offset(0.0), 0.0);
        assert_eq!(LaneRenderContext::phase_offset(0.25), 0.5);
        assert_eq!(LaneRenderContext::phase_offset(0.5), 0.0);
        assert_eq!(LaneRenderContext::phase_offset(-1.5), 3.0);
    }

    #[test]
    fn test_viewport_clamps_xmax() {
        let extents = LaneExtents {
            max_cells: 7,
            ..LaneExtents::default()
        };

        let mut narrow = viewport(5.0);
        narrow.apply_extents(&extents);
        assert_eq!(narrow.xmax, 5.0);

        let mut wide = viewport(10.0);
        wide.apply_extents(&extents);
        assert_eq!(wide.xmax, 7.0);
        assert_eq!(wide.xg, 20.0);
    }

    #[test]
    fn test_merge_keeps_maximum() {
        let a = LaneExtents {
            max_cells: 3,
            ..LaneExtents::default()
        };
        let b = LaneExtents {
            max_cells: 7,
            ..LaneExtents::default()
        };
        assert_eq!(a.merge(b).max_cells, 7);
        assert_eq!(b.merge(a).max_cells, 7);
    }

    #[test]
    fn test_context_deserializes_with_defaults() {
        let ctx: LaneRenderContext =
            serde_json::from_str(r#"{"xs": 40, "xmax_cfg": 12}"#).expect("config");
        assert_eq!(ctx.xs, 40.0);
        assert_eq!(ctx.window(), 12.0);
        assert_eq!(ctx.yo, 30.0);
    }

    proptest! {
        #[test]
        fn prop_positive_phase_offset_below_one_cell(v in 1e-6f64..1e6f64) {
            let offset = LaneRenderContext::phase_offset(v);
            prop_assert!((0.0..1.0).contains(&offset), "offset {} for phase {}", offset, v);
        }

        #[test]
        fn prop_non_positive_phase_offset(v in -1e6f64..=0.0f64) {
            let offset = LaneRenderContext::phase_offset(v);
            prop_assert!(offset >= 0.0);
            prop_assert_eq!(offset, -2.0 * v);
        }
    }
}
