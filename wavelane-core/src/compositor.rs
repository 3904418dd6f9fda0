//! Lane compositing: turns parsed lane rows into positioned glyphs.
//!
//! ```text
//! <g id="wavelane_{row}_{index}" transform="translate(0, y0 + row*yo)">
//!   <text class="info" text-anchor="end">title</text>
//!   <g id="wavelane_draw_{row}_{index}" transform="translate(phase*xs, 0)">
//!     <g class="{symbol}" transform="translate(i*xs, 0)">…</g>   one per cell
//!     <text text-anchor="middle">label</text>                    one per matched marker
//!   </g>
//! </g>
//! ```

use crate::slew::{self, Slewing};
use crate::{
    DataRunCenters, Element, ElementId, ElementKind, FixedAdvance, LaneExtents, LaneRenderContext,
    LaneResult, LaneRow, MarkerRule, RichText, Scene, SymbolLookup, SymbolTemplate, TextAnchor,
    TextMetrics, Transform,
};

/// Result of compositing one group of lanes.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneComposition {
    /// Measured title width of every drawn row, in row order.
    pub title_widths: Vec<f64>,
    /// Extents to fold into the diagram layout.
    pub extents: LaneExtents,
}

/// Composites lane rows into a [`Scene`].
pub struct LaneCompositor<'a> {
    library: &'a dyn SymbolLookup,
    metrics: Box<dyn TextMetrics + 'a>,
    markers: Box<dyn MarkerRule + 'a>,
}

impl<'a> LaneCompositor<'a> {
    /// Compositor resolving symbols through `library`, with fixed-advance
    /// text metrics and data-run markers.
    #[must_use]
    pub fn new(library: &'a dyn SymbolLookup) -> Self {
        Self {
            library,
            metrics: Box::new(FixedAdvance::default()),
            markers: Box::new(DataRunCenters),
        }
    }

    /// Use `metrics` to measure titles.
    #[must_use]
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'a) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    /// Use `rule` to find label markers.
    #[must_use]
    pub fn with_marker_rule(mut self, rule: impl MarkerRule + 'a) -> Self {
        self.markers = Box::new(rule);
        self
    }

    /// Composite `rows` under `parent` (or the scene root).
    ///
    /// `index` distinguishes lane groups in element ids. On error the scene is
    /// left exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns an error if a symbol id cannot be resolved or `parent` is not a
    /// group of `scene`.
    pub fn composite(
        &self,
        scene: &mut Scene,
        parent: Option<ElementId>,
        rows: &[LaneRow],
        index: usize,
        ctx: &LaneRenderContext,
    ) -> LaneResult<LaneComposition> {
        tracing::debug!(rows = rows.len(), index, "compositing lanes");
        let checkpoint = scene.checkpoint();
        match self.composite_rows(scene, parent, rows, index, ctx) {
            Ok(composition) => {
                tracing::debug!(
                    drawn = composition.title_widths.len(),
                    max_cells = composition.extents.max_cells,
                    "lanes composited"
                );
                Ok(composition)
            }
            Err(err) => {
                scene.rollback(&checkpoint);
                tracing::debug!(error = %err, "lane compositing failed, scene rolled back");
                Err(err)
            }
        }
    }

    /// Composite `rows` and write the resulting extents onto `ctx`.
    ///
    /// Returns the measured title widths.
    ///
    /// # Errors
    ///
    /// Same as [`composite`](Self::composite); `ctx` is untouched on error.
    pub fn render(
        &self,
        scene: &mut Scene,
        parent: Option<ElementId>,
        rows: &[LaneRow],
        index: usize,
        ctx: &mut LaneRenderContext,
    ) -> LaneResult<Vec<f64>> {
        let composition = self.composite(scene, parent, rows, index, ctx)?;
        ctx.apply_extents(&composition.extents);
        Ok(composition.title_widths)
    }

    #[allow(clippy::cast_precision_loss)]
    fn composite_rows(
        &self,
        scene: &mut Scene,
        parent: Option<ElementId>,
        rows: &[LaneRow],
        index: usize,
        ctx: &LaneRenderContext,
    ) -> LaneResult<LaneComposition> {
        let mut title_widths = Vec::new();
        let mut extents = LaneExtents::default();

        for (j, row) in rows.iter().enumerate() {
            let Some(title) = row.title() else {
                tracing::trace!(row = j, "skipping unnamed lane");
                continue;
            };

            let lane = Element::group(Some(format!("wavelane_{j}_{index}")))
                .with_transform(Transform::translate(0.0, ctx.y0 + j as f64 * ctx.yo));
            let lane = match parent {
                Some(parent) => scene.add_child(parent, lane)?,
                None => scene.add_element(lane),
            };

            let runs = title.to_runs();
            title_widths.push(self.metrics.measure(&runs));
            scene.add_child(
                lane,
                Element::new(ElementKind::Text {
                    runs,
                    x: ctx.tgo,
                    y: ctx.ym,
                    anchor: TextAnchor::End,
                    class: Some("info".to_string()),
                    preserve_space: true,
                }),
            )?;

            let dx = LaneRenderContext::phase_offset(row.phase) * ctx.xs;
            let draw = scene.add_child(
                lane,
                Element::group(Some(format!("wavelane_draw_{j}_{index}")))
                    .with_transform(Transform::translate(dx, 0.0)),
            )?;

            let cells = row
                .symbols
                .iter()
                .map(|id| self.library.lookup(id).map(|template| (id.as_str(), template)))
                .collect::<LaneResult<Vec<_>>>()?;

            for (i, &(id, template)) in cells.iter().enumerate() {
                let x = i as f64 * ctx.xs;
                instantiate(scene, draw, id, template, x, row.attrs.slewing)?;
            }

            self.place_labels(scene, draw, row, &cells, ctx)?;
            extents.max_cells = extents.max_cells.max(row.symbols.len());
        }

        Ok(LaneComposition {
            title_widths,
            extents,
        })
    }

    fn place_labels(
        &self,
        scene: &mut Scene,
        draw: ElementId,
        row: &LaneRow,
        cells: &[(&str, &SymbolTemplate)],
        ctx: &LaneRenderContext,
    ) -> LaneResult<()> {
        if row.labels.is_empty() {
            return Ok(());
        }
        let labels = row.label_map();
        let markers = self.markers.markers(cells);
        let unplaced = labels.range(markers.len()..).count();
        if unplaced > 0 {
            tracing::trace!(unplaced, markers = markers.len(), "labels without a marker");
        }
        for (k, marker) in markers.into_iter().enumerate() {
            let Some(label) = labels.get(&k) else {
                continue;
            };
            scene.add_child(draw, label_element(label, marker * ctx.xs + ctx.xlabel, ctx.ym))?;
        }
        Ok(())
    }
}

fn label_element(label: &RichText, x: f64, y: f64) -> Element {
    Element::new(ElementKind::Text {
        runs: label.to_runs(),
        x,
        y,
        anchor: TextAnchor::Middle,
        class: None,
        preserve_space: true,
    })
}

/// Insert one positioned copy of `template` into `draw`.
fn instantiate(
    scene: &mut Scene,
    draw: ElementId,
    id: &str,
    template: &SymbolTemplate,
    x: f64,
    slewing: Option<Slewing>,
) -> LaneResult<()> {
    let slewed;
    let template = match slewing {
        Some(slewing) => {
            slewed = slew::apply(template, slewing);
            &slewed
        }
        None => template,
    };

    let glyph = scene.add_child(
        draw,
        Element::classed_group(id).with_transform(Transform::translate(x, 0.0)),
    )?;
    let parts = template
        .body
        .iter()
        .chain(&template.edge_path)
        .chain(&template.direction_marker);
    for part in parts {
        scene.add_child(glyph, part.to_element())?;
    }
    Ok(())
}
