//! Diagram assembly: stacks composited lanes and sizes the viewport.

use wavelane_core::{
    Element, LaneCompositor, LaneRenderContext, LaneResult, Scene, SymbolLookup, Transform,
};

use crate::document::WaveDocument;

/// A composited diagram ready for export.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Scene with all lanes under one root group.
    pub scene: Scene,
    /// Layout context with extents applied.
    pub context: LaneRenderContext,
    /// Measured title widths of the drawn lanes.
    pub title_widths: Vec<f64>,
}

/// Composite every lane of `doc` and size the scene around it.
///
/// Cells are spaced `xs * hscale` apart. The title column is rounded up to a
/// whole number of those scaled cells so the timeline starts on a cell
/// boundary.
///
/// # Errors
///
/// Returns an error if a lane references an unknown symbol.
#[allow(clippy::cast_precision_loss)]
pub fn assemble(doc: &WaveDocument, library: &dyn SymbolLookup) -> LaneResult<Assembly> {
    let mut context = doc.config.clone();
    let pitch = LaneRenderContext {
        xs: context.xs * context.hscale,
        ..context.clone()
    };

    let mut scene = Scene::default();
    let root = scene.add_element(Element::group(Some("lanes".to_string())));
    let composition =
        LaneCompositor::new(library).composite(&mut scene, Some(root), &doc.lanes, 0, &pitch)?;
    context.apply_extents(&composition.extents);

    let widest = composition
        .title_widths
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    let title_column = ((widest - context.tgo) / pitch.xs).ceil() * pitch.xs;
    if let Some(root) = scene.get_element_mut(root) {
        root.transform = Transform::translate(title_column, 0.0);
    }

    let width = title_column + pitch.xs * context.xmax + context.xg;
    let height = context.y0 + doc.lanes.len() as f64 * context.yo;
    scene.set_viewport(width, height);
    tracing::info!(
        lanes = doc.lanes.len(),
        drawn = composition.title_widths.len(),
        cells = context.xmax,
        width,
        height,
        "diagram assembled"
    );

    Ok(Assembly {
        scene,
        context,
        title_widths: composition.title_widths,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use wavelane_core::{LaneRow, SymbolLibrary};

    #[test]
    fn test_viewport_covers_titles_and_cells() {
        let doc = WaveDocument {
            config: LaneRenderContext::default(),
            lanes: vec![
                LaneRow::new("clk", &["pclk"; 4]),
                LaneRow::new("data", &["vvv-2"; 6]),
            ],
        };
        let assembly = assemble(&doc, &SymbolLibrary::builtin()).expect("assemble");

        // widest title "data" = 4 * 6.6 = 26.4; (26.4 + 10) / 20 -> 2 cells
        let root = assembly.scene.find_group("lanes").expect("root");
        assert_eq!(root.transform, Transform::translate(40.0, 0.0));
        assert_eq!(assembly.context.xmax, 6.0);
        assert_eq!(assembly.scene.viewport_width, 40.0 + 6.0 * 20.0 + 20.0);
        assert_eq!(assembly.scene.viewport_height, 5.0 + 2.0 * 30.0);
    }

    #[test]
    fn test_hscale_widens_cell_pitch() {
        let doc = WaveDocument {
            config: LaneRenderContext {
                hscale: 2.0,
                ..LaneRenderContext::default()
            },
            lanes: vec![LaneRow::new("a", &["1", "0"])],
        };
        let assembly = assemble(&doc, &SymbolLibrary::builtin()).expect("assemble");

        let draw = assembly
            .scene
            .find_group("wavelane_draw_0_0")
            .expect("draw");
        let offsets: Vec<_> = assembly
            .scene
            .children(draw.id)
            .map(|g| g.transform.offset().0)
            .collect();
        assert_eq!(offsets, vec![0.0, 40.0]);
    }

    #[test]
    fn test_title_column_uses_scaled_pitch() {
        let doc = WaveDocument {
            config: LaneRenderContext {
                hscale: 2.0,
                ..LaneRenderContext::default()
            },
            lanes: vec![LaneRow::new("clock", &["1", "0", "1"])],
        };
        let assembly = assemble(&doc, &SymbolLibrary::builtin()).expect("assemble");

        // "clock" = 5 * 6.6 = 33; (33 + 10) / 40 -> 2 scaled cells
        let root = assembly.scene.find_group("lanes").expect("root");
        assert_eq!(root.transform, Transform::translate(80.0, 0.0));
        assert_eq!(assembly.scene.viewport_width, 80.0 + 3.0 * 40.0 + 20.0);
    }

    #[test]
    fn test_viewport_window_limits_width() {
        let doc = WaveDocument {
            config: LaneRenderContext {
                xmax_cfg: 3.0,
                ..LaneRenderContext::default()
            },
            lanes: vec![LaneRow::new("a", &["1"; 10])],
        };
        let assembly = assemble(&doc, &SymbolLibrary::builtin()).expect("assemble");
        assert_eq!(assembly.context.xmax, 3.0);
        assert_eq!(assembly.scene.viewport_width, 20.0 + 3.0 * 20.0 + 20.0);
    }
}
