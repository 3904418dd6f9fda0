//! Lane Compositing Integration Tests
//!
//! Tests the complete compositing flow including:
//! - Viewport clamping of the visible extent
//! - Label placement on data runs
//! - Deterministic output across independent scenes
//! - Folding extents of several lane groups

#![allow(clippy::float_cmp)]

use wavelane_core::{
    Element, ElementKind, FixedMarkers, LaneCompositor, LaneExtents, LaneRenderContext, LaneRow,
    Scene, Slewing, SymbolLibrary, TextAnchor,
};

/// Rows of the given lengths, all drawn.
fn rows_of_lengths(lengths: &[usize]) -> Vec<LaneRow> {
    lengths
        .iter()
        .enumerate()
        .map(|(i, len)| LaneRow::new(&format!("lane{i}"), &vec!["1"; *len]))
        .collect()
}

/// Context with a viewport `width` cells wide.
fn viewport(width: f64) -> LaneRenderContext {
    LaneRenderContext {
        xmin_cfg: 0.0,
        xmax_cfg: width,
        ..LaneRenderContext::default()
    }
}

/// Centered label elements as `(x, text)`.
fn labels(scene: &Scene) -> Vec<(f64, String)> {
    scene
        .elements()
        .filter_map(|e| match &e.kind {
            ElementKind::Text {
                runs,
                x,
                anchor: TextAnchor::Middle,
                ..
            } => Some((*x, runs.iter().map(|r| r.text.as_str()).collect())),
            _ => None,
        })
        .collect()
}

// ==========================================================================
// Extents
// ==========================================================================

#[test]
fn test_viewport_wins_over_longer_lane() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib);
    let rows = rows_of_lengths(&[3, 7, 2]);

    let mut narrow = viewport(5.0);
    compositor
        .render(&mut Scene::new(0.0, 0.0), None, &rows, 0, &mut narrow)
        .expect("render");
    assert_eq!(narrow.xmax, 5.0);

    let mut wide = viewport(10.0);
    compositor
        .render(&mut Scene::new(0.0, 0.0), None, &rows, 0, &mut wide)
        .expect("render");
    assert_eq!(wide.xmax, 7.0);
}

#[test]
fn test_fold_extents_across_groups() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib);
    let mut scene = Scene::new(0.0, 0.0);
    let ctx = viewport(100.0);

    let first = compositor
        .composite(&mut scene, None, &rows_of_lengths(&[4]), 0, &ctx)
        .expect("first");
    let second = compositor
        .composite(&mut scene, None, &rows_of_lengths(&[9, 1]), 1, &ctx)
        .expect("second");

    let folded = first.extents.merge(second.extents);
    let mut ctx = ctx;
    ctx.apply_extents(&folded);
    assert_eq!(ctx.xmax, 9.0);
    assert_eq!(ctx.xg, 20.0);
    assert!(scene.find_group("wavelane_0_0").is_some());
    assert!(scene.find_group("wavelane_1_1").is_some());
}

#[test]
fn test_empty_input() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib);
    let mut scene = Scene::new(0.0, 0.0);
    let mut ctx = LaneRenderContext::default();

    let widths = compositor
        .render(&mut scene, None, &[], 0, &mut ctx)
        .expect("render");

    assert!(widths.is_empty());
    assert!(scene.is_empty());
    assert_eq!(ctx.xmax, 0.0);
    assert_eq!(LaneExtents::default().max_cells, 0);
}

// ==========================================================================
// Labels
// ==========================================================================

#[test]
fn test_labels_at_fixed_markers() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib).with_marker_rule(FixedMarkers(vec![0.0, 4.0]));
    let mut scene = Scene::new(0.0, 0.0);
    let ctx = LaneRenderContext::default();

    let rows = [LaneRow::new("bus", &["vvv-2"; 8]).with_labels(&["A", "B"])];
    compositor
        .composite(&mut scene, None, &rows, 0, &ctx)
        .expect("composite");

    assert_eq!(
        labels(&scene),
        vec![
            (0.0 * ctx.xs + ctx.xlabel, "A".to_string()),
            (4.0 * ctx.xs + ctx.xlabel, "B".to_string()),
        ]
    );
}

#[test]
fn test_labels_on_data_runs() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib);
    let mut scene = Scene::new(0.0, 0.0);
    let ctx = LaneRenderContext::default();

    let rows = [LaneRow::new(
        "data",
        &["0", "vvv-3", "vvv-3", "0", "vvv-4", "0"],
    )
    .with_labels(&["head", "tail", "extra"])];
    compositor
        .composite(&mut scene, None, &rows, 0, &ctx)
        .expect("composite");

    assert_eq!(
        labels(&scene),
        vec![(36.0, "head".to_string()), (86.0, "tail".to_string())]
    );
}

#[test]
fn test_no_labels_without_label_list() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib);
    let mut scene = Scene::new(0.0, 0.0);

    let rows = [LaneRow::new("data", &["vvv-2", "vvv-2"])];
    compositor
        .composite(&mut scene, None, &rows, 0, &LaneRenderContext::default())
        .expect("composite");

    assert!(labels(&scene).is_empty());
}

// ==========================================================================
// Determinism
// ==========================================================================

#[test]
fn test_identical_inputs_identical_scenes() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib);
    let ctx = LaneRenderContext::default();
    let rows = [
        LaneRow::new("<b>clk</b>", &["Pclk", "Nclk", "Pclk"]).with_slewing(Slewing::Distance(6.0)),
        LaneRow::new("bus", &["x", "vvv-5", "vvv-5", "z"])
            .with_phase(0.3)
            .with_labels(&["0xFF"]),
    ];

    let mut first = Scene::new(640.0, 120.0);
    let root = first.add_element(Element::group(Some("lanes".to_string())));
    let mut second = first.clone();

    let a = compositor
        .composite(&mut first, Some(root), &rows, 0, &ctx)
        .expect("first");
    let b = compositor
        .composite(&mut second, Some(root), &rows, 0, &ctx)
        .expect("second");

    assert_eq!(a, b);
    assert_eq!(first, second);
    assert_eq!(
        first.to_json().expect("json"),
        second.to_json().expect("json")
    );
}

#[test]
fn test_rich_title_width_uses_runs() {
    let lib = SymbolLibrary::builtin();
    let compositor = LaneCompositor::new(&lib);
    let mut scene = Scene::new(0.0, 0.0);

    let rows = [
        LaneRow::new("ab", &["1"]),
        LaneRow::new("<b>ab</b>", &["1"]),
        LaneRow::new("a<sub>b</sub>", &["1"]),
    ];
    let out = compositor
        .composite(&mut scene, None, &rows, 0, &LaneRenderContext::default())
        .expect("composite");

    assert_eq!(out.title_widths[0], out.title_widths[1]);
    assert!(out.title_widths[2] < out.title_widths[0]);
}

#[test]
fn test_rows_from_json() {
    let rows: Vec<LaneRow> = serde_json::from_str(
        r#"[
            {"name": "clk", "symbols": ["pclk", "nclk"], "attrs": {"slewing": true}},
            {"symbols": ["1", "0"]},
            {"name": "bus", "phase": -0.5, "symbols": ["vvv-2"], "labels": ["D"]}
        ]"#,
    )
    .expect("rows");

    let lib = SymbolLibrary::builtin();
    let mut scene = Scene::new(0.0, 0.0);
    let out = LaneCompositor::new(&lib)
        .composite(&mut scene, None, &rows, 0, &LaneRenderContext::default())
        .expect("composite");

    assert_eq!(out.title_widths.len(), 2);
    let draw = scene.find_group("wavelane_draw_2_0").expect("bus lane");
    assert_eq!(draw.transform.offset(), (20.0, 0.0));
    assert_eq!(labels(&scene), vec![(6.0, "D".to_string())]);
}
