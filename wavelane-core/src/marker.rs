//! Label-eligible cell detection.

use crate::SymbolTemplate;

/// Decides which cells of a lane may carry a value label.
pub trait MarkerRule {
    /// Ascending marker positions, in cells, for a lane's symbol ids and
    /// their resolved templates.
    fn markers(&self, cells: &[(&str, &SymbolTemplate)]) -> Vec<f64>;
}

/// One marker at the centre of every run of a repeated data-bearing symbol.
///
/// A run is a maximal stretch of consecutive cells with the same data symbol
/// id; a different data symbol starts a new run. A run ending before cell
/// `end` with `len` cells yields `end - (len + 1) / 2`, so even-length runs
/// land on a half cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataRunCenters;

impl MarkerRule for DataRunCenters {
    #[allow(clippy::cast_precision_loss)]
    fn markers(&self, cells: &[(&str, &SymbolTemplate)]) -> Vec<f64> {
        let center = |end: usize, len: usize| end as f64 - (len as f64 + 1.0) / 2.0;
        let mut out = Vec::new();
        let mut run: Option<(&str, usize)> = None;
        for (idx, &(id, template)) in cells.iter().enumerate() {
            match run {
                Some((current, len)) if template.data && current == id => {
                    run = Some((current, len + 1));
                    continue;
                }
                Some((_, len)) => out.push(center(idx, len)),
                None => {}
            }
            run = template.data.then_some((id, 1));
        }
        if let Some((_, len)) = run {
            out.push(center(cells.len(), len));
        }
        out
    }
}

/// Fixed marker positions, independent of the lane content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedMarkers(pub Vec<f64>);

impl MarkerRule for FixedMarkers {
    fn markers(&self, _cells: &[(&str, &SymbolTemplate)]) -> Vec<f64> {
        self.0.clone()
    }
}
