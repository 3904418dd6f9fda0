//! Parsed lane rows as handed over by the waveform parser.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{RichText, Slewing};

/// Per-lane attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneAttrs {
    /// Clock-edge slope, when the lane asks for slewed edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slewing: Option<Slewing>,
    /// Attributes this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One signal row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneRow {
    /// Title; rows without one are not drawn.
    #[serde(default)]
    pub name: Option<RichText>,
    /// Declared start time in cells.
    #[serde(default)]
    pub phase: f64,
    /// Symbol ids, one per cell.
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Labels aligned to marker ordinals; `null` entries leave a gap.
    #[serde(default)]
    pub labels: Vec<Option<RichText>>,
    /// Lane attributes.
    #[serde(default)]
    pub attrs: LaneAttrs,
}

impl LaneRow {
    /// Row with a plain-text name and symbols.
    #[must_use]
    pub fn new(name: &str, symbols: &[&str]) -> Self {
        Self {
            name: Some(name.into()),
            symbols: symbols.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Set the declared start time.
    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Set labels in marker order.
    #[must_use]
    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| Some((*l).into())).collect();
        self
    }

    /// Set the slewing attribute.
    #[must_use]
    pub fn with_slewing(mut self, slewing: Slewing) -> Self {
        self.attrs.slewing = Some(slewing);
        self
    }

    /// Title, if present and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&RichText> {
        self.name.as_ref().filter(|name| !name.is_empty())
    }

    /// Labels keyed by marker ordinal; gaps are absent.
    #[must_use]
    pub fn label_map(&self) -> BTreeMap<usize, &RichText> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(k, label)| label.as_ref().map(|l| (k, l)))
            .collect()
    }
}
