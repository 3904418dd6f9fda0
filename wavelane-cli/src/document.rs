//! Lane documents read by the CLI.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wavelane_core::{LaneRenderContext, LaneRow};

/// A diagram: layout configuration plus lane rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveDocument {
    /// Layout constants; missing fields take their defaults.
    #[serde(default)]
    pub config: LaneRenderContext,
    /// Lane rows, top to bottom.
    #[serde(default)]
    pub lanes: Vec<LaneRow>,
}

impl WaveDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a lane is invalid.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse lane document")
    }

    /// Load a document from `path`, or stdin when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing fails.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let json = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                buf
            }
        };
        Self::from_json(&json)
    }
}
