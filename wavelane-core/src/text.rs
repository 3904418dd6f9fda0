//! Rich text for lane titles and value labels.
//!
//! Titles and labels accept a tiny inline markup (`<b>`, `<i>`, `<u>`, `<s>`,
//! `<o>`, `<tt>`, `<sub>`, `<sup>`) that is split into styled [`TextRun`]s.
//! Unknown tags and stray closing tags are kept as literal text; a tag left
//! open styles the remainder of the string.

use serde::{Deserialize, Serialize};

/// Vertical placement of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    /// Regular baseline.
    #[default]
    Normal,
    /// Superscript.
    Super,
    /// Subscript.
    Sub,
}

/// Presentation flags of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Strike-through decoration.
    pub strike: bool,
    /// Overline decoration (active-low signal names).
    pub overline: bool,
    /// Monospace family.
    pub mono: bool,
    /// Vertical placement.
    pub baseline: Baseline,
}

impl RunStyle {
    /// SVG presentation attributes for a `<tspan>` carrying this style.
    #[must_use]
    pub fn svg_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();
        if self.bold {
            attrs.push(("font-weight", "bold".to_string()));
        }
        if self.italic {
            attrs.push(("font-style", "italic".to_string()));
        }
        let decorations: Vec<&str> = [
            (self.underline, "underline"),
            (self.strike, "line-through"),
            (self.overline, "overline"),
        ]
        .iter()
        .filter_map(|(on, name)| on.then_some(*name))
        .collect();
        if !decorations.is_empty() {
            attrs.push(("text-decoration", decorations.join(" ")));
        }
        if self.mono {
            attrs.push(("font-family", "monospace".to_string()));
        }
        match self.baseline {
            Baseline::Normal => {}
            Baseline::Super => {
                attrs.push(("baseline-shift", "super".to_string()));
                attrs.push(("font-size", "70%".to_string()));
            }
            Baseline::Sub => {
                attrs.push(("baseline-shift", "sub".to_string()));
                attrs.push(("font-size", "70%".to_string()));
            }
        }
        attrs
    }

    fn with_tag(mut self, tag: Tag) -> Self {
        match tag {
            Tag::Bold => self.bold = true,
            Tag::Italic => self.italic = true,
            Tag::Underline => self.underline = true,
            Tag::Strike => self.strike = true,
            Tag::Overline => self.overline = true,
            Tag::Mono => self.mono = true,
            Tag::Super => self.baseline = Baseline::Super,
            Tag::Sub => self.baseline = Baseline::Sub,
        }
        self
    }
}

/// A span of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// Literal text.
    pub text: String,
    /// Presentation flags.
    #[serde(default)]
    pub style: RunStyle,
}

impl TextRun {
    /// Unstyled run.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }
}

/// Title or label text: inline markup or explicit runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    /// Markup string, split into runs on use.
    Markup(String),
    /// Pre-styled runs.
    Runs(Vec<TextRun>),
}

impl RichText {
    /// Whether there is no visible text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Markup(s) => s.is_empty(),
            Self::Runs(runs) => runs.iter().all(|r| r.text.is_empty()),
        }
    }

    /// Styled runs for this text.
    #[must_use]
    pub fn to_runs(&self) -> Vec<TextRun> {
        match self {
            Self::Markup(s) => parse_markup(s),
            Self::Runs(runs) => runs.clone(),
        }
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        Self::Markup(s.to_string())
    }
}

impl From<String> for RichText {
    fn from(s: String) -> Self {
        Self::Markup(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Bold,
    Italic,
    Underline,
    Strike,
    Overline,
    Mono,
    Super,
    Sub,
}

impl Tag {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "b" => Self::Bold,
            "i" => Self::Italic,
            "u" => Self::Underline,
            "s" => Self::Strike,
            "o" => Self::Overline,
            "tt" => Self::Mono,
            "sup" => Self::Super,
            "sub" => Self::Sub,
            _ => return None,
        })
    }
}

/// Split inline markup into styled runs.
///
/// Adjacent runs with the same style are merged and empty runs dropped.
#[must_use]
pub fn parse_markup(input: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut stack: Vec<Tag> = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('>') else {
            rest = tail;
            break;
        };
        let raw = &tail[1..close];
        let (closing, name) = match raw.strip_prefix('/') {
            Some(name) => (true, name),
            None => (false, raw),
        };

        match Tag::from_name(name) {
            Some(tag) if !closing => {
                push_run(&mut runs, &mut text, &stack);
                stack.push(tag);
            }
            Some(tag) if stack.last() == Some(&tag) => {
                push_run(&mut runs, &mut text, &stack);
                stack.pop();
            }
            _ => text.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    text.push_str(rest);
    push_run(&mut runs, &mut text, &stack);
    runs
}

fn push_run(runs: &mut Vec<TextRun>, text: &mut String, stack: &[Tag]) {
    if text.is_empty() {
        return;
    }
    let style = stack
        .iter()
        .fold(RunStyle::default(), |style, tag| style.with_tag(*tag));
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(TextRun {
            text: text.clone(),
            style,
        }),
    }
    text.clear();
}

/// Measures the rendered width of text runs.
pub trait TextMetrics {
    /// Width in pixels of `runs` laid out on one line.
    fn measure(&self, runs: &[TextRun]) -> f64;
}

/// Width estimate with a fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one character at normal size.
    pub advance: f64,
    /// Size factor for super/subscript runs.
    pub script_scale: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            advance: 6.6,
            script_scale: 0.7,
        }
    }
}

impl TextMetrics for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, runs: &[TextRun]) -> f64 {
        runs.iter()
            .map(|run| {
                let scale = match run.style.baseline {
                    Baseline::Normal => 1.0,
                    Baseline::Super | Baseline::Sub => self.script_scale,
                };
                run.text.chars().count() as f64 * self.advance * scale
            })
            .sum()
    }
}
