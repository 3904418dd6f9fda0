//! Scene export to vector markup.
//!
//! Serializes a [`Scene`] to SVG in paint order. With the `raster` feature the
//! SVG is additionally rasterized to PNG through resvg/tiny-skia.

use std::fmt::Write;

use wavelane_core::{Element, ElementKind, Scene, TextRun, Transform};

use crate::error::{RenderError, RenderResult};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// SVG vector graphics (the SVG XML string as UTF-8 bytes).
    Svg,
    /// PNG image; requires the `raster` feature.
    Png,
}

/// Configuration for scene export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output width in pixels (default: scene viewport width).
    pub width: Option<u32>,
    /// Output height in pixels (default: scene viewport height).
    pub height: Option<u32>,
    /// Background color as RGBA bytes; `None` leaves the canvas transparent.
    pub background: Option<[u8; 4]>,
    /// Stylesheet embedded verbatim in a `<style>` element.
    pub style: Option<String>,
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            background: None,
            style: None,
            scale: 1.0,
        }
    }
}

/// Exports a [`Scene`] to SVG or PNG.
pub struct SceneExporter {
    config: ExportConfig,
}

impl SceneExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Export a scene to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is not compiled in or encoding fails.
    pub fn export(&self, scene: &Scene, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Svg => Ok(self.render_to_svg(scene).into_bytes()),
            ExportFormat::Png => self.render_to_png(scene),
        }
    }

    /// Export the scene to an SVG string.
    #[must_use]
    pub fn render_to_svg(&self, scene: &Scene) -> String {
        let (out_w, out_h) = self.output_dimensions(scene);
        let scale = self.config.scale;
        let view_w = f64::from(out_w) / scale;
        let view_h = f64::from(out_h) / scale;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
        );

        if let Some(style) = &self.config.style {
            let _ = write!(svg, "<style>{}</style>", escape_xml(style));
        }

        if let Some(bg) = &self.config.background {
            let bg_alpha = f64::from(bg[3]) / 255.0;
            let _ = write!(
                svg,
                "<rect width=\"100%\" height=\"100%\" fill=\"rgba({},{},{},{})\"/>",
                bg[0], bg[1], bg[2], bg_alpha,
            );
        }

        for element in scene.root_elements() {
            render_element_svg(&mut svg, scene, element);
        }

        svg.push_str("</svg>");
        tracing::debug!(
            bytes = svg.len(),
            elements = scene.element_count(),
            "scene serialized to SVG"
        );
        svg
    }

    /// Export the scene to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the `raster` feature is disabled or rasterization
    /// fails.
    #[cfg(feature = "raster")]
    pub fn render_to_png(&self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(scene);
        let pixmap = Self::rasterize_svg(&svg_string)?;

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the scene to PNG bytes.
    ///
    /// # Errors
    ///
    /// Always fails: the `raster` feature is disabled.
    #[cfg(not(feature = "raster"))]
    #[allow(clippy::unused_self)]
    pub fn render_to_png(&self, _scene: &Scene) -> RenderResult<Vec<u8>> {
        Err(RenderError::UnsupportedFormat(
            "png (enable the `raster` feature)".to_string(),
        ))
    }

    /// Get output dimensions (width, height) in pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn output_dimensions(&self, scene: &Scene) -> (u32, u32) {
        let base_w = self
            .config
            .width
            .unwrap_or_else(|| scene.viewport_width.max(1.0).ceil() as u32);
        let base_h = self
            .config
            .height
            .unwrap_or_else(|| scene.viewport_height.max(1.0).ceil() as u32);

        let out_w = (f64::from(base_w) * self.config.scale) as u32;
        let out_h = (f64::from(base_h) * self.config.scale) as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[cfg(feature = "raster")]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let opt = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width() as u32;
        let px_h = tree.size().height() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

/// Render one element and its subtree to SVG.
fn render_element_svg(svg: &mut String, scene: &Scene, element: &Element) {
    match &element.kind {
        ElementKind::Group {
            name,
            class,
            children: _,
        } => {
            svg.push_str("<g");
            push_attr(svg, "id", name.as_deref());
            push_attr(svg, "class", class.as_deref());
            push_transform(svg, &element.transform);
            svg.push('>');
            for child in scene.children(element.id) {
                render_element_svg(svg, scene, child);
            }
            svg.push_str("</g>");
        }

        ElementKind::Path { data, class } => {
            let d = data.to_string();
            svg.push_str("<path");
            push_attr(svg, "d", Some(d.as_str()));
            push_attr(svg, "class", class.as_deref());
            push_transform(svg, &element.transform);
            svg.push_str("/>");
        }

        ElementKind::Text {
            runs,
            x,
            y,
            anchor,
            class,
            preserve_space,
        } => {
            let _ = write!(svg, "<text x=\"{x}\" y=\"{y}\"");
            push_attr(svg, "class", class.as_deref());
            push_attr(svg, "text-anchor", Some(anchor.as_str()));
            if *preserve_space {
                svg.push_str(" xml:space=\"preserve\"");
            }
            push_transform(svg, &element.transform);
            svg.push('>');
            for run in runs {
                render_run_svg(svg, run);
            }
            svg.push_str("</text>");
        }
    }
}

/// Render a text run, wrapping styled runs in a `<tspan>`.
fn render_run_svg(svg: &mut String, run: &TextRun) {
    let attrs = run.style.svg_attributes();
    if attrs.is_empty() {
        svg.push_str(&escape_xml(&run.text));
        return;
    }
    svg.push_str("<tspan");
    for (name, value) in &attrs {
        push_attr(svg, name, Some(value.as_str()));
    }
    let _ = write!(svg, ">{}</tspan>", escape_xml(&run.text));
}

fn push_attr(svg: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(svg, " {name}=\"{}\"", escape_xml(value));
    }
}

fn push_transform(svg: &mut String, transform: &Transform) {
    if !transform.is_identity() {
        let _ = write!(svg, " transform=\"{transform}\"");
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
