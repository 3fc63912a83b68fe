//! Preview composition and the built-in SVG rasterizer.
//!
//! [`PreviewScene`] is exactly what the preview region shows: the jersey
//! image plus every visible overlay at its percentage position. Any
//! [`Rasterizer`] can flatten it; [`SvgRasterizer`] does so without a browser
//! by emitting a self-contained SVG document as a base64 data URI.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::layout::LayoutModel;
use crate::models::{Font, InkColor, OverlayKind, Position};
use crate::ports::{AssetCatalog, RasterError, Rasterizer};

/// Upscale factor applied when flattening, for print-quality output.
pub const CAPTURE_SCALE: u32 = 2;

/// Logical size of the (square) preview region in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
        }
    }
}

/// Per-overlay typography, mirroring the on-screen styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_px: f64,
    pub weight: u16,
    pub stroke_px: f64,
}

impl TextStyle {
    pub fn for_kind(kind: OverlayKind) -> Self {
        match kind {
            OverlayKind::Name => Self {
                font_px: 48.0,
                weight: 700,
                stroke_px: 1.0,
            },
            OverlayKind::Number => Self {
                font_px: 72.0,
                weight: 700,
                stroke_px: 1.5,
            },
            OverlayKind::Slogan => Self {
                font_px: 30.0,
                weight: 600,
                stroke_px: 0.5,
            },
        }
    }
}

/// One visible overlay in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneText {
    pub kind: OverlayKind,
    pub text: String,
    pub position: Position,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScene {
    pub base_image: String,
    pub viewport: Viewport,
    pub scale: u32,
    pub font: Font,
    pub color: InkColor,
    /// Paint order: later entries are drawn on top.
    pub texts: Vec<SceneText>,
}

impl PreviewScene {
    /// Compose the scene currently shown for `layout`. An overlay is visible
    /// when it is enabled and its text is non-empty.
    pub fn compose(layout: &LayoutModel, assets: &dyn AssetCatalog, viewport: Viewport) -> Self {
        let jersey = layout.jersey();
        let texts = OverlayKind::ALL
            .iter()
            .filter_map(|&kind| {
                let element = layout.element(kind);
                (element.enabled && !element.text.is_empty()).then(|| SceneText {
                    kind,
                    text: element.text.clone(),
                    position: element.position,
                    style: TextStyle::for_kind(kind),
                })
            })
            .collect();
        Self {
            base_image: assets.jersey_image(jersey.color, jersey.face_placement),
            viewport,
            scale: CAPTURE_SCALE,
            font: layout.font(),
            color: layout.color(),
            texts,
        }
    }

    /// Topmost visible overlay whose approximate text box contains the point
    /// (given in container percent).
    pub fn hit_test(&self, point: Position) -> Option<OverlayKind> {
        let px = point.x / 100.0 * f64::from(self.viewport.width);
        let py = point.y / 100.0 * f64::from(self.viewport.height);
        self.texts.iter().rev().find_map(|t| {
            let cx = t.position.x / 100.0 * f64::from(self.viewport.width);
            let cy = t.position.y / 100.0 * f64::from(self.viewport.height);
            // Glyph advance averages ~0.6em for the bundled sans faces.
            let half_w = t.text.chars().count() as f64 * t.style.font_px * 0.3;
            let half_h = t.style.font_px * 0.5;
            ((px - cx).abs() <= half_w && (py - cy).abs() <= half_h).then_some(t.kind)
        })
    }
}

// ── SvgRasterizer ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRasterizer;

impl SvgRasterizer {
    /// Render `scene` as a standalone SVG document.
    pub fn render_svg(scene: &PreviewScene) -> Result<String, RasterError> {
        let Viewport { width, height } = scene.viewport;
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyRegion(format!(
                "preview region is {width}x{height}"
            )));
        }
        let scale = scene.scale.max(1);
        let family = format!(
            "'{}', {}",
            scene.font.label(),
            scene.font.family().css_generic()
        );

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {width} {height}">"#,
            width * scale,
            height * scale,
        );
        svg.push_str(&format!(
            r#"<image href="{}" x="0" y="0" width="{width}" height="{height}" preserveAspectRatio="xMidYMid meet"/>"#,
            escape_xml(&scene.base_image)
        ));
        for text in &scene.texts {
            let x = text.position.x / 100.0 * f64::from(width);
            let y = text.position.y / 100.0 * f64::from(height);
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-weight="{}" font-size="{}" fill="{}" stroke="rgba(0,0,0,0.5)" stroke-width="{}" paint-order="stroke">{}</text>"#,
                escape_xml(&family),
                text.style.weight,
                text.style.font_px,
                scene.color.hex(),
                text.style.stroke_px,
                escape_xml(&text.text),
            ));
        }
        svg.push_str("</svg>");
        Ok(svg)
    }
}

#[async_trait]
impl Rasterizer for SvgRasterizer {
    async fn capture(&self, scene: &PreviewScene) -> Result<String, RasterError> {
        let svg = Self::render_svg(scene)?;
        Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)))
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
