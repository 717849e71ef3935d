use crate::error::RenderError;
use limpet::{ResultData, Scene};
use std::fmt::Write as _;
use std::path::Path;

// Fill opacities of exclusions and clearance rings (150/255 and 50/255).
const EXCLUSION_OPACITY: f64 = 0.588;
const RING_OPACITY: f64 = 0.196;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pixels per scene unit.
    pub scale: f64,
    /// Blank border around the zone, in pixels.
    pub margin: f64,
    pub stroke_width: f64,
    /// CSS color painted behind the drawing; `None` leaves it transparent.
    pub background: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 10.0,
            margin: 10.0,
            stroke_width: 3.0,
            background: Some("white".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(RenderError::UnsupportedFormat { extension }),
        }
    }
}

/// Scene to image pixel mapping: y grows downward in the image, so the zone is flipped.
struct Viewport {
    min_x: f64,
    max_y: f64,
    scale: f64,
    margin: f64,
}

impl Viewport {
    fn x(&self, x: f64) -> f64 {
        self.margin + (x - self.min_x) * self.scale
    }

    fn y(&self, y: f64) -> f64 {
        self.margin + (self.max_y - y) * self.scale
    }

    fn len(&self, d: f64) -> f64 {
        d * self.scale
    }
}

/// Draws the zone, its exclusion areas and the placed circles (outer and inner disks).
pub fn scene_to_svg(scene: &Scene, result: &ResultData, options: &RenderOptions) -> String {
    let zone = scene.zone();
    let vp = Viewport {
        min_x: zone.min_point().x,
        max_y: zone.max_point().y,
        scale: options.scale,
        margin: options.margin,
    };
    let width = vp.len(zone.width()) + 2.0 * options.margin;
    let height = vp.len(zone.height()) + 2.0 * options.margin;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    if let Some(bg) = options.background.as_deref() {
        let _ = write!(
            out,
            r#"<rect class="background" width="{width}" height="{height}" fill="{}"/>"#,
            escape_attr(bg)
        );
    }

    let _ = write!(
        out,
        r##"<g stroke="#000000" stroke-width="{}">"##,
        options.stroke_width
    );
    for area in scene.exclusion_areas() {
        let _ = write!(
            out,
            r##"<rect class="exclusion" x="{}" y="{}" width="{}" height="{}" fill="#000000" fill-opacity="{EXCLUSION_OPACITY}"/>"##,
            vp.x(area.min_point().x),
            vp.y(area.max_point().y),
            vp.len(area.width()),
            vp.len(area.height())
        );
    }
    for c in &result.circles {
        let (cx, cy) = (vp.x(c.position.x), vp.y(c.position.y));
        let _ = write!(
            out,
            r##"<circle class="outer" data-id="{}" cx="{cx}" cy="{cy}" r="{}" fill="#000000" fill-opacity="{RING_OPACITY}"/>"##,
            c.id(),
            vp.len(c.outer_radius())
        );
        let _ = write!(
            out,
            r#"<circle class="inner" data-id="{}" cx="{cx}" cy="{cy}" r="{}" fill="none"/>"#,
            c.id(),
            vp.len(c.inner_radius())
        );
    }
    let _ = write!(
        out,
        r#"<rect class="zone" x="{}" y="{}" width="{}" height="{}" fill="none"/>"#,
        options.margin,
        options.margin,
        vp.len(zone.width()),
        vp.len(zone.height())
    );
    out.push_str("</g></svg>");
    out
}

/// Rasterizes an SVG at its intrinsic size.
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>, RenderError> {
    let tree =
        usvg::Tree::from_str(svg, &usvg::Options::default()).map_err(|_| RenderError::SvgParse)?;
    let size = tree.size().to_int_size();
    let mut pixmap =
        tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(RenderError::PixmapAlloc)?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|_| RenderError::PngEncode)
}

/// Writes an SVG or PNG picture of the placement, chosen by the extension of `path`.
pub fn write_image(
    path: impl AsRef<Path>,
    scene: &Scene,
    result: &ResultData,
    options: &RenderOptions,
) -> Result<ImageFormat, RenderError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let svg = scene_to_svg(scene, result, options);
    let bytes = match format {
        ImageFormat::Svg => svg.into_bytes(),
        ImageFormat::Png => svg_to_png(&svg)?,
    };
    std::fs::write(path, bytes).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), ?format, "wrote image");
    Ok(format)
}

fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
