//! CSS rendering of composite overlays.
//!
//! Each overlay becomes an absolutely positioned element over the base
//! photo whose background is the source photo. Lengths are emitted as
//! percentages so the preview stays aligned at any display size.

use crate::types::{from_js, parse_config, to_js};
use groupshot_core::{
    CompositeOverlay, CompositeRenderer, EdgeTreatment, Face, PercentPoint, Region,
    SelectionBinding,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Inline style properties for one overlay element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub dest_face_id: String,
    pub source_face_id: String,
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
    pub background_image: String,
    pub background_size: String,
    pub background_position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<String>,
}

impl OverlayStyle {
    pub fn from_overlay(overlay: &CompositeOverlay) -> Self {
        let (mask_image, clip_path) = match &overlay.edge {
            EdgeTreatment::SoftMask(mask) => (
                Some(format!(
                    "radial-gradient(circle, black {}, transparent 100%)",
                    percent(mask.inner_percent() as f64)
                )),
                None,
            ),
            EdgeTreatment::PolygonClip(clip) => (None, Some(clip_path(&clip.vertices))),
        };

        let bg = &overlay.background;
        Self {
            dest_face_id: overlay.dest_face_id.to_string(),
            source_face_id: overlay.source_face_id.to_string(),
            left: percent(overlay.position.x),
            top: percent(overlay.position.y),
            width: percent(overlay.position.width),
            height: percent(overlay.position.height),
            background_image: format!("url(\"{}\")", css_escape(&overlay.photo_url)),
            background_size: format!("{} {}", percent(bg.size_x), percent(bg.size_y)),
            background_position: format!("{} {}", percent(bg.offset_x), percent(bg.offset_y)),
            mask_image,
            clip_path,
        }
    }

    /// Declarations for a `style` attribute.
    pub fn to_css(&self) -> String {
        let mut css = format!(
            "position: absolute; left: {}; top: {}; width: {}; height: {}; \
             background-image: {}; background-size: {}; background-position: {}; \
             background-repeat: no-repeat;",
            self.left,
            self.top,
            self.width,
            self.height,
            self.background_image,
            self.background_size,
            self.background_position
        );
        if let Some(mask) = &self.mask_image {
            css.push_str(&format!(" mask-image: {0}; -webkit-mask-image: {0};", mask));
        }
        if let Some(clip) = &self.clip_path {
            css.push_str(&format!(" clip-path: {};", clip));
        }
        css
    }
}

/// Overlay styles for every replaced base face.
///
/// # Arguments
/// * `base_faces` - Face records on the base photo
/// * `binding` - Destination face id to bound face record
/// * `config` - Optional geometry config
#[wasm_bindgen]
pub fn overlay_styles(
    base_faces: JsValue,
    binding: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    let renderer = CompositeRenderer::new(parse_config(config)?);
    let base_faces: Vec<Face> = from_js(base_faces, "base faces")?;
    let binding: SelectionBinding = from_js(binding, "binding")?;
    to_js(&styles(&renderer, &base_faces, &binding))
}

pub(crate) fn styles(
    renderer: &CompositeRenderer,
    base_faces: &[Face],
    binding: &SelectionBinding,
) -> Vec<OverlayStyle> {
    renderer
        .compose_all(base_faces, binding)
        .iter()
        .map(OverlayStyle::from_overlay)
        .collect()
}

/// Position and size of a face box over its photo.
pub(crate) fn box_style(region: &Region) -> String {
    format!(
        "position: absolute; left: {}; top: {}; width: {}; height: {};",
        percent(region.x),
        percent(region.y),
        percent(region.width),
        percent(region.height)
    )
}

pub(crate) fn clip_path(vertices: &[PercentPoint]) -> String {
    let points: Vec<String> = vertices
        .iter()
        .map(|p| format!("{} {}", percent(p.x), percent(p.y)))
        .collect();
    format!("polygon({})", points.join(", "))
}

/// Percentage rounded to four decimals, without a negative zero.
pub(crate) fn percent(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}%", rounded)
}

fn css_escape(url: &str) -> String {
    url.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupshot_core::{FaceId, FaceSource};

    fn source(region: Region) -> Face {
        Face::detected("b.jpg-face-0", "b.jpg", region)
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(500.0), "500%");
        assert_eq!(percent(100.0 / 30.0 * 100.0), "333.3333%");
        assert_eq!(percent(-20.0 / 30.0 * 100.0), "-66.6667%");
        assert_eq!(percent(-0.0), "0%");
    }

    #[test]
    fn test_soft_mask_style() {
        let overlay = CompositeRenderer::default().overlay(
            &FaceId::from("a.jpg-face-0"),
            &Region::new(10.0, 15.0, 20.0, 25.0),
            &source(Region::new(40.0, 20.0, 20.0, 30.0)),
        );
        let style = OverlayStyle::from_overlay(&overlay);

        assert_eq!(style.left, "10%");
        assert_eq!(style.height, "25%");
        assert_eq!(style.background_image, "url(\"b.jpg\")");
        assert_eq!(style.background_size, "500% 333.3333%");
        assert_eq!(style.background_position, "-200% -66.6667%");
        assert_eq!(
            style.mask_image.as_deref(),
            Some("radial-gradient(circle, black 60%, transparent 100%)")
        );
        assert!(style.clip_path.is_none());
    }

    #[test]
    fn test_lasso_clip_style() {
        let polygon = vec![
            PercentPoint::new(40.0, 20.0),
            PercentPoint::new(60.0, 20.0),
            PercentPoint::new(50.0, 50.0),
        ];
        let face = Face {
            face_id: FaceId::from("custom-1"),
            photo_url: "b.jpg".to_string(),
            region: Region::new(40.0, 20.0, 20.0, 30.0),
            source: FaceSource::Lasso { polygon },
        };
        let overlay = CompositeRenderer::default().overlay(
            &FaceId::from("a.jpg-face-0"),
            &Region::new(10.0, 15.0, 20.0, 25.0),
            &face,
        );
        let style = OverlayStyle::from_overlay(&overlay);

        assert!(style.mask_image.is_none());
        assert_eq!(
            style.clip_path.as_deref(),
            Some("polygon(0% 0%, 100% 0%, 50% 100%)")
        );
        assert!(style.to_css().contains("clip-path: polygon("));
        assert!(!style.to_css().contains("mask-image"));
    }

    #[test]
    fn test_to_css_soft_mask() {
        let overlay = CompositeRenderer::default().overlay(
            &FaceId::from("a"),
            &Region::new(0.0, 0.0, 50.0, 50.0),
            &source(Region::new(0.0, 0.0, 50.0, 50.0)),
        );
        let css = OverlayStyle::from_overlay(&overlay).to_css();
        assert!(css.starts_with("position: absolute; left: 0%; top: 0%; width: 50%; height: 50%;"));
        assert!(css.contains("background-size: 200% 200%;"));
        assert!(css.contains("-webkit-mask-image: radial-gradient("));
    }

    #[test]
    fn test_styles_only_replaced() {
        let base = vec![
            Face::detected("a-0", "a.jpg", Region::new(10.0, 10.0, 10.0, 10.0)),
            Face::detected("a-1", "a.jpg", Region::new(30.0, 10.0, 10.0, 10.0)),
        ];
        let mut binding = SelectionBinding::identity(&base);
        binding.bind(&FaceId::from("a-0"), source(Region::new(12.0, 10.0, 10.0, 10.0)));

        let styles = styles(&CompositeRenderer::default(), &base, &binding);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].dest_face_id, "a-0");
        assert_eq!(styles[0].source_face_id, "b.jpg-face-0");
    }

    #[test]
    fn test_box_style() {
        assert_eq!(
            box_style(&Region::new(25.0, 25.0, 20.0, 25.0)),
            "position: absolute; left: 25%; top: 25%; width: 20%; height: 25%;"
        );
    }

    #[test]
    fn test_css_escape_quotes() {
        assert_eq!(css_escape("a\"b.jpg"), "a\\\"b.jpg");
    }
}
