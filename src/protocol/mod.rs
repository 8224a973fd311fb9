//! # Render Protocol Model
//!
//! Output side of the translator: the JSON document the rasterizing
//! renderer consumes. Field names here are the wire contract — the
//! renderer reads `canvas.{width,height,background,debug}`, flat
//! `images[]`/`texts[]` element records, and an `output` descriptor.
//!
//! The document is assembled in one shot (see [`assemble`]) and never
//! patched in place; [`ProtocolDocument::write_atomic`] gives the host the
//! all-or-nothing artifact write.

pub mod assemble;
pub mod layers;

pub use assemble::{TranslateOptions, Translator};
pub use layers::{LayerPolicy, assign_layers};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color;
use crate::design::DesignObject;
use crate::error::AficheError;

/// Canvas size when the export has no workspace rectangle.
pub const DEFAULT_CANVAS_SIZE: f64 = 1000.0;

/// Canvas background when the export has no workspace rectangle.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// The complete render-ready document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolDocument {
    pub canvas: Canvas,
    pub images: Vec<ImageElement>,
    pub texts: Vec<TextElement>,
    pub output: OutputSpec,
}

impl ProtocolDocument {
    /// Serialize to pretty-printed JSON with stable field order.
    pub fn to_json_pretty(&self) -> Result<String, AficheError> {
        serde_json::to_string_pretty(self).map_err(|e| AficheError::Protocol(e.to_string()))
    }

    /// Write the document to `path` atomically (same-directory temp file,
    /// then rename), so the renderer never observes a partial artifact.
    pub fn write_atomic(&self, path: &Path) -> Result<(), AficheError> {
        let json = self.to_json_pretty()?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Canvas descriptor: dimensions and background of the render surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub debug: bool,
}

impl Canvas {
    /// Build the canvas from the classified workspace rectangle.
    ///
    /// No workspace → 1000×1000 on white. A workspace without a fill gets
    /// the export's customary `rgba(255,255,255,1)`.
    pub fn from_workspace(workspace: Option<&DesignObject>) -> Self {
        match workspace {
            Some(ws) => Self {
                width: if ws.width > 0.0 { ws.width } else { DEFAULT_CANVAS_SIZE },
                height: if ws.height > 0.0 { ws.height } else { DEFAULT_CANVAS_SIZE },
                background: color::normalize(
                    ws.fill.as_deref().unwrap_or("rgba(255,255,255,1)"),
                ),
                debug: false,
            },
            None => Self {
                width: DEFAULT_CANVAS_SIZE,
                height: DEFAULT_CANVAS_SIZE,
                background: DEFAULT_BACKGROUND.to_string(),
                debug: false,
            },
        }
    }
}

/// One image layer: a resolved local asset plus pass-through geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: String,
    pub path: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub opacity: f64,
}

/// One text layer, content already re-flowed, colors normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: String,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub font_family: String,
    pub font_size: f64,
    pub fill_color: String,
    pub opacity: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub width: f64,
    pub height: f64,
    /// Present only on elements fused from a shadow pairing; the shadow
    /// fields are all-or-nothing on the wire.
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<TextShadow>,
}

/// Shadow attachment for a fused text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShadow {
    pub has_shadow: bool,
    pub shadow_color: String,
    pub shadow_dx: f64,
    pub shadow_dy: f64,
    pub shadow_sigma: f64,
}

/// Fixed output descriptor: PNG at full quality, caller-named file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub format: String,
    pub filename: String,
    pub quality: u32,
}

impl OutputSpec {
    /// The descriptor every translation emits: `png`, quality 100.
    pub fn png(filename: impl Into<String>) -> Self {
        Self {
            format: "png".to_string(),
            filename: filename.into(),
            quality: 100,
        }
    }
}
