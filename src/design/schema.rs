//! Schema types for tool-exported design documents.
//!
//! The export format is a flat, loosely-typed object list: every field is
//! optional, unknown fields are ignored, and the `type` tag is an open set.
//! Only the fields consumed downstream are modeled here.

use serde::Deserialize;

use crate::error::AficheError;

/// Font family assumed when a textbox omits one.
pub const DEFAULT_FONT_FAMILY: &str = "SourceHanSansCN-Normal";

/// Font size assumed when a textbox omits one.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

fn default_scale() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

/// Top-level design document.
///
/// `objects` is the source declaration order; downstream components treat
/// that order as semantically irrelevant except as a tie-break for layer
/// identity assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct DesignDocument {
    /// Design objects in declaration order.
    pub objects: Vec<DesignObject>,
}

impl DesignDocument {
    /// Parse a design export from JSON.
    ///
    /// A document without an `objects` list is structurally invalid — the
    /// one fatal input condition. All other irregularities are absorbed by
    /// field defaults.
    pub fn from_json(json: &str) -> Result<Self, AficheError> {
        serde_json::from_str(json).map_err(|e| AficheError::Design(e.to_string()))
    }
}

/// Discriminant of a design object. Unknown tags map to [`ObjectKind::Other`],
/// which every downstream component ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ObjectKind {
    Rect,
    Image,
    Textbox,
    #[default]
    Other,
}

impl From<String> for ObjectKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "rect" => Self::Rect,
            "image" => Self::Image,
            "textbox" => Self::Textbox,
            _ => Self::Other,
        }
    }
}

/// A single object in the export: a loosely-typed record.
///
/// Geometry defaults to the origin with unit scale and full opacity, so a
/// record reduced to its `type` tag still classifies cleanly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignObject {
    /// Declared kind tag (source field `type`).
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    /// Identity; may be absent or non-unique.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Fill color expression (rects and textboxes).
    #[serde(default)]
    pub fill: Option<String>,
    /// Source URL (images).
    #[serde(default)]
    pub src: Option<String>,
    /// Text content (textboxes).
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
}

impl Default for DesignObject {
    fn default() -> Self {
        Self {
            kind: ObjectKind::Other,
            id: None,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            opacity: 1.0,
            fill: None,
            src: None,
            text: None,
            font_family: None,
            font_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_object_defaults() {
        let json = r#"{"objects": [{"type": "textbox"}]}"#;
        let doc = DesignDocument::from_json(json).unwrap();
        let obj = &doc.objects[0];
        assert_eq!(obj.kind, ObjectKind::Textbox);
        assert_eq!(obj.left, 0.0);
        assert_eq!(obj.scale_x, 1.0);
        assert_eq!(obj.opacity, 1.0);
        assert_eq!(obj.text, None);
    }

    #[test]
    fn test_unknown_kind_is_other() {
        let json = r#"{"objects": [{"type": "path"}, {}]}"#;
        let doc = DesignDocument::from_json(json).unwrap();
        assert_eq!(doc.objects[0].kind, ObjectKind::Other);
        assert_eq!(doc.objects[1].kind, ObjectKind::Other);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"objects": [{"type": "image", "src": "http://x/a.png",
            "crossOrigin": null, "filters": [], "version": "5.3.0"}]}"#;
        let doc = DesignDocument::from_json(json).unwrap();
        assert_eq!(doc.objects[0].src.as_deref(), Some("http://x/a.png"));
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{"objects": [{"type": "textbox", "scaleX": 2.5,
            "fontFamily": "SourceHanSansCN-Normal", "fontSize": 51}]}"#;
        let doc = DesignDocument::from_json(json).unwrap();
        let obj = &doc.objects[0];
        assert_eq!(obj.scale_x, 2.5);
        assert_eq!(obj.font_family.as_deref(), Some("SourceHanSansCN-Normal"));
        assert_eq!(obj.font_size, Some(51.0));
    }

    #[test]
    fn test_missing_objects_is_fatal() {
        let result = DesignDocument::from_json(r#"{"version": "5.3.0"}"#);
        assert!(matches!(result, Err(AficheError::Design(_))));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        assert!(DesignDocument::from_json("not json").is_err());
    }
}
