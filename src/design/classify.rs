//! Partitioning of the raw object list into typed collections.
//!
//! Only three shapes carry semantics downstream: the workspace rectangle
//! (canvas geometry and background), image objects, and text objects.
//! Everything else — unknown kinds, images without a source, textboxes
//! without text — is dropped silently and never reappears.

use super::schema::{DesignDocument, DesignObject, ObjectKind};

/// The `id` that marks the canvas-defining rectangle in an export.
pub const WORKSPACE_ID: &str = "workspace";

/// Partition of a design document into renderable collections.
///
/// `images` and `texts` preserve source declaration order.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// The workspace rectangle, when the export declares one.
    pub workspace: Option<DesignObject>,
    pub images: Vec<DesignObject>,
    pub texts: Vec<DesignObject>,
}

/// Classify every object in the document.
///
/// The first rect with `id == "workspace"` wins; image objects need a
/// non-empty `src`; textboxes need a `text` field.
pub fn classify(doc: &DesignDocument) -> Classified {
    let mut out = Classified::default();
    for obj in &doc.objects {
        match obj.kind {
            ObjectKind::Rect => {
                if out.workspace.is_none() && obj.id.as_deref() == Some(WORKSPACE_ID) {
                    out.workspace = Some(obj.clone());
                }
            }
            ObjectKind::Image => {
                if obj.src.as_deref().is_some_and(|src| !src.is_empty()) {
                    out.images.push(obj.clone());
                }
            }
            ObjectKind::Textbox => {
                if obj.text.is_some() {
                    out.texts.push(obj.clone());
                }
            }
            ObjectKind::Other => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(src: &str) -> DesignObject {
        DesignObject {
            kind: ObjectKind::Image,
            src: Some(src.to_string()),
            ..Default::default()
        }
    }

    fn textbox(text: &str) -> DesignObject {
        DesignObject {
            kind: ObjectKind::Textbox,
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_partition_preserves_order() {
        let doc = DesignDocument {
            objects: vec![
                textbox("first"),
                image("http://x/a.png"),
                textbox("second"),
                image("http://x/b.png"),
            ],
        };
        let classified = classify(&doc);
        assert_eq!(classified.images.len(), 2);
        assert_eq!(classified.texts.len(), 2);
        assert_eq!(classified.texts[0].text.as_deref(), Some("first"));
        assert_eq!(classified.images[1].src.as_deref(), Some("http://x/b.png"));
    }

    #[test]
    fn test_workspace_first_match_wins() {
        let ws = |w: f64| DesignObject {
            kind: ObjectKind::Rect,
            id: Some(WORKSPACE_ID.to_string()),
            width: w,
            ..Default::default()
        };
        let doc = DesignDocument {
            objects: vec![ws(732.0), ws(999.0)],
        };
        let classified = classify(&doc);
        assert_eq!(classified.workspace.unwrap().width, 732.0);
    }

    #[test]
    fn test_plain_rect_is_not_workspace() {
        let doc = DesignDocument {
            objects: vec![DesignObject {
                kind: ObjectKind::Rect,
                id: Some("border".to_string()),
                ..Default::default()
            }],
        };
        assert!(classify(&doc).workspace.is_none());
    }

    #[test]
    fn test_empty_src_image_dropped() {
        let doc = DesignDocument {
            objects: vec![image(""), image("http://x/a.png")],
        };
        let classified = classify(&doc);
        assert_eq!(classified.images.len(), 1);
    }

    #[test]
    fn test_textless_textbox_dropped() {
        let doc = DesignDocument {
            objects: vec![
                DesignObject {
                    kind: ObjectKind::Textbox,
                    ..Default::default()
                },
                textbox(""),
            ],
        };
        // A present-but-empty text field still classifies; a missing one does not
        assert_eq!(classify(&doc).texts.len(), 1);
    }

    #[test]
    fn test_other_kinds_invisible() {
        let doc = DesignDocument {
            objects: vec![DesignObject::default()],
        };
        let classified = classify(&doc);
        assert!(classified.workspace.is_none());
        assert!(classified.images.is_empty());
        assert!(classified.texts.is_empty());
    }
}
