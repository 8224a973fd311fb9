//! Positional identity assignment for image layers.
//!
//! The source designs carry no role markers on images; by convention the
//! first few in declaration order are full-bleed backgrounds and the rest
//! are decorations. That convention is a policy here, not a constant, so a
//! document family with a different layout can adjust it without code
//! changes.

use crate::design::DesignObject;

use super::ImageElement;

/// How many leading images count as backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerPolicy {
    pub background_count: usize,
}

impl Default for LayerPolicy {
    fn default() -> Self {
        Self {
            background_count: 3,
        }
    }
}

impl LayerPolicy {
    /// Stable id for the image at `index` in source order:
    /// `background_1..background_N`, then `decor_1, decor_2, …`.
    pub fn layer_id(&self, index: usize) -> String {
        if index < self.background_count {
            format!("background_{}", index + 1)
        } else {
            format!("decor_{}", index - self.background_count + 1)
        }
    }
}

/// Build image elements from the surviving image objects and their
/// resolved local paths (parallel, in source order).
///
/// Geometry is a direct pass-through: left→x, top→y, angle→rotation.
pub fn assign_layers(
    images: &[DesignObject],
    paths: &[String],
    policy: &LayerPolicy,
) -> Vec<ImageElement> {
    images
        .iter()
        .zip(paths)
        .enumerate()
        .map(|(index, (obj, path))| ImageElement {
            id: policy.layer_id(index),
            path: path.clone(),
            x: obj.left,
            y: obj.top,
            width: obj.width,
            height: obj.height,
            scale_x: obj.scale_x,
            scale_y: obj.scale_y,
            rotation: obj.angle,
            opacity: obj.opacity,
        })
        .collect()
}
