//! Assembly of the final protocol document.
//!
//! [`Translator`] carries the three policy knobs (layer identity, vertical
//! stacking, shadow classification) and folds the classified collections
//! into one [`ProtocolDocument`]: canvas from the workspace rect, image
//! elements from the layer assigner, text elements from the pairing set
//! plus per-block re-flow.

use std::collections::{BTreeMap, BTreeSet};

use crate::color;
use crate::design::{Classified, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DesignObject};
use crate::layout::linebreak::{VerticalPolicy, reflow};
use crate::layout::shadow::{
    PaletteClassifier, SHADOW_SIGMA, ShadowClassifier, ShadowPairing, resolve_pairs,
};

use super::layers::{LayerPolicy, assign_layers};
use super::{Canvas, OutputSpec, ProtocolDocument, TextElement, TextShadow};

/// Policy knobs for a translation run.
pub struct TranslateOptions {
    pub layers: LayerPolicy,
    pub vertical: VerticalPolicy,
    pub shadow_classifier: Box<dyn ShadowClassifier>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            layers: LayerPolicy::default(),
            vertical: VerticalPolicy::default(),
            shadow_classifier: Box::new(PaletteClassifier::default()),
        }
    }
}

/// The protocol assembler.
///
/// A pure function object: the same classified input and paths always
/// produce the same document, byte for byte.
pub struct Translator {
    options: TranslateOptions,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Translator with default policies (3 backgrounds, enumerated
    /// vertical phrases, palette shadow classifier).
    pub fn new() -> Self {
        Self::with_options(TranslateOptions::default())
    }

    pub fn with_options(options: TranslateOptions) -> Self {
        Self { options }
    }

    /// Assemble the protocol document.
    ///
    /// `image_paths` is the resolved local path for each surviving image
    /// object, parallel to `classified.images` (the asset resolver drops
    /// failed objects from both sides). `filename` names the rendered
    /// artifact in the output descriptor.
    ///
    /// Every surviving image and text object appears exactly once, in
    /// source order, except pair members fused into a single shadowed
    /// element.
    pub fn translate(
        &self,
        classified: &Classified,
        image_paths: &[String],
        filename: &str,
    ) -> ProtocolDocument {
        ProtocolDocument {
            canvas: Canvas::from_workspace(classified.workspace.as_ref()),
            images: assign_layers(&classified.images, image_paths, &self.options.layers),
            texts: self.text_elements(&classified.texts),
            output: OutputSpec::png(filename),
        }
    }

    /// Fold the text sequence into elements: fused pairs at their seed
    /// position, bound partners skipped, everything else re-flowed and
    /// emitted standalone.
    fn text_elements(&self, texts: &[DesignObject]) -> Vec<TextElement> {
        let pairs = resolve_pairs(texts, self.options.shadow_classifier.as_ref());
        let by_seed: BTreeMap<usize, &ShadowPairing> =
            pairs.iter().map(|p| (p.seed, p)).collect();
        let bound: BTreeSet<usize> = pairs.iter().flat_map(|p| [p.shadow, p.main]).collect();

        texts
            .iter()
            .enumerate()
            .filter_map(|(index, obj)| {
                if let Some(pair) = by_seed.get(&index) {
                    Some(self.fused_element(texts, pair))
                } else if bound.contains(&index) {
                    None
                } else {
                    Some(self.plain_element(index, obj))
                }
            })
            .collect()
    }

    /// Standalone text element: re-flowed content, normalized fill.
    ///
    /// Ids carry the 1-based source ordinal; consumed pair partners leave
    /// gaps, which keeps ids stable under heuristic changes.
    fn plain_element(&self, index: usize, obj: &DesignObject) -> TextElement {
        TextElement {
            id: format!("text_{}", index + 1),
            content: reflow(obj, &self.options.vertical),
            x: obj.left,
            y: obj.top,
            font_family: font_family(obj),
            font_size: font_size(obj),
            fill_color: fill_color(obj),
            opacity: obj.opacity,
            scale_x: obj.scale_x,
            scale_y: obj.scale_y,
            width: obj.width,
            height: obj.height,
            shadow: None,
        }
    }

    /// Fused shadow/main element: the main (visible) layer's fields, plus
    /// the shadow attachment derived from the pair's offset and fills.
    /// Fused content is never re-flowed.
    fn fused_element(&self, texts: &[DesignObject], pair: &ShadowPairing) -> TextElement {
        let main = &texts[pair.main];
        let shadow = &texts[pair.shadow];
        TextElement {
            id: format!("text_{}", pair.seed + 1),
            content: main.text.clone().unwrap_or_default(),
            x: main.left,
            y: main.top,
            font_family: font_family(main),
            font_size: font_size(main),
            fill_color: fill_color(main),
            opacity: main.opacity,
            scale_x: main.scale_x,
            scale_y: main.scale_y,
            width: main.width,
            height: main.height,
            shadow: Some(TextShadow {
                has_shadow: true,
                shadow_color: fill_color(shadow),
                shadow_dx: shadow.left - main.left,
                shadow_dy: shadow.top - main.top,
                shadow_sigma: SHADOW_SIGMA,
            }),
        }
    }
}

fn font_family(obj: &DesignObject) -> String {
    obj.font_family
        .clone()
        .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string())
}

fn font_size(obj: &DesignObject) -> f64 {
    obj.font_size.unwrap_or(DEFAULT_FONT_SIZE)
}

fn fill_color(obj: &DesignObject) -> String {
    color::normalize(obj.fill.as_deref().unwrap_or(color::FALLBACK))
}
