//! Shadow/main text pairing.
//!
//! Design exports fake drop shadows by duplicating a textbox: one copy in a
//! dark "shadow" tone, offset by a couple of pixels, underneath a copy in
//! the visible highlight tone. The export schema records no relationship
//! between the two, so the pairing has to be rediscovered from geometry and
//! color.
//!
//! Discovery is functional: [`resolve_pairs`] computes the complete pairing
//! set up front, and the assembler derives the final text list as a fold
//! over "all text objects minus bound pair members". No mutable traversal
//! state escapes this module.

use std::collections::BTreeSet;

use crate::color;
use crate::design::DesignObject;

/// Positional tolerance, in canvas units, for pairing candidates.
pub const PAIR_TOLERANCE: f64 = 5.0;

/// Fixed blur radius attached to every materialized shadow.
pub const SHADOW_SIGMA: f64 = 2.0;

/// Shadow tones observed in the source palettes, normalized.
const SHADOW_TONES: &[&str] = &["#67352b"];

/// Highlight (visible-layer) tones observed in the source palettes.
const HIGHLIGHT_TONES: &[&str] = &["#fbd835"];

/// Which of two fills is the shadow layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRole {
    /// The first fill is the shadow, the second the visible main.
    First,
    /// The second fill is the shadow, the first the visible main.
    Second,
}

/// Strategy for telling the shadow layer from the main layer of a
/// candidate pair.
///
/// Both fills arrive normalized (see [`color::normalize`]). Returning
/// `None` declines the pair entirely: both textboxes are then emitted as
/// independent elements.
pub trait ShadowClassifier: Send + Sync {
    fn classify(&self, first: &str, second: &str) -> Option<ShadowRole>;
}

/// Reference-palette classifier: one fill must be a known shadow tone and
/// the other a known highlight tone.
///
/// This is the default strategy. It only understands the palette observed
/// in the source documents, which is exactly the conservative behavior the
/// pipeline wants: an unrecognized color pair is left alone rather than
/// guessed at.
#[derive(Debug, Clone)]
pub struct PaletteClassifier {
    pub shadow_tones: Vec<String>,
    pub highlight_tones: Vec<String>,
}

impl Default for PaletteClassifier {
    fn default() -> Self {
        Self {
            shadow_tones: SHADOW_TONES.iter().map(|s| s.to_string()).collect(),
            highlight_tones: HIGHLIGHT_TONES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ShadowClassifier for PaletteClassifier {
    fn classify(&self, first: &str, second: &str) -> Option<ShadowRole> {
        let shadow = |fill: &str| self.shadow_tones.iter().any(|t| t == fill);
        let highlight = |fill: &str| self.highlight_tones.iter().any(|t| t == fill);
        if shadow(first) && highlight(second) {
            Some(ShadowRole::First)
        } else if shadow(second) && highlight(first) {
            Some(ShadowRole::Second)
        } else {
            None
        }
    }
}

/// Luminance-based classifier: the darker fill is the shadow.
///
/// Alternative to [`PaletteClassifier`] for documents outside the known
/// palette. Pairs whose luma difference falls below `min_contrast` are
/// declined, and the override table wins over the luminance comparison for
/// specific (shadow, highlight) combinations.
#[derive(Debug, Clone)]
pub struct LuminanceClassifier {
    /// Minimum luma difference (0–1) before the comparison is trusted.
    pub min_contrast: f64,
    /// Known (shadow, highlight) fill pairs checked before the comparison.
    pub overrides: Vec<(String, String)>,
}

impl Default for LuminanceClassifier {
    fn default() -> Self {
        Self {
            min_contrast: 0.05,
            overrides: Vec::new(),
        }
    }
}

impl ShadowClassifier for LuminanceClassifier {
    fn classify(&self, first: &str, second: &str) -> Option<ShadowRole> {
        for (shadow, highlight) in &self.overrides {
            if first == shadow && second == highlight {
                return Some(ShadowRole::First);
            }
            if second == shadow && first == highlight {
                return Some(ShadowRole::Second);
            }
        }
        let first_luma = color::luminance(first)?;
        let second_luma = color::luminance(second)?;
        if (first_luma - second_luma).abs() < self.min_contrast {
            return None;
        }
        Some(if first_luma < second_luma {
            ShadowRole::First
        } else {
            ShadowRole::Second
        })
    }
}

/// A materialized pairing, as indices into the classified text sequence.
///
/// `seed` is the index that initiated the pairing — the fused element takes
/// its place in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowPairing {
    pub shadow: usize,
    pub main: usize,
    pub seed: usize,
}

/// Compute the full set of shadow pairings over the text sequence.
///
/// Walks seeds in document order, skipping objects already bound into a
/// pairing. For each seed, the first candidate (also in document order)
/// satisfying the pairing relation is decisive: either the classifier
/// assigns roles and the pairing is materialized, or the seed stays
/// standalone. There is no fallback scan past the first geometric match.
pub fn resolve_pairs(
    texts: &[DesignObject],
    classifier: &dyn ShadowClassifier,
) -> Vec<ShadowPairing> {
    let fills: Vec<Option<String>> = texts
        .iter()
        .map(|t| t.fill.as_deref().map(color::normalize))
        .collect();

    let mut bound: BTreeSet<usize> = BTreeSet::new();
    let mut pairs = Vec::new();

    for seed in 0..texts.len() {
        if bound.contains(&seed) {
            continue;
        }
        let candidate = (0..texts.len()).find(|&other| {
            other != seed
                && !bound.contains(&other)
                && is_pair_candidate(&texts[seed], &texts[other], &fills[seed], &fills[other])
        });
        let Some(other) = candidate else { continue };
        let (Some(seed_fill), Some(other_fill)) = (&fills[seed], &fills[other]) else {
            continue;
        };
        let Some(role) = classifier.classify(seed_fill, other_fill) else {
            continue;
        };
        let (shadow, main) = match role {
            ShadowRole::First => (seed, other),
            ShadowRole::Second => (other, seed),
        };
        bound.insert(seed);
        bound.insert(other);
        pairs.push(ShadowPairing { shadow, main, seed });
    }
    pairs
}

/// The geometric half of the pairing relation: same text, distinct ids,
/// positions within tolerance, different fills.
///
/// Id inequality is over optional ids: two anonymous duplicates compare
/// equal and are left alone, while an anonymous object can still pair with
/// a named one.
fn is_pair_candidate(
    a: &DesignObject,
    b: &DesignObject,
    a_fill: &Option<String>,
    b_fill: &Option<String>,
) -> bool {
    a.text == b.text
        && a.id != b.id
        && (a.left - b.left).abs() <= PAIR_TOLERANCE
        && (a.top - b.top).abs() <= PAIR_TOLERANCE
        && a_fill != b_fill
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::ObjectKind;

    const SHADOW_FILL: &str = "rgb(103.00215, 53.0043, 43.0032)";
    const HIGHLIGHT_FILL: &str = "rgb(251.99609999999998, 216.9999, 53.0043)";

    fn textbox(id: &str, text: &str, left: f64, top: f64, fill: &str) -> DesignObject {
        DesignObject {
            kind: ObjectKind::Textbox,
            id: Some(id.to_string()),
            text: Some(text.to_string()),
            left,
            top,
            fill: Some(fill.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_palette_classifier_both_orders() {
        let palette = PaletteClassifier::default();
        assert_eq!(
            palette.classify("#67352b", "#fbd835"),
            Some(ShadowRole::First)
        );
        assert_eq!(
            palette.classify("#fbd835", "#67352b"),
            Some(ShadowRole::Second)
        );
        assert_eq!(palette.classify("#112233", "#445566"), None);
        // Two shadow tones cannot form a pair
        assert_eq!(palette.classify("#67352b", "#67352b"), None);
    }

    #[test]
    fn test_basic_pairing() {
        // Main at (10,10), shadow offset to (12,11)
        let texts = vec![
            textbox("t1", "A", 10.0, 10.0, HIGHLIGHT_FILL),
            textbox("t2", "A", 12.0, 11.0, SHADOW_FILL),
        ];
        let pairs = resolve_pairs(&texts, &PaletteClassifier::default());
        assert_eq!(
            pairs,
            vec![ShadowPairing {
                shadow: 1,
                main: 0,
                seed: 0
            }]
        );
    }

    #[test]
    fn test_unknown_palette_declines() {
        let texts = vec![
            textbox("t1", "A", 10.0, 10.0, "rgb(10, 20, 30)"),
            textbox("t2", "A", 12.0, 11.0, "rgb(200, 210, 220)"),
        ];
        assert!(resolve_pairs(&texts, &PaletteClassifier::default()).is_empty());
    }

    #[test]
    fn test_position_tolerance() {
        let near = vec![
            textbox("t1", "A", 0.0, 0.0, SHADOW_FILL),
            textbox("t2", "A", 5.0, 5.0, HIGHLIGHT_FILL),
        ];
        assert_eq!(resolve_pairs(&near, &PaletteClassifier::default()).len(), 1);

        let far = vec![
            textbox("t1", "A", 0.0, 0.0, SHADOW_FILL),
            textbox("t2", "A", 5.1, 0.0, HIGHLIGHT_FILL),
        ];
        assert!(resolve_pairs(&far, &PaletteClassifier::default()).is_empty());
    }

    #[test]
    fn test_different_text_never_pairs() {
        let texts = vec![
            textbox("t1", "A", 10.0, 10.0, SHADOW_FILL),
            textbox("t2", "B", 12.0, 11.0, HIGHLIGHT_FILL),
        ];
        assert!(resolve_pairs(&texts, &PaletteClassifier::default()).is_empty());
    }

    #[test]
    fn test_same_fill_never_pairs() {
        let texts = vec![
            textbox("t1", "A", 10.0, 10.0, SHADOW_FILL),
            textbox("t2", "A", 12.0, 11.0, SHADOW_FILL),
        ];
        assert!(resolve_pairs(&texts, &PaletteClassifier::default()).is_empty());
    }

    #[test]
    fn test_id_inequality_over_optionals() {
        // Two anonymous duplicates compare equal and never pair
        let mut a = textbox("x", "A", 10.0, 10.0, SHADOW_FILL);
        let mut b = textbox("x", "A", 12.0, 11.0, HIGHLIGHT_FILL);
        a.id = None;
        b.id = None;
        assert!(resolve_pairs(&[a.clone(), b.clone()], &PaletteClassifier::default()).is_empty());

        // An anonymous object still pairs with a named one
        b.id = Some("t2".to_string());
        assert_eq!(resolve_pairs(&[a, b], &PaletteClassifier::default()).len(), 1);
    }

    #[test]
    fn test_bound_members_not_reused() {
        // Two shadow copies near one main: only the first pairing forms
        let texts = vec![
            textbox("s1", "A", 12.0, 11.0, SHADOW_FILL),
            textbox("m", "A", 10.0, 10.0, HIGHLIGHT_FILL),
            textbox("s2", "A", 13.0, 12.0, SHADOW_FILL),
        ];
        let pairs = resolve_pairs(&texts, &PaletteClassifier::default());
        assert_eq!(
            pairs,
            vec![ShadowPairing {
                shadow: 0,
                main: 1,
                seed: 0
            }]
        );
    }

    #[test]
    fn test_luminance_classifier() {
        let classifier = LuminanceClassifier::default();
        assert_eq!(
            classifier.classify("#67352b", "#fbd835"),
            Some(ShadowRole::First)
        );
        assert_eq!(
            classifier.classify("#fbd835", "#67352b"),
            Some(ShadowRole::Second)
        );
        // Near-identical lumas decline
        assert_eq!(classifier.classify("#808080", "#7f7f7f"), None);
        // Unparseable fills decline
        assert_eq!(classifier.classify("#808080", "salmon"), None);
    }

    #[test]
    fn test_luminance_override_table() {
        let classifier = LuminanceClassifier {
            overrides: vec![("#ffffff".to_string(), "#000000".to_string())],
            ..Default::default()
        };
        // The table declares white the shadow even though it is brighter
        assert_eq!(
            classifier.classify("#ffffff", "#000000"),
            Some(ShadowRole::First)
        );
        assert_eq!(
            classifier.classify("#000000", "#ffffff"),
            Some(ShadowRole::Second)
        );
    }
}
