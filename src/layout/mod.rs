//! # Heuristic Layout Normalizer
//!
//! The part of the pipeline that needs actual judgment: rediscovering
//! shadow/main text pairs the export schema never recorded ([`shadow`])
//! and re-flowing text content into wrapped or vertically stacked lines
//! ([`linebreak`]).

pub mod linebreak;
pub mod shadow;

pub use linebreak::{LINE_BREAK, VerticalPolicy, reflow};
pub use shadow::{
    LuminanceClassifier, PaletteClassifier, ShadowClassifier, ShadowPairing, ShadowRole,
    resolve_pairs,
};
