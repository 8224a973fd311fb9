//! Per-block line re-flow: fixed-width wrapping and vertical stacking.
//!
//! The renderer treats `\r` inside text content as a line break. Narrow
//! blocks are re-chunked to a character budget; a known set of phrases is
//! stacked one character per line regardless of the wrap outcome.

use crate::design::DesignObject;

/// Line-break marker the downstream renderer understands.
pub const LINE_BREAK: char = '\r';

/// Block width (canvas units) below which fixed-width wrapping kicks in.
const NARROW_WIDTH: f64 = 80.0;

/// Character budget per line for narrow blocks; also the minimum content
/// length before wrapping is worth doing.
const NARROW_CHARS_PER_LINE: usize = 4;

/// Fudge factor for the proportional-font character-budget estimate.
const BUDGET_FACTOR: f64 = 1.2;

/// Phrases the source designs lay out vertically.
const VERTICAL_PHRASES: &[&str] = &["亮丽金黄表皮", "蛋香浓郁", "精选原材"];

/// Trigger for forced vertical (one character per line) stacking.
///
/// The default is the enumerated phrase list, which only understands the
/// known poster designs. `AspectRatio` generalizes the same intent to any
/// narrow-and-tall block; it changes output for unknown documents, so it
/// is a separate opt-in rather than the default.
#[derive(Debug, Clone)]
pub enum VerticalPolicy {
    /// Stack blocks whose flattened content is in the given set.
    Enumerated(Vec<String>),
    /// Stack narrow-and-tall blocks: width < 80, height > 1.5 × width,
    /// more than one character.
    AspectRatio,
}

impl Default for VerticalPolicy {
    fn default() -> Self {
        Self::Enumerated(known_vertical_phrases())
    }
}

impl VerticalPolicy {
    /// Whether `obj`'s (flattened) content should be stacked vertically.
    fn wants_vertical(&self, obj: &DesignObject, flat: &str) -> bool {
        match self {
            Self::Enumerated(phrases) => phrases.iter().any(|p| p == flat),
            Self::AspectRatio => {
                obj.width > 0.0
                    && obj.height > 0.0
                    && flat.chars().count() > 1
                    && obj.width < NARROW_WIDTH
                    && obj.height > obj.width * 1.5
            }
        }
    }
}

/// The phrase set wired into the default [`VerticalPolicy`].
pub fn known_vertical_phrases() -> Vec<String> {
    VERTICAL_PHRASES.iter().map(|p| p.to_string()).collect()
}

/// Strip any pre-existing line-break markers from content.
pub fn flatten(content: &str) -> String {
    content.chars().filter(|&c| c != LINE_BREAK).collect()
}

/// Character budget per line for a block of the given width and font size.
///
/// Narrow blocks get the fixed budget of 4; wider blocks get a crude
/// proportional-font estimate (`width / fontSize × 1.2`, truncated). This
/// is a character-count heuristic, not glyph measurement.
pub fn chars_per_line(width: f64, font_size: f64) -> usize {
    if width < NARROW_WIDTH {
        return NARROW_CHARS_PER_LINE;
    }
    let budget = if font_size > 0.0 {
        (width / font_size * BUDGET_FACTOR) as usize
    } else {
        1
    };
    budget.max(1)
}

/// Re-chunk content into fixed-size segments joined by [`LINE_BREAK`].
pub fn wrap_fixed(content: &str, per_line: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(per_line.max(1))
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(&LINE_BREAK.to_string())
}

/// Stack content one character per line.
pub fn stack_vertical(content: &str) -> String {
    content
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(&LINE_BREAK.to_string())
}

/// Re-flow a text block's content.
///
/// Pre-existing markers are stripped first, then the two rules apply in
/// priority order: fixed-width wrap for narrow blocks, and forced vertical
/// stacking per `policy`, which overrides the wrap outcome. Only the
/// content string is produced; no other field of the block is touched.
pub fn reflow(obj: &DesignObject, policy: &VerticalPolicy) -> String {
    let flat = flatten(obj.text.as_deref().unwrap_or(""));
    let font_size = obj.font_size.unwrap_or(crate::design::DEFAULT_FONT_SIZE);

    let mut content = flat.clone();
    if obj.width > 0.0
        && obj.width < NARROW_WIDTH
        && flat.chars().count() > NARROW_CHARS_PER_LINE
    {
        content = wrap_fixed(&flat, chars_per_line(obj.width, font_size));
    }
    if policy.wants_vertical(obj, &flat) {
        content = stack_vertical(&flat);
    }
    content
}
