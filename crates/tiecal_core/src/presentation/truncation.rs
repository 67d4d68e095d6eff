//! Collapse/expand decision for note bodies.
//!
//! # Responsibility
//! - Estimate how many wrapped lines a note body needs at a given width.
//! - Decide whether the collapsed card must clip and fade the body.
//!
//! # Invariants
//! - Whitespace-only lines never count towards the estimate and never show
//!   in the collapsed text; the expanded text is the untouched original.
//! - The decision is a pure function of content, width, metrics and threshold.
//! - Every non-blank line takes at least one rendered line.

use unicode_segmentation::UnicodeSegmentation;

/// Maximum number of body lines shown on a collapsed note card.
pub const COLLAPSED_LINE_LIMIT: usize = 5;

const DEFAULT_GLYPH_RATIO: f32 = 0.5;

/// Text measurement primitive supplied by the host.
pub trait TextMeasure {
    /// Rendered width of one unwrapped line, in the same unit as the
    /// available width.
    fn line_width(&self, line: &str) -> f32;
}

/// Font-size based estimator used when no real text layout is available.
///
/// Every grapheme is assumed to be `size * average_glyph_ratio` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub size: f32,
    pub average_glyph_ratio: f32,
}

impl FontMetrics {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            average_glyph_ratio: DEFAULT_GLYPH_RATIO,
        }
    }

    pub fn with_glyph_ratio(mut self, ratio: f32) -> Self {
        self.average_glyph_ratio = ratio;
        self
    }
}

impl TextMeasure for FontMetrics {
    fn line_width(&self, line: &str) -> f32 {
        line.graphemes(true).count() as f32 * self.size * self.average_glyph_ratio
    }
}

/// Drops whitespace-only lines and joins the rest with `\n`.
pub fn strip_blank_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Estimated number of rendered lines for `content` at `width`.
///
/// A non-positive or non-finite width disables wrapping, so the estimate is
/// the count of non-blank lines.
pub fn estimate_line_count(content: &str, width: f32, measure: &impl TextMeasure) -> usize {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| wrapped_lines(measure.line_width(line), width))
        .sum()
}

/// Whether the collapsed card has to clip the body to `threshold` lines.
pub fn should_collapse(
    content: &str,
    width: f32,
    measure: &impl TextMeasure,
    threshold: usize,
) -> bool {
    estimate_line_count(content, width, measure) > threshold
}

fn wrapped_lines(line_width: f32, available: f32) -> usize {
    if !(available.is_finite() && available > 0.0) {
        return 1;
    }
    let lines = (line_width / available).ceil();
    if lines.is_finite() && lines >= 1.0 {
        lines as usize
    } else {
        1
    }
}

/// Display decision for one note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePresentation {
    /// Body needs clipping when collapsed.
    pub collapsible: bool,
    pub estimated_lines: usize,
    pub line_limit: usize,
    /// Blank-line-stripped text shown on the collapsed card.
    pub collapsed_text: String,
    /// Original text shown when expanded.
    pub expanded_text: String,
}

impl NotePresentation {
    pub fn new(content: &str, width: f32, measure: &impl TextMeasure, threshold: usize) -> Self {
        let estimated_lines = estimate_line_count(content, width, measure);
        Self {
            collapsible: estimated_lines > threshold,
            estimated_lines,
            line_limit: threshold,
            collapsed_text: strip_blank_lines(content),
            expanded_text: content.to_string(),
        }
    }

    /// Text to render for the given expansion state.
    pub fn text(&self, expanded: bool) -> &str {
        if expanded {
            &self.expanded_text
        } else {
            &self.collapsed_text
        }
    }

    /// Line cap for the body; `None` means unlimited.
    pub fn visible_lines(&self, expanded: bool) -> Option<usize> {
        if self.collapsible && !expanded {
            Some(self.line_limit)
        } else {
            None
        }
    }

    /// Bottom fade mask is drawn only on clipped, collapsed bodies.
    pub fn shows_fade_mask(&self, expanded: bool) -> bool {
        self.collapsible && !expanded
    }
}
