//! Finding the largest font size at which a block of text fits a box.
//!
//! "Fits" means every wrapped line measures no wider than the box and the
//! whole block, spacing included, is no taller than it. Larger sizes never fit
//! where a smaller one didn't, so the size is found by binary search.

use super::metrics::{TextMetrics, REFERENCE_GLYPH};
use super::wrap::{wrap, LineEntry};
use crate::colour::{colours, Colour};
use crate::error::ConfigError;
use crate::units::Pt;

/// Font size bounds, spacing and colour for one block of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub min_size: u32,
    pub max_size: u32,
    /// Extra space after every text line except the last
    pub line_spacing: Pt,
    /// Space taken by each blank line (paragraph break)
    pub paragraph_spacing: Pt,
    pub colour: Colour,
}

impl TextStyle {
    /// A black style with the default spacing (2 between lines, 10 per
    /// paragraph break)
    pub fn new(min_size: u32, max_size: u32) -> TextStyle {
        TextStyle {
            min_size,
            max_size,
            line_spacing: Pt(2.0),
            paragraph_spacing: Pt(10.0),
            colour: colours::BLACK,
        }
    }

    pub fn with_spacing(mut self, line_spacing: Pt, paragraph_spacing: Pt) -> TextStyle {
        self.line_spacing = line_spacing;
        self.paragraph_spacing = paragraph_spacing;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> TextStyle {
        self.colour = colour;
        self
    }

    /// Reject size ranges the solver can only answer with `min_size`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size > self.max_size {
            return Err(ConfigError::InvalidFontRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }
}

/// The chosen size and the text wrapped at that size
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub size: u32,
    pub lines: Vec<LineEntry>,
    /// Height of the whole block at `size`, spacing included
    pub height: Pt,
}

/// Slack allowed when comparing a measured line against the box width. A line
/// of exactly `char_budget` reference glyphs can measure an ulp over the width
/// it was budgeted from.
const WIDTH_TOLERANCE: Pt = Pt(1e-3);

/// How many characters fit on one line at `size`: the box width divided by the
/// width of [REFERENCE_GLYPH], rounded down, at least 1
pub fn char_budget<M: TextMetrics + ?Sized>(metrics: &mut M, size: u32, max_width: Pt) -> usize {
    let glyph = metrics.width(REFERENCE_GLYPH, size);
    if *glyph <= 0.0 {
        return 1;
    }
    ((*max_width / *glyph).floor() as usize).max(1)
}

/// Height of a wrapped block. Text lines take their measured height plus the
/// line spacing, paragraph breaks take the paragraph spacing. The block
/// doesn't owe line spacing after its final text line.
pub fn block_height<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    lines: &[LineEntry],
    size: u32,
    style: &TextStyle,
) -> Pt {
    let mut height = Pt::ZERO;
    for line in lines {
        height += match line {
            LineEntry::Text(text) => metrics.measure(text, size).1 + style.line_spacing,
            LineEntry::ParagraphBreak => style.paragraph_spacing,
        };
    }
    if matches!(lines.last(), Some(LineEntry::Text(_))) {
        height -= style.line_spacing;
    }
    height
}

/// Wrap `text` at the character budget for `size`
pub fn wrap_at<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    text: &str,
    size: u32,
    max_width: Pt,
) -> Vec<LineEntry> {
    let budget = char_budget(metrics, size, max_width);
    wrap(text, budget)
}

/// Whether `text` fits in the box at `size`
pub fn fits<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    text: &str,
    size: u32,
    max_width: Pt,
    max_height: Pt,
    style: &TextStyle,
) -> bool {
    let lines = wrap_at(metrics, text, size, max_width);
    let too_wide = lines
        .iter()
        .filter_map(LineEntry::as_text)
        .any(|line| metrics.width(line, size) > max_width + WIDTH_TOLERANCE);
    if too_wide {
        return false;
    }
    block_height(metrics, &lines, size, style) <= max_height
}

/// The largest size in `style.min_size..=style.max_size` at which `text` fits.
///
/// When nothing fits, `min_size` is returned anyway and the text will overflow
/// the box. An empty range also yields `min_size`.
pub fn solve<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    text: &str,
    max_width: Pt,
    max_height: Pt,
    style: &TextStyle,
) -> u32 {
    let mut low = style.min_size;
    let mut high = style.max_size;
    let mut best = style.min_size;
    let mut found = false;

    while low <= high {
        let mid = low + (high - low) / 2;
        if fits(metrics, text, mid, max_width, max_height, style) {
            best = mid;
            found = true;
            low = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            high = mid - 1;
        }
    }

    if !found {
        log::debug!(
            "text doesn't fit {}x{} even at size {}, it will overflow",
            max_width,
            max_height,
            style.min_size
        );
    }
    best
}

/// Solve for the size, then wrap and measure the text at it
pub fn fit<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    text: &str,
    max_width: Pt,
    max_height: Pt,
    style: &TextStyle,
) -> FitResult {
    let size = solve(metrics, text, max_width, max_height, style);
    let lines = wrap_at(metrics, text, size, max_width);
    let height = block_height(metrics, &lines, size, style);
    log::debug!(
        "fitted {} lines at size {size} ({height} of {max_height})",
        lines.len()
    );
    FitResult {
        size,
        lines,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonospaceMetrics;

    #[test]
    fn budget_is_floored_and_clamped() {
        let mut metrics = MonospaceMetrics::new(0.5, 1.25);
        assert_eq!(char_budget(&mut metrics, 10, Pt(52.0)), 10);
        assert_eq!(char_budget(&mut metrics, 10, Pt(3.0)), 1);

        let mut zero = MonospaceMetrics::new(0.0, 1.0);
        assert_eq!(char_budget(&mut zero, 10, Pt(100.0)), 1);
    }

    #[test]
    fn block_height_counts_spacing_and_breaks() {
        let mut metrics = MonospaceMetrics::new(0.5, 1.25);
        let style = TextStyle::new(1, 40).with_spacing(Pt(4.0), Pt(25.0));
        let lines = vec![
            LineEntry::from("L1"),
            LineEntry::ParagraphBreak,
            LineEntry::from("L2"),
            LineEntry::from("L3"),
        ];
        // 3 lines of 25 + 2 gaps of 4 + one break of 25
        assert_eq!(block_height(&mut metrics, &lines, 20, &style), Pt(108.0));
    }

    #[test]
    fn trailing_break_keeps_the_last_line_spacing() {
        let mut metrics = MonospaceMetrics::new(0.5, 1.25);
        let style = TextStyle::new(1, 40).with_spacing(Pt(4.0), Pt(25.0));
        let lines = vec![LineEntry::from("L1"), LineEntry::ParagraphBreak];
        assert_eq!(block_height(&mut metrics, &lines, 20, &style), Pt(54.0));
    }

    #[test]
    fn a_line_exactly_at_the_budget_fits() {
        let mut metrics = MonospaceMetrics::default();
        let style = TextStyle::new(4, 48);
        let text = "aaaaa bbbbb ccccc ddddd eeeee fffff ggggg hhhhh";

        // "M" is 3pt wide at size 5, so 87pt holds 29 characters and the first
        // line is exactly 29 characters long
        assert_eq!(char_budget(&mut metrics, 5, Pt(87.0)), 29);
        assert_eq!(wrap_at(&mut metrics, text, 5, Pt(87.0))[0].as_text().map(str::len), Some(29));

        let fitting: Vec<u32> = (4..=48)
            .filter(|&size| fits(&mut metrics, text, size, Pt(87.0), Pt(1000.0), &style))
            .collect();
        assert!(fitting.contains(&5));
        let largest = fitting.iter().copied().max().unwrap();
        assert_eq!(fitting, (4..=largest).collect::<Vec<u32>>());
        assert_eq!(solve(&mut metrics, text, Pt(87.0), Pt(1000.0), &style), largest);
    }

    #[test]
    fn inverted_range_returns_min() {
        let mut metrics = MonospaceMetrics::default();
        let style = TextStyle::new(30, 10);
        assert!(style.validate().is_err());
        assert_eq!(solve(&mut metrics, "hi", Pt(500.0), Pt(500.0), &style), 30);
    }

    #[test]
    fn wide_glyphs_are_rejected_by_measured_width() {
        // budget from "M" says 4 chars, but "WWWW" is measured by a font where W is wider
        struct WideW;
        impl TextMetrics for WideW {
            fn measure(&mut self, text: &str, size: u32) -> (Pt, Pt) {
                let units: f32 = text.chars().map(|c| if c == 'W' { 2.0 } else { 1.0 }).sum();
                (Pt(units * size as f32), Pt(size as f32))
            }
            fn ascent(&mut self, size: u32) -> Pt {
                Pt(size as f32)
            }
        }
        let style = TextStyle::new(1, 10);
        assert!(!fits(&mut WideW, "WWWW", 10, Pt(40.0), Pt(100.0), &style));
        assert!(fits(&mut WideW, "MMMM", 10, Pt(40.0), Pt(100.0), &style));
    }
}
