use crate::font::Font;
use crate::units::Pt;
use std::collections::HashMap;

/// The glyph whose width sets the per-line character budget
pub const REFERENCE_GLYPH: &str = "M";

/// Measures single lines of text at integer font sizes.
///
/// Implementations must be deterministic for a given (font, size, text).
/// `&mut self` lets implementations memoise per-size data.
pub trait TextMetrics {
    /// Width and height of one line of `text` at `size`
    fn measure(&mut self, text: &str, size: u32) -> (Pt, Pt);

    /// Distance from the top of a line box down to its baseline
    fn ascent(&mut self, size: u32) -> Pt;

    fn width(&mut self, text: &str, size: u32) -> Pt {
        self.measure(text, size).0
    }
}

/// Per-size data derived from the font once and then reused
#[derive(Debug, Clone)]
struct SizedFont {
    scale: f32,
    ascent: Pt,
    line_height: Pt,
}

/// Text metrics backed by a TrueType / OpenType [Font].
///
/// Advances are copied out of the font when the metrics are created, so the
/// font itself isn't borrowed afterwards. Scaled line data is cached per size
/// the first time that size is measured.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    advances: HashMap<char, u16>,
    fallback_advance: u16,
    sizes: HashMap<u32, SizedFont>,
}

impl FontMetrics {
    pub fn new(font: &Font) -> FontMetrics {
        FontMetrics::from_parts(
            font.units_per_em(),
            font.ascender(),
            font.descender(),
            font.char_advances(),
            font.fallback_advance(),
        )
    }

    pub(crate) fn from_parts(
        units_per_em: u16,
        ascender: i16,
        descender: i16,
        advances: HashMap<char, u16>,
        fallback_advance: u16,
    ) -> FontMetrics {
        FontMetrics {
            units_per_em: units_per_em.max(1) as f32,
            ascender: ascender as f32,
            descender: descender as f32,
            advances,
            fallback_advance,
            sizes: HashMap::new(),
        }
    }

    /// Number of font sizes measured so far
    pub fn cached_sizes(&self) -> usize {
        self.sizes.len()
    }

    fn sized(&mut self, size: u32) -> &SizedFont {
        let (units_per_em, ascender, descender) =
            (self.units_per_em, self.ascender, self.descender);
        self.sizes.entry(size).or_insert_with(|| {
            let scale = size as f32 / units_per_em;
            SizedFont {
                scale,
                ascent: Pt(ascender * scale),
                line_height: Pt((ascender - descender) * scale),
            }
        })
    }
}

impl TextMetrics for FontMetrics {
    fn measure(&mut self, text: &str, size: u32) -> (Pt, Pt) {
        if text.is_empty() {
            return (Pt::ZERO, Pt::ZERO);
        }
        let units: u32 = text
            .chars()
            .map(|ch| {
                self.advances
                    .get(&ch)
                    .copied()
                    .unwrap_or(self.fallback_advance) as u32
            })
            .sum();
        let sized = self.sized(size);
        (Pt(units as f32 * sized.scale), sized.line_height)
    }

    fn ascent(&mut self, size: u32) -> Pt {
        self.sized(size).ascent
    }
}

/// Fixed-advance metrics: every character is `advance * size` wide and every
/// line is `line_height * size` tall.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub line_height: f32,
    pub ascent: f32,
}

impl MonospaceMetrics {
    pub fn new(advance: f32, line_height: f32) -> MonospaceMetrics {
        MonospaceMetrics {
            advance,
            line_height,
            ascent: line_height * 0.8,
        }
    }

    /// Monospace metrics matching a monospaced [Font]
    pub fn from_font(font: &Font) -> MonospaceMetrics {
        let upem = font.units_per_em().max(1) as f32;
        MonospaceMetrics {
            advance: font.advance(font.glyph_for('M')) as f32 / upem,
            line_height: (font.ascender() as f32 - font.descender() as f32) / upem,
            ascent: font.ascender() as f32 / upem,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        MonospaceMetrics::new(0.6, 1.2)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&mut self, text: &str, size: u32) -> (Pt, Pt) {
        if text.is_empty() {
            return (Pt::ZERO, Pt::ZERO);
        }
        let size = size as f32;
        (
            Pt(text.chars().count() as f32 * self.advance * size),
            Pt(self.line_height * size),
        )
    }

    fn ascent(&mut self, size: u32) -> Pt {
        Pt(self.ascent * size as f32)
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for &mut T {
    fn measure(&mut self, text: &str, size: u32) -> (Pt, Pt) {
        (**self).measure(text, size)
    }

    fn ascent(&mut self, size: u32) -> Pt {
        (**self).ascent(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_font() -> FontMetrics {
        let advances = [('M', 800), ('i', 250), (' ', 300)].into_iter().collect();
        FontMetrics::from_parts(1000, 800, -200, advances, 500)
    }

    #[test]
    fn font_metrics_scale_advances_with_size() {
        let mut metrics = toy_font();
        let (w, h) = metrics.measure("Mi M", 10);
        assert!((*w - (800.0 + 250.0 + 300.0 + 800.0) / 100.0).abs() < 1e-4);
        assert!((*h - 10.0).abs() < 1e-4);
        assert!((*metrics.ascent(10) - 8.0).abs() < 1e-4);
    }

    #[test]
    fn unknown_characters_use_the_fallback_advance() {
        let mut metrics = toy_font();
        assert!((*metrics.width("ж", 20) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn empty_text_has_no_extent() {
        assert_eq!(toy_font().measure("", 30), (Pt::ZERO, Pt::ZERO));
        assert_eq!(MonospaceMetrics::default().measure("", 30), (Pt::ZERO, Pt::ZERO));
    }

    #[test]
    fn sizes_are_cached_once() {
        let mut metrics = toy_font();
        metrics.measure("M", 12);
        metrics.measure("MMM", 12);
        metrics.measure("M", 14);
        assert_eq!(metrics.cached_sizes(), 2);
    }

    #[test]
    fn monospace_is_linear_in_characters_and_size() {
        let mut metrics = MonospaceMetrics::new(0.5, 1.25);
        assert_eq!(metrics.measure("abcd", 10), (Pt(20.0), Pt(12.5)));
        assert_eq!(metrics.measure("abcd", 20), (Pt(40.0), Pt(25.0)));
    }
}
