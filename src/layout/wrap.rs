//! Word wrapping under a per-line character budget.

const TABSIZE: usize = 4;

/// One entry of a wrapped text block, in reading order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LineEntry {
    /// A line of text to draw
    Text(String),
    /// A blank line in the source text. It advances the layout by the
    /// paragraph spacing instead of drawing anything.
    ParagraphBreak,
}

impl LineEntry {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LineEntry::Text(text) => Some(text.as_str()),
            LineEntry::ParagraphBreak => None,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, LineEntry::ParagraphBreak)
    }
}

impl From<&str> for LineEntry {
    fn from(text: &str) -> Self {
        LineEntry::Text(text.to_string())
    }
}

/// Wrap `text` so no line is longer than `max_chars` characters.
///
/// Every source line is a paragraph. Blank paragraphs become a
/// [LineEntry::ParagraphBreak]; the rest are wrapped greedily at word boundaries.
/// A single word longer than the budget is put on a line of its own, unbroken.
/// Whitespace between words on the same line is kept as written (tabs expand to
/// four spaces), whitespace at the ends of lines is dropped.
///
/// ```
/// use spell_cards::layout::{wrap, LineEntry};
///
/// let lines = wrap("a bb ccc\n\ndddd", 4);
/// assert_eq!(
///     lines,
///     vec![
///         LineEntry::from("a bb"),
///         LineEntry::from("ccc"),
///         LineEntry::ParagraphBreak,
///         LineEntry::from("dddd"),
///     ]
/// );
/// ```
pub fn wrap(text: &str, max_chars: usize) -> Vec<LineEntry> {
    let max_chars = max_chars.max(1);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(LineEntry::ParagraphBreak);
        } else {
            wrap_paragraph(paragraph, max_chars, &mut lines);
        }
    }
    lines
}

/// Splits a paragraph into (whitespace before, word) pairs
fn words(paragraph: &str) -> Vec<(String, &str)> {
    let mut words = Vec::new();
    let mut gap = String::new();
    let mut rest = paragraph;

    while !rest.is_empty() {
        let word_start = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        for ch in rest[..word_start].chars() {
            match ch {
                '\t' => gap.push_str(&" ".repeat(TABSIZE)),
                _ => gap.push(' '),
            }
        }
        rest = &rest[word_start..];
        if rest.is_empty() {
            break;
        }

        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        words.push((std::mem::take(&mut gap), &rest[..word_end]));
        rest = &rest[word_end..];
    }

    words
}

fn wrap_paragraph(paragraph: &str, max_chars: usize, lines: &mut Vec<LineEntry>) {
    let mut line = String::new();
    let mut line_len = 0;

    for (gap, word) in words(paragraph) {
        let word_len = word.chars().count();

        if line_len > 0 && line_len + gap.len() + word_len <= max_chars {
            line.push_str(&gap);
            line.push_str(word);
            line_len += gap.len() + word_len;
            continue;
        }

        if line_len > 0 {
            lines.push(LineEntry::Text(std::mem::take(&mut line)));
        }
        line.push_str(word);
        line_len = word_len;
    }

    if line_len > 0 {
        lines.push(LineEntry::Text(line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[LineEntry]) -> Vec<&str> {
        lines.iter().filter_map(LineEntry::as_text).collect()
    }

    #[test]
    fn greedy_wrap_respects_budget() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(
            texts(&lines),
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
    }

    #[test]
    fn long_words_are_never_split() {
        let lines = wrap("a antidisestablishmentarianism b", 5);
        assert_eq!(texts(&lines), vec!["a", "antidisestablishmentarianism", "b"]);
    }

    #[test]
    fn blank_lines_become_markers() {
        let lines = wrap("one\n\n  \ntwo\r\n\r\nthree\n", 20);
        assert_eq!(
            lines,
            vec![
                LineEntry::from("one"),
                LineEntry::ParagraphBreak,
                LineEntry::ParagraphBreak,
                LineEntry::from("two"),
                LineEntry::ParagraphBreak,
                LineEntry::from("three"),
            ]
        );
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let lines = wrap("  Range:\t60 feet  ", 30);
        assert_eq!(texts(&lines), vec!["Range:    60 feet"]);
    }

    #[test]
    fn zero_budget_is_clamped() {
        let lines = wrap("ab c", 0);
        assert_eq!(texts(&lines), vec!["ab", "c"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("", 10).is_empty());
    }
}
