//! Cut-ready decorations: dashed cut guides, bleed fill and bleed borders.
//!
//! Drawn in that order around the card images, only for occupied slots, so the
//! guides disappear under the black bleed wherever the cut is accurate.

use crate::colour::colours;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use pdf_writer::Content;

/// Dash on / off lengths of the cut guides
pub const GUIDE_DASH: [f32; 2] = [3.0, 3.0];
pub const GUIDE_WIDTH: f32 = 0.5;

/// Distinct x positions of card edges and distinct y positions of card edges,
/// each sorted ascending
pub fn guide_positions(cards: &[Rect]) -> (Vec<Pt>, Vec<Pt>) {
    let mut xs: Vec<Pt> = cards.iter().flat_map(|r| [r.x1, r.x2]).collect();
    let mut ys: Vec<Pt> = cards.iter().flat_map(|r| [r.y1, r.y2]).collect();
    for edges in [&mut xs, &mut ys] {
        edges.sort_by(|a, b| a.0.total_cmp(&b.0));
        edges.dedup();
    }
    (xs, ys)
}

/// Grey dashed lines across the whole page along every card edge
pub fn cut_guides(page_size: PageSize, cards: &[Rect]) -> Content {
    let (xs, ys) = guide_positions(cards);
    let (width, height) = page_size;

    let mut content = Content::new();
    content.set_dash_pattern(GUIDE_DASH, 0.0);
    colours::GUIDE_GREY.set_stroke(&mut content);
    content.set_line_width(GUIDE_WIDTH);
    for x in xs {
        content.move_to(*x, 0.0);
        content.line_to(*x, *height);
    }
    for y in ys {
        content.move_to(0.0, *y);
        content.line_to(*width, *y);
    }
    content.stroke();
    content
}

/// Solid black rectangles covering each card plus its bleed
pub fn bleed_fill(cards: &[Rect], bleed: Pt) -> Content {
    let mut content = Content::new();
    colours::BLACK.set_fill(&mut content);
    for card in cards {
        push_rect(&mut content, &card.expand(bleed));
    }
    content.fill_nonzero();
    content
}

/// A black outline, as wide as the bleed, around each bleed box
pub fn bleed_border(cards: &[Rect], bleed: Pt) -> Content {
    let mut content = Content::new();
    colours::BLACK.set_stroke(&mut content);
    content.set_line_width(*bleed);
    for card in cards {
        push_rect(&mut content, &card.expand(bleed));
    }
    content.stroke();
    content
}

fn push_rect(content: &mut Content, rect: &Rect) {
    content.rect(*rect.x1, *rect.y1, *rect.width(), *rect.height());
}
