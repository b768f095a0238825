use super::fit::{fit, TextStyle};
use super::metrics::TextMetrics;
use super::wrap::LineEntry;
use crate::colour::Colour;
use crate::font::Font;
use crate::form_xobject::FormXObject;
use crate::page::{SpanFont, SpanLayout};
use crate::units::Pt;
use id_arena::Id;

/// Where a block of text may go, in canvas coordinates (origin top-left, y down).
///
/// `origin` is the centre of the box for [layout_centered] and its top-left
/// corner for [layout_left_aligned].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub origin: (Pt, Pt),
    pub max_width: Pt,
    pub max_height: Pt,
}

impl LayoutBox {
    pub const fn new(x: f32, y: f32, max_width: f32, max_height: f32) -> LayoutBox {
        LayoutBox {
            origin: (Pt(x), Pt(y)),
            max_width: Pt(max_width),
            max_height: Pt(max_height),
        }
    }
}

/// One line of text placed on the canvas (y down)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Left edge of the line
    pub x: Pt,
    /// Top of the line box
    pub top: Pt,
    /// `top` plus the font ascent at the fitted size
    pub baseline: Pt,
    pub width: Pt,
}

/// A fitted and positioned block of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub size: u32,
    pub height: Pt,
    pub lines: Vec<PlacedLine>,
}

/// Something text lines can be drawn onto
pub trait TextCanvas {
    fn draw_line(&mut self, line: &PlacedLine, size: u32, colour: Colour);
}

fn stack_lines<M, F>(
    metrics: &mut M,
    lines: &[LineEntry],
    size: u32,
    top: Pt,
    style: &TextStyle,
    mut left_edge: F,
) -> Vec<PlacedLine>
where
    M: TextMetrics + ?Sized,
    F: FnMut(Pt) -> Pt,
{
    let ascent = metrics.ascent(size);
    let mut y = top;
    let mut placed = Vec::with_capacity(lines.len());

    for entry in lines {
        match entry {
            LineEntry::Text(text) => {
                let (width, height) = metrics.measure(text, size);
                placed.push(PlacedLine {
                    text: text.clone(),
                    x: left_edge(width),
                    top: y,
                    baseline: y + ascent,
                    width,
                });
                y += height + style.line_spacing;
            }
            LineEntry::ParagraphBreak => y += style.paragraph_spacing,
        }
    }

    placed
}

/// Fit `text` into `bounds` and centre every line on `bounds.origin`. The block
/// as a whole is centred vertically.
pub fn layout_centered<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    text: &str,
    bounds: &LayoutBox,
    style: &TextStyle,
) -> TextLayout {
    let fitted = fit(metrics, text, bounds.max_width, bounds.max_height, style);
    let (cx, cy) = bounds.origin;
    let lines = stack_lines(
        metrics,
        &fitted.lines,
        fitted.size,
        cy - fitted.height / 2.0,
        style,
        |width| cx - width / 2.0,
    );
    TextLayout {
        size: fitted.size,
        height: fitted.height,
        lines,
    }
}

/// Fit `text` into `bounds` and stack lines down from its top-left corner.
/// Paragraph breaks move down by the paragraph spacing.
pub fn layout_left_aligned<M: TextMetrics + ?Sized>(
    metrics: &mut M,
    text: &str,
    bounds: &LayoutBox,
    style: &TextStyle,
) -> TextLayout {
    let fitted = fit(metrics, text, bounds.max_width, bounds.max_height, style);
    let (x, y) = bounds.origin;
    let lines = stack_lines(metrics, &fitted.lines, fitted.size, y, style, |_| x);
    TextLayout {
        size: fitted.size,
        height: fitted.height,
        lines,
    }
}

fn draw<C: TextCanvas + ?Sized>(canvas: &mut C, layout: &TextLayout, colour: Colour) {
    for line in layout.lines.iter() {
        canvas.draw_line(line, layout.size, colour);
    }
}

/// [layout_centered], then draw the lines
pub fn render_centered<C, M>(
    canvas: &mut C,
    metrics: &mut M,
    text: &str,
    bounds: &LayoutBox,
    style: &TextStyle,
) -> TextLayout
where
    C: TextCanvas + ?Sized,
    M: TextMetrics + ?Sized,
{
    let layout = layout_centered(metrics, text, bounds, style);
    draw(canvas, &layout, style.colour);
    layout
}

/// [layout_left_aligned], then draw the lines
pub fn render_left_aligned<C, M>(
    canvas: &mut C,
    metrics: &mut M,
    text: &str,
    bounds: &LayoutBox,
    style: &TextStyle,
) -> TextLayout
where
    C: TextCanvas + ?Sized,
    M: TextMetrics + ?Sized,
{
    let layout = layout_left_aligned(metrics, text, bounds, style);
    draw(canvas, &layout, style.colour);
    layout
}

/// Draws lines as text spans on a [FormXObject], flipping the y-down layout
/// coordinates into the form's y-up space.
pub struct FormCanvas<'a> {
    form: &'a mut FormXObject,
    font: Id<Font>,
}

impl<'a> FormCanvas<'a> {
    pub fn new(form: &'a mut FormXObject, font: Id<Font>) -> FormCanvas<'a> {
        FormCanvas { form, font }
    }
}

impl TextCanvas for FormCanvas<'_> {
    fn draw_line(&mut self, line: &PlacedLine, size: u32, colour: Colour) {
        let y = self.form.height() - line.baseline;
        self.form.add_span(SpanLayout {
            text: line.text.clone(),
            font: SpanFont {
                id: self.font,
                size: Pt(size as f32),
            },
            colour,
            coords: (line.x, y),
        });
    }
}
