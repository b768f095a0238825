//! Content stream rendering shared by print sheets ([Page]) and card faces
//! ([FormXObject]).

use crate::error::CardError;
use crate::font::Font;
use crate::form_xobject::FormXObject;
use crate::image::Image;
use crate::page::{PageContents, SpanLayout};
use crate::refs::{ObjectReferences, RefType};
use id_arena::Arena;
use pdf_writer::{writers::Resources, Finish, Name};
use std::io::Write;

#[cfg(doc)]
use crate::page::Page;

/// Converts page contents into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for item in contents.iter() {
        match item {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Image(image) => {
                let rect = &image.position;
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    *rect.width(),
                    *rect.height(),
                    *rect.x1,
                    *rect.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::RawContent(raw) => {
                write!(&mut content, "q\n")?;
                content.write_all(raw.as_slice())?;
                write!(&mut content, "\nQ\n")?;
            }
            PageContents::FormXObject(layout) => {
                let [a, b, c, d, e, f] = layout.transform.matrix();
                write!(&mut content, "q\n{a} {b} {c} {d} {e} {f} cm\n")?;
                write!(&mut content, "/X{} Do\n", layout.xobj_id.index())?;
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font = first.font;
    let mut current_colour = first.colour;
    write!(content, "/F{} {} Tf\n", current_font.id.index(), *current_font.size)?;
    write!(content, "{}\n", current_colour.fill_operator())?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(content, "/F{} {} Tf\n", current_font.id.index(), *current_font.size)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write!(content, "{}\n", current_colour.fill_operator())?;
        }

        let font = &fonts[current_font.id];
        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", font.glyph_for(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

/// Every content stream can use every font, image and form in the document
/// under the names `F<n>`, `I<n>` and `X<n>`.
pub(crate) fn write_resources(
    mut resources: Resources<'_>,
    refs: &ObjectReferences,
    fonts: &Arena<Font>,
    images: &Arena<Image>,
    forms: &Arena<FormXObject>,
) -> Result<(), CardError> {
    let mut resource_fonts = resources.fonts();
    for (id, _) in fonts.iter() {
        resource_fonts.pair(
            Name(format!("F{}", id.index()).as_bytes()),
            refs.require(RefType::Font(id.index()))?,
        );
    }
    resource_fonts.finish();

    let mut xobjects = resources.x_objects();
    for (id, _) in images.iter() {
        xobjects.pair(
            Name(format!("I{}", id.index()).as_bytes()),
            refs.require(RefType::Image(id.index()))?,
        );
    }
    for (id, _) in forms.iter() {
        xobjects.pair(
            Name(format!("X{}", id.index()).as_bytes()),
            refs.require(RefType::FormXObject(id.index()))?,
        );
    }
    xobjects.finish();
    resources.finish();

    Ok(())
}

/// Deflate a rendered content stream
pub(crate) fn compress(rendered: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(
        rendered,
        miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
    )
}
