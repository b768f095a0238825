//! Form XObjects: reusable content containers.
//!
//! Each rendered card face is a Form XObject. It is drawn once into the PDF and
//! then placed on print sheets with a [`Transform`] that scales it into a slot.
//! Forms use PDF's coordinate system where (0, 0) is at the bottom-left.

use crate::content::{compress, render_contents, write_resources};
use crate::error::CardError;
use crate::font::Font;
use crate::image::Image;
use crate::page::{ImageLayout, PageContents, SpanLayout};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::transform::Transform;
use crate::units::*;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Filter, Pdf};

/// A reusable content container that can be placed on pages with
/// transformations.
///
/// ```
/// use spell_cards::{Document, FormXObject, FormXObjectLayout, Page, Pt, Transform};
/// use spell_cards::pagesize;
///
/// let mut doc = Document::default();
/// let form_id = doc.add_form_xobject(FormXObject::new(Pt(750.0), Pt(1050.0)));
///
/// let mut page = Page::new(pagesize::A4);
/// page.add_form_xobject(FormXObjectLayout {
///     xobj_id: form_id,
///     transform: Transform::scale(0.24, 0.24).with_translate(Pt(20.0), Pt(20.0)),
/// });
/// doc.add_page(page);
/// ```
#[derive(Debug)]
pub struct FormXObject {
    /// Bounding box of the form content
    pub bbox: Rect,
    pub contents: Vec<PageContents>,
}

impl FormXObject {
    /// Create a new Form XObject with the given dimensions
    pub fn new(width: Pt, height: Pt) -> Self {
        FormXObject {
            bbox: Rect::from_origin(Pt::ZERO, Pt::ZERO, width, height),
            contents: Vec::new(),
        }
    }

    pub fn width(&self) -> Pt {
        self.bbox.width()
    }

    pub fn height(&self) -> Pt {
        self.bbox.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    /// Write this form using the ref pre-generated for it, so forms may
    /// reference each other regardless of order.
    pub(crate) fn write_with_ref(
        &self,
        refs: &ObjectReferences,
        xobj_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        forms: &Arena<FormXObject>,
        writer: &mut Pdf,
    ) -> Result<(), CardError> {
        let xobj_ref = refs.require(RefType::FormXObject(xobj_index))?;
        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = compress(&rendered);

        let mut xobj = writer.form_xobject(xobj_ref, &compressed);
        xobj.filter(Filter::FlateDecode);
        xobj.bbox(self.bbox.into());
        write_resources(xobj.resources(), refs, fonts, images, forms)
    }
}

/// Where a Form XObject is placed on a page
#[derive(Debug)]
pub struct FormXObjectLayout {
    pub xobj_id: Id<FormXObject>,
    /// Maps form space onto page space
    pub transform: Transform,
}
