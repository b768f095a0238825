use crate::colour::Colour;
use crate::content::{compress, render_contents, write_resources};
use crate::error::CardError;
use crate::font::Font;
use crate::form_xobject::{FormXObject, FormXObjectLayout};
use crate::image::Image;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Filter, Finish, Pdf};

/// Which font, at which size, a span of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single line of text, positioned by its baseline start
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Baseline origin, PDF coordinates (y-up)
    pub coords: (Pt, Pt),
}

/// An image stretched to fill a rectangle
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// Everything that can be drawn on a page or a card face, in drawing order
#[derive(Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    RawContent(Vec<u8>),
    FormXObject(FormXObjectLayout),
}

/// A printed sheet
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::page(size),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Place a card face (or any other form) on the page
    pub fn add_form_xobject(&mut self, layout: FormXObjectLayout) {
        self.contents.push(PageContents::FormXObject(layout));
    }

    /// Add arbitrary vector content (guides, fills, borders)
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        forms: &Arena<FormXObject>,
        writer: &mut Pdf,
    ) -> Result<(), CardError> {
        let id = refs.require(RefType::Page(page_index))?;
        let parent = refs.require(RefType::PageTree)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);
        page.contents(content_id);
        write_resources(page.resources(), refs, fonts, images, forms)?;
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        writer
            .stream(content_id, &compress(&rendered))
            .filter(Filter::FlateDecode);

        Ok(())
    }
}
