use crate::{
    error::CardError,
    font::Font,
    form_xobject::FormXObject,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document stores the fonts, images, card faces and print sheets of a PDF,
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    pub form_xobjects: Arena<FormXObject>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Number of pages that will be written
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The pages in document order
    pub fn pages_in_order(&self) -> impl Iterator<Item = &Page> + '_ {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Add a font to the document. Fonts are shared by every page and card face.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document. Images are shared by every page and card
    /// face, so a background used by every card is embedded once.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add a Form XObject (a card face) to the document
    pub fn add_form_xobject(&mut self, form: FormXObject) -> Id<FormXObject> {
        self.form_xobjects.alloc(form)
    }

    /// Write the entire document to the writer. The whole PDF is rendered in memory
    /// first, then written out in one go.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), CardError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
            form_xobjects,
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        // forms may place other forms, so every form gets its ref up front
        for (id, _) in form_xobjects.iter() {
            refs.gen(RefType::FormXObject(id.index()));
        }
        for (id, form) in form_xobjects.iter() {
            form.write_with_ref(
                &refs,
                id.index(),
                &fonts,
                &images,
                &form_xobjects,
                &mut writer,
            )?;
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(CardError::PageMissing)?;
            page.write(
                &mut refs,
                page_index,
                &fonts,
                &images,
                &form_xobjects,
                &mut writer,
            )?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        log::debug!(
            "writing PDF: {} pages, {} card faces, {} images, {} fonts",
            page_order.len(),
            form_xobjects.len(),
            images.len(),
            fonts.len()
        );
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
