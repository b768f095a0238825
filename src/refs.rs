use crate::error::CardError;
use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of PDF object the document writer allocates an id for
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub(crate) enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
    Image(usize),
    ImageMask(usize),
    FormXObject(usize),
}

impl RefType {
    fn describe(&self) -> &'static str {
        match self {
            RefType::Catalog => "the catalog",
            RefType::Info => "the document info",
            RefType::PageTree => "the page tree",
            RefType::Page(_) => "a page",
            RefType::ContentForPage(_) => "a page content stream",
            RefType::Font(_) | RefType::CidFont(_) => "a font",
            RefType::ToUnicode(_) => "a font unicode map",
            RefType::FontDescriptor(_) => "a font descriptor",
            RefType::FontData(_) => "embedded font data",
            RefType::Image(_) | RefType::ImageMask(_) => "an image",
            RefType::FormXObject(_) => "a card form",
        }
    }
}

/// Allocates sequential object ids and remembers what each one is for
pub(crate) struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    fn new_id(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Like [ObjectReferences::get], but a missing id is an error
    pub fn require(&self, ref_type: RefType) -> Result<Ref, CardError> {
        self.get(ref_type)
            .ok_or(CardError::MissingReference(ref_type.describe()))
    }

    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = self.new_id();
        self.refs.insert(ref_type, id);
        id
    }
}
