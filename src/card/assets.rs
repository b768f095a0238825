use crate::document::Document;
use crate::error::CardError;
use crate::image::Image;
use id_arena::Id;
use std::collections::HashMap;
use std::path::Path;

/// Overlay images for card faces, already registered with the document.
///
/// Every overlay is optional; whatever is missing is simply not drawn.
/// Full-card overlays (backgrounds, frame, banners) are stretched over the
/// whole card face.
#[derive(Debug, Clone, Default)]
pub struct CardAssets {
    pub front_background: Option<Id<Image>>,
    pub back_background: Option<Id<Image>>,
    pub front_frame: Option<Id<Image>>,
    pub spell_banner: Option<Id<Image>>,
    /// Keyed by class name, e.g. `Wizard`
    pub class_banners: HashMap<String, Id<Image>>,
    /// Keyed by spell name
    pub illustrations: HashMap<String, Id<Image>>,
}

impl CardAssets {
    pub fn new() -> CardAssets {
        CardAssets::default()
    }

    pub fn with_class_banner<S: Into<String>>(mut self, class: S, image: Id<Image>) -> CardAssets {
        self.class_banners.insert(class.into(), image);
        self
    }

    pub fn with_illustration<S: Into<String>>(mut self, spell: S, image: Id<Image>) -> CardAssets {
        self.illustrations.insert(spell.into(), image);
        self
    }

    pub fn class_banner(&self, class: &str) -> Option<Id<Image>> {
        self.class_banners.get(class).copied()
    }

    pub fn illustration(&self, spell: &str) -> Option<Id<Image>> {
        self.illustrations.get(spell).copied()
    }
}

/// Load an overlay from disk and register it, or `None` when the file doesn't
/// exist. Files that exist but fail to decode are errors.
pub fn load_overlay<P: AsRef<Path>>(
    doc: &mut Document,
    path: P,
) -> Result<Option<Id<Image>>, CardError> {
    let path = path.as_ref();
    if !path.is_file() {
        log::warn!("overlay {} not found, skipping it", path.display());
        return Ok(None);
    }
    Ok(Some(doc.add_image(Image::new_from_disk(path)?)))
}
