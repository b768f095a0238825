use super::compose::{CardArt, CardSource, Side};
use crate::document::Document;
use crate::error::CardError;
use crate::image::Image;
use std::path::{Path, PathBuf};

/// Characters dropped from card names when they become file names
const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\''];

/// The file stem used for a card's images: spaces become underscores, characters
/// that aren't safe in file names are dropped, and the result is lowercased.
///
/// ```
/// assert_eq!(spell_cards::imposition::sanitize_filename("Tasha's Hideous Laughter"), "tashas_hideous_laughter");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Card images pre-rendered to `<dir>/<sanitised name>_<side>.png`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> DirectorySource {
        DirectorySource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the image for `card`'s `side` is expected
    pub fn path_for(&self, card: &str, side: Side) -> PathBuf {
        self.dir
            .join(format!("{}_{side}.png", sanitize_filename(card)))
    }
}

impl CardSource for DirectorySource {
    fn resolve(
        &mut self,
        doc: &mut Document,
        card: &str,
        side: Side,
    ) -> Result<Option<CardArt>, CardError> {
        let path = self.path_for(card, side);
        if !path.is_file() {
            log::debug!("{} does not exist", path.display());
            return Ok(None);
        }
        let image = Image::new_from_disk(&path)?;
        Ok(Some(CardArt::Image(doc.add_image(image))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_characters_are_dropped() {
        assert_eq!(sanitize_filename("Melf's Acid Arrow"), "melfs_acid_arrow");
        assert_eq!(sanitize_filename("A/B: \"C\"?"), "ab_c");
    }

    #[test]
    fn paths_follow_the_naming_scheme() {
        let source = DirectorySource::new("/cards");
        assert_eq!(
            source.path_for("Fire Bolt", Side::Back),
            PathBuf::from("/cards/fire_bolt_back.png")
        );
    }
}
