use crate::document::Document;
use crate::error::CardError;
use crate::imposition::{CardArt, CardSource, Side};
use std::collections::HashMap;

/// Card faces rendered in this document, keyed by card name and side
#[derive(Debug, Clone, Default)]
pub struct Deck {
    faces: HashMap<(String, Side), CardArt>,
}

impl Deck {
    pub fn insert(&mut self, card: &str, side: Side, art: CardArt) {
        self.faces.insert((card.to_string(), side), art);
    }

    pub fn get(&self, card: &str, side: Side) -> Option<CardArt> {
        self.faces.get(&(card.to_string(), side)).copied()
    }

    /// Number of faces (two per fully rendered card)
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl CardSource for Deck {
    fn resolve(
        &mut self,
        _doc: &mut Document,
        card: &str,
        side: Side,
    ) -> Result<Option<CardArt>, CardError> {
        Ok(self.get(card, side))
    }
}
