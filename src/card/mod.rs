//! Spell cards: the spell record, its overlay images and the renderer that
//! draws both faces as Form XObjects ready for imposition.
//!
//! ```
//! use spell_cards::card::{CardAssets, CardRenderer, Spell};
//! use spell_cards::imposition::{Imposer, GridConfig};
//! use spell_cards::layout::MonospaceMetrics;
//! use spell_cards::{Document, Font};
//!
//! let mut doc = Document::default();
//! # let font = id_arena::Arena::<Font>::new().next_id();
//! let mut renderer = CardRenderer::with_metrics(font, MonospaceMetrics::default(), CardAssets::new());
//!
//! let mut spell = Spell::new("Shield").with_classes("Sorcerer, Wizard");
//! spell.level = "1st".into();
//! let mut deck = renderer.render_deck(&mut doc, &[spell]);
//!
//! let imposer = Imposer::grid(GridConfig::default()).unwrap();
//! let report = imposer.impose(&mut doc, &["Shield"], &mut deck).unwrap();
//! assert_eq!(report.pages, 2);
//! assert!(report.missing.is_empty());
//! ```

mod assets;
mod deck;
mod face;
mod spell;

pub use assets::*;
pub use deck::*;
pub use face::*;
pub use spell::*;
