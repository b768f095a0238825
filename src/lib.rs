//! Printable spell cards.
//!
//! Spell text is fitted into the boxes of a card face ([layout]), each face is
//! drawn as a reusable PDF Form XObject ([card]), and the faces are tiled onto
//! double-sided print sheets with mirrored backs ([imposition]). The result is
//! written with [Document::write].

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod form_xobject;
pub use form_xobject::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod page;
pub use page::*;

/// Paper sizes and orientation
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

/// Fitting text into boxes: metrics, wrapping, font-size search and placement
pub mod layout;

/// Arranging cards onto print sheets
pub mod imposition;

/// The spell card itself
pub mod card;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
