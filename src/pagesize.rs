//! Paper sizes used when printing cards.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use [`Orientation::apply`] (or the [`PageOrientation`] trait) to turn them sideways.
//!
//! ```
//! use spell_cards::pagesize::{Orientation, A4};
//!
//! let (width, height) = Orientation::Landscape.apply(A4);
//! assert!(width > height);
//! ```

use crate::error::ConfigError;
use crate::units::*;
use std::fmt;
use std::str::FromStr;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// One card per sheet. Slightly larger than ISO A7 (74 × 105 mm) so that the
/// card art fills the page without scaling artefacts at the edges.
pub const SINGLE_CARD: PageSize = (Pt(210.0), Pt(298.0));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// Which way up the print sheet is
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Rotate `size` into this orientation
    pub fn apply(self, size: PageSize) -> PageSize {
        match self {
            Orientation::Portrait => size.portrait(),
            Orientation::Landscape => size.landscape(),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(ConfigError::InvalidOrientation(s.to_string())),
        }
    }
}
