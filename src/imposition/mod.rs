//! Arranging rendered cards onto double-sided print sheets.
//!
//! A [SheetPlan] fixes the card size and slot positions for a grid. The
//! [Imposer] walks the card list a sheet at a time and emits a front page and a
//! mirrored back page for every sheet, so that printing double-sided and
//! flipping on the long edge lines each back up with its front.

mod compose;
mod grid;
mod marks;
mod source;

pub use compose::*;
pub use grid::*;
pub use marks::*;
pub use source::*;

use crate::error::ConfigError;
use crate::units::Pt;
use std::fmt;
use std::str::FromStr;

/// How cards are laid out on paper
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfMode {
    /// Cards scaled to fill a grid on A4
    #[default]
    Grid,
    /// One card per 210 x 298pt page
    SingleCard,
    /// Poker-sized cards with bleed, borders and cut guides
    CutReady,
}

impl PdfMode {
    /// (margin, gap) used when the caller doesn't choose
    pub fn default_spacing(self) -> (Pt, Pt) {
        match self {
            PdfMode::Grid => (Pt(20.0), Pt(10.0)),
            PdfMode::CutReady => (Pt(5.0), Pt(5.0)),
            PdfMode::SingleCard => (Pt::ZERO, Pt::ZERO),
        }
    }
}

impl fmt::Display for PdfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PdfMode::Grid => "grid",
            PdfMode::SingleCard => "single-card",
            PdfMode::CutReady => "cut-ready",
        })
    }
}

impl FromStr for PdfMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "grid" => Ok(PdfMode::Grid),
            "single-card" | "single" => Ok(PdfMode::SingleCard),
            "cut-ready" | "cut" => Ok(PdfMode::CutReady),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_round_trip_through_their_names() {
        for mode in [PdfMode::Grid, PdfMode::SingleCard, PdfMode::CutReady] {
            assert_eq!(mode.to_string().parse::<PdfMode>(), Ok(mode));
        }
        assert_eq!("cut_ready".parse::<PdfMode>(), Ok(PdfMode::CutReady));
        assert_eq!(
            "booklet".parse::<PdfMode>(),
            Err(ConfigError::InvalidMode("booklet".into()))
        );
    }

    #[test]
    fn cut_ready_defaults_to_tighter_spacing() {
        let config = GridConfig::for_mode(PdfMode::CutReady);
        assert_eq!((config.margin, config.gap_x, config.gap_y), (Pt(5.0), Pt(5.0), Pt(5.0)));
        assert_eq!(GridConfig::for_mode(PdfMode::Grid), GridConfig::default());
    }
}
