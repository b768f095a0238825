//! Card size, slot positions and back-side ordering for a print sheet.

use super::PdfMode;
use crate::error::ConfigError;
use crate::pagesize::{Orientation, PageSize, A4, SINGLE_CARD};
use crate::rect::Rect;
use crate::units::*;

/// Width / height of a card face. The card faces are drawn at 750 x 1050 but
/// grid sheets lay them out at the A7-like 210 x 298 ratio.
pub const CARD_ASPECT_RATIO: f32 = 210.0 / 298.0;

/// A standard poker card, 63.5 x 88.5 mm
pub const POKER_CARD: (Mm, Mm) = (Mm(63.5), Mm(88.5));

/// Extra black margin drawn around each card in cut-ready mode, 1.5 mm
pub const BLEED: Mm = Mm(1.5);

/// Grid shape and spacing of a print sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub orientation: Orientation,
    /// Paper size in portrait orientation
    pub paper: PageSize,
    pub margin: Pt,
    pub gap_x: Pt,
    pub gap_y: Pt,
}

impl Default for GridConfig {
    /// 3 x 3 cards on portrait A4, 20pt margins, 10pt gaps
    fn default() -> Self {
        GridConfig {
            rows: 3,
            cols: 3,
            orientation: Orientation::Portrait,
            paper: A4,
            margin: Pt(20.0),
            gap_x: Pt(10.0),
            gap_y: Pt(10.0),
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> GridConfig {
        GridConfig {
            rows,
            cols,
            ..GridConfig::default()
        }
    }

    /// The default grid with the margin and gaps `mode` uses
    pub fn for_mode(mode: PdfMode) -> GridConfig {
        let (margin, gap) = mode.default_spacing();
        GridConfig::default().with_margin(margin).with_gaps(gap, gap)
    }

    /// One card filling a 210 x 298pt page
    pub fn single_card() -> GridConfig {
        GridConfig {
            rows: 1,
            cols: 1,
            orientation: Orientation::Portrait,
            paper: SINGLE_CARD,
            margin: Pt::ZERO,
            gap_x: Pt::ZERO,
            gap_y: Pt::ZERO,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> GridConfig {
        self.orientation = orientation;
        self
    }

    pub fn with_paper(mut self, paper: PageSize) -> GridConfig {
        self.paper = paper;
        self
    }

    pub fn with_margin(mut self, margin: Pt) -> GridConfig {
        self.margin = margin;
        self
    }

    pub fn with_gaps(mut self, gap_x: Pt, gap_y: Pt) -> GridConfig {
        self.gap_x = gap_x;
        self.gap_y = gap_y;
        self
    }

    /// Cards per sheet
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn page_size(&self) -> PageSize {
        self.orientation.apply(self.paper)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Space left for cards once margins and gaps are taken out
    fn available(&self) -> (Pt, Pt) {
        let (page_width, page_height) = self.page_size();
        (
            page_width - self.margin * 2.0 - self.gap_x * (self.cols - 1) as f32,
            page_height - self.margin * 2.0 - self.gap_y * (self.rows - 1) as f32,
        )
    }
}

/// Parse a grid written as `ROWSxCOLS`, e.g. `3x3` or `2X4`
pub fn parse_grid(spec: &str) -> Result<(usize, usize), ConfigError> {
    let invalid = || ConfigError::InvalidGridSpec(spec.to_string());
    let lower = spec.trim().to_ascii_lowercase();
    let (rows, cols) = lower.split_once('x').ok_or_else(invalid)?;
    let rows: usize = rows.trim().parse().map_err(|_| invalid())?;
    let cols: usize = cols.trim().parse().map_err(|_| invalid())?;
    if rows == 0 || cols == 0 {
        return Err(ConfigError::EmptyGrid { rows, cols });
    }
    Ok((rows, cols))
}

/// How card dimensions are derived
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardSizing {
    /// As large as the grid allows while keeping `aspect_ratio` (width / height)
    ScaleToFit { aspect_ratio: f32 },
    /// A fixed physical size; the grid must fit the page as-is
    Fixed { width: Pt, height: Pt },
}

impl CardSizing {
    pub fn poker_card() -> CardSizing {
        CardSizing::Fixed {
            width: POKER_CARD.0.into(),
            height: POKER_CARD.1.into(),
        }
    }
}

impl Default for CardSizing {
    fn default() -> Self {
        CardSizing::ScaleToFit {
            aspect_ratio: CARD_ASPECT_RATIO,
        }
    }
}

/// Lower-left corner of a card on the page (PDF coordinates, y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: Pt,
    pub y: Pt,
}

/// Which card goes in each slot of a back page.
///
/// Each row is mirrored left to right so that after the sheet is flipped over
/// its long edge every back sits behind its front. Rows stay where they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackOrder(Vec<usize>);

impl BackOrder {
    pub fn new(rows: usize, cols: usize) -> BackOrder {
        BackOrder(
            (0..rows)
                .flat_map(|row| (0..cols).rev().map(move |col| row * cols + col))
                .collect(),
        )
    }

    /// The logical card shown in back-page slot `slot`
    pub fn get(&self, slot: usize) -> Option<usize> {
        self.0.get(slot).copied()
    }

    /// Reorder `items` (one per slot) into back-page order
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.0.iter().filter_map(|&i| items.get(i).cloned()).collect()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything needed to draw sheets for one grid: card size, slot corners and
/// the back-page order. Computed once, then reused for every sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub config: GridConfig,
    pub page_size: PageSize,
    pub card_width: Pt,
    pub card_height: Pt,
    /// Row-major, bottom row first, left to right
    pub slots: Vec<Slot>,
    pub back_order: BackOrder,
}

impl SheetPlan {
    pub fn new(config: GridConfig, sizing: CardSizing) -> Result<SheetPlan, ConfigError> {
        config.validate()?;
        let page_size = config.page_size();
        let (rows, cols) = (config.rows as f32, config.cols as f32);

        let (card_width, card_height) = match sizing {
            CardSizing::ScaleToFit { aspect_ratio } => {
                let (available_width, available_height) = config.available();
                if *available_width <= 0.0 || *available_height <= 0.0 {
                    return Err(ConfigError::NoRoomForCards {
                        rows: config.rows,
                        cols: config.cols,
                        orientation: config.orientation,
                        available_width: *available_width,
                        available_height: *available_height,
                    });
                }

                let width = available_width / cols;
                let height = width / aspect_ratio;
                if height * rows > available_height {
                    let height = available_height / rows;
                    (height * aspect_ratio, height)
                } else {
                    (width, height)
                }
            }
            CardSizing::Fixed { width, height } => {
                let required_width = width * cols + config.gap_x * (cols - 1.0) + config.margin * 2.0;
                let required_height =
                    height * rows + config.gap_y * (rows - 1.0) + config.margin * 2.0;
                if required_width > page_size.0 || required_height > page_size.1 {
                    return Err(ConfigError::GridDoesNotFit {
                        rows: config.rows,
                        cols: config.cols,
                        orientation: config.orientation,
                        required_width: *required_width,
                        required_height: *required_height,
                        page_width: *page_size.0,
                        page_height: *page_size.1,
                    });
                }
                (width, height)
            }
        };

        let grid_width = card_width * cols + config.gap_x * (cols - 1.0);
        let grid_height = card_height * rows + config.gap_y * (rows - 1.0);
        let offset_x = (page_size.0 - grid_width) / 2.0;
        let offset_y = (page_size.1 - grid_height) / 2.0;

        let slots = (0..config.rows)
            .flat_map(|row| (0..config.cols).map(move |col| (row, col)))
            .map(|(row, col)| Slot {
                x: offset_x + (card_width + config.gap_x) * col as f32,
                y: offset_y + (card_height + config.gap_y) * row as f32,
            })
            .collect();

        log::debug!(
            "{}x{} {} sheet: cards {:.1}x{:.1}pt",
            config.rows,
            config.cols,
            config.orientation,
            *card_width,
            *card_height
        );

        Ok(SheetPlan {
            config,
            page_size,
            card_width,
            card_height,
            slots,
            back_order: BackOrder::new(config.rows, config.cols),
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The card rectangle of a slot
    pub fn slot_rect(&self, slot: usize) -> Option<Rect> {
        self.slots
            .get(slot)
            .map(|s| Rect::from_origin(s.x, s.y, self.card_width, self.card_height))
    }
}
