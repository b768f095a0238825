use super::grid::{CardSizing, GridConfig, SheetPlan, BLEED};
use super::marks::{bleed_border, bleed_fill, cut_guides};
use super::PdfMode;
use crate::document::Document;
use crate::error::{CardError, ConfigError};
use crate::form_xobject::{FormXObject, FormXObjectLayout};
use crate::image::Image;
use crate::page::{ImageLayout, Page};
use crate::pagesize::SINGLE_CARD;
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::Pt;
use id_arena::Id;
use std::fmt;

/// Which face of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Front, Side::Back];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Front => "front",
            Side::Back => "back",
        })
    }
}

/// The artwork for one side of one card, already registered with the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardArt {
    /// A raster image, e.g. a pre-rendered PNG
    Image(Id<Image>),
    /// A card face drawn as vector content
    Form(Id<FormXObject>),
}

/// Looks up card artwork by card name and side.
///
/// Returning `Ok(None)` means the art doesn't exist: the slot is left blank and
/// the card is reported as missing. Errors abort the imposition.
pub trait CardSource {
    fn resolve(
        &mut self,
        doc: &mut Document,
        card: &str,
        side: Side,
    ) -> Result<Option<CardArt>, CardError>;
}

/// A card side that had no artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCard {
    pub card: String,
    pub side: Side,
}

/// What an imposition run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpositionReport {
    /// Cards that were requested
    pub cards: usize,
    /// Pages added to the document
    pub pages: usize,
    pub missing: Vec<MissingCard>,
}

/// The cards on one sheet, one entry per slot; `None` is an empty slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGroup(Vec<Option<String>>);

impl CardGroup {
    pub fn new(slots: Vec<Option<String>>) -> CardGroup {
        CardGroup(slots)
    }

    /// Split `cards` into groups of `capacity`, padding the last one with
    /// empty slots
    pub fn chunk<T: AsRef<str>>(cards: &[T], capacity: usize) -> Vec<CardGroup> {
        let capacity = capacity.max(1);
        cards
            .chunks(capacity)
            .map(|chunk| {
                let mut slots: Vec<Option<String>> =
                    chunk.iter().map(|c| Some(c.as_ref().to_string())).collect();
                slots.resize(capacity, None);
                CardGroup(slots)
            })
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|c| c.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no slot holds a card
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Lays cards out on sheets according to a [SheetPlan]
#[derive(Debug, Clone)]
pub struct Imposer {
    plan: SheetPlan,
    /// Bleed width when cut guides, bleed and borders are drawn
    bleed: Option<Pt>,
}

impl Imposer {
    /// Cards scaled to fill the grid
    pub fn grid(config: GridConfig) -> Result<Imposer, ConfigError> {
        Ok(Imposer {
            plan: SheetPlan::new(config, CardSizing::default())?,
            bleed: None,
        })
    }

    /// Poker-sized cards with cut guides, bleed and borders
    pub fn cut_ready(config: GridConfig) -> Result<Imposer, ConfigError> {
        Ok(Imposer {
            plan: SheetPlan::new(config, CardSizing::poker_card())?,
            bleed: Some(BLEED.into()),
        })
    }

    /// One card per page
    pub fn single_card() -> Result<Imposer, ConfigError> {
        let sizing = CardSizing::Fixed {
            width: SINGLE_CARD.0,
            height: SINGLE_CARD.1,
        };
        Ok(Imposer {
            plan: SheetPlan::new(GridConfig::single_card(), sizing)?,
            bleed: None,
        })
    }

    /// The imposer for `mode`. `config` is ignored in single-card mode.
    pub fn for_mode(mode: PdfMode, config: GridConfig) -> Result<Imposer, ConfigError> {
        match mode {
            PdfMode::Grid => Imposer::grid(config),
            PdfMode::CutReady => Imposer::cut_ready(config),
            PdfMode::SingleCard => Imposer::single_card(),
        }
    }

    pub fn plan(&self) -> &SheetPlan {
        &self.plan
    }

    /// Add a front and a back page to `doc` for every sheet of `cards`
    pub fn impose<T, S>(
        &self,
        doc: &mut Document,
        cards: &[T],
        source: &mut S,
    ) -> Result<ImpositionReport, CardError>
    where
        T: AsRef<str>,
        S: CardSource + ?Sized,
    {
        let groups = CardGroup::chunk(cards, self.plan.capacity());
        let mut report = self.impose_groups(doc, groups, source)?;
        report.cards = cards.len();
        Ok(report)
    }

    /// Like [Imposer::impose], for groups the caller has already arranged.
    /// Groups without any card produce no pages.
    pub fn impose_groups<I, S>(
        &self,
        doc: &mut Document,
        groups: I,
        source: &mut S,
    ) -> Result<ImpositionReport, CardError>
    where
        I: IntoIterator<Item = CardGroup>,
        S: CardSource + ?Sized,
    {
        let mut report = ImpositionReport::default();

        for group in groups {
            if group.is_empty() {
                continue;
            }
            report.cards += (0..group.len()).filter(|&i| group.get(i).is_some()).count();

            for side in Side::BOTH {
                let page = self.draw_sheet(doc, &group, side, source, &mut report)?;
                doc.add_page(page);
                report.pages += 1;
            }
        }

        log::info!(
            "imposed {} cards on {} pages ({} missing)",
            report.cards,
            report.pages,
            report.missing.len()
        );
        Ok(report)
    }

    /// The card shown in each occupied slot of a sheet side, as (slot, card)
    pub fn placements<'g>(&self, group: &'g CardGroup, side: Side) -> Vec<(usize, &'g str)> {
        (0..self.plan.capacity())
            .filter_map(|slot| {
                let index = match side {
                    Side::Front => slot,
                    Side::Back => self.plan.back_order.get(slot)?,
                };
                group.get(index).map(|card| (slot, card))
            })
            .collect()
    }

    fn draw_sheet<S: CardSource + ?Sized>(
        &self,
        doc: &mut Document,
        group: &CardGroup,
        side: Side,
        source: &mut S,
        report: &mut ImpositionReport,
    ) -> Result<Page, CardError> {
        let mut page = Page::new(self.plan.page_size);
        let placements: Vec<(&str, Rect)> = self
            .placements(group, side)
            .into_iter()
            .filter_map(|(slot, card)| self.plan.slot_rect(slot).map(|rect| (card, rect)))
            .collect();
        let rects: Vec<Rect> = placements.iter().map(|(_, rect)| *rect).collect();

        if let Some(bleed) = self.bleed {
            page.add_content(cut_guides(self.plan.page_size, &rects));
            page.add_content(bleed_fill(&rects, bleed));
        }

        for (card, rect) in placements.iter() {
            match source.resolve(doc, card, side)? {
                Some(art) => place(doc, &mut page, art, rect)?,
                None => {
                    log::warn!("no {side} art for card '{card}', leaving its slot blank");
                    report.missing.push(MissingCard {
                        card: card.to_string(),
                        side,
                    });
                }
            }
        }

        if let Some(bleed) = self.bleed {
            page.add_content(bleed_border(&rects, bleed));
        }

        Ok(page)
    }
}

fn place(doc: &Document, page: &mut Page, art: CardArt, rect: &Rect) -> Result<(), CardError> {
    match art {
        CardArt::Image(image_id) => page.add_image(ImageLayout {
            image_id,
            position: *rect,
        }),
        CardArt::Form(xobj_id) => {
            let form = doc
                .form_xobjects
                .get(xobj_id)
                .ok_or(CardError::MissingReference("a card form"))?;
            page.add_form_xobject(FormXObjectLayout {
                xobj_id,
                transform: Transform::fit_into(form.width(), form.height(), rect),
            });
        }
    }
    Ok(())
}
