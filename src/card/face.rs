use super::assets::CardAssets;
use super::deck::Deck;
use super::spell::Spell;
use crate::document::Document;
use crate::error::CardError;
use crate::font::Font;
use crate::form_xobject::FormXObject;
use crate::image::Image;
use crate::imposition::{CardArt, Side};
use crate::layout::{
    render_centered, render_left_aligned, FontMetrics, FormCanvas, LayoutBox, TextMetrics,
    TextStyle,
};
use crate::page::ImageLayout;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;

/// Card faces are drawn on a 750 x 1050 canvas
pub const CARD_WIDTH: Pt = Pt(750.0);
pub const CARD_HEIGHT: Pt = Pt(1050.0);

// text boxes, y down from the top of the card
const NAME: LayoutBox = LayoutBox::new(375.0, 145.0, 670.0, 90.0);
const LEVEL: LayoutBox = LayoutBox::new(130.0, 880.0, 90.0, 85.0);
const CASTING_TIME: LayoutBox = LayoutBox::new(370.0, 845.0, 133.0, 60.0);
const DURATION: LayoutBox = LayoutBox::new(604.0, 845.0, 133.0, 60.0);
const RANGE: LayoutBox = LayoutBox::new(382.0, 953.0, 133.0, 60.0);
const COMPONENTS: LayoutBox = LayoutBox::new(604.0, 953.0, 133.0, 60.0);
const INFO: LayoutBox = LayoutBox::new(120.0, 229.0, 544.0, 140.0);
const DESCRIPTION: LayoutBox = LayoutBox::new(90.0, 229.0 + 140.0 + 15.0, 574.0, 588.0);

/// Illustration square: left, top, side
const ILLUSTRATION: (f32, f32, f32) = (138.0, 230.0, 477.0);

/// Draws spell cards as Form XObjects
pub struct CardRenderer<M = FontMetrics> {
    font: Id<Font>,
    metrics: M,
    assets: CardAssets,
}

impl CardRenderer<FontMetrics> {
    /// A renderer measuring text with the document font `font`
    pub fn new(doc: &Document, font: Id<Font>, assets: CardAssets) -> Result<Self, CardError> {
        let metrics = doc
            .fonts
            .get(font)
            .map(FontMetrics::new)
            .ok_or(CardError::MissingReference("a font"))?;
        Ok(CardRenderer::with_metrics(font, metrics, assets))
    }
}

impl<M: TextMetrics> CardRenderer<M> {
    pub fn with_metrics(font: Id<Font>, metrics: M, assets: CardAssets) -> Self {
        CardRenderer {
            font,
            metrics,
            assets,
        }
    }

    pub fn assets(&self) -> &CardAssets {
        &self.assets
    }

    pub fn render_front(&mut self, doc: &mut Document, spell: &Spell) -> Id<FormXObject> {
        let mut form = FormXObject::new(CARD_WIDTH, CARD_HEIGHT);

        overlay(&mut form, self.assets.front_background);
        if let Some(illustration) = self.assets.illustration(&spell.name) {
            let (x, y, side) = ILLUSTRATION;
            form.add_image(ImageLayout {
                image_id: illustration,
                position: card_rect(x, y, side, side),
            });
        }
        overlay(&mut form, self.assets.front_frame);
        self.class_banners(&mut form, spell);
        self.name_banner(&mut form, spell);

        let stats = TextStyle::new(10, 24);
        let boxes = [
            (spell.level_numeric(), LEVEL, TextStyle::new(10, 60)),
            (spell.casting_time.as_str(), CASTING_TIME, stats),
            (spell.duration.as_str(), DURATION, stats),
            (spell.range.as_str(), RANGE, stats),
            (spell.components_short(), COMPONENTS, stats),
        ];
        let mut canvas = FormCanvas::new(&mut form, self.font);
        for (text, bounds, style) in boxes.iter() {
            render_centered(&mut canvas, &mut self.metrics, text, bounds, style);
        }

        doc.add_form_xobject(form)
    }

    pub fn render_back(&mut self, doc: &mut Document, spell: &Spell) -> Id<FormXObject> {
        let mut form = FormXObject::new(CARD_WIDTH, CARD_HEIGHT);

        overlay(&mut form, self.assets.back_background);
        self.class_banners(&mut form, spell);
        self.name_banner(&mut form, spell);

        let info_style = TextStyle::new(12, 20).with_spacing(Pt(2.0), Pt(20.0));
        let description_style = TextStyle::new(10, 32).with_spacing(Pt(4.0), Pt(25.0));
        let mut canvas = FormCanvas::new(&mut form, self.font);
        render_left_aligned(&mut canvas, &mut self.metrics, &spell.info_text(), &INFO, &info_style);
        let description = render_left_aligned(
            &mut canvas,
            &mut self.metrics,
            &spell.description_text(),
            &DESCRIPTION,
            &description_style,
        );
        if description.height > DESCRIPTION.max_height {
            log::warn!(
                "description of '{}' overflows its box at size {}",
                spell.name,
                description.size
            );
        }

        doc.add_form_xobject(form)
    }

    /// Render both sides of every spell
    pub fn render_deck(&mut self, doc: &mut Document, spells: &[Spell]) -> Deck {
        let mut deck = Deck::default();
        for spell in spells {
            let front = self.render_front(doc, spell);
            let back = self.render_back(doc, spell);
            deck.insert(&spell.name, Side::Front, CardArt::Form(front));
            deck.insert(&spell.name, Side::Back, CardArt::Form(back));
        }
        log::info!("rendered {} cards", spells.len());
        deck
    }

    fn class_banners(&self, form: &mut FormXObject, spell: &Spell) {
        for class in spell.classes.iter() {
            overlay(form, self.assets.class_banner(class));
        }
    }

    fn name_banner(&mut self, form: &mut FormXObject, spell: &Spell) {
        overlay(form, self.assets.spell_banner);
        let mut canvas = FormCanvas::new(form, self.font);
        render_centered(
            &mut canvas,
            &mut self.metrics,
            &spell.name,
            &NAME,
            &TextStyle::new(10, 36),
        );
    }
}

/// A rectangle given y-down from the top of the card, in form space
fn card_rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::from_origin(Pt(x), CARD_HEIGHT - Pt(y) - Pt(height), Pt(width), Pt(height))
}

/// Stretch a full-card overlay over the face, if there is one
fn overlay(form: &mut FormXObject, image: Option<Id<Image>>) {
    if let Some(image_id) = image {
        form.add_image(ImageLayout {
            image_id,
            position: Rect::from_origin(Pt::ZERO, Pt::ZERO, CARD_WIDTH, CARD_HEIGHT),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonospaceMetrics;
    use crate::page::PageContents;

    fn fireball() -> Spell {
        let mut spell = Spell::new("Fireball").with_classes("Sorcerer, Wizard");
        spell.level = "3rd".into();
        spell.casting_time = "1 action".into();
        spell.duration = "Instantaneous".into();
        spell.range = "150 feet".into();
        spell.components = "V, S, M (a tiny ball of bat guano and sulfur)".into();
        spell.description = "A bright streak flashes from your pointing finger.".into();
        spell
    }

    fn spans(form: &FormXObject) -> Vec<String> {
        form.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans[0].text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn illustration_sits_in_its_square() {
        let rect = card_rect(138.0, 230.0, 477.0, 477.0);
        assert_eq!(rect.y1, Pt(343.0));
        assert_eq!(rect.y2, Pt(820.0));
    }

    #[test]
    fn front_shows_name_level_and_stats() {
        let mut doc = Document::default();
        let font = id_arena::Arena::<Font>::new().next_id();
        let mut renderer =
            CardRenderer::with_metrics(font, MonospaceMetrics::default(), CardAssets::new());
        let id = renderer.render_front(&mut doc, &fireball());

        let text = spans(&doc.form_xobjects[id]);
        assert_eq!(text[0], "Fireball");
        assert_eq!(text[1], "3");
        assert!(text.contains(&"V, S, M".to_string()));
        assert!(text.contains(&"150 feet".to_string()));
    }

    #[test]
    fn overlays_are_drawn_under_the_text() {
        let mut doc = Document::default();
        let background = doc.add_image(Image::new_raster(image::DynamicImage::new_rgb8(1, 1)));
        let wizard = doc.add_image(Image::new_raster(image::DynamicImage::new_rgb8(1, 1)));
        let assets = CardAssets {
            back_background: Some(background),
            ..CardAssets::new()
        }
        .with_class_banner("Wizard", wizard);

        let font = id_arena::Arena::<Font>::new().next_id();
        let mut renderer = CardRenderer::with_metrics(font, MonospaceMetrics::default(), assets);
        let id = renderer.render_back(&mut doc, &fireball());

        let contents = &doc.form_xobjects[id].contents;
        let images: Vec<_> = contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Image(layout) => Some(layout.image_id),
                _ => None,
            })
            .collect();
        assert_eq!(images, vec![background, wizard]);
        assert!(matches!(contents[0], PageContents::Image(_)));
        assert!(matches!(contents.last(), Some(PageContents::Text(_))));
    }

    #[test]
    fn deck_holds_both_sides() {
        let mut doc = Document::default();
        let font = id_arena::Arena::<Font>::new().next_id();
        let mut renderer =
            CardRenderer::with_metrics(font, MonospaceMetrics::default(), CardAssets::new());
        let deck = renderer.render_deck(&mut doc, &[fireball()]);
        assert_eq!(deck.len(), 2);
        assert_eq!(doc.form_xobjects.len(), 2);
        assert!(deck.get("Fireball", Side::Back).is_some());
    }
}
