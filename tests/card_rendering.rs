use spell_cards::card::{CardAssets, CardRenderer, Spell};
use spell_cards::imposition::{GridConfig, Imposer, PdfMode, Side};
use spell_cards::layout::{
    layout_centered, FontMetrics, LayoutBox, MonospaceMetrics, TextMetrics, TextStyle,
};
use spell_cards::{Document, Font, FormXObject, PageContents, Pt, SpanLayout};

const DEJAVU_MONO: &[u8] = include_bytes!("assets/DejaVuSansMono.ttf");

fn font() -> Font {
    Font::load(DEJAVU_MONO.to_vec()).expect("can load bundled font")
}

fn spells() -> Vec<Spell> {
    let mut fireball = Spell::new("Fireball").with_classes("Sorcerer, Wizard");
    fireball.level = "3rd".into();
    fireball.casting_time = "1 action".into();
    fireball.duration = "Instantaneous".into();
    fireball.range = "150 feet".into();
    fireball.components = "V, S, M (a tiny ball of bat guano and sulfur)".into();
    fireball.description = lipsum::lipsum(300);
    fireball.at_higher_levels =
        Some("The damage increases by 1d6 for each slot level above 3rd.".into());

    let mut light = Spell::new("Light").with_classes("Bard, Cleric, Sorcerer, Wizard");
    light.level = "Cantrip".into();
    light.casting_time = "1 action".into();
    light.duration = "1 hour".into();
    light.range = "Touch".into();
    light.components = "V, M (a firefly or phosphorescent moss)".into();
    light.description = "You touch one object that is no larger than 10 feet.".into();

    vec![fireball, light]
}

fn text_spans(form: &FormXObject) -> Vec<&SpanLayout> {
    form.contents
        .iter()
        .filter_map(|c| match c {
            PageContents::Text(spans) => Some(spans),
            _ => None,
        })
        .flatten()
        .collect()
}

#[test]
fn font_metrics_follow_the_font_advances() {
    let font = font();
    let mut metrics = FontMetrics::new(&font);
    let advance = font.advance(font.glyph_for('M')) as f32;
    let upem = font.units_per_em() as f32;

    let (width, height) = metrics.measure("Mi M", 10);
    assert!((*width - 4.0 * advance * 10.0 / upem).abs() < 1e-3);
    let line = (font.ascender() as f32 - font.descender() as f32) * 10.0 / upem;
    assert!((*height - line).abs() < 1e-3);
    assert_eq!(metrics.measure("", 10), (Pt::ZERO, Pt::ZERO));

    metrics.measure("Mi M", 12);
    metrics.measure("other", 10);
    assert_eq!(metrics.cached_sizes(), 2);

    // a monospaced face measures the same either way
    let mut mono = MonospaceMetrics::from_font(&font);
    assert!((*mono.width("Fireball", 24) - *metrics.width("Fireball", 24)).abs() < 1e-2);
}

#[test]
fn fitting_with_a_real_font() {
    let font = font();
    let mut metrics = FontMetrics::new(&font);
    let bounds = LayoutBox::new(375.0, 145.0, 670.0, 90.0);

    let short = layout_centered(&mut metrics, "Fireball", &bounds, &TextStyle::new(10, 36));
    assert_eq!(short.size, 36);
    assert_eq!(short.lines.len(), 1);

    let long = layout_centered(
        &mut metrics,
        &lipsum::lipsum(80),
        &bounds,
        &TextStyle::new(4, 36),
    );
    assert!(long.size < 36);
    assert!(long.height <= Pt(90.0));
    assert!(long.lines.iter().all(|line| line.width <= Pt(670.0 + 1e-3)));
}

#[test]
fn rendered_deck_has_fitted_text() {
    let mut doc = Document::default();
    let font = doc.add_font(font());
    let mut renderer = CardRenderer::new(&doc, font, CardAssets::new()).unwrap();
    let deck = renderer.render_deck(&mut doc, &spells());
    assert_eq!(deck.len(), 4);

    let front = match deck.get("Fireball", Side::Front) {
        Some(spell_cards::imposition::CardArt::Form(id)) => &doc.form_xobjects[id],
        other => panic!("expected a form, got {other:?}"),
    };
    let spans = text_spans(front);
    assert_eq!(spans[0].text, "Fireball");
    assert_eq!(spans[0].font.size, Pt(36.0));
    assert_eq!(spans[1].text, "3");
    assert_eq!(spans[1].font.size, Pt(60.0));
    assert!(spans.iter().all(|span| span.font.id == font));

    let back = match deck.get("Fireball", Side::Back) {
        Some(spell_cards::imposition::CardArt::Form(id)) => &doc.form_xobjects[id],
        other => panic!("expected a form, got {other:?}"),
    };
    let description = text_spans(back).last().map(|span| span.font.size);
    assert!(description.is_some_and(|size| size < Pt(32.0) && size >= Pt(10.0)));
}

#[test]
fn deck_with_embedded_font_writes_a_pdf() {
    let mut doc = Document::default();
    let font = doc.add_font(font());
    let mut renderer = CardRenderer::new(&doc, font, CardAssets::new()).unwrap();
    let mut deck = renderer.render_deck(&mut doc, &spells());

    let imposer = Imposer::for_mode(
        PdfMode::CutReady,
        GridConfig::for_mode(PdfMode::CutReady),
    )
    .unwrap();
    let report = imposer
        .impose(&mut doc, &["Fireball", "Light"], &mut deck)
        .unwrap();
    assert_eq!(report.pages, 2);
    assert!(report.missing.is_empty());

    let mut pdf = Vec::new();
    doc.write(&mut pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    for key in [
        &b"/Type0"[..],
        b"/CIDFontType2",
        b"/FontFile2",
        b"/ToUnicode",
        b"/Form",
    ] {
        assert!(
            pdf.windows(key.len()).any(|w| w == key),
            "{} missing from the PDF",
            String::from_utf8_lossy(key)
        );
    }
}
