use spell_cards::card::{CardAssets, CardRenderer, Spell};
use spell_cards::imposition::{GridConfig, Imposer, PdfMode};
use spell_cards::{Document, Font, Info};

fn main() {
    // load a font to embed and use for every card
    let font = include_bytes!("../tests/assets/DejaVuSansMono.ttf");
    let font = Font::load(font.to_vec()).expect("can load font");

    let mut doc = Document::default();
    doc.set_info(Info::new().title("Spell cards").clone());
    let font = doc.add_font(font);

    // a few spells, with long enough descriptions that the text has to shrink
    let spells: Vec<Spell> = [
        ("Fire Bolt", "Cantrip"),
        ("Magic Missile", "1st"),
        ("Shield", "1st"),
        ("Counterspell", "3rd"),
        ("Fireball", "3rd"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, level))| {
        let mut spell = Spell::new(name).with_classes("Sorcerer, Wizard");
        spell.level = level.into();
        spell.casting_time = "1 action".into();
        spell.duration = "Instantaneous".into();
        spell.range = "120 feet".into();
        spell.components = "V, S, M (a pinch of sulfur)".into();
        spell.description = lipsum::lipsum(40 + i * 60);
        spell
    })
    .collect();

    // draw the front and back of every card once, as reusable forms
    let mut renderer =
        CardRenderer::new(&doc, font, CardAssets::new()).expect("font is in the document");
    let mut deck = renderer.render_deck(&mut doc, &spells);

    // tile them onto A4 sheets with bleed and cut guides, backs mirrored
    let mode = PdfMode::CutReady;
    let imposer =
        Imposer::for_mode(mode, GridConfig::for_mode(mode)).expect("3x3 poker cards fit on A4");
    let names: Vec<&str> = spells.iter().map(|spell| spell.name.as_str()).collect();
    let report = imposer
        .impose(&mut doc, &names, &mut deck)
        .expect("can impose cards");
    println!("{} cards on {} pages", report.cards, report.pages);

    let mut out = std::fs::File::create("deck.pdf").unwrap();
    doc.write(&mut out).unwrap();
}
