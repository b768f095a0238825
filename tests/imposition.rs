use image::DynamicImage;
use spell_cards::imposition::{
    BackOrder, CardArt, CardGroup, CardSource, GridConfig, Imposer, PdfMode, Side,
};
use spell_cards::pagesize::{Orientation, SINGLE_CARD};
use spell_cards::{CardError, ConfigError, Document, Image, PageContents, Pt};
use std::collections::HashSet;
use std::io::Read;

/// Hands out a tiny image for every card side except the ones listed as missing
#[derive(Default)]
struct FakeSource {
    missing: HashSet<(String, Side)>,
    resolved: Vec<(String, Side)>,
}

impl FakeSource {
    fn without(card: &str, side: Side) -> FakeSource {
        let mut source = FakeSource::default();
        source.missing.insert((card.to_string(), side));
        source
    }
}

impl CardSource for FakeSource {
    fn resolve(
        &mut self,
        doc: &mut Document,
        card: &str,
        side: Side,
    ) -> Result<Option<CardArt>, CardError> {
        self.resolved.push((card.to_string(), side));
        if self.missing.contains(&(card.to_string(), side)) {
            return Ok(None);
        }
        let image = Image::new_raster(DynamicImage::new_rgb8(2, 2));
        Ok(Some(CardArt::Image(doc.add_image(image))))
    }
}

fn cards(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("card {i}")).collect()
}

fn images_on(doc: &Document, page: usize) -> usize {
    doc.pages_in_order()
        .nth(page)
        .map(|page| {
            page.contents
                .iter()
                .filter(|c| matches!(c, PageContents::Image(_)))
                .count()
        })
        .unwrap_or(0)
}

#[test]
fn three_cards_on_a_two_by_two_sheet() {
    let imposer = Imposer::grid(GridConfig::new(2, 2)).unwrap();
    let mut doc = Document::default();
    let mut source = FakeSource::default();
    let report = imposer
        .impose(&mut doc, &["c0", "c1", "c2"], &mut source)
        .unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.cards, 3);
    assert_eq!(doc.page_count(), 2);

    let group = CardGroup::chunk(&["c0", "c1", "c2"], 4).remove(0);
    let back = imposer.placements(&group, Side::Back);
    assert_eq!(back[0], (0, "c1"));
    assert!(back.iter().all(|&(slot, _)| slot != 2));
    assert_eq!(images_on(&doc, 0), 3);
    assert_eq!(images_on(&doc, 1), 3);
}

#[test]
fn a_missing_back_leaves_a_blank_slot() {
    let imposer = Imposer::grid(GridConfig::default()).unwrap();
    let deck = cards(5);

    let mut complete = Document::default();
    let full = imposer
        .impose(&mut complete, &deck, &mut FakeSource::default())
        .unwrap();

    let mut doc = Document::default();
    let mut source = FakeSource::without("card 3", Side::Back);
    let report = imposer.impose(&mut doc, &deck, &mut source).unwrap();

    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].card, "card 3");
    assert_eq!(report.missing[0].side, Side::Back);
    assert_eq!(report.pages, full.pages);
    assert_eq!(images_on(&doc, 0), 5);
    assert_eq!(images_on(&doc, 1), 4);
}

#[test]
fn two_pages_per_sheet() {
    for (rows, cols) in [(1, 1), (2, 2), (3, 3), (2, 4)] {
        let imposer = Imposer::grid(GridConfig::new(rows, cols)).unwrap();
        let capacity = rows * cols;
        for n in 0..=20 {
            let mut doc = Document::default();
            let report = imposer
                .impose(&mut doc, &cards(n), &mut FakeSource::default())
                .unwrap();
            assert_eq!(report.pages, 2 * n.div_ceil(capacity));
            assert_eq!(doc.page_count(), report.pages);
        }
    }
}

#[test]
fn fronts_and_backs_alternate() {
    let imposer = Imposer::grid(GridConfig::new(2, 2)).unwrap();
    let mut doc = Document::default();
    let mut source = FakeSource::default();
    imposer.impose(&mut doc, &cards(6), &mut source).unwrap();

    let sides: Vec<Side> = source.resolved.iter().map(|(_, side)| *side).collect();
    assert_eq!(&sides[..4], &[Side::Front; 4]);
    assert_eq!(&sides[4..8], &[Side::Back; 4]);
    assert_eq!(&sides[8..10], &[Side::Front; 2]);
    assert_eq!(&sides[10..], &[Side::Back; 2]);
}

#[test]
fn back_order_undoes_itself() {
    for rows in 1..=4 {
        for cols in 1..=4 {
            let order = BackOrder::new(rows, cols);
            let slots: Vec<usize> = (0..rows * cols).collect();
            assert_eq!(order.len(), slots.len());
            assert_eq!(order.apply(&order.apply(&slots)), slots);

            let mut sorted = order.as_slice().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, slots);
        }
    }
}

#[test]
fn slots_run_row_by_row() {
    let imposer = Imposer::grid(GridConfig::new(3, 2)).unwrap();
    let plan = imposer.plan();
    assert_eq!(plan.slots.len(), 6);
    for row in plan.slots.chunks(2) {
        assert_eq!(row[0].y, row[1].y);
        assert!(row[0].x < row[1].x);
    }
    assert!(plan.slots[0].y < plan.slots[2].y);
    assert!(plan.slots[2].y < plan.slots[4].y);
}

#[test]
fn cards_stay_on_the_page() {
    for orientation in [Orientation::Portrait, Orientation::Landscape] {
        let config = GridConfig::new(3, 3).with_orientation(orientation);
        let plan = Imposer::grid(config).unwrap().plan().clone();
        let (width, height) = plan.page_size;
        for slot in 0..plan.capacity() {
            let rect = plan.slot_rect(slot).unwrap();
            assert!(rect.x1 >= Pt::ZERO && rect.y1 >= Pt::ZERO);
            assert!(rect.x2 <= width && rect.y2 <= height);
        }
    }
}

#[test]
fn cut_ready_rejects_grids_that_dont_fit() {
    let config = GridConfig::for_mode(PdfMode::CutReady).with_paper(spell_cards::pagesize::A4);
    let err = Imposer::cut_ready(GridConfig { rows: 10, cols: 10, ..config }).unwrap_err();
    assert!(matches!(err, ConfigError::GridDoesNotFit { rows: 10, cols: 10, .. }));

    // and nothing is drawn for a bad grid
    let err = Imposer::grid(GridConfig::new(0, 3)).unwrap_err();
    assert_eq!(err, ConfigError::EmptyGrid { rows: 0, cols: 3 });
}

#[test]
fn cut_ready_pages_are_decorated_around_the_cards() {
    let config = GridConfig::for_mode(PdfMode::CutReady);
    let imposer = Imposer::for_mode(PdfMode::CutReady, config).unwrap();
    let mut doc = Document::default();
    imposer
        .impose(&mut doc, &cards(2), &mut FakeSource::default())
        .unwrap();

    for page in doc.pages_in_order() {
        let contents = &page.contents;
        assert_eq!(contents.len(), 5);
        assert!(matches!(contents[0], PageContents::RawContent(_)));
        assert!(matches!(contents[1], PageContents::RawContent(_)));
        assert!(matches!(contents[2], PageContents::Image(_)));
        assert!(matches!(contents[3], PageContents::Image(_)));
        assert!(matches!(contents[4], PageContents::RawContent(_)));
    }
}

#[test]
fn grid_pages_have_no_decorations() {
    let imposer = Imposer::for_mode(PdfMode::Grid, GridConfig::default()).unwrap();
    let mut doc = Document::default();
    imposer
        .impose(&mut doc, &cards(2), &mut FakeSource::default())
        .unwrap();
    for page in doc.pages_in_order() {
        assert!(page
            .contents
            .iter()
            .all(|c| matches!(c, PageContents::Image(_))));
    }
}

#[test]
fn empty_groups_produce_no_pages() {
    let imposer = Imposer::grid(GridConfig::new(1, 2)).unwrap();
    let mut doc = Document::default();
    let groups = vec![
        CardGroup::new(vec![None, None]),
        CardGroup::new(vec![Some("Light".into()), None]),
    ];
    let report = imposer
        .impose_groups(&mut doc, groups, &mut FakeSource::default())
        .unwrap();
    assert_eq!(report.pages, 2);
    assert_eq!(report.cards, 1);
}

#[test]
fn single_card_mode_fills_each_page() {
    let imposer = Imposer::for_mode(PdfMode::SingleCard, GridConfig::new(5, 5)).unwrap();
    let plan = imposer.plan();
    assert_eq!(plan.capacity(), 1);
    assert_eq!(plan.page_size, SINGLE_CARD);
    let rect = plan.slot_rect(0).unwrap();
    assert_eq!((rect.x1, rect.y1), (Pt::ZERO, Pt::ZERO));
    assert_eq!((rect.x2, rect.y2), SINGLE_CARD);

    let mut doc = Document::default();
    let report = imposer
        .impose(&mut doc, &cards(3), &mut FakeSource::default())
        .unwrap();
    assert_eq!(report.pages, 6);
}

#[test]
fn imposed_document_writes_a_pdf() {
    let imposer = Imposer::cut_ready(GridConfig::for_mode(PdfMode::CutReady)).unwrap();
    let mut doc = Document::default();
    imposer
        .impose(&mut doc, &cards(4), &mut FakeSource::default())
        .unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    doc.write(file.as_file_mut()).unwrap();

    let mut bytes = Vec::new();
    file.reopen().unwrap().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
