use skrolla::{Page, SequenceFades};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/portfolio.json");
    let page: Page = serde_json::from_str(s).unwrap();
    page.validate().unwrap();
}

#[test]
fn json_fixture_parses_expected_shape() {
    let s = include_str!("data/portfolio.json");
    let page: Page = serde_json::from_str(s).unwrap();

    assert_eq!(page.title, "Atelier Nord");

    let hero = page.hero.as_ref().unwrap();
    assert_eq!(hero.layers.len(), 2);
    assert_eq!(hero.layers[1].factor, -1.0);
    assert_eq!(hero.layers[1].tilt_deg, Some(4.0));

    assert_eq!(page.showcases.len(), 3);
    let work = &page.showcases[0];
    assert_eq!(work.blocks.len(), 2);
    assert!(work.blocks[0].reveal.is_some());
    assert!(work.blocks[1].reveal.is_none());

    let gallery = page.showcases[1].sequence.as_ref().unwrap();
    assert_eq!(gallery.items.len(), 3);
    assert!(matches!(gallery.fades, SequenceFades::Segments));

    let villa = page.showcases[2].sequence.as_ref().unwrap();
    match &villa.fades {
        SequenceFades::Custom(curves) => assert_eq!(curves.len(), 2),
        SequenceFades::Segments => panic!("expected custom fades"),
    }

    assert_eq!(page.projects.len(), 2);
}
