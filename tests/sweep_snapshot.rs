use skrolla::{Page, Stage, Viewport};

fn mix64(mut z: u64) -> u64 {
    // SplitMix64 mixing function.
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

/// Scrolls the fixture page top to bottom at 30 samples per second with a
/// refresh tick between samples, and folds every published batch into one
/// digest.
fn sweep_digest() -> (u64, usize) {
    let s = include_str!("data/portfolio.json");
    let page: Page = serde_json::from_str(s).unwrap();
    let mut stage = Stage::new(Viewport::new(1280.0, 800.0).unwrap());
    stage.mount_page(&page).unwrap();

    let mut digest = 0u64;
    let mut published = 0usize;
    for i in 0..=96u32 {
        let t = f64::from(i) / 30.0;
        let offset = f64::from(i) * 50.0;

        let scrolled = stage.sample_scroll(offset, t);
        published += scrolled.len();
        digest ^= digest_u64(&serde_json::to_vec(&scrolled).unwrap());

        let ticked = stage.tick(t + 1.0 / 60.0);
        published += ticked.len();
        digest ^= digest_u64(&serde_json::to_vec(&ticked).unwrap());
    }
    (digest, published)
}

#[test]
fn sweep_snapshot_is_deterministic() {
    let (first, published) = sweep_digest();
    let (second, _) = sweep_digest();
    assert!(published > 0);
    assert_eq!(first, second);
}
