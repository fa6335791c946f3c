use skrolla::{Page, Stage, Viewport};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/portfolio.json");
    let page: Page = serde_json::from_str(s)?;

    let mut stage = Stage::new(Viewport::new(1280.0, 800.0)?);
    stage.mount_page(&page)?;

    for offset in [0.0f64, 400.0, 1200.0, 2800.0, 4300.0, 4800.0] {
        let updates = stage.sample_scroll(offset, offset / 1000.0);
        println!("offset {offset}: {} updates", updates.len());
    }

    Ok(())
}
