use skrolla::{
    Hero, MediaBlock, MediaItem, MediaSequence, PageBuilder, ParallaxLayer, ProjectCard,
    ScrollWindow, Showcase, SpringConfig,
};

fn main() -> anyhow::Result<()> {
    let hero = Hero {
        heading: "Studio reel".to_string(),
        tagline: Some("Selected work".to_string()),
        spring: SpringConfig::default(),
        layers: vec![
            ParallaxLayer::follow("hero.art"),
            ParallaxLayer::counter("hero.title"),
        ],
    };

    let page = PageBuilder::new("Demo")
        .hero(hero)
        .showcase(Showcase {
            id: "work".to_string(),
            title: "Work".to_string(),
            blocks: vec![MediaBlock::standard(
                "work.still",
                MediaItem::image("stills/entry.jpg"),
            )?],
            sequence: Some(MediaSequence::segments(
                vec![
                    MediaItem::image("stills/day.jpg"),
                    MediaItem::image("stills/dusk.jpg"),
                ],
                ScrollWindow::contain(),
            )),
        })
        .project(ProjectCard {
            title: "Entry".to_string(),
            description: "Lobby sequence for a small museum.".to_string(),
            tags: vec!["film".to_string()],
            repo_url: None,
            live_url: None,
        })
        .build()?;

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
