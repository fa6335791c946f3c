use std::collections::BTreeSet;

use crate::{
    curve::ProgressCurve,
    foundation::error::{SkrollaError, SkrollaResult},
    parallax::ParallaxLayer,
    property::{AnimatedProperty, PropertyKind},
    reveal::Reveal,
    sequence::{MediaItem, MediaSequence},
    spring::SpringConfig,
    window::ScrollWindow,
};

/// Declarative description of one animated page.
///
/// The manifest carries no geometry; element spans and the viewport come
/// from the host at mount time. Every id in the manifest becomes an
/// element name in published style updates, so ids are globally unique.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,
    pub showcases: Vec<Showcase>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectCard>,
}

/// Pointer-tracked header with parallax layers.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Hero {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub spring: SpringConfig,
    pub layers: Vec<ParallaxLayer>,
}

/// A scroll-driven section: either a stack of independently windowed
/// media blocks, a sequence sharing one window, or both.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Showcase {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<MediaBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<MediaSequence>,
}

/// One media block with its own observation window and curve set.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MediaBlock {
    pub id: String,
    pub item: MediaItem,
    pub window: ScrollWindow,
    pub properties: Vec<AnimatedProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Reveal>,
}

impl MediaBlock {
    /// The stock showcase treatment: fade in over the first 15% of the
    /// traversal and out over the last 15%, with a slight scale swell and
    /// upward drift through the middle, plus the zoom reveal on entry.
    pub fn standard(id: impl Into<String>, item: MediaItem) -> SkrollaResult<Self> {
        Ok(Self {
            id: id.into(),
            item,
            window: ScrollWindow::traverse(),
            properties: vec![
                AnimatedProperty::new(
                    PropertyKind::Opacity,
                    ProgressCurve::from_pairs(&[(0.0, 0.0), (0.15, 1.0), (0.85, 1.0), (1.0, 0.0)])?,
                ),
                AnimatedProperty::new(
                    PropertyKind::Scale,
                    ProgressCurve::from_pairs(&[(0.0, 0.92), (0.5, 1.0), (1.0, 0.92)])?,
                ),
                AnimatedProperty::new(
                    PropertyKind::TranslateY,
                    ProgressCurve::from_pairs(&[(0.0, 40.0), (0.5, 0.0), (1.0, -40.0)])?,
                ),
            ],
            reveal: Some(Reveal::zoom()),
        })
    }
}

/// Static project card; listed, never animated by scroll.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

fn claim_id(ids: &mut BTreeSet<String>, id: &str, what: &str) -> SkrollaResult<()> {
    if id.trim().is_empty() {
        return Err(SkrollaError::validation(format!(
            "{what} id must be non-empty"
        )));
    }
    if !ids.insert(id.to_string()) {
        return Err(SkrollaError::validation(format!(
            "duplicate element id '{id}'"
        )));
    }
    Ok(())
}

impl Page {
    pub fn validate(&self) -> SkrollaResult<()> {
        if self.title.trim().is_empty() {
            return Err(SkrollaError::validation("page title must be non-empty"));
        }

        let mut ids = BTreeSet::new();

        if let Some(hero) = &self.hero {
            if hero.heading.trim().is_empty() {
                return Err(SkrollaError::validation("hero heading must be non-empty"));
            }
            hero.spring.validate()?;
            for layer in &hero.layers {
                layer.validate()?;
                claim_id(&mut ids, &layer.id, "parallax layer")?;
            }
        }

        for showcase in &self.showcases {
            claim_id(&mut ids, &showcase.id, "showcase")?;
            if showcase.blocks.is_empty() && showcase.sequence.is_none() {
                return Err(SkrollaError::validation(format!(
                    "showcase '{}' has neither blocks nor a sequence",
                    showcase.id
                )));
            }

            for block in &showcase.blocks {
                claim_id(&mut ids, &block.id, "media block")?;
                for property in &block.properties {
                    property.validate().map_err(|e| {
                        SkrollaError::validation(format!("block '{}': {e}", block.id))
                    })?;
                }
                if let Some(reveal) = &block.reveal {
                    reveal.validate().map_err(|e| {
                        SkrollaError::validation(format!("block '{}': {e}", block.id))
                    })?;
                }
            }

            if let Some(sequence) = &showcase.sequence {
                sequence.validate().map_err(|e| {
                    SkrollaError::validation(format!("showcase '{}': {e}", showcase.id))
                })?;
            }
        }

        for project in &self.projects {
            if project.title.trim().is_empty() {
                return Err(SkrollaError::validation("project title must be non-empty"));
            }
        }

        Ok(())
    }
}

pub struct PageBuilder {
    title: String,
    hero: Option<Hero>,
    showcases: Vec<Showcase>,
    projects: Vec<ProjectCard>,
}

impl PageBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            hero: None,
            showcases: Vec::new(),
            projects: Vec::new(),
        }
    }

    pub fn hero(mut self, hero: Hero) -> Self {
        self.hero = Some(hero);
        self
    }

    pub fn showcase(mut self, showcase: Showcase) -> Self {
        self.showcases.push(showcase);
        self
    }

    pub fn project(mut self, project: ProjectCard) -> Self {
        self.projects.push(project);
        self
    }

    pub fn build(self) -> SkrollaResult<Page> {
        let page = Page {
            title: self.title,
            hero: self.hero,
            showcases: self.showcases,
            projects: self.projects,
        };
        page.validate()?;
        Ok(page)
    }
}
