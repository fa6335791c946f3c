use std::collections::BTreeMap;

use crate::{
    foundation::core::{ElementSpan, Point, Rect, Viewport},
    foundation::error::{SkrollaError, SkrollaResult},
    model::Page,
    parallax::{ParallaxLayer, PointerTracker},
    property::{AnimatedProperty, ComputedStyle, PropertyKind, evaluate_properties},
    reveal::{GateEvent, InViewGate, Reveal},
    sequence::MediaSequence,
    spring::SpringConfig,
    window::{ResolvedWindow, ScrollWindow},
};

/// Handle for one mounted binding.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BindingId(pub u64);

/// What one scroll-driven element animates.
#[derive(Clone, Debug)]
pub struct ElementBinding {
    /// Name under which style updates are published.
    pub element: String,
    pub span: ElementSpan,
    pub window: ScrollWindow,
    pub properties: Vec<AnimatedProperty>,
    pub reveal: Option<Reveal>,
}

impl ElementBinding {
    pub fn new(element: impl Into<String>, span: ElementSpan, window: ScrollWindow) -> Self {
        Self {
            element: element.into(),
            span,
            window,
            properties: Vec::new(),
            reveal: None,
        }
    }

    pub fn property(mut self, property: AnimatedProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn reveal(mut self, reveal: Reveal) -> Self {
        self.reveal = Some(reveal);
        self
    }

    fn validate(&self) -> SkrollaResult<()> {
        if self.element.trim().is_empty() {
            return Err(SkrollaError::validation("binding element must be non-empty"));
        }
        for property in &self.properties {
            property.validate()?;
        }
        if let Some(reveal) = &self.reveal {
            reveal.validate()?;
        }
        Ok(())
    }
}

/// A pointer-driven parallax group sharing one smoothing filter.
#[derive(Clone, Debug)]
pub struct ParallaxRig {
    /// Region pointer positions are normalized against.
    pub region: Rect,
    pub spring: SpringConfig,
    pub layers: Vec<ParallaxLayer>,
}

impl ParallaxRig {
    fn validate(&self) -> SkrollaResult<()> {
        self.spring.validate()?;
        if self.layers.is_empty() {
            return Err(SkrollaError::validation(
                "parallax rig must have at least one layer",
            ));
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }
}

/// One published style change.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyleUpdate {
    pub binding: BindingId,
    pub element: String,
    /// Window progress for scroll-driven elements; absent for parallax
    /// layers, which have no scroll window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    pub style: ComputedStyle,
}

struct ScrollElement {
    binding: ElementBinding,
    resolved: Option<ResolvedWindow>,
    gate: InViewGate,
    reveal_started: Option<f64>,
    published: Option<(f64, ComputedStyle)>,
}

impl ScrollElement {
    fn resolve(&mut self, viewport: Viewport) -> ResolvedWindow {
        match self.resolved {
            Some(resolved) => resolved,
            None => {
                let resolved = self.binding.window.resolve(self.binding.span, viewport);
                self.resolved = Some(resolved);
                resolved
            }
        }
    }

    /// Style at `offset` given the element's current trigger state.
    fn style_at(&mut self, offset: f64, viewport: Viewport, now: f64) -> (f64, ComputedStyle) {
        let progress = self.resolve(viewport).progress(offset);
        let mut style = evaluate_properties(&self.binding.properties, progress);
        if let Some(reveal) = &self.binding.reveal {
            let elapsed = self.reveal_started.map_or(0.0, |s| (now - s).max(0.0));
            reveal.apply_to(&mut style, elapsed);
        }
        (progress, style)
    }
}

struct MountedRig {
    rig: ParallaxRig,
    tracker: PointerTracker,
    published: Vec<Option<ComputedStyle>>,
}

/// Single-threaded sampling runtime.
///
/// The host feeds it scroll offsets, pointer positions and refresh ticks,
/// each stamped with a monotonic time in seconds; the stage recomputes
/// the styles those inputs affect and returns only the ones that changed.
/// Samples older than the newest processed timestamp are dropped, so
/// published state is always a function of the most recent input.
///
/// Bindings are scoped subscriptions: mounted elements receive samples,
/// unmounted ones are forgotten entirely (operations on unknown ids are
/// no-ops), and dropping the stage releases everything.
pub struct Stage {
    viewport: Viewport,
    scroll_offset: f64,
    newest_sample: f64,
    last_tick: Option<f64>,
    next_binding: u64,
    elements: BTreeMap<BindingId, ScrollElement>,
    rigs: BTreeMap<BindingId, MountedRig>,
}

impl Stage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_offset: 0.0,
            newest_sample: f64::NEG_INFINITY,
            last_tick: None,
            next_binding: 0,
            elements: BTreeMap::new(),
            rigs: BTreeMap::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn element_count(&self) -> usize {
        self.elements.len() + self.rigs.len()
    }

    pub fn is_mounted(&self, id: BindingId) -> bool {
        self.elements.contains_key(&id) || self.rigs.contains_key(&id)
    }

    /// Progress most recently published for a scroll binding.
    pub fn last_progress(&self, id: BindingId) -> Option<f64> {
        self.elements
            .get(&id)?
            .published
            .as_ref()
            .map(|(progress, _)| *progress)
    }

    fn allocate(&mut self) -> BindingId {
        let id = BindingId(self.next_binding);
        self.next_binding += 1;
        id
    }

    /// Subscribe a scroll-driven element.
    pub fn mount(&mut self, binding: ElementBinding) -> SkrollaResult<BindingId> {
        binding.validate()?;
        let id = self.allocate();
        tracing::debug!(element = %binding.element, id = id.0, "mount");
        self.elements.insert(
            id,
            ScrollElement {
                binding,
                resolved: None,
                gate: InViewGate::default(),
                reveal_started: None,
                published: None,
            },
        );
        Ok(id)
    }

    /// Subscribe a parallax rig; its layers publish under their own ids.
    pub fn mount_parallax(&mut self, rig: ParallaxRig) -> SkrollaResult<BindingId> {
        rig.validate()?;
        let id = self.allocate();
        tracing::debug!(layers = rig.layers.len(), id = id.0, "mount parallax");
        let published = vec![None; rig.layers.len()];
        let tracker = PointerTracker::new(rig.spring);
        self.rigs.insert(
            id,
            MountedRig {
                rig,
                tracker,
                published,
            },
        );
        Ok(id)
    }

    /// Release a binding. Unknown ids are a no-op.
    pub fn unmount(&mut self, id: BindingId) {
        if self.elements.remove(&id).is_some() || self.rigs.remove(&id).is_some() {
            tracing::debug!(id = id.0, "unmount");
        }
    }

    /// Release every binding.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.rigs.clear();
    }

    /// Replace the viewport, invalidating every cached window. Styles are
    /// recomputed against the new geometry on the next sample.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for element in self.elements.values_mut() {
            element.resolved = None;
        }
    }

    /// Update one element's document span after a relayout. Unknown ids
    /// are a no-op.
    pub fn set_span(&mut self, id: BindingId, span: ElementSpan) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.binding.span = span;
            element.resolved = None;
        }
    }

    /// Update the region a rig normalizes pointer positions against.
    /// Unknown ids are a no-op.
    pub fn set_region(&mut self, id: BindingId, region: Rect) {
        if let Some(mounted) = self.rigs.get_mut(&id) {
            mounted.rig.region = region;
        }
    }

    /// True when `t` predates an already processed sample.
    fn is_stale(&self, t: f64) -> bool {
        t < self.newest_sample
    }

    /// Process a scroll notification and return the styles it changed.
    #[tracing::instrument(skip(self))]
    pub fn sample_scroll(&mut self, offset: f64, t: f64) -> Vec<StyleUpdate> {
        if !offset.is_finite() || !t.is_finite() {
            return Vec::new();
        }
        if self.is_stale(t) {
            tracing::debug!(t, newest = self.newest_sample, "dropping stale scroll sample");
            return Vec::new();
        }
        self.newest_sample = t;
        self.scroll_offset = offset;

        let viewport = self.viewport;
        let mut updates = Vec::new();
        for (&id, element) in &mut self.elements {
            let fraction = element.binding.span.visible_fraction(offset, viewport);
            match element.gate.update(fraction) {
                GateEvent::Entered => {
                    if element.binding.reveal.is_some() {
                        element.reveal_started = Some(t);
                    }
                }
                GateEvent::Exited => element.reveal_started = None,
                GateEvent::Unchanged => {}
            }

            let (progress, style) = element.style_at(offset, viewport, t);
            if element.published != Some((progress, style)) {
                element.published = Some((progress, style));
                updates.push(StyleUpdate {
                    binding: id,
                    element: element.binding.element.clone(),
                    progress: Some(progress),
                    style,
                });
            }
        }
        updates
    }

    /// Retarget every rig's smoothing filter from a pointer position.
    /// Output moves on subsequent ticks, not here.
    #[tracing::instrument(skip(self))]
    pub fn sample_pointer(&mut self, pointer: Point, t: f64) {
        if !pointer.x.is_finite() || !pointer.y.is_finite() || !t.is_finite() {
            return;
        }
        if self.is_stale(t) {
            tracing::debug!(t, newest = self.newest_sample, "dropping stale pointer sample");
            return;
        }
        self.newest_sample = t;
        for mounted in self.rigs.values_mut() {
            mounted.tracker.set_pointer(pointer, mounted.rig.region);
        }
    }

    /// Ease every rig back to rest, as when the pointer leaves the page.
    pub fn clear_pointer(&mut self, t: f64) {
        if !t.is_finite() || self.is_stale(t) {
            return;
        }
        self.newest_sample = t;
        for mounted in self.rigs.values_mut() {
            mounted.tracker.clear();
        }
    }

    /// Advance time-driven state (springs, reveal clocks) to `t` and
    /// return the styles that changed.
    #[tracing::instrument(skip(self))]
    pub fn tick(&mut self, t: f64) -> Vec<StyleUpdate> {
        if !t.is_finite() {
            return Vec::new();
        }
        if self.is_stale(t) {
            tracing::debug!(t, newest = self.newest_sample, "dropping stale tick");
            return Vec::new();
        }
        self.newest_sample = t;
        let dt = self.last_tick.map_or(0.0, |prev| (t - prev).max(0.0));
        self.last_tick = Some(t);

        let viewport = self.viewport;
        let offset = self.scroll_offset;
        let mut updates = Vec::new();

        // Reveal clocks move element styles even with the page still.
        for (&id, element) in &mut self.elements {
            if element.binding.reveal.is_none() {
                continue;
            }
            let (progress, style) = element.style_at(offset, viewport, t);
            if element.published != Some((progress, style)) {
                element.published = Some((progress, style));
                updates.push(StyleUpdate {
                    binding: id,
                    element: element.binding.element.clone(),
                    progress: Some(progress),
                    style,
                });
            }
        }

        for (&id, mounted) in &mut self.rigs {
            mounted.tracker.tick(dt);
            for (index, layer) in mounted.rig.layers.iter().enumerate() {
                let style = mounted.tracker.layer_style(layer);
                if mounted.published[index] != Some(style) {
                    mounted.published[index] = Some(style);
                    updates.push(StyleUpdate {
                        binding: id,
                        element: layer.id.clone(),
                        progress: None,
                        style,
                    });
                }
            }
        }
        updates
    }

    /// Mount every animated element of a validated page manifest.
    ///
    /// Geometry is synthesized as a single stacked column: the hero fills
    /// the first viewport, each block one viewport, each sequence
    /// container two (so its containment window has travel). Hosts with
    /// real layouts mount bindings directly instead.
    pub fn mount_page(&mut self, page: &Page) -> SkrollaResult<Vec<BindingId>> {
        page.validate()?;

        let vh = self.viewport.height;
        let mut ids = Vec::new();
        let mut cursor = 0.0;

        if let Some(hero) = &page.hero {
            let region = Rect::new(0.0, 0.0, self.viewport.width, vh);
            ids.push(self.mount_parallax(ParallaxRig {
                region,
                spring: hero.spring,
                layers: hero.layers.clone(),
            })?);
            cursor += vh;
        }

        for showcase in &page.showcases {
            for block in &showcase.blocks {
                let span = ElementSpan::new(cursor, vh)?;
                let mut binding = ElementBinding::new(block.id.clone(), span, block.window);
                binding.properties = block.properties.clone();
                binding.reveal = block.reveal;
                ids.push(self.mount(binding)?);
                cursor += vh;
            }

            if let Some(sequence) = &showcase.sequence {
                let span = ElementSpan::new(cursor, vh * 2.0)?;
                ids.extend(self.mount_sequence(&showcase.id, sequence, span)?);
                cursor += vh * 2.0;
            }
        }

        Ok(ids)
    }

    /// Mount a sequence as one binding per item over a shared span.
    pub fn mount_sequence(
        &mut self,
        name: &str,
        sequence: &MediaSequence,
        span: ElementSpan,
    ) -> SkrollaResult<Vec<BindingId>> {
        let curves = sequence.opacity_curves()?;
        let mut ids = Vec::with_capacity(curves.len());
        for (index, curve) in curves.into_iter().enumerate() {
            let binding = ElementBinding::new(format!("{name}.{index}"), span, sequence.window)
                .property(AnimatedProperty::new(PropertyKind::Opacity, curve));
            ids.push(self.mount(binding)?);
        }
        Ok(ids)
    }
}
