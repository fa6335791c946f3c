#![forbid(unsafe_code)]

pub mod curve;
pub mod ease;
pub mod foundation;
pub mod model;
pub mod parallax;
pub mod property;
pub mod reveal;
pub mod sequence;
pub mod spring;
pub mod stage;
pub mod window;

pub use curve::{Breakpoint, ProgressCurve, lerp, remap_clamped};
pub use ease::Ease;
pub use foundation::core::{ElementSpan, Point, Rect, Vec2, Viewport};
pub use foundation::error::{SkrollaError, SkrollaResult};
pub use model::{Hero, MediaBlock, Page, PageBuilder, ProjectCard, Showcase};
pub use parallax::{ParallaxLayer, PointerTracker};
pub use property::{AnimatedProperty, ComputedStyle, PropertyKind, evaluate_properties};
pub use reveal::{GateEvent, InViewGate, Reveal, RevealFrom};
pub use sequence::{
    CROSSFADE_FRACTION, MediaItem, MediaKind, MediaSequence, SequenceFades, crossfade_curve,
};
pub use spring::{Spring, SpringConfig};
pub use stage::{BindingId, ElementBinding, ParallaxRig, Stage, StyleUpdate};
pub use window::{Anchor, ElementEdge, ResolvedWindow, ScrollWindow, ViewportEdge};
