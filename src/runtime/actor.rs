//! Stage actors, their geometry, and the patches that update them
//!
//! - Actors: a program plus the live pose/annotation drawn on stage
//! - Patches: partial, per-actor updates emitted by interpreter passes
//! - RunResult: the pose a pass finished with, used for collision checks

use serde::{Deserialize, Serialize};

use super::ids::{ActorId, SpriteIdentity};
use crate::interpreter::Program;

/// A point on the stage plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned box every actor position is clamped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x
    pub min_x: f64,
    /// Largest x
    pub max_x: f64,
    /// Smallest y
    pub min_y: f64,
    /// Largest y
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: 30.0,
            max_x: 470.0,
            min_y: 30.0,
            max_y: 370.0,
        }
    }
}

impl Bounds {
    /// Clamp a point into the box; NaN coordinates land on the lower edge
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: clamp_axis(point.x, self.min_x, self.max_x),
            y: clamp_axis(point.y, self.min_y, self.max_y),
        }
    }

    /// Whether a point lies inside the box (edges included)
    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

/// Bubble style of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Speech bubble
    Say,
    /// Thought bubble
    Think,
}

/// Transient text shown above an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Bubble text
    pub text: String,
    /// Bubble style
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Speech bubble
    pub fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AnnotationKind::Say,
        }
    }

    /// Thought bubble
    pub fn think(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AnnotationKind::Think,
        }
    }
}

/// An on-stage actor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    /// Stable identity
    pub id: ActorId,
    /// Glyph drawn on stage
    pub glyph: String,
    /// Display name
    pub name: String,
    /// Current position, always inside the stage bounds
    pub position: Point,
    /// Accumulated heading in degrees (never normalized)
    pub heading: f64,
    /// Authored program
    pub program: Program,
    /// Bubble currently shown, if any
    pub annotation: Option<Annotation>,
}

impl Actor {
    /// Create an actor for a pool identity with an empty program
    pub fn new(identity: &SpriteIdentity, position: Point) -> Self {
        Self {
            id: identity.id,
            glyph: identity.glyph.to_string(),
            name: identity.name.to_string(),
            position,
            heading: 0.0,
            program: Program::new(),
            annotation: None,
        }
    }

    /// The pose an interpreter pass starts from
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            heading: self.heading,
        }
    }

    /// Merge a patch into this actor
    pub fn apply(&mut self, patch: &Patch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(heading) = patch.heading {
            self.heading = heading;
        }
        match &patch.annotation {
            Some(AnnotationUpdate::Show(annotation)) => self.annotation = Some(annotation.clone()),
            Some(AnnotationUpdate::Clear) => self.annotation = None,
            None => {}
        }
    }
}

/// Position plus heading: the working state of an interpreter pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position
    pub position: Point,
    /// Heading in degrees
    pub heading: f64,
}

/// Change to an actor's annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationUpdate {
    /// Show a bubble
    Show(Annotation),
    /// Remove the bubble
    Clear,
}

/// Partial update to one actor; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Patch {
    /// New position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// New heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    /// Annotation change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<AnnotationUpdate>,
}

impl Patch {
    /// Position-only patch
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Heading-only patch
    pub fn heading(heading: f64) -> Self {
        Self {
            heading: Some(heading),
            ..Self::default()
        }
    }

    /// Show an annotation
    pub fn show(annotation: Annotation) -> Self {
        Self {
            annotation: Some(AnnotationUpdate::Show(annotation)),
            ..Self::default()
        }
    }

    /// Clear the annotation
    pub fn clear_annotation() -> Self {
        Self {
            annotation: Some(AnnotationUpdate::Clear),
            ..Self::default()
        }
    }
}

/// Pose an actor held when its interpreter pass completed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunResult {
    /// Actor the pass ran for
    pub actor: ActorId,
    /// Final position
    pub position: Point,
    /// Final heading
    pub heading: f64,
}

impl RunResult {
    /// Pose to seed a follow-up pass from
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            heading: self.heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ids::SPRITE_POOL;

    #[test]
    fn clamp_pins_to_edges() {
        let bounds = Bounds::default();
        assert_eq!(bounds.clamp(Point::new(-1e9, 1e9)), Point::new(30.0, 370.0));
        assert_eq!(bounds.clamp(Point::new(f64::NAN, 200.0)), Point::new(30.0, 200.0));
        assert_eq!(bounds.clamp(Point::new(250.0, 100.0)), Point::new(250.0, 100.0));
    }

    #[test]
    fn patch_leaves_unset_fields() {
        let mut actor = Actor::new(&SPRITE_POOL[0], Point::new(100.0, 150.0));
        actor.apply(&Patch::heading(45.0));
        assert_eq!(actor.position, Point::new(100.0, 150.0));
        assert_eq!(actor.heading, 45.0);

        actor.apply(&Patch::show(Annotation::think("Hmm")));
        actor.apply(&Patch::position(Point::new(120.0, 150.0)));
        assert_eq!(actor.annotation, Some(Annotation::think("Hmm")));

        actor.apply(&Patch::clear_annotation());
        assert_eq!(actor.annotation, None);
        assert_eq!(actor.heading, 45.0);
    }
}
