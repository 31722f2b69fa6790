//! View model for the Rotunda window management engine.
//!
//! This module provides the types describing a single content surface
//! ("view") arranged around the user, together with the traits that
//! external collaborators implement: a [`SurfaceFactory`] that owns the
//! content lifecycle behind each view, and a [`PoseSink`] that receives
//! per-tick pose updates for rendering.
//!
//! The engine only tracks view handles and angular poses; everything
//! visual happens on the other side of these traits.
//!
//! # Example
//!
//! ```rust
//! use rotunda_view_api::{Placement, Rail, View};
//! use uuid::Uuid;
//!
//! let view = View::new(Uuid::new_v4(), "Documentation");
//! assert_eq!(view.placement, Placement::default());
//! assert!(view.active);
//! assert!(!view.focused);
//! ```

use crate::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Angular position on the sphere around the viewer, in degrees.
///
/// `elevation` is the vertical angle (positive = above the horizon),
/// `azimuth` the horizontal angle (0 = straight ahead, positive =
/// clockwise seen from above).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Vertical angle in degrees
    pub elevation: f32,
    /// Horizontal angle in degrees
    pub azimuth: f32,
}

impl Placement {
    /// Create a placement from elevation and azimuth in degrees.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::Placement;
    ///
    /// let p = Placement::new(-22.0, 10.0);
    /// assert_eq!(p.elevation, -22.0);
    /// assert_eq!(p.azimuth, 10.0);
    /// ```
    pub fn new(elevation: f32, azimuth: f32) -> Self {
        Self { elevation, azimuth }
    }
}

/// Which of the two ordered rails currently owns a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rail {
    /// The active workspace rail, capped at the display limit
    Displayed,
    /// The stash rail, unbounded
    Hidden,
}

impl Rail {
    /// The opposite rail.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::Rail;
    ///
    /// assert_eq!(Rail::Displayed.other(), Rail::Hidden);
    /// assert_eq!(Rail::Hidden.other(), Rail::Displayed);
    /// ```
    pub fn other(&self) -> Rail {
        match self {
            Rail::Displayed => Rail::Hidden,
            Rail::Hidden => Rail::Displayed,
        }
    }

    /// Get a human-readable name for the rail.
    pub fn display_name(&self) -> &'static str {
        match self {
            Rail::Displayed => "Displayed",
            Rail::Hidden => "Hidden",
        }
    }
}

/// A single content surface arranged around the viewer.
///
/// Views are created by the engine on a creation request and destroyed
/// on a close request. Angular position, scale, activation and focus are
/// mutated by the mode controller and the drag engine; renderers observe
/// the result through [`View::pose`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    /// Unique identifier for this view
    pub id: Uuid,
    /// Display title of the view
    pub title: String,
    /// Current angular position
    pub placement: Placement,
    /// Current render scale (1.0 = full workspace size)
    pub scale: f32,
    /// Whether the view is currently shown at all
    pub active: bool,
    /// Whether the view currently faces the user and receives input
    pub focused: bool,
}

impl View {
    /// Create a new view at the default placement.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::View;
    /// use uuid::Uuid;
    ///
    /// let view = View::new(Uuid::new_v4(), "Browser");
    /// assert_eq!(view.title, "Browser");
    /// assert_eq!(view.scale, 1.0);
    /// ```
    pub fn new<S: Into<String>>(id: Uuid, title: S) -> Self {
        Self {
            id,
            title: title.into(),
            placement: Placement::default(),
            scale: 1.0,
            active: true,
            focused: false,
        }
    }

    /// Snapshot of the renderable state of this view.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::View;
    /// use uuid::Uuid;
    ///
    /// let view = View::new(Uuid::new_v4(), "Notes");
    /// let pose = view.pose();
    /// assert!(pose.active);
    /// ```
    pub fn pose(&self) -> Pose {
        Pose {
            placement: self.placement,
            scale: self.scale,
            active: self.active,
        }
    }
}

/// Renderable pose of a view for one frame.
///
/// The engine writes one of these per view per tick; a renderer binding
/// applies it to the on-screen surface. Inactive views are expressed as
/// `active == false` rather than being dropped from the set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Angular position
    pub placement: Placement,
    /// Render scale
    pub scale: f32,
    /// Visibility signal
    pub active: bool,
}

/// Collaborator owning the content lifecycle behind each view.
///
/// The engine calls these when views are created or closed; rendering
/// and content loading are entirely the implementer's concern.
pub trait SurfaceFactory: Send {
    /// Create the content surface backing a freshly created view.
    fn create_surface(&mut self, view_id: Uuid) -> Result<()>;

    /// Destroy the content surface behind a closed view.
    fn destroy_surface(&mut self, view_id: Uuid) -> Result<()>;
}

/// Renderer binding receiving per-tick poses.
///
/// Implementations typically forward the pose to a scene graph or
/// compositor. Errors are logged by the engine but never interrupt the
/// frame.
pub trait PoseSink: Send {
    /// Apply the pose computed for `view_id` this tick.
    fn apply_pose(&mut self, view_id: Uuid, pose: &Pose) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_creation() {
        let p = Placement::new(27.0, -10.0);
        assert_eq!(p.elevation, 27.0);
        assert_eq!(p.azimuth, -10.0);

        let d = Placement::default();
        assert_eq!(d.elevation, 0.0);
        assert_eq!(d.azimuth, 0.0);
    }

    #[test]
    fn test_rail_other() {
        assert_eq!(Rail::Displayed.other(), Rail::Hidden);
        assert_eq!(Rail::Hidden.other(), Rail::Displayed);
        assert_eq!(Rail::Displayed.other().other(), Rail::Displayed);
    }

    #[test]
    fn test_rail_display_name() {
        assert_eq!(Rail::Displayed.display_name(), "Displayed");
        assert_eq!(Rail::Hidden.display_name(), "Hidden");
    }

    #[test]
    fn test_view_creation() {
        let id = Uuid::new_v4();
        let view = View::new(id, "Test View");

        assert_eq!(view.id, id);
        assert_eq!(view.title, "Test View");
        assert_eq!(view.scale, 1.0);
        assert!(view.active);
        assert!(!view.focused);
    }

    #[test]
    fn test_view_pose_snapshot() {
        let mut view = View::new(Uuid::new_v4(), "Test");
        view.placement = Placement::new(-22.0, 50.0);
        view.scale = 0.28;
        view.active = false;

        let pose = view.pose();
        assert_eq!(pose.placement, Placement::new(-22.0, 50.0));
        assert_eq!(pose.scale, 0.28);
        assert!(!pose.active);
    }

    #[test]
    fn test_view_serialization() {
        let view = View::new(Uuid::new_v4(), "Serialized");
        let json = serde_json::to_string(&view).unwrap();
        let back: View = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, view.id);
        assert_eq!(back.title, view.title);
        assert_eq!(back.placement, view.placement);
    }
}
