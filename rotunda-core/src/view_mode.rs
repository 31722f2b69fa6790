//! # View mode control for Rotunda Core
//!
//! This module drives the two presentation modes of the workspace.
//! Arranged mode spreads the displayed rail around the viewer at full
//! scale and hides the stash entirely; management mode shrinks every
//! view to a preview and shows both rails on two stacked arcs so they
//! can be reordered.
//!
//! The controller also owns gaze focus: in arranged mode the displayed
//! view nearest the viewer's azimuth (within a configurable tolerance)
//! is focused and receives input. Focus is sticky: when the viewer
//! looks at empty space between views, the previous focus is kept
//! rather than dropped, so input does not flicker at slot boundaries.

use crate::config::LayoutConfig;
use crate::layout::{arc_placements, shortest_arc};
use crate::views::ViewSet;
use rotunda_view_api::Rail;
use tracing::{debug, info};
use uuid::Uuid;

/// Presentation mode of the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Full-scale ring of displayed views; hidden views invisible
    #[default]
    Arranged,
    /// Preview-scale overview of both rails for reordering
    Management,
}

impl ViewMode {
    /// The opposite mode.
    pub fn other(&self) -> ViewMode {
        match self {
            ViewMode::Arranged => ViewMode::Management,
            ViewMode::Management => ViewMode::Arranged,
        }
    }

    /// Get a human-readable name for the mode.
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::Arranged => "Arranged",
            ViewMode::Management => "Management",
        }
    }
}

/// Controller for mode transitions, editing state and gaze focus.
///
/// Mode entry is idempotent: re-entering the current mode simply
/// re-applies its layout, which is also how rail changes are made
/// visible after a view is created, closed or moved.
///
/// # Example
///
/// ```rust
/// use rotunda_core::config::LayoutConfig;
/// use rotunda_core::view_mode::{ViewMode, ViewModeController};
/// use rotunda_core::views::ViewSet;
///
/// let mut views = ViewSet::new();
/// views.create("browser");
///
/// let mut controller = ViewModeController::new();
/// controller.enter_management(&mut views, &LayoutConfig::default());
/// assert_eq!(controller.mode(), ViewMode::Management);
/// ```
#[derive(Debug, Default)]
pub struct ViewModeController {
    /// Current presentation mode
    mode: ViewMode,
    /// Whether management-mode editing (drag reordering) is enabled
    editing: bool,
    /// View currently holding gaze focus, if any
    focus: Option<Uuid>,
}

impl ViewModeController {
    /// Create a controller in arranged mode with editing off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current presentation mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Whether drag reordering is currently enabled.
    pub fn editing(&self) -> bool {
        self.editing
    }

    /// View currently holding gaze focus.
    pub fn focus(&self) -> Option<Uuid> {
        self.focus
    }

    /// Switch to the other mode and lay the views out for it.
    ///
    /// Returns the mode that is now active.
    pub fn toggle_mode(&mut self, views: &mut ViewSet, layout: &LayoutConfig) -> ViewMode {
        match self.mode.other() {
            ViewMode::Arranged => self.enter_arranged(views, layout),
            ViewMode::Management => self.enter_management(views, layout),
        }
        self.mode
    }

    /// Enter arranged mode.
    ///
    /// Displayed views are spread on the full-circle ring at full scale;
    /// the ring keeps the display-cap slot width no matter how few views
    /// are open, so views never crowd together. Hidden views are
    /// deactivated. Editing ends and focus is cleared until the next
    /// gaze update.
    pub fn enter_arranged(&mut self, views: &mut ViewSet, layout: &LayoutConfig) {
        let spacing = layout.arranged_spacing();
        let displayed: Vec<Uuid> = views.rail(Rail::Displayed).to_vec();
        let placements = arc_placements(displayed.len(), spacing, layout.arranged_elevation, 0.0);

        for (id, placement) in displayed.into_iter().zip(placements) {
            if let Some(view) = views.get_mut(id) {
                view.placement = placement;
                view.scale = layout.arranged_scale;
                view.active = true;
                view.focused = false;
            }
        }

        let hidden: Vec<Uuid> = views.rail(Rail::Hidden).to_vec();
        for id in hidden {
            if let Some(view) = views.get_mut(id) {
                view.active = false;
                view.focused = false;
            }
        }

        self.mode = ViewMode::Arranged;
        self.editing = false;
        self.focus = None;
        info!("Entered arranged mode");
    }

    /// Enter management mode.
    ///
    /// Both rails become visible as preview-scale arcs stacked in front
    /// of the viewer: the displayed rail below the horizon, the hidden
    /// rail above it. Focus is cleared; gaze focus only exists in
    /// arranged mode.
    pub fn enter_management(&mut self, views: &mut ViewSet, layout: &LayoutConfig) {
        self.apply_arc(views, Rail::Displayed, layout.displayed_elevation, layout);
        self.apply_arc(views, Rail::Hidden, layout.hidden_elevation, layout);

        self.mode = ViewMode::Management;
        self.focus = None;
        info!("Entered management mode");
    }

    /// Toggle drag-reordering in management mode.
    ///
    /// Ignored in arranged mode. Returns the editing state that is now
    /// in effect.
    pub fn toggle_editing(&mut self) -> bool {
        if self.mode != ViewMode::Management {
            debug!("Ignoring editing toggle outside management mode");
            return self.editing;
        }
        self.editing = !self.editing;
        info!("Editing {}", if self.editing { "enabled" } else { "disabled" });
        self.editing
    }

    /// Update gaze focus from the viewer's azimuth.
    ///
    /// Only meaningful in arranged mode; in management mode this is a
    /// no-op. The first displayed view (in rail order) whose azimuth
    /// lies within `tolerance` degrees of the gaze becomes focused. When
    /// no view is within tolerance the previous focus is kept.
    ///
    /// Returns `true` if focus moved to a different view.
    pub fn update_focus(
        &mut self,
        views: &mut ViewSet,
        viewer_azimuth: f32,
        tolerance: f32,
    ) -> bool {
        if self.mode != ViewMode::Arranged {
            return false;
        }

        let candidate = views
            .rail(Rail::Displayed)
            .iter()
            .copied()
            .find(|id| {
                views.get(*id).is_some_and(|view| {
                    shortest_arc(view.placement.azimuth, viewer_azimuth).abs() <= tolerance
                })
            });

        let Some(new_focus) = candidate else {
            return false;
        };
        if self.focus == Some(new_focus) {
            return false;
        }

        if let Some(old) = self.focus.take() {
            if let Some(view) = views.get_mut(old) {
                view.focused = false;
            }
        }
        if let Some(view) = views.get_mut(new_focus) {
            view.focused = true;
        }
        self.focus = Some(new_focus);
        debug!("Focus moved to view {}", new_focus);
        true
    }

    /// Drop focus without handing it to another view.
    pub fn clear_focus(&mut self, views: &mut ViewSet) {
        if let Some(old) = self.focus.take() {
            if let Some(view) = views.get_mut(old) {
                view.focused = false;
            }
        }
    }

    /// Lay one rail out on its management arc.
    fn apply_arc(&self, views: &mut ViewSet, rail: Rail, elevation: f32, layout: &LayoutConfig) {
        let ids: Vec<Uuid> = views.rail(rail).to_vec();
        let placements = arc_placements(ids.len(), layout.management_spacing, elevation, 0.0);

        for (id, placement) in ids.into_iter().zip(placements) {
            if let Some(view) = views.get_mut(id) {
                view.placement = placement;
                view.scale = layout.management_scale;
                view.active = true;
                view.focused = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotunda_view_api::Placement;

    fn setup(n: usize) -> (ViewSet, Vec<Uuid>, LayoutConfig) {
        let mut views = ViewSet::new();
        let ids = (0..n).map(|i| views.create(format!("view {i}"))).collect();
        (views, ids, LayoutConfig::default())
    }

    #[test]
    fn test_arranged_layout_three_views() {
        let (mut views, ids, layout) = setup(3);
        let mut controller = ViewModeController::new();
        controller.enter_arranged(&mut views, &layout);

        let azimuths: Vec<f32> = ids
            .iter()
            .map(|id| views.get(*id).unwrap().placement.azimuth)
            .collect();
        assert_eq!(azimuths, vec![-60.0, 0.0, 60.0]);
        assert!(ids.iter().all(|id| views.get(*id).unwrap().scale == 1.0));
    }

    #[test]
    fn test_arranged_deactivates_hidden() {
        let (mut views, ids, layout) = setup(8);
        let mut controller = ViewModeController::new();
        controller.enter_arranged(&mut views, &layout);

        assert!(views.get(ids[5]).unwrap().active);
        assert!(!views.get(ids[6]).unwrap().active);
        assert!(!views.get(ids[7]).unwrap().active);
    }

    #[test]
    fn test_management_layout_two_arcs() {
        let (mut views, ids, layout) = setup(8);
        let mut controller = ViewModeController::new();
        controller.enter_management(&mut views, &layout);

        // 6 displayed previews on the lower arc
        let displayed: Vec<Placement> = ids[..6]
            .iter()
            .map(|id| views.get(*id).unwrap().placement)
            .collect();
        let azimuths: Vec<f32> = displayed.iter().map(|p| p.azimuth).collect();
        assert_eq!(azimuths, vec![-50.0, -30.0, -10.0, 10.0, 30.0, 50.0]);
        assert!(displayed.iter().all(|p| p.elevation == -22.0));

        // 2 hidden previews on the upper arc, active again
        let hidden: Vec<Placement> = ids[6..]
            .iter()
            .map(|id| views.get(*id).unwrap().placement)
            .collect();
        assert_eq!(hidden[0], Placement::new(27.0, -10.0));
        assert_eq!(hidden[1], Placement::new(27.0, 10.0));
        assert!(ids.iter().all(|id| views.get(*id).unwrap().active));
        assert!(ids.iter().all(|id| views.get(*id).unwrap().scale == 0.28));
    }

    #[test]
    fn test_mode_toggle_round_trip() {
        let (mut views, _, layout) = setup(2);
        let mut controller = ViewModeController::new();
        assert_eq!(controller.mode(), ViewMode::Arranged);

        assert_eq!(
            controller.toggle_mode(&mut views, &layout),
            ViewMode::Management
        );
        assert_eq!(
            controller.toggle_mode(&mut views, &layout),
            ViewMode::Arranged
        );
    }

    #[test]
    fn test_arranged_entry_is_idempotent() {
        // 4 views keep the 6-slot spacing, so the ring has gaps
        let (mut views, ids, layout) = setup(4);
        let mut controller = ViewModeController::new();

        controller.enter_arranged(&mut views, &layout);
        let before: Vec<Placement> = ids
            .iter()
            .map(|id| views.get(*id).unwrap().placement)
            .collect();
        assert_eq!(
            before.iter().map(|p| p.azimuth).collect::<Vec<f32>>(),
            vec![-90.0, -30.0, 30.0, 90.0]
        );

        controller.enter_arranged(&mut views, &layout);
        let after: Vec<Placement> = ids
            .iter()
            .map(|id| views.get(*id).unwrap().placement)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_management_entry_is_idempotent() {
        let (mut views, ids, layout) = setup(4);
        let mut controller = ViewModeController::new();

        controller.enter_management(&mut views, &layout);
        let before: Vec<Placement> = ids
            .iter()
            .map(|id| views.get(*id).unwrap().placement)
            .collect();
        controller.enter_management(&mut views, &layout);
        let after: Vec<Placement> = ids
            .iter()
            .map(|id| views.get(*id).unwrap().placement)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_editing_only_in_management() {
        let (mut views, _, layout) = setup(1);
        let mut controller = ViewModeController::new();

        assert!(!controller.toggle_editing());

        controller.enter_management(&mut views, &layout);
        assert!(controller.toggle_editing());
        assert!(!controller.toggle_editing());

        // leaving management mode ends editing
        controller.toggle_editing();
        controller.enter_arranged(&mut views, &layout);
        assert!(!controller.editing());
    }

    #[test]
    fn test_focus_follows_gaze() {
        let (mut views, ids, layout) = setup(3);
        let mut controller = ViewModeController::new();
        controller.enter_arranged(&mut views, &layout);

        // views at -60, 0, 60; gaze straight ahead picks the middle one
        assert!(controller.update_focus(&mut views, 0.0, 30.0));
        assert_eq!(controller.focus(), Some(ids[1]));
        assert!(views.get(ids[1]).unwrap().focused);

        // gaze over the right view moves focus there
        assert!(controller.update_focus(&mut views, 55.0, 30.0));
        assert_eq!(controller.focus(), Some(ids[2]));
        assert!(!views.get(ids[1]).unwrap().focused);
        assert!(views.get(ids[2]).unwrap().focused);
    }

    #[test]
    fn test_focus_sticky_outside_tolerance() {
        let (mut views, ids, layout) = setup(2);
        let mut controller = ViewModeController::new();
        controller.enter_arranged(&mut views, &layout);

        // views at -30 and 30
        assert!(controller.update_focus(&mut views, -30.0, 30.0));
        assert_eq!(controller.focus(), Some(ids[0]));

        // gaze far behind the viewer: nothing in tolerance, focus kept
        assert!(!controller.update_focus(&mut views, 180.0, 30.0));
        assert_eq!(controller.focus(), Some(ids[0]));
        assert!(views.get(ids[0]).unwrap().focused);
    }

    #[test]
    fn test_focus_unchanged_is_not_a_change() {
        let (mut views, ids, layout) = setup(1);
        let mut controller = ViewModeController::new();
        controller.enter_arranged(&mut views, &layout);

        assert!(controller.update_focus(&mut views, 0.0, 30.0));
        assert!(!controller.update_focus(&mut views, 5.0, 30.0));
        assert_eq!(controller.focus(), Some(ids[0]));
    }

    #[test]
    fn test_no_focus_in_management_mode() {
        let (mut views, _, layout) = setup(2);
        let mut controller = ViewModeController::new();
        controller.enter_management(&mut views, &layout);

        assert!(!controller.update_focus(&mut views, 0.0, 30.0));
        assert_eq!(controller.focus(), None);
    }
}
