//! # View set management for Rotunda Core
//!
//! This module owns the two ordered rails of views, `displayed`
//! (capped at [`DISPLAY_CAP`]) and `hidden` (unbounded), backed by a
//! single arena keyed by view id. Rail order is significant: it
//! determines each view's angular slot on its arc.
//!
//! Every view belongs to exactly one rail at all times. Any insertion
//! that would push the displayed rail past the cap automatically demotes
//! the last displayed view to the front of the hidden rail. Moves
//! between rails are atomic from the caller's perspective: remove and
//! insert happen inside one call with no observable intermediate state.
//!
//! # Example
//!
//! ```rust
//! use rotunda_core::views::{ViewSet, DISPLAY_CAP};
//! use rotunda_view_api::Rail;
//!
//! let mut views = ViewSet::new();
//! for i in 0..8 {
//!     views.create(format!("view {i}"));
//! }
//! assert_eq!(views.rail(Rail::Displayed).len(), DISPLAY_CAP);
//! assert_eq!(views.rail(Rail::Hidden).len(), 2);
//! ```

use crate::{Error, Result};
use rotunda_view_api::{Rail, View};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Default capacity of the displayed rail.
pub const DISPLAY_CAP: usize = 6;

/// The two ordered view rails plus the arena owning every view.
///
/// A `Uuid -> (Rail, index)` location map is kept in sync by every
/// mutation so ownership lookups are O(1); the map replaces the
/// intrusive list-node back-reference a pointer-based design would use.
#[derive(Debug)]
pub struct ViewSet {
    /// Arena owning every view
    views: HashMap<Uuid, View>,
    /// Workspace rail, capped at `cap`
    displayed: Vec<Uuid>,
    /// Stash rail, unbounded
    hidden: Vec<Uuid>,
    /// Location of every view within its owning rail
    locations: HashMap<Uuid, (Rail, usize)>,
    /// Capacity of the displayed rail
    cap: usize,
}

impl Default for ViewSet {
    fn default() -> Self {
        Self::with_cap(DISPLAY_CAP)
    }
}

impl ViewSet {
    /// Create an empty view set with the default displayed cap.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::views::ViewSet;
    ///
    /// let views = ViewSet::new();
    /// assert!(views.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty view set with a custom displayed cap.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            views: HashMap::new(),
            displayed: Vec::new(),
            hidden: Vec::new(),
            locations: HashMap::new(),
            cap,
        }
    }

    /// Capacity of the displayed rail.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Create a new view and place it on a rail.
    ///
    /// New views go to the end of the displayed rail while it has room,
    /// otherwise to the end of the hidden rail. Returns the new view's
    /// id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::views::ViewSet;
    /// use rotunda_view_api::Rail;
    ///
    /// let mut views = ViewSet::new();
    /// let id = views.create("browser");
    /// assert_eq!(views.locate(id), Some((Rail::Displayed, 0)));
    /// ```
    pub fn create<S: Into<String>>(&mut self, title: S) -> Uuid {
        let view = View::new(Uuid::new_v4(), title);
        let id = view.id;
        self.views.insert(id, view);

        if self.displayed.len() < self.cap {
            self.displayed.push(id);
            self.reindex(Rail::Displayed);
        } else {
            self.hidden.push(id);
            self.reindex(Rail::Hidden);
        }

        debug!("Created view {} on {:?}", id, self.locations[&id].0);
        self.debug_check_invariants();
        id
    }

    /// Close a view, removing it from its rail and destroying it.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the id is unknown.
    pub fn close(&mut self, id: Uuid) -> Result<View> {
        self.remove(id)
            .ok_or_else(|| Error::not_found(format!("View {}", id)))?;
        let view = self
            .views
            .remove(&id)
            .ok_or_else(|| Error::not_found(format!("View {}", id)))?;
        debug!("Closed view {}", id);
        self.debug_check_invariants();
        Ok(view)
    }

    /// Insert an unowned view id into a rail at `index`.
    ///
    /// The index is clamped to `[0, len]`. If the insertion pushes the
    /// displayed rail past the cap, the last displayed view is demoted
    /// to the front of the hidden rail; the demoted id is returned.
    pub fn insert(&mut self, id: Uuid, rail: Rail, index: usize) -> Option<Uuid> {
        debug_assert!(
            !self.locations.contains_key(&id),
            "insert of a view that is already on a rail"
        );

        let list = self.rail_mut(rail);
        let index = index.min(list.len());
        list.insert(index, id);

        let mut demoted = None;
        if rail == Rail::Displayed && self.displayed.len() > self.cap {
            if let Some(last) = self.displayed.pop() {
                self.hidden.insert(0, last);
                debug!("Demoted view {} to the hidden rail", last);
                demoted = Some(last);
            }
        }

        self.reindex(Rail::Displayed);
        self.reindex(Rail::Hidden);
        self.debug_check_invariants();
        demoted
    }

    /// Remove a view from whichever rail currently owns it.
    ///
    /// Returns the rail and index it occupied, or `None` if the view is
    /// not on any rail. The view itself stays in the arena.
    pub fn remove(&mut self, id: Uuid) -> Option<(Rail, usize)> {
        let (rail, index) = self.locations.remove(&id)?;
        self.rail_mut(rail).remove(index);
        self.reindex(rail);
        Some((rail, index))
    }

    /// Atomically move a view to `rail` at `index`.
    ///
    /// Equivalent to remove-then-insert with no externally observable
    /// intermediate state. Returns the id demoted by the displayed cap,
    /// if any.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the view is not on any rail.
    pub fn move_to(&mut self, id: Uuid, rail: Rail, index: usize) -> Result<Option<Uuid>> {
        if !self.locations.contains_key(&id) {
            return Err(Error::not_found(format!("View {}", id)));
        }
        self.remove(id);
        let demoted = self.insert(id, rail, index);
        debug!("Moved view {} to {:?}[{}]", id, rail, index);
        Ok(demoted)
    }

    /// Current rail and index of a view.
    pub fn locate(&self, id: Uuid) -> Option<(Rail, usize)> {
        self.locations.get(&id).copied()
    }

    /// Ordered ids on one rail.
    pub fn rail(&self, rail: Rail) -> &[Uuid] {
        match rail {
            Rail::Displayed => &self.displayed,
            Rail::Hidden => &self.hidden,
        }
    }

    /// Get a view by id.
    pub fn get(&self, id: Uuid) -> Option<&View> {
        self.views.get(&id)
    }

    /// Get a mutable view by id.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    /// Iterate over all views in the arena, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.values()
    }

    /// Total number of views across both rails.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the set holds no views.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    fn rail_mut(&mut self, rail: Rail) -> &mut Vec<Uuid> {
        match rail {
            Rail::Displayed => &mut self.displayed,
            Rail::Hidden => &mut self.hidden,
        }
    }

    /// Rewrite the location map entries for one rail.
    fn reindex(&mut self, rail: Rail) {
        let ids: Vec<Uuid> = self.rail(rail).to_vec();
        for (index, id) in ids.into_iter().enumerate() {
            self.locations.insert(id, (rail, index));
        }
    }

    /// Structural invariants, checked in debug builds after mutations.
    ///
    /// Violations here are programming errors inside the engine and are
    /// never surfaced to callers.
    fn debug_check_invariants(&self) {
        debug_assert!(self.displayed.len() <= self.cap, "displayed rail above cap");
        debug_assert_eq!(
            self.displayed.len() + self.hidden.len(),
            self.views.len(),
            "every view must be on exactly one rail"
        );
        debug_assert!(
            self.displayed
                .iter()
                .chain(self.hidden.iter())
                .all(|id| self.views.contains_key(id)),
            "rail id without arena entry"
        );
        debug_assert!(
            self.displayed.iter().all(|id| !self.hidden.contains(id)),
            "view present on both rails"
        );
    }
}
