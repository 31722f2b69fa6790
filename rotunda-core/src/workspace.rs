//! # Workspace facade for Rotunda Core
//!
//! This module provides the main entry point into the engine. The
//! [`Workspace`] owns the view set, the mode controller, the drag
//! engine and the event bus, and exposes the plain methods a host calls
//! in response to input events: view creation and closing, mode and
//! editing toggles, the drag lifecycle, and per-focus scroll and font
//! size forwarding.
//!
//! The host drives one [`Workspace::update`] per frame with the elapsed
//! time and the viewer's forward azimuth. Within one frame, gesture
//! classification happens before layout recomputation, interpolation is
//! applied next, poses are pushed to the renderer binding, and queued
//! events are delivered last.

use crate::config::Config;
use crate::drag::DragReorderEngine;
use crate::events::EventBus;
use crate::view_mode::{ViewMode, ViewModeController};
use crate::views::ViewSet;
use crate::Result;
use rotunda_view_api::{Event, EventType, Placement, Pose, PoseSink, SurfaceFactory};
use tracing::{info, warn};
use uuid::Uuid;

/// The engine's composition root.
///
/// # Example
///
/// ```rust
/// use rotunda_core::{Config, Workspace};
///
/// let mut workspace = Workspace::with_config(Config::default())?;
/// workspace.initialize()?;
///
/// let id = workspace.create_view("browser")?;
/// workspace.toggle_mode()?;
/// workspace.update(1.0 / 60.0, 0.0)?;
///
/// workspace.shutdown()?;
/// # Ok::<(), rotunda_core::Error>(())
/// ```
pub struct Workspace {
    /// Engine configuration
    config: Config,
    /// The two view rails plus arena
    views: ViewSet,
    /// Mode, editing and focus state
    controller: ViewModeController,
    /// Drag gesture state machine
    drag: DragReorderEngine,
    /// Event bus for engine-to-host communication
    event_bus: EventBus,
    /// Content lifecycle collaborator, registered by the host
    surface_factory: Option<Box<dyn SurfaceFactory>>,
    /// Renderer binding receiving per-tick poses
    pose_sink: Option<Box<dyn PoseSink>>,
    /// Whether the workspace is initialized
    initialized: bool,
}

impl Workspace {
    /// Create a workspace with configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::load_or_default()?)
    }

    /// Create a workspace with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let views = ViewSet::with_cap(config.layout.display_cap);
        Ok(Self {
            config,
            views,
            controller: ViewModeController::new(),
            drag: DragReorderEngine::new(),
            event_bus: EventBus::new(),
            surface_factory: None,
            pose_sink: None,
            initialized: false,
        })
    }

    /// Initialize the workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the event bus fails to initialize.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            warn!("Workspace is already initialized");
            return Ok(());
        }

        info!("Initializing workspace");
        self.event_bus.initialize()?;
        self.relayout();
        self.initialized = true;
        Ok(())
    }

    /// Shutdown the workspace, releasing handlers and pending events.
    ///
    /// # Errors
    ///
    /// Returns an error if the event bus fails to shut down.
    pub fn shutdown(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }

        info!("Shutting down workspace");
        if let Err(e) = self.config.save() {
            warn!("Failed to save configuration: {}", e);
        }
        self.event_bus.shutdown()?;
        self.initialized = false;
        Ok(())
    }

    /// Register the content lifecycle collaborator.
    pub fn set_surface_factory(&mut self, factory: Box<dyn SurfaceFactory>) {
        self.surface_factory = Some(factory);
    }

    /// Register the renderer binding.
    pub fn set_pose_sink(&mut self, sink: Box<dyn PoseSink>) {
        self.pose_sink = Some(sink);
    }

    /// The engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The view rails.
    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    /// The event bus, for handler subscription.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.event_bus
    }

    /// Current presentation mode.
    pub fn mode(&self) -> ViewMode {
        self.controller.mode()
    }

    /// Whether drag reordering is enabled.
    pub fn editing(&self) -> bool {
        self.controller.editing()
    }

    /// View currently holding gaze focus.
    pub fn focus(&self) -> Option<Uuid> {
        self.controller.focus()
    }

    /// Create a view and lay the current mode out again.
    ///
    /// The new view lands at the end of the displayed rail while it has
    /// room, otherwise at the end of the hidden rail.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface factory fails to create the
    /// content surface.
    pub fn create_view<S: Into<String>>(&mut self, title: S) -> Result<Uuid> {
        let title = title.into();
        let id = self.views.create(title.clone());

        if let Some(factory) = self.surface_factory.as_mut() {
            factory.create_surface(id)?;
        }

        self.relayout();
        self.emit_with_view(EventType::ViewCreated, &title, id)?;
        self.emit(EventType::LayoutChanged, self.controller.mode().display_name())?;
        Ok(id)
    }

    /// Close a view and lay the current mode out again.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, or the surface
    /// factory's error if destroying the content surface fails.
    pub fn close_view(&mut self, id: Uuid) -> Result<()> {
        let view = self.views.close(id)?;
        self.controller.clear_focus(&mut self.views);

        if let Some(factory) = self.surface_factory.as_mut() {
            factory.destroy_surface(id)?;
        }

        self.relayout();
        self.emit_with_view(EventType::ViewClosed, &view.title, id)?;
        self.emit(EventType::LayoutChanged, self.controller.mode().display_name())?;
        Ok(())
    }

    /// Switch between arranged and management mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the mode change event cannot be queued.
    pub fn toggle_mode(&mut self) -> Result<ViewMode> {
        let mode = self
            .controller
            .toggle_mode(&mut self.views, &self.config.layout);
        self.emit(EventType::ModeChanged, mode.display_name())?;
        Ok(mode)
    }

    /// Toggle drag reordering in management mode.
    ///
    /// A no-op in arranged mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the editing event cannot be queued.
    pub fn toggle_editing(&mut self) -> Result<bool> {
        let before = self.controller.editing();
        let editing = self.controller.toggle_editing();
        if editing != before {
            self.emit(EventType::EditingToggled, if editing { "on" } else { "off" })?;
        }
        Ok(editing)
    }

    /// Begin a drag gesture on a view.
    ///
    /// Rejected as a no-op unless editing is active. Returns whether the
    /// gesture started.
    ///
    /// # Errors
    ///
    /// Returns an error if the drag event cannot be queued.
    pub fn begin_drag(&mut self, id: Uuid) -> Result<bool> {
        let started = self
            .drag
            .begin_drag(&self.views, self.controller.editing(), id);
        if started {
            self.emit_with_view(EventType::DragStarted, "drag", id)?;
        }
        Ok(started)
    }

    /// Feed the controller's live orientation into the current gesture.
    pub fn update_drag(&mut self, placement: Placement) {
        self.drag.update_drag(
            &mut self.views,
            &self.config.layout,
            &self.config.drag,
            placement,
        );
    }

    /// End the current gesture, committing its last classification.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails or an event cannot be
    /// queued.
    pub fn end_drag(&mut self) -> Result<()> {
        let outcome = self.drag.end_drag(
            &mut self.views,
            &mut self.controller,
            &self.config.layout,
        )?;

        if let Some(outcome) = outcome {
            self.emit_with_view(EventType::DragEnded, "drag", outcome.view)?;
            if outcome.moved {
                self.emit_with_view(EventType::ViewMoved, "moved", outcome.view)?;
            }
            if let Some(demoted) = outcome.demoted {
                self.emit_with_view(EventType::ViewDemoted, "demoted", demoted)?;
            }
            self.emit(EventType::LayoutChanged, self.controller.mode().display_name())?;
        }
        Ok(())
    }

    /// Forward a scroll request to the focused view.
    ///
    /// Returns whether a focused view was there to receive it.
    ///
    /// # Errors
    ///
    /// Returns an error if the scroll event cannot be queued.
    pub fn scroll_focused(&mut self, delta: f32) -> Result<bool> {
        let Some(id) = self.controller.focus() else {
            return Ok(false);
        };
        self.emit_with_view(EventType::ViewScrolled, delta.to_string(), id)?;
        Ok(true)
    }

    /// Forward a font size adjustment to the focused view.
    ///
    /// Returns whether a focused view was there to receive it.
    ///
    /// # Errors
    ///
    /// Returns an error if the font size event cannot be queued.
    pub fn adjust_font_size(&mut self, delta: i32) -> Result<bool> {
        let Some(id) = self.controller.focus() else {
            return Ok(false);
        };
        self.emit_with_view(EventType::FontSizeChanged, delta.to_string(), id)?;
        Ok(true)
    }

    /// Advance the engine by one frame.
    ///
    /// Updates gaze focus from `viewer_azimuth`, advances shift
    /// interpolation by `dt` seconds, pushes every view's pose to the
    /// renderer binding, then delivers queued events.
    ///
    /// # Errors
    ///
    /// Returns an error if event delivery fails.
    pub fn update(&mut self, dt: f32, viewer_azimuth: f32) -> Result<()> {
        if self.controller.update_focus(
            &mut self.views,
            viewer_azimuth,
            self.config.focus.tolerance,
        ) {
            if let Some(id) = self.controller.focus() {
                self.emit_with_view(EventType::FocusChanged, "focus", id)?;
            }
        }

        self.drag
            .apply_interpolation(&mut self.views, &self.config.drag, dt);

        if let Some(sink) = self.pose_sink.as_mut() {
            for view in self.views.iter() {
                if let Err(e) = sink.apply_pose(view.id, &view.pose()) {
                    warn!("Pose sink rejected view {}: {}", view.id, e);
                }
            }
        }

        self.event_bus.process_events()?;
        Ok(())
    }

    /// Snapshot of every view's renderable pose.
    pub fn poses(&self) -> Vec<(Uuid, Pose)> {
        self.views
            .iter()
            .map(|view| (view.id, view.pose()))
            .collect()
    }

    /// Re-apply the current mode's layout.
    fn relayout(&mut self) {
        match self.controller.mode() {
            ViewMode::Arranged => self
                .controller
                .enter_arranged(&mut self.views, &self.config.layout),
            ViewMode::Management => self
                .controller
                .enter_management(&mut self.views, &self.config.layout),
        }
    }

    /// Queue an event if the bus is running.
    fn emit(&mut self, event_type: EventType, data: impl Into<String>) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.event_bus.emit(Event::new(event_type, data))
    }

    /// Queue an event tagged with the view it concerns.
    fn emit_with_view(
        &mut self,
        event_type: EventType,
        data: impl Into<String>,
        id: Uuid,
    ) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        let mut event = Event::new(event_type, data);
        event.set_metadata("view_id", id.to_string());
        self.event_bus.emit(event)
    }
}
