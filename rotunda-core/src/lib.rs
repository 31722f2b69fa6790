//! # Rotunda Core
//!
//! Core functionality for the Rotunda window manager. This crate
//! provides the panel-layout and drag-reordering engine: two ordered
//! view rails (displayed, capped; hidden, unbounded), angular arc
//! layout, the arranged/management mode state machine with gaze focus,
//! and the management-mode drag gesture with live re-bucketing and
//! angular shift interpolation.
//!
//! ## Architecture
//!
//! The engine is single-threaded and frame-driven:
//! - The host calls plain methods on [`Workspace`] in response to input
//!   events (create, close, toggle mode, toggle editing, drag lifecycle)
//! - One [`Workspace::update`] per frame advances focus, interpolation
//!   and event delivery
//! - Rendering and content live behind the [`rotunda_view_api`] traits
//!
//! ## Example
//!
//! ```rust
//! use rotunda_core::{Config, Workspace};
//!
//! let mut workspace = Workspace::with_config(Config::default())?;
//! workspace.initialize()?;
//!
//! for title in ["browser", "notes", "docs"] {
//!     workspace.create_view(title)?;
//! }
//! workspace.update(1.0 / 60.0, 0.0)?;
//! # Ok::<(), rotunda_core::Error>(())
//! ```

pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod layout;
pub mod view_mode;
pub mod views;
pub mod workspace;

pub use config::Config;
pub use drag::{DragOutcome, DragReorderEngine, DragSession};
pub use error::{Error, Result};
pub use events::EventBus;
pub use layout::{arc_placements, shortest_arc, ArcSpec};
pub use rotunda_view_api::{Event, EventType, Placement, Pose, Rail, View};
pub use view_mode::{ViewMode, ViewModeController};
pub use views::{ViewSet, DISPLAY_CAP};
pub use workspace::Workspace;

/// Initialize tracing for the engine
///
/// This sets up structured logging for the entire engine.
///
/// # Example
///
/// ```rust
/// rotunda_core::init_tracing();
/// tracing::info!("Engine started");
/// ```
pub fn init_tracing() {
    // Try to initialize a tracing subscriber but avoid panicking if a global
    // subscriber has already been installed by another logger (for example
    // env_logger). Use `try_init()` to attempt installation and ignore the
    // error when the global subscriber is already set.
    let _ = tracing_subscriber::fmt::try_init();
}
