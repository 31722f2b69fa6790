//! # Rotunda View API
//!
//! This crate provides the types and traits that tie the Rotunda window
//! management engine to its host: the view data model, angular placement
//! types, the event model, and the collaborator traits a composition
//! root implements (content surface lifecycle, renderer pose binding).
//!
//! The engine itself lives in `rotunda-core`; it only tracks view
//! handles and angular poses. Everything about rendering, web content,
//! VR tracking and input hardware happens behind the traits defined
//! here.
//!
//! ## Example collaborator
//!
//! ```rust
//! use rotunda_view_api::{Pose, PoseSink};
//! use uuid::Uuid;
//!
//! struct PrintSink;
//!
//! impl PoseSink for PrintSink {
//!     fn apply_pose(&mut self, view_id: Uuid, pose: &Pose) -> anyhow::Result<()> {
//!         println!("{view_id}: az {} el {}", pose.placement.azimuth, pose.placement.elevation);
//!         Ok(())
//!     }
//! }
//! ```

pub mod event;
pub mod view;

pub use event::{Event, EventHandler, EventType};
pub use view::{Placement, Pose, PoseSink, Rail, SurfaceFactory, View};

/// Result type used throughout the view API
pub type Result<T> = std::result::Result<T, anyhow::Error>;
