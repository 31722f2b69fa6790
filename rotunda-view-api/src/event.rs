//! Event model for the Rotunda engine.
//!
//! This module provides the event types the engine emits while views are
//! created, arranged, dragged and focused. Events are dispatched through
//! the core's event bus and handled by registered [`EventHandler`]s,
//! letting the composition root react (haptics, menu refreshes, logging)
//! without the engine knowing about any of it.
//!
//! # Example
//!
//! ```rust
//! use rotunda_view_api::{Event, EventHandler, EventType};
//!
//! struct FocusLogger;
//!
//! impl EventHandler for FocusLogger {
//!     fn handle(&mut self, event: &Event) -> anyhow::Result<()> {
//!         if event.event_type() == EventType::FocusChanged {
//!             println!("focus moved: {}", event.data());
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Core trait for handling engine events.
///
/// Handlers are registered with the core's event bus and called when a
/// matching event is processed at the end of a frame.
pub trait EventHandler: Send {
    /// Handle an incoming event.
    ///
    /// Implementations should be cheap; handlers run on the frame tick.
    ///
    /// # Errors
    ///
    /// Return an error if handling fails. The error is logged but does
    /// not prevent other handlers from running.
    fn handle(&mut self, event: &Event) -> anyhow::Result<()>;
}

/// An event emitted by the engine.
///
/// Events carry information about something that happened during a tick,
/// such as a view being created, the mode switching, or a drag
/// committing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event instance
    id: Uuid,
    /// Type of the event
    event_type: EventType,
    /// Optional data payload
    data: String,
    /// Additional metadata
    metadata: HashMap<String, String>,
    /// Timestamp when the event was created
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl Event {
    /// Create a new event with the specified type and data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::{Event, EventType};
    ///
    /// let event = Event::new(EventType::ViewCreated, "view added to workspace");
    /// ```
    pub fn new<S: Into<String>>(event_type: EventType, data: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            data: data.into(),
            metadata: HashMap::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create a new event with additional metadata.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::{Event, EventType};
    /// use std::collections::HashMap;
    ///
    /// let mut metadata = HashMap::new();
    /// metadata.insert("rail".to_string(), "displayed".to_string());
    ///
    /// let event = Event::with_metadata(EventType::ViewMoved, "drag committed", metadata);
    /// ```
    pub fn with_metadata<S: Into<String>>(
        event_type: EventType,
        data: S,
        metadata: HashMap<String, String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            data: data.into(),
            metadata,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Get the unique identifier of this event.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the type of this event.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Get the data payload of this event.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Get the metadata associated with this event.
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Get the timestamp when this event was created.
    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.timestamp
    }

    /// Add or update a metadata entry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::{Event, EventType};
    ///
    /// let mut event = Event::new(EventType::FocusChanged, "data");
    /// event.set_metadata("view", "a1b2");
    /// assert_eq!(event.get_metadata("view"), Some("a1b2"));
    /// ```
    pub fn set_metadata<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Get a specific metadata value.
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }
}

/// Types of events the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    // View lifecycle
    /// A view was created
    ViewCreated,
    /// A view was closed and destroyed
    ViewClosed,

    // Arrangement
    /// The view mode changed (arranged/management)
    ModeChanged,
    /// Editing affordances were toggled
    EditingToggled,
    /// The angular layout was recomputed
    LayoutChanged,
    /// A view was moved to a new rail or index
    ViewMoved,
    /// A displayed view was demoted to the hidden rail by the cap
    ViewDemoted,

    // Gestures
    /// A drag gesture started
    DragStarted,
    /// A drag gesture ended and committed
    DragEnded,

    // Focus and input
    /// The focused view changed
    FocusChanged,
    /// A scroll request was routed to the focused view
    ViewScrolled,
    /// A font-size request was routed to the focused view
    FontSizeChanged,

    // Application
    /// Configuration was changed
    ConfigurationChanged,

    /// Custom event type for host-specific events
    Custom,
}

impl EventType {
    /// Get a human-readable description of the event type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_view_api::EventType;
    ///
    /// assert_eq!(EventType::ViewCreated.description(), "View was created");
    /// assert_eq!(EventType::DragEnded.description(), "Drag gesture ended");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            EventType::ViewCreated => "View was created",
            EventType::ViewClosed => "View was closed",
            EventType::ModeChanged => "View mode changed",
            EventType::EditingToggled => "Editing affordances toggled",
            EventType::LayoutChanged => "Angular layout recomputed",
            EventType::ViewMoved => "View moved to a new slot",
            EventType::ViewDemoted => "View demoted to the hidden rail",
            EventType::DragStarted => "Drag gesture started",
            EventType::DragEnded => "Drag gesture ended",
            EventType::FocusChanged => "Focused view changed",
            EventType::ViewScrolled => "Scroll routed to focused view",
            EventType::FontSizeChanged => "Font size routed to focused view",
            EventType::ConfigurationChanged => "Configuration was changed",
            EventType::Custom => "Custom host event",
        }
    }

    /// Get all available event types.
    pub fn all() -> Vec<EventType> {
        vec![
            EventType::ViewCreated,
            EventType::ViewClosed,
            EventType::ModeChanged,
            EventType::EditingToggled,
            EventType::LayoutChanged,
            EventType::ViewMoved,
            EventType::ViewDemoted,
            EventType::DragStarted,
            EventType::DragEnded,
            EventType::FocusChanged,
            EventType::ViewScrolled,
            EventType::FontSizeChanged,
            EventType::ConfigurationChanged,
            EventType::Custom,
        ]
    }
}
