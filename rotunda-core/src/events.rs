//! # Event system for Rotunda Core
//!
//! This module provides a centralized event bus for communication
//! between the engine and its host. Emission only queues; queued events
//! are drained once per frame by [`EventBus::process_events`], after
//! layout and interpolation have run, so handlers always observe a
//! consistent arrangement.
//!
//! The whole engine is single-threaded and frame-driven, so the bus
//! holds its handlers and queue directly without locks or task
//! spawning. Handlers are prioritized: higher priority runs first.

use crate::{Error, Result};
use rotunda_view_api::{Event, EventHandler, EventType};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Central event bus for engine-to-host communication.
///
/// The [`EventBus`] provides a publish-subscribe pattern with typed
/// events and handler priorities.
///
/// # Example
///
/// ```rust
/// use rotunda_core::events::EventBus;
/// use rotunda_view_api::{Event, EventType};
///
/// let mut event_bus = EventBus::new();
/// event_bus.initialize()?;
///
/// event_bus.emit(Event::new(EventType::LayoutChanged, "arranged"))?;
/// event_bus.process_events()?;
/// # Ok::<(), rotunda_core::Error>(())
/// ```
pub struct EventBus {
    /// Event handlers organized by event type
    handlers: HashMap<EventType, Vec<HandlerEntry>>,
    /// Event queue drained once per frame
    event_queue: VecDeque<Event>,
    /// Whether the event bus is initialized
    initialized: bool,
    /// Maximum number of events to queue
    max_queue_size: usize,
}

/// Handler entry for the event bus.
/// Does not derive Debug because dyn EventHandler does not implement Debug.
struct HandlerEntry {
    /// Unique handler identifier
    id: Uuid,
    /// Handler implementation
    handler: Box<dyn EventHandler>,
    /// Handler priority (higher = processed first)
    priority: i32,
}

impl EventBus {
    /// Create a new event bus.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::events::EventBus;
    ///
    /// let event_bus = EventBus::new();
    /// ```
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            event_queue: VecDeque::new(),
            initialized: false,
            max_queue_size: 1000,
        }
    }

    /// Initialize the event bus.
    ///
    /// # Errors
    ///
    /// Returns an error if initialization fails.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            warn!("Event bus is already initialized");
            return Ok(());
        }

        debug!("Initializing event bus");
        self.initialized = true;
        Ok(())
    }

    /// Shutdown the event bus, clearing all handlers and pending events.
    ///
    /// # Errors
    ///
    /// Returns an error if shutdown fails.
    pub fn shutdown(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }

        debug!("Shutting down event bus");
        self.handlers.clear();
        self.event_queue.clear();
        self.initialized = false;
        Ok(())
    }

    /// Subscribe to events of a specific type.
    ///
    /// # Arguments
    ///
    /// * `event_type` - Type of events to subscribe to
    /// * `handler` - Event handler implementation
    /// * `priority` - Handler priority (higher numbers = higher priority)
    ///
    /// # Returns
    ///
    /// Subscription ID that can be used to unsubscribe.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::events::EventBus;
    /// use rotunda_view_api::{Event, EventHandler, EventType};
    ///
    /// struct FocusHandler;
    /// impl EventHandler for FocusHandler {
    ///     fn handle(&mut self, event: &Event) -> anyhow::Result<()> {
    ///         println!("focus: {}", event.data());
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let mut event_bus = EventBus::new();
    /// event_bus.initialize()?;
    /// let id = event_bus.subscribe(EventType::FocusChanged, Box::new(FocusHandler), 0)?;
    /// # Ok::<(), rotunda_core::Error>(())
    /// ```
    pub fn subscribe(
        &mut self,
        event_type: EventType,
        handler: Box<dyn EventHandler>,
        priority: i32,
    ) -> Result<Uuid> {
        if !self.initialized {
            return Err(Error::event("Event bus not initialized"));
        }

        let id = Uuid::new_v4();
        let entry = HandlerEntry {
            id,
            handler,
            priority,
        };

        let type_handlers = self.handlers.entry(event_type).or_default();
        type_handlers.push(entry);

        // Sort by priority (highest first)
        type_handlers.sort_by(|a, b| b.priority.cmp(&a.priority));

        debug!(
            "Subscribed handler {:?} to {:?} events with priority {}",
            id, event_type, priority
        );
        Ok(id)
    }

    /// Unsubscribe from events.
    ///
    /// # Arguments
    ///
    /// * `subscription_id` - Subscription ID returned from subscribe
    pub fn unsubscribe(&mut self, subscription_id: Uuid) -> Result<()> {
        for type_handlers in self.handlers.values_mut() {
            type_handlers.retain(|entry| entry.id != subscription_id);
        }

        debug!("Unsubscribed handler {:?}", subscription_id);
        Ok(())
    }

    /// Queue an event for delivery at the end of the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus is not initialized.
    pub fn emit(&mut self, event: Event) -> Result<()> {
        if !self.initialized {
            return Err(Error::event("Event bus not initialized"));
        }

        if self.event_queue.len() >= self.max_queue_size {
            warn!("Event queue is full, dropping oldest event");
            self.event_queue.pop_front();
        }

        debug!("Queued event: {:?}", event.event_type());
        self.event_queue.push_back(event);
        Ok(())
    }

    /// Process all queued events.
    ///
    /// Called once per frame after layout and interpolation so handlers
    /// observe the settled arrangement. Handler errors are logged and do
    /// not stop delivery to the remaining handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if event processing fails.
    pub fn process_events(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }

        let mut processed_count = 0;

        while let Some(event) = self.event_queue.pop_front() {
            self.dispatch(&event);
            processed_count += 1;
        }

        if processed_count > 0 {
            debug!("Processed {} events", processed_count);
        }

        Ok(())
    }

    /// Get the number of queued events.
    pub fn queue_size(&self) -> usize {
        self.event_queue.len()
    }

    /// Get the number of registered handlers for an event type.
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, |h| h.len())
    }

    /// Set the maximum queue size.
    pub fn set_max_queue_size(&mut self, max_size: usize) {
        self.max_queue_size = max_size;
    }

    /// Deliver one event to its handlers in priority order.
    fn dispatch(&mut self, event: &Event) {
        if let Some(type_handlers) = self.handlers.get_mut(&event.event_type()) {
            debug!(
                "Processing {:?} event for {} handlers",
                event.event_type(),
                type_handlers.len()
            );

            for handler_entry in type_handlers {
                if let Err(e) = handler_entry.handler.handle(event) {
                    error!(
                        "Handler {:?} failed to process {:?} event: {}",
                        handler_entry.id,
                        event.event_type(),
                        e
                    );
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
