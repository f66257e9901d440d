//! DOM Events
//!
//! Simple events fired at elements and the dispatcher seam hosts implement.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    Load,
    Error,
}

impl DomEventType {
    /// Event name as seen by listeners
    pub fn as_str(&self) -> &'static str {
        match self {
            DomEventType::Load => "load",
            DomEventType::Error => "error",
        }
    }
}

/// DOM event
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
}

impl DomEvent {
    /// Create a simple event: does not bubble, not cancelable
    pub fn simple(event_type: DomEventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            bubbles: false,
            cancelable: false,
            default_prevented: false,
        }
    }

    /// Create load event
    pub fn load(target: NodeId) -> Self {
        Self::simple(DomEventType::Load, target)
    }

    /// Create error event
    pub fn error(target: NodeId) -> Self {
        Self::simple(DomEventType::Error, target)
    }

    pub fn name(&self) -> &'static str {
        self.event_type.as_str()
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event dispatcher trait
///
/// Dispatch is synchronous. The return value is `false` when a listener
/// cancelled the event.
pub trait EventDispatcher {
    fn dispatch_event(&mut self, event: DomEvent) -> bool;
}

/// Dispatcher that records every event in dispatch order
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<DomEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All dispatched events, oldest first
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Number of events of `event_type` fired at `target`
    pub fn count(&self, target: NodeId, event_type: DomEventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.target == target && e.event_type == event_type)
            .count()
    }

    /// Event names fired at `target`, in order
    pub fn names_for(&self, target: NodeId) -> Vec<&'static str> {
        self.events
            .iter()
            .filter(|e| e.target == target)
            .map(DomEvent::name)
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventDispatcher for EventLog {
    fn dispatch_event(&mut self, event: DomEvent) -> bool {
        tracing::trace!("dispatch {} at {:?}", event.name(), event.target);
        let cancelled = event.is_default_prevented();
        self.events.push(event);
        !cancelled
    }
}
