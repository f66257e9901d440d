//! fOS DOM - Document Object Model
//!
//! The slice of the DOM that element behaviours run against: node ids,
//! attribute maps, event dispatch, the document and its task queue.

mod attributes;
mod document;
mod dom_events;
mod task;

pub use attributes::{AttributeMap, AttributeMutation};
pub use document::{Document, DomError};
pub use dom_events::{DomEvent, DomEventType, EventDispatcher, EventLog};
pub use task::{Task, TaskId, TaskQueue, TaskSource};
pub use url::Url;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
}
