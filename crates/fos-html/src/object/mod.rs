//! The `<object>` element
//!
//! An object element represents exactly one thing at a time: its fallback
//! children or a decoded image. Which one is decided asynchronously by the
//! representation algorithm, which runs as tasks on the document's queue.

mod config;
mod element;
mod engine;
mod error;
mod fallback;
mod handler;
mod image_adapter;
mod scheduler;
mod type_resolver;

pub use config::ObjectConfig;
pub use element::HtmlObjectElement;
pub use engine::{ObjectRepresentationEngine, Phase};
pub use error::{FallbackReason, RepresentationError};
pub use fallback::{FallbackController, LayoutNodeKind, Representation};
pub use handler::{is_supported_type, select_handler, HandlerDecision};
pub use image_adapter::{AdapterOutcome, ImageAdapter};
pub use scheduler::RepresentationScheduler;
pub use type_resolver::{resolve_resource_type, UNKNOWN_TYPE};

use fos_dom::{Document, EventDispatcher, NodeId, TaskQueue};
use fos_net::{LoadCompletion, ResourceLoader};

/// One step of an object element's work
#[derive(Debug)]
pub enum ObjectStep {
    /// Run the representation algorithm from the top
    RunRepresentationSteps,
    /// The loader finished a fetch this element started
    ResourceFetched(LoadCompletion),
    /// Decode the adopted image
    DecodeImage,
    /// Fire `load` at the element
    FireLoadEvent,
}

/// Task payload for the document queue
#[derive(Debug)]
pub struct ObjectTask {
    pub element: NodeId,
    pub step: ObjectStep,
}

/// Collaborators the algorithm runs against
pub struct ObjectContext<'a> {
    pub document: &'a mut Document,
    pub tasks: &'a mut TaskQueue<ObjectTask>,
    pub events: &'a mut dyn EventDispatcher,
    pub loader: &'a mut dyn ResourceLoader,
    pub config: &'a ObjectConfig,
}
