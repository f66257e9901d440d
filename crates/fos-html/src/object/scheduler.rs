//! Representation scheduler
//!
//! Turns triggers (attribute changes, fetch completions, decoding, the
//! load event) into tasks on the document's task queue.

use super::{ObjectStep, ObjectTask};
use crate::attribute_names;
use fos_dom::{NodeId, TaskId, TaskQueue, TaskSource};
use fos_net::LoadCompletion;

pub struct RepresentationScheduler;

impl RepresentationScheduler {
    /// Attributes whose change restarts the representation algorithm
    pub fn is_fetch_relevant(attribute: &str) -> bool {
        attribute == attribute_names::DATA
    }

    /// Queue one run of the representation algorithm
    pub fn queue_representation_steps(tasks: &mut TaskQueue<ObjectTask>, element: NodeId) -> TaskId {
        tracing::debug!("{:?} queueing representation steps", element);
        Self::queue(tasks, TaskSource::DomManipulation, element, ObjectStep::RunRepresentationSteps)
    }

    pub fn queue_image_decode(tasks: &mut TaskQueue<ObjectTask>, element: NodeId) -> TaskId {
        Self::queue(tasks, TaskSource::DomManipulation, element, ObjectStep::DecodeImage)
    }

    pub fn queue_load_event(tasks: &mut TaskQueue<ObjectTask>, element: NodeId) -> TaskId {
        Self::queue(tasks, TaskSource::DomManipulation, element, ObjectStep::FireLoadEvent)
    }

    /// Route a loader completion back to the element that issued the fetch
    ///
    /// Returns `None` for completions without an initiator.
    pub fn queue_fetch_completion(tasks: &mut TaskQueue<ObjectTask>, completion: LoadCompletion) -> Option<TaskId> {
        let element = NodeId(completion.initiator?);
        Some(Self::queue(
            tasks,
            TaskSource::Networking,
            element,
            ObjectStep::ResourceFetched(completion),
        ))
    }

    fn queue(tasks: &mut TaskQueue<ObjectTask>, source: TaskSource, element: NodeId, step: ObjectStep) -> TaskId {
        tasks.queue_task(source, ObjectTask { element, step })
    }
}
