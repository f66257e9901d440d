//! Page - a document hosting object elements

use std::collections::BTreeMap;

use fos_dom::{Document, EventLog, NodeId, TaskQueue, Url};
use fos_html::object::RepresentationScheduler;
use fos_html::{HtmlObjectElement, LayoutNodeKind, ObjectContext, ObjectTask};
use fos_net::{completion_channel, CompletionReceiver, MemoryLoader, ResourceLoader};

use crate::{Config, EngineError};

/// What a layout pass consumed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LayoutUpdate {
    /// A layout refresh had been requested
    pub relayout: bool,
    /// Elements whose style was invalidated
    pub restyled: Vec<NodeId>,
}

/// A document with its object elements, task queue and loader
pub struct Page<L: ResourceLoader> {
    document: Document,
    config: Config,
    loader: L,
    completions: CompletionReceiver,
    tasks: TaskQueue<ObjectTask>,
    events: EventLog,
    objects: BTreeMap<NodeId, HtmlObjectElement>,
    next_node: u32,
}

impl Page<MemoryLoader> {
    /// Page backed by an in-memory loader
    pub fn in_memory(url: &str, config: Config) -> Result<Self, EngineError> {
        let (sender, receiver) = completion_channel();
        Self::new(url, config, MemoryLoader::new(sender), receiver)
    }
}

impl<L: ResourceLoader> Page<L> {
    /// Create a page. `completions` must be the receiving end of the
    /// channel `loader` reports on.
    pub fn new(url: &str, config: Config, loader: L, completions: CompletionReceiver) -> Result<Self, EngineError> {
        let document = Document::new(url)?;
        tracing::info!("Created page {}", document.url());
        Ok(Self {
            document,
            config,
            loader,
            completions,
            tasks: TaskQueue::new(),
            events: EventLog::new(),
            objects: BTreeMap::new(),
            next_node: NodeId::ROOT.0 + 1,
        })
    }

    pub fn url(&self) -> &Url {
        self.document.url()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Tasks waiting on the queue
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Insert a new `<object>` element with no attributes
    pub fn create_object(&mut self) -> NodeId {
        let node = NodeId(self.next_node);
        self.next_node += 1;
        self.objects.insert(node, HtmlObjectElement::new(node));
        node
    }

    pub fn object(&self, node: NodeId) -> Option<&HtmlObjectElement> {
        self.objects.get(&node)
    }

    pub fn objects(&self) -> impl Iterator<Item = &HtmlObjectElement> {
        self.objects.values()
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), EngineError> {
        let element = self.objects.get_mut(&node).ok_or(EngineError::UnknownNode(node))?;
        element.set_attribute(name, value, &mut self.tasks);
        Ok(())
    }

    /// Returns whether the attribute was present
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<bool, EngineError> {
        let element = self.objects.get_mut(&node).ok_or(EngineError::UnknownNode(node))?;
        Ok(element.remove_attribute(name, &mut self.tasks))
    }

    /// Move finished loads onto the task queue. Returns how many arrived.
    pub fn pump_network(&mut self) -> usize {
        let mut arrived = 0;
        while let Ok(completion) = self.completions.try_recv() {
            RepresentationScheduler::queue_fetch_completion(&mut self.tasks, completion);
            arrived += 1;
        }
        arrived
    }

    /// Wait for the next load to finish and queue it. Returns false once every
    /// sender is gone.
    pub async fn wait_for_network(&mut self) -> bool {
        match self.completions.recv().await {
            Ok(completion) => {
                RepresentationScheduler::queue_fetch_completion(&mut self.tasks, completion);
                true
            }
            Err(_) => false,
        }
    }

    /// Run one queued task. Returns false if the queue was empty.
    pub fn run_next_task(&mut self) -> bool {
        let Some(task) = self.tasks.next_task() else {
            return false;
        };
        let ObjectTask { element, step } = task.payload;

        let Some(object) = self.objects.get_mut(&element) else {
            tracing::warn!("Dropping {:?} task {:?} for unknown element {:?}", task.source, task.id, element);
            return true;
        };

        let mut ctx = ObjectContext {
            document: &mut self.document,
            tasks: &mut self.tasks,
            events: &mut self.events,
            loader: &mut self.loader,
            config: &self.config.object,
        };
        object.run_task(step, &mut ctx);
        true
    }

    /// Run tasks and pump completions until neither produces work.
    /// Returns the number of tasks run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        loop {
            while self.run_next_task() {
                ran += 1;
            }
            if self.pump_network() == 0 {
                return ran;
            }
        }
    }

    /// Like [`Page::run_until_idle`], but waits for `expected_loads` loads a
    /// slow loader still owes. Stops early if the channel closes.
    pub fn block_on_loads(&mut self, expected_loads: usize) -> usize {
        let mut ran = self.run_until_idle();
        for _ in 0..expected_loads {
            if !smol::block_on(self.wait_for_network()) {
                break;
            }
            ran += self.run_until_idle();
        }
        ran
    }

    /// Consume pending style and layout invalidations
    pub fn update_layout(&mut self) -> LayoutUpdate {
        LayoutUpdate {
            relayout: self.document.take_layout_request(),
            restyled: self.document.take_style_updates(),
        }
    }

    /// Layout node the element should generate
    pub fn layout_node_kind(&self, node: NodeId) -> Option<LayoutNodeKind<'_>> {
        self.objects.get(&node).map(HtmlObjectElement::layout_node_kind)
    }
}
