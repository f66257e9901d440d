//! HTMLObjectElement
//!
//! Attribute storage and the hooks the host calls: attribute mutation,
//! queued tasks, fetch outcomes and layout-node selection.

use super::engine::{ObjectRepresentationEngine, Phase};
use super::fallback::LayoutNodeKind;
use super::image_adapter::ImageAdapter;
use super::scheduler::RepresentationScheduler;
use super::{ObjectContext, ObjectStep, ObjectTask};
use crate::attribute_names::{DATA, TYPE};
use fos_dom::{AttributeMap, AttributeMutation, Document, NodeId, TaskQueue};
use fos_net::{NetError, ResourceHandle, ResourceId};

#[derive(Debug)]
pub struct HtmlObjectElement {
    node: NodeId,
    attributes: AttributeMap,
    engine: ObjectRepresentationEngine,
}

impl HtmlObjectElement {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            attributes: AttributeMap::new(),
            engine: ObjectRepresentationEngine::new(node),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str, tasks: &mut TaskQueue<ObjectTask>) {
        let mutation = self.attributes.set(name, value);
        self.attribute_mutated(name, &mutation, tasks);
    }

    /// Returns false if the attribute was not present
    pub fn remove_attribute(&mut self, name: &str, tasks: &mut TaskQueue<ObjectTask>) -> bool {
        match self.attributes.remove(name) {
            Some(mutation) => {
                self.attribute_mutated(name, &mutation, tasks);
                true
            }
            None => false,
        }
    }

    /// Attribute mutation hook
    pub fn attribute_mutated(&mut self, name: &str, mutation: &AttributeMutation, tasks: &mut TaskQueue<ObjectTask>) {
        if RepresentationScheduler::is_fetch_relevant(name) {
            tracing::trace!("{:?} {} mutated (was {:?})", self.node, name, mutation.old_value());
            RepresentationScheduler::queue_representation_steps(tasks, self.node);
        }
    }

    /// The `data` attribute resolved against the document URL, empty if
    /// absent or unparseable
    pub fn data(&self, document: &Document) -> String {
        self.attributes
            .get(DATA)
            .and_then(|raw| document.parse_url(raw).ok())
            .map(String::from)
            .unwrap_or_default()
    }

    pub fn type_attribute(&self) -> Option<&str> {
        self.attributes.get(TYPE)
    }

    pub fn set_type(&mut self, value: &str, tasks: &mut TaskQueue<ObjectTask>) {
        self.set_attribute(TYPE, value, tasks);
    }

    /// Run a task queued for this element
    pub fn run_task(&mut self, step: ObjectStep, ctx: &mut ObjectContext<'_>) {
        match step {
            ObjectStep::RunRepresentationSteps => self.run_representation_steps(ctx),
            ObjectStep::ResourceFetched(completion) => {
                self.engine.on_fetch_completed(completion, self.attributes.get(TYPE), ctx)
            }
            ObjectStep::DecodeImage => self.engine.on_image_decode(ctx),
            ObjectStep::FireLoadEvent => self.engine.fire_load_event(ctx),
        }
    }

    pub fn run_representation_steps(&mut self, ctx: &mut ObjectContext<'_>) {
        self.engine
            .run(self.attributes.get(DATA), self.attributes.get(TYPE), ctx);
    }

    /// Resource lifecycle hook: the fetch produced a resource
    pub fn resource_did_load(&mut self, resource: ResourceHandle, ctx: &mut ObjectContext<'_>) {
        self.engine.on_fetch_succeeded(resource, self.attributes.get(TYPE), ctx);
    }

    /// Resource lifecycle hook: the fetch failed
    pub fn resource_did_fail(&mut self, error: NetError, ctx: &mut ObjectContext<'_>) {
        self.engine.on_fetch_failed(error, ctx);
    }

    /// Layout-node selection hook
    pub fn layout_node_kind(&self) -> LayoutNodeKind<'_> {
        self.engine.layout_node_kind()
    }

    pub fn fallback_active(&self) -> bool {
        self.engine.fallback_active()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn image_handle(&self) -> Option<&ImageAdapter> {
        self.engine.image_handle()
    }

    pub fn pending_resource(&self) -> Option<ResourceId> {
        self.engine.pending_resource()
    }

    pub fn engine(&self) -> &ObjectRepresentationEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{FallbackReason, ObjectConfig, RepresentationError, UNKNOWN_TYPE};
    use fos_dom::{DomEventType, EventLog};
    use fos_net::{completion_channel, CompletionReceiver, MemoryLoader, MemoryResponse};
    use fos_render::ImageError;

    const NODE: NodeId = NodeId(7);

    fn png_bytes() -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 2, 2);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[200; 16]).unwrap();
        }
        out
    }

    struct Harness {
        document: Document,
        tasks: TaskQueue<ObjectTask>,
        events: EventLog,
        loader: MemoryLoader,
        completions: CompletionReceiver,
        config: ObjectConfig,
        element: HtmlObjectElement,
    }

    impl Harness {
        fn new() -> Self {
            Self::build(ObjectConfig::default(), false)
        }

        fn build(config: ObjectConfig, deferred: bool) -> Self {
            let (tx, rx) = completion_channel();
            let loader = MemoryLoader::new(tx);
            Self {
                document: Document::new("https://example.com/page/index.html").unwrap(),
                tasks: TaskQueue::new(),
                events: EventLog::new(),
                loader: if deferred { loader.deferred() } else { loader },
                completions: rx,
                config,
                element: HtmlObjectElement::new(NODE),
            }
        }

        fn serve(&mut self, url: &str, response: MemoryResponse) {
            self.loader.register(url, response).unwrap();
        }

        fn set(&mut self, name: &str, value: &str) {
            self.element.set_attribute(name, value, &mut self.tasks);
        }

        fn run_one(&mut self) -> bool {
            let Some(task) = self.tasks.next_task() else {
                return false;
            };
            assert_eq!(task.payload.element, NODE);
            let mut ctx = ObjectContext {
                document: &mut self.document,
                tasks: &mut self.tasks,
                events: &mut self.events,
                loader: &mut self.loader,
                config: &self.config,
            };
            self.element.run_task(task.payload.step, &mut ctx);
            true
        }

        fn pump_network(&mut self) -> bool {
            let mut any = false;
            while let Ok(completion) = self.completions.try_recv() {
                RepresentationScheduler::queue_fetch_completion(&mut self.tasks, completion);
                any = true;
            }
            any
        }

        fn run_until_idle(&mut self) {
            loop {
                while self.run_one() {}
                if !self.pump_network() {
                    break;
                }
            }
        }

        fn run_directly(&mut self) {
            let mut ctx = ObjectContext {
                document: &mut self.document,
                tasks: &mut self.tasks,
                events: &mut self.events,
                loader: &mut self.loader,
                config: &self.config,
            };
            self.element.run_representation_steps(&mut ctx);
        }

        fn count(&self, event: DomEventType) -> usize {
            self.events.count(NODE, event)
        }
    }

    #[test]
    fn test_absent_data_falls_back_without_fetch() {
        let mut h = Harness::new();
        h.run_directly();

        assert!(h.element.fallback_active());
        assert_eq!(h.element.phase(), Phase::Fallback);
        assert!(h.loader.requests().is_empty());
        assert_eq!(h.element.engine().last_fallback(), Some(&FallbackReason::NoData));
    }

    #[test]
    fn test_empty_data_falls_back_in_same_task() {
        let mut h = Harness::new();
        h.set("data", "");

        assert!(h.run_one());
        assert!(h.element.fallback_active());
        assert_eq!(h.element.phase(), Phase::Fallback);
        assert!(h.loader.requests().is_empty());
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_invalid_url_fires_error_once() {
        let mut h = Harness::new();
        h.set("data", "http://[::1");
        h.run_until_idle();

        assert_eq!(h.count(DomEventType::Error), 1);
        assert!(h.element.fallback_active());
        assert!(h.loader.requests().is_empty());
        assert!(matches!(
            h.element.engine().last_fallback(),
            Some(FallbackReason::Failed(RepresentationError::UrlParse { .. }))
        ));
    }

    #[test]
    fn test_fetch_failure_fires_error_once() {
        let mut h = Harness::new();
        h.serve("https://example.com/page/gone.png", MemoryResponse::ok().status(404));
        h.set("data", "gone.png");
        h.run_until_idle();

        assert_eq!(h.count(DomEventType::Error), 1);
        assert_eq!(h.count(DomEventType::Load), 0);
        assert!(h.element.fallback_active());
        assert_eq!(h.element.phase(), Phase::Fallback);
    }

    #[test]
    fn test_image_loads_and_fires_load_once() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/page/logo.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body(png_bytes()),
        );
        h.set("data", "logo.png");
        h.run_until_idle();

        assert!(h.element.image_handle().is_some_and(|a| a.has_image()));
        assert_eq!(h.count(DomEventType::Load), 1);
        assert_eq!(h.count(DomEventType::Error), 0);
        assert!(!h.element.fallback_active());
        assert_eq!(h.element.phase(), Phase::Completed);
        assert!(h.element.pending_resource().is_none());

        match h.element.layout_node_kind() {
            LayoutNodeKind::Image(image) => assert_eq!((image.width, image.height), (2, 2)),
            other => panic!("expected image node, got {other:?}"),
        }
    }

    #[test]
    fn test_request_targets_object_destination() {
        let mut h = Harness::new();
        h.set("data", "/asset");
        h.run_until_idle();

        let request = &h.loader.requests()[0];
        assert_eq!(request.url.as_str(), "https://example.com/asset");
        assert_eq!(request.destination, fos_net::Destination::Object);
        assert_eq!(request.initiator, Some(NODE.0));
    }

    #[test]
    fn test_image_without_bytes_falls_back_silently() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/empty.png",
            MemoryResponse::ok().header("Content-Type", "image/png"),
        );
        h.set("data", "https://example.com/empty.png");
        h.run_until_idle();

        assert!(h.element.fallback_active());
        assert!(h.events.events().is_empty());
        assert_eq!(
            h.element.engine().last_fallback(),
            Some(&FallbackReason::Failed(RepresentationError::ImageDecode(ImageError::MissingData)))
        );
    }

    #[test]
    fn test_octet_stream_without_hint_is_unknown() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/blob",
            MemoryResponse::ok()
                .header("Content-Type", "application/octet-stream")
                .body(png_bytes()),
        );
        h.set("data", "https://example.com/blob");
        h.run_until_idle();

        assert!(h.element.fallback_active());
        assert!(h.events.events().is_empty());
        assert_eq!(
            h.element.engine().last_fallback(),
            Some(&FallbackReason::Failed(RepresentationError::UnsupportedType(UNKNOWN_TYPE.into())))
        );
    }

    #[test]
    fn test_octet_stream_with_image_hint_renders() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/blob",
            MemoryResponse::ok()
                .header("Content-Type", "application/octet-stream")
                .body(png_bytes()),
        );
        h.set("type", "image/png");
        h.set("data", "https://example.com/blob");
        h.run_until_idle();

        assert!(!h.element.fallback_active());
        assert_eq!(h.count(DomEventType::Load), 1);
    }

    #[test]
    fn test_malformed_image_falls_back_without_events() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/bad.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body("garbage"),
        );
        h.set("data", "https://example.com/bad.png");
        h.run_until_idle();

        assert!(h.element.fallback_active());
        assert!(h.element.image_handle().is_none());
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_fallback_shown_while_fetching() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/logo.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body(png_bytes()),
        );
        h.set("data", "https://example.com/logo.png");

        assert!(h.run_one());
        assert_eq!(h.element.phase(), Phase::Fetching);
        assert!(h.element.fallback_active());
        assert!(h.element.pending_resource().is_some());
        assert!(h.element.layout_node_kind().is_fallback());
        // The completion is on the channel, not yet applied.
        assert!(!h.run_one());

        assert!(h.pump_network());
        assert!(h.run_one());
        assert_eq!(h.element.phase(), Phase::ImageRendering);
        assert!(h.element.fallback_active());
        assert!(h.element.image_handle().is_some());
        assert!(h.element.pending_resource().is_none());

        assert!(h.run_one());
        assert_eq!(h.element.phase(), Phase::Completed);
        assert_eq!(h.count(DomEventType::Load), 0);
        assert!(h.run_one());
        assert_eq!(h.count(DomEventType::Load), 1);
    }

    #[test]
    fn test_decode_after_rerun_is_skipped() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/logo.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body(png_bytes()),
        );
        h.set("data", "https://example.com/logo.png");
        h.run_one();
        h.pump_network();
        h.run_one();
        assert_eq!(h.element.phase(), Phase::ImageRendering);

        // A new run starts before the queued decode gets to run.
        h.run_directly();
        let pending = h.element.pending_resource();
        assert!(pending.is_some());

        assert!(h.run_one());
        assert_eq!(h.element.phase(), Phase::Fetching);
        assert_eq!(h.element.pending_resource(), pending);
        assert_eq!(h.count(DomEventType::Load), 0);
    }

    #[test]
    fn test_runs_are_idempotent() {
        let mut h = Harness::new();
        h.set("data", "http://[::1");
        h.run_until_idle();
        let first = (h.element.phase(), h.element.fallback_active(), h.element.engine().last_fallback().cloned());

        h.run_directly();
        let second = (h.element.phase(), h.element.fallback_active(), h.element.engine().last_fallback().cloned());

        assert_eq!(first, second);
        assert!(h.loader.requests().is_empty());
    }

    #[test]
    fn test_exactly_one_representation_for_every_type() {
        let types = [
            "image/png",
            "image/gif",
            "text/html",
            "application/octet-stream",
            "application/pdf",
            "unknown",
        ];
        for ty in types {
            let mut h = Harness::new();
            h.serve(
                "https://example.com/r",
                MemoryResponse::ok().header("Content-Type", ty).body(png_bytes()),
            );
            h.set("data", "https://example.com/r");
            h.run_until_idle();

            let image_shown = h.element.layout_node_kind().is_image();
            assert!(h.element.fallback_active() != image_shown, "type {ty}");
            assert!(matches!(h.element.phase(), Phase::Fallback | Phase::Completed), "type {ty}");
        }
    }

    #[test]
    fn test_only_data_mutation_queues_steps() {
        let mut h = Harness::new();
        h.set("type", "image/png");
        h.set("width", "100");
        assert!(h.tasks.is_empty());

        h.set("data", "a.png");
        h.set("data", "a.png");
        assert_eq!(h.tasks.len(), 2);

        assert!(h.element.remove_attribute("data", &mut h.tasks));
        assert!(!h.element.remove_attribute("data", &mut h.tasks));
        assert_eq!(h.tasks.len(), 3);
    }

    #[test]
    fn test_removing_data_drops_image() {
        let mut h = Harness::new();
        h.serve(
            "https://example.com/logo.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body(png_bytes()),
        );
        h.set("data", "https://example.com/logo.png");
        h.run_until_idle();
        assert!(!h.element.fallback_active());

        h.element.remove_attribute("data", &mut h.tasks);
        h.run_until_idle();

        assert!(h.element.fallback_active());
        assert!(h.element.image_handle().is_none());
        assert_eq!(h.count(DomEventType::Load), 1);
    }

    #[test]
    fn test_stale_completion_applies_by_default() {
        let mut h = Harness::build(ObjectConfig::default(), true);
        h.serve(
            "https://example.com/old.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body(png_bytes()),
        );
        h.serve("https://example.com/new", MemoryResponse::ok().header("Content-Type", "text/html"));

        h.set("data", "https://example.com/old.png");
        h.run_until_idle();
        h.set("data", "https://example.com/new");
        h.run_until_idle();
        let [old, new] = h.loader.pending()[..] else {
            panic!("expected two held fetches");
        };
        assert_eq!(h.element.pending_resource(), Some(new));

        h.loader.release(old);
        h.run_until_idle();
        assert!(!h.element.fallback_active());
        assert_eq!(h.element.image_handle().unwrap().resource_id(), old);

        h.loader.release(new);
        h.run_until_idle();
        assert!(h.element.fallback_active());
        assert_eq!(h.count(DomEventType::Load), 1);
    }

    #[test]
    fn test_stale_completion_discarded_when_configured() {
        let config = ObjectConfig {
            discard_stale_fetches: true,
            ..ObjectConfig::default()
        };
        let mut h = Harness::build(config, true);
        h.serve(
            "https://example.com/old.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body(png_bytes()),
        );

        h.set("data", "https://example.com/old.png");
        h.run_until_idle();
        h.set("data", "https://example.com/missing");
        h.run_until_idle();
        let [old, new] = h.loader.pending()[..] else {
            panic!("expected two held fetches");
        };

        h.loader.release(old);
        h.run_until_idle();
        assert_eq!(h.element.phase(), Phase::Fetching);
        assert_eq!(h.element.pending_resource(), Some(new));
        assert!(h.events.events().is_empty());

        h.loader.release(new);
        h.run_until_idle();
        assert_eq!(h.count(DomEventType::Error), 1);
        assert_eq!(h.element.phase(), Phase::Fallback);
    }

    #[test]
    fn test_prefer_fallback_skips_fetch() {
        let config = ObjectConfig {
            prefer_fallback: true,
            ..ObjectConfig::default()
        };
        let mut h = Harness::build(config, false);
        h.set("data", "https://example.com/logo.png");
        h.run_until_idle();

        assert!(h.element.fallback_active());
        assert!(h.loader.requests().is_empty());
        assert_eq!(h.element.engine().last_fallback(), Some(&FallbackReason::UserPreference));
    }

    #[test]
    fn test_unsupported_type_hint_skips_fetch_when_enabled() {
        let config = ObjectConfig {
            skip_unsupported_type_hint: true,
            ..ObjectConfig::default()
        };
        let mut h = Harness::build(config, false);
        h.set("type", "text/html");
        h.set("data", "https://example.com/doc.html");
        h.run_until_idle();
        assert!(h.loader.requests().is_empty());
        assert_eq!(
            h.element.engine().last_fallback(),
            Some(&FallbackReason::UnsupportedTypeHint("text/html".into()))
        );

        // Changing `type` alone does not rerun the algorithm.
        h.element.set_type("image/png", &mut h.tasks);
        assert!(h.tasks.is_empty());
        h.run_directly();
        assert_eq!(h.loader.requests().len(), 1);
    }

    #[test]
    fn test_images_disabled_fall_back() {
        let config = ObjectConfig {
            images_enabled: false,
            ..ObjectConfig::default()
        };
        let mut h = Harness::build(config, false);
        h.serve(
            "https://example.com/logo.png",
            MemoryResponse::ok().header("Content-Type", "image/png").body(png_bytes()),
        );
        h.set("data", "https://example.com/logo.png");
        h.run_until_idle();

        assert!(h.element.fallback_active());
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_transitions_request_layout() {
        let mut h = Harness::new();
        h.set("data", "");
        h.run_until_idle();

        assert!(h.document.needs_layout());
        assert!(h.document.needs_style_update(NODE));
    }

    #[test]
    fn test_data_reflects_resolved_url() {
        let mut h = Harness::new();
        assert_eq!(h.element.data(&h.document), "");

        h.set("data", "../img/a.png");
        assert_eq!(h.element.data(&h.document), "https://example.com/img/a.png");

        h.set("data", "http://[::1");
        assert_eq!(h.element.data(&h.document), "");
    }

    #[test]
    fn test_lifecycle_hooks() {
        let mut h = Harness::new();
        let mut ctx = ObjectContext {
            document: &mut h.document,
            tasks: &mut h.tasks,
            events: &mut h.events,
            loader: &mut h.loader,
            config: &h.config,
        };
        h.element.resource_did_fail(NetError::Network("reset".into()), &mut ctx);

        assert_eq!(h.events.count(NODE, DomEventType::Error), 1);
        assert!(h.element.fallback_active());
    }
}
