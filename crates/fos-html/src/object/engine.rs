//! Object representation engine
//!
//! The `<object>` representation algorithm as an explicit state machine.
//! Each run starts from `Idle`. The fetch suspends the run; the loader's
//! completion resumes it in a later task, as does the image decode.

use super::error::{FallbackReason, RepresentationError};
use super::fallback::{FallbackController, LayoutNodeKind};
use super::handler::{self, HandlerDecision};
use super::image_adapter::{AdapterOutcome, ImageAdapter};
use super::scheduler::RepresentationScheduler;
use super::type_resolver::resolve_resource_type;
use super::ObjectContext;
use fos_dom::{DomEvent, NodeId};
use fos_net::{LoadCompletion, NetError, Request, ResourceHandle, ResourceId, ResourceKind, Url};
use fos_render::ImageError;

/// Where the algorithm is for the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never run
    Idle,
    /// Waiting for the loader
    Fetching,
    /// Deciding the effective type of a fetched resource
    TypeResolving,
    /// Image adopted, decode queued
    ImageRendering,
    /// Image shown
    Completed,
    /// Fallback content shown; the run is over
    Fallback,
}

/// Work the current run is waiting on. Exclusive by construction: the fetched
/// resource moves into the image adapter.
#[derive(Debug, Default)]
enum InFlight {
    #[default]
    None,
    Fetch { resource: ResourceId, url: Url },
    Decode(ImageAdapter),
}

#[derive(Debug)]
pub struct ObjectRepresentationEngine {
    node: NodeId,
    phase: Phase,
    in_flight: InFlight,
    view: FallbackController,
    last_fallback: Option<FallbackReason>,
}

impl ObjectRepresentationEngine {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            phase: Phase::Idle,
            in_flight: InFlight::None,
            view: FallbackController::new(),
            last_fallback: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fallback_active(&self) -> bool {
        self.view.fallback_active()
    }

    /// Id of the outstanding generic fetch
    pub fn pending_resource(&self) -> Option<ResourceId> {
        match &self.in_flight {
            InFlight::Fetch { resource, .. } => Some(*resource),
            _ => None,
        }
    }

    /// URL of the outstanding generic fetch
    pub fn pending_url(&self) -> Option<&Url> {
        match &self.in_flight {
            InFlight::Fetch { url, .. } => Some(url),
            _ => None,
        }
    }

    /// The image pipeline, while decoding or once shown
    pub fn image_handle(&self) -> Option<&ImageAdapter> {
        match &self.in_flight {
            InFlight::Decode(adapter) => Some(adapter),
            _ => self.view.image(),
        }
    }

    /// Why fallback was last entered
    pub fn last_fallback(&self) -> Option<&FallbackReason> {
        self.last_fallback.as_ref()
    }

    pub fn layout_node_kind(&self) -> LayoutNodeKind<'_> {
        self.view.layout_node_kind()
    }

    /// Run the algorithm from the top
    pub fn run(&mut self, data: Option<&str>, type_hint: Option<&str>, ctx: &mut ObjectContext<'_>) {
        // An earlier fetch is forgotten, not cancelled.
        self.in_flight = InFlight::None;
        self.phase = Phase::Idle;

        if ctx.config.prefer_fallback {
            return self.fallback(FallbackReason::UserPreference, ctx);
        }

        let Some(data) = data.filter(|d| !d.is_empty()) else {
            return self.fallback(FallbackReason::NoData, ctx);
        };

        if ctx.config.skip_unsupported_type_hint {
            if let Some(hint) = type_hint.filter(|t| !t.is_empty()) {
                if !handler::is_supported_type(hint, ctx.config.images_enabled) {
                    return self.fallback(FallbackReason::UnsupportedTypeHint(hint.to_string()), ctx);
                }
            }
        }

        let url = match ctx.document.parse_url(data) {
            Ok(url) => url,
            Err(source) => {
                let error = RepresentationError::UrlParse {
                    input: data.to_string(),
                    source,
                };
                return self.fallback(error.into(), ctx);
            }
        };

        let request = Request::for_object(url.clone()).with_initiator(self.node.0);
        let resource = ctx.loader.load_resource(ResourceKind::Generic, request);
        tracing::debug!("{:?} fetching {} as {:?}", self.node, url, resource);
        self.in_flight = InFlight::Fetch { resource, url };
        self.phase = Phase::Fetching;

        // Fallback content stays visible until the fetch resolves.
        self.view.show_fallback(self.node, ctx.document);
    }

    /// Resume after the loader reported on a fetch
    pub fn on_fetch_completed(&mut self, completion: LoadCompletion, type_hint: Option<&str>, ctx: &mut ObjectContext<'_>) {
        if self.pending_resource() != Some(completion.resource) {
            if ctx.config.discard_stale_fetches {
                tracing::debug!("{:?} ignoring stale completion {:?}", self.node, completion.resource);
                return;
            }
            tracing::warn!(
                "{:?} applying completion {:?} though current fetch is {:?}",
                self.node,
                completion.resource,
                self.pending_resource()
            );
        }
        self.in_flight = InFlight::None;

        match completion.outcome {
            Ok(resource) => self.on_fetch_succeeded(resource, type_hint, ctx),
            Err(error) => self.on_fetch_failed(error, ctx),
        }
    }

    /// The fetch failed at the transport level
    pub fn on_fetch_failed(&mut self, error: NetError, ctx: &mut ObjectContext<'_>) {
        self.fallback(RepresentationError::Fetch(error).into(), ctx);
    }

    /// The fetch produced a resource; decide how to represent it
    pub fn on_fetch_succeeded(&mut self, resource: ResourceHandle, type_hint: Option<&str>, ctx: &mut ObjectContext<'_>) {
        self.phase = Phase::TypeResolving;
        let resource_type = resolve_resource_type(resource.response_headers(), type_hint, resource.mime_type());
        tracing::debug!("{:?} resource type of {} is {}", self.node, resource.url(), resource_type);

        match handler::select_handler(&resource_type, resource.has_encoded_data(), ctx.config.images_enabled) {
            HandlerDecision::Image => {
                self.in_flight = InFlight::Decode(ImageAdapter::adopt(resource));
                self.phase = Phase::ImageRendering;
                RepresentationScheduler::queue_image_decode(ctx.tasks, self.node);
            }
            HandlerDecision::Fallback(error) => self.fallback(error.into(), ctx),
        }
    }

    /// Run the adopted image through the decoder
    pub fn on_image_decode(&mut self, ctx: &mut ObjectContext<'_>) {
        match std::mem::take(&mut self.in_flight) {
            InFlight::Decode(mut adapter) => match adapter.finish() {
                Some(AdapterOutcome::Completed) => self.completed(adapter, ctx),
                Some(AdapterOutcome::Failed(error)) => {
                    self.fallback(RepresentationError::ImageDecode(error).into(), ctx)
                }
                // Adapters leave `in_flight` when they settle, so this one never ran.
                None => self.fallback(RepresentationError::ImageDecode(ImageError::MissingData).into(), ctx),
            },
            other => {
                tracing::debug!("{:?} no image pending, decode skipped", self.node);
                self.in_flight = other;
            }
        }
    }

    pub fn fire_load_event(&self, ctx: &mut ObjectContext<'_>) {
        ctx.events.dispatch_event(DomEvent::load(self.node));
    }

    fn completed(&mut self, adapter: ImageAdapter, ctx: &mut ObjectContext<'_>) {
        tracing::debug!("{:?} representing image from {:?}", self.node, adapter.resource_id());
        self.phase = Phase::Completed;
        self.last_fallback = None;
        RepresentationScheduler::queue_load_event(ctx.tasks, self.node);
        self.view.show_image(adapter, self.node, ctx.document);
    }

    fn fallback(&mut self, reason: FallbackReason, ctx: &mut ObjectContext<'_>) {
        tracing::debug!("{:?} showing fallback content: {}", self.node, reason);
        if reason.fires_error_event() {
            ctx.events.dispatch_event(DomEvent::error(self.node));
        }
        self.in_flight = InFlight::None;
        self.phase = Phase::Fallback;
        self.last_fallback = Some(reason);
        self.view.show_fallback(self.node, ctx.document);
    }
}
