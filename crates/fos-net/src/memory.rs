//! In-memory loader
//!
//! Serves responses registered up front, keyed by URL. Completions are
//! always sent on the channel, never returned from `load_resource`, so
//! callers see the same asynchronous shape as a network fetch. In deferred
//! mode completions are held back until the host releases them, which
//! lets it choose the order in which concurrent fetches finish.

use crate::loader::{CompletionSender, LoadCompletion, Request, ResourceLoader};
use crate::{HeaderMap, NetError, ResourceHandle, ResourceId, ResourceKind};
use std::collections::{BTreeMap, HashMap};
use url::Url;

/// A canned response
#[derive(Debug, Clone)]
pub struct MemoryResponse {
    status: u16,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    failure: Option<NetError>,
}

impl MemoryResponse {
    /// 200 response with no headers and no body
    pub fn ok() -> Self {
        Self {
            status: 200,
            headers: HeaderMap::new(),
            body: None,
            failure: None,
        }
    }

    /// Transport-level failure
    pub fn failure(error: NetError) -> Self {
        Self {
            failure: Some(error),
            ..Self::ok()
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    fn resolve(&self, id: ResourceId, kind: ResourceKind, url: Url) -> Result<ResourceHandle, NetError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        if self.status >= 400 {
            return Err(NetError::HttpError { status: self.status });
        }
        Ok(ResourceHandle::new(
            id,
            kind,
            url,
            self.status,
            self.headers.clone(),
            self.body.clone(),
        ))
    }
}

/// Loader backed by registered responses
pub struct MemoryLoader {
    routes: HashMap<Url, MemoryResponse>,
    requests: Vec<Request>,
    sender: CompletionSender,
    deferred: Option<BTreeMap<ResourceId, LoadCompletion>>,
    next_id: u64,
}

impl MemoryLoader {
    pub fn new(sender: CompletionSender) -> Self {
        Self {
            routes: HashMap::new(),
            requests: Vec::new(),
            sender,
            deferred: None,
            next_id: 1,
        }
    }

    /// Hold completions until [`MemoryLoader::release`] or [`MemoryLoader::release_all`]
    pub fn deferred(mut self) -> Self {
        self.deferred = Some(BTreeMap::new());
        self
    }

    /// Register `response` for `url`
    pub fn register(&mut self, url: &str, response: MemoryResponse) -> Result<(), NetError> {
        let url = Url::parse(url).map_err(|e| NetError::InvalidUrl(format!("{url}: {e}")))?;
        self.routes.insert(url, response);
        Ok(())
    }

    /// Every request issued so far, oldest first
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Completions being held back in deferred mode
    pub fn pending(&self) -> Vec<ResourceId> {
        self.deferred
            .as_ref()
            .map(|held| held.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Send the held completion for `id`; false if nothing was held for it
    pub fn release(&mut self, id: ResourceId) -> bool {
        let Some(completion) = self.deferred.as_mut().and_then(|held| held.remove(&id)) else {
            return false;
        };
        self.send(completion);
        true
    }

    /// Send every held completion in issue order
    pub fn release_all(&mut self) -> usize {
        let held = match self.deferred.as_mut() {
            Some(held) => std::mem::take(held),
            None => return 0,
        };
        let count = held.len();
        for completion in held.into_values() {
            self.send(completion);
        }
        count
    }

    fn send(&self, completion: LoadCompletion) {
        if let Err(e) = self.sender.try_send(completion) {
            tracing::warn!("Dropping completion, channel closed: {}", e);
        }
    }
}

impl ResourceLoader for MemoryLoader {
    fn load_resource(&mut self, kind: ResourceKind, request: Request) -> ResourceId {
        let id = ResourceId(self.next_id);
        self.next_id += 1;

        tracing::info!("{} {} ({:?})", request.method.as_str(), request.url, id);

        let outcome = match self.routes.get(&request.url) {
            Some(response) => response.resolve(id, kind, request.url.clone()),
            None => Err(NetError::Network(format!("no route to {}", request.url))),
        };
        let completion = LoadCompletion {
            resource: id,
            initiator: request.initiator,
            outcome,
        };
        self.requests.push(request);

        match self.deferred.as_mut() {
            Some(held) => {
                held.insert(id, completion);
            }
            None => self.send(completion),
        }
        id
    }
}
