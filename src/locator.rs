// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde_json::{Map, Value};

use super::config::{Config, Endpoint};
use super::dispatch::{decode_reply, request_envelope, MetaRequest};
use super::error::*;
use super::ipc::{Channel, Connector};

/// A channel to a conductor which answered the liveness probe.
pub(crate) struct ActiveChannel {
    pub(crate) endpoint: Endpoint,
    pub(crate) generation: usize,
    pub(crate) index: usize,
    pub(crate) channel: Box<dyn Channel>,
}

struct EndpointSet {
    generation: usize,
    endpoints: Vec<Endpoint>,
}

/// Find a live conductor among the configured ones.
///
/// The endpoint set is shared between threads. Readers clone the `Arc`
/// snapshot, [`refresh()`](#method.refresh) swaps in a new one.
pub(crate) struct ConductorLocator {
    connector: Arc<dyn Connector>,
    set: RwLock<Arc<EndpointSet>>,
    active: AtomicUsize,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl ConductorLocator {
    pub(crate) fn new(
        cfg: &Config,
        connector: Arc<dyn Connector>,
    ) -> ConductorLocator {
        ConductorLocator {
            connector,
            set: RwLock::new(Arc::new(EndpointSet {
                generation: 0,
                endpoints: cfg.endpoints().to_vec(),
            })),
            active: AtomicUsize::new(0),
            probe_timeout: cfg.probe_timeout(),
            request_timeout: cfg.request_timeout(),
        }
    }

    fn snapshot(&self) -> Arc<EndpointSet> {
        match self.set.read() {
            Ok(s) => Arc::clone(&s),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub(crate) fn endpoints(&self) -> Vec<Endpoint> {
        self.snapshot().endpoints.clone()
    }

    /// The endpoint the next acquisition starts with.
    pub(crate) fn active_endpoint(&self) -> Option<Endpoint> {
        let set = self.snapshot();
        let idx = self.active.load(Ordering::Acquire);
        set.endpoints.get(idx).cloned()
    }

    /// Replace the endpoint set. Acquisitions already running keep using
    /// their snapshot.
    pub(crate) fn refresh(&self, endpoints: Vec<Endpoint>) -> Result<()> {
        if endpoints.is_empty() {
            return Err(S5Error::InvalidArgument(
                "No conductor endpoint given".to_string(),
            ));
        }
        let mut set = match self.set.write() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        info!(
            "Conductor endpoints refreshed: {}",
            endpoints
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        );
        *set = Arc::new(EndpointSet {
            generation: set.generation + 1,
            endpoints,
        });
        self.active.store(0, Ordering::Release);
        Ok(())
    }

    /// Connect to the first conductor answering the liveness probe,
    /// starting with the last active one.
    ///
    /// # Errors
    ///
    ///  * [`S5Error::NotConnected`][1]: every conductor failed.
    ///
    /// [1]: enum.S5Error.html#variant.NotConnected
    pub(crate) fn acquire(&self) -> Result<ActiveChannel> {
        let set = self.snapshot();
        let count = set.endpoints.len();
        let start = self.active.load(Ordering::Acquire) % count.max(1);
        let mut failures = Vec::new();

        for i in 0..count {
            let idx = (start + i) % count;
            let endpoint = &set.endpoints[idx];
            match self.probe(endpoint) {
                Ok(channel) => {
                    if idx != start {
                        warn!(
                            "Conductor failover: now using '{}'",
                            endpoint
                        );
                    }
                    self.active.store(idx, Ordering::Release);
                    return Ok(ActiveChannel {
                        endpoint: endpoint.clone(),
                        generation: set.generation,
                        index: idx,
                        channel,
                    });
                }
                Err(e) => {
                    warn!("Conductor '{}' failed probe: {}", endpoint, e);
                    failures.push(format!("{} ({})", endpoint, e));
                }
            }
        }
        Err(S5Error::NotConnected(format!(
            "Failed to connect any conductor: {}",
            failures.join("; ")
        )))
    }

    /// Move past a conductor which failed mid-operation so the next
    /// acquisition tries the others first.
    pub(crate) fn mark_failed(&self, failed: &ActiveChannel) {
        let set = self.snapshot();
        if set.generation != failed.generation || set.endpoints.is_empty() {
            return;
        }
        let next = (failed.index + 1) % set.endpoints.len();
        let _ = self.active.compare_exchange(
            failed.index,
            next,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    fn probe(&self, endpoint: &Endpoint) -> Result<Box<dyn Channel>> {
        let mut channel = self.connector.connect(endpoint, self.probe_timeout)?;
        let ping = request_envelope(MetaRequest::Ping, Map::new(), None);
        let reply: Value = channel.call(&ping)?;
        decode_reply(MetaRequest::Ping, reply)?;
        channel.set_timeout(self.request_timeout)?;
        Ok(channel)
    }
}
