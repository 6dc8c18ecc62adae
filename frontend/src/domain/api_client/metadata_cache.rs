//! Cache and in-flight slot for deployment metadata.
//!
//! The slot sits behind a mutex. Checking for a cached value, joining an
//! in-flight request and registering a new one all happen under the lock,
//! so concurrent first callers share exactly one network call. The request
//! itself is a shared future that writes the outcome back into the slot when
//! it completes, whichever waiter happens to drive it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::domain::{ApiError, MetadataPayload};

type SharedFetch = Shared<BoxFuture<'static, Result<MetadataPayload, ApiError>>>;

/// Result of one metadata request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MetadataFetch {
    /// `200`: cache and return.
    Loaded(MetadataPayload),
    /// `400`: return the empty payload, cache nothing.
    Unavailable,
}

#[derive(Default)]
struct Slot {
    cached: Option<MetadataPayload>,
    in_flight: Option<SharedFetch>,
}

#[derive(Default)]
pub(crate) struct MetadataCache {
    slot: Arc<Mutex<Slot>>,
}

impl MetadataCache {
    /// Cached payload, joined in-flight request, or a new request built by
    /// `fetch`.
    pub(crate) async fn get_or_fetch<F>(&self, fetch: F) -> Result<MetadataPayload, ApiError>
    where
        F: FnOnce() -> BoxFuture<'static, Result<MetadataFetch, ApiError>> + Send,
    {
        let pending = {
            let mut slot = lock(&self.slot);
            if let Some(cached) = &slot.cached {
                return Ok(cached.clone());
            }
            match &slot.in_flight {
                Some(in_flight) => in_flight.clone(),
                None => {
                    let request = settle(Arc::downgrade(&self.slot), fetch()).boxed().shared();
                    slot.in_flight = Some(request.clone());
                    request
                }
            }
        };
        pending.await
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        lock(&self.slot).cached.is_some()
    }

    #[cfg(test)]
    pub(crate) fn is_in_flight(&self) -> bool {
        lock(&self.slot).in_flight.is_some()
    }
}

async fn settle(
    slot: Weak<Mutex<Slot>>,
    request: BoxFuture<'static, Result<MetadataFetch, ApiError>>,
) -> Result<MetadataPayload, ApiError> {
    let outcome = request.await;
    if let Some(shared) = slot.upgrade() {
        let mut slot = lock(&shared);
        slot.in_flight = None;
        if let Ok(MetadataFetch::Loaded(payload)) = &outcome {
            slot.cached = Some(payload.clone());
        }
    }

    match outcome {
        Ok(MetadataFetch::Loaded(payload)) => Ok(payload),
        Ok(MetadataFetch::Unavailable) => Ok(MetadataPayload::default()),
        Err(error) => Err(error),
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
