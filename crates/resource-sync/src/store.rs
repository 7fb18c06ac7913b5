//! # Resource Store
//!
//! This module defines the `ResourceStore`, the single owner of the client-side mirror of a
//! remote collection. Every mutation goes through the [`RemoteClient`] first and touches the
//! mirror only once the remote call has succeeded (pessimistic reconciliation).

use crate::entity::SyncEntity;
use crate::error::{RemoteError, SyncError};
use crate::notifier::{ChangeNotifier, HandlerResult, Snapshot, Subscription};
use crate::remote::RemoteClient;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tunables for a [`ResourceStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Upper bound for each remote call. `None` waits indefinitely.
    /// A call that runs out of time fails with [`RemoteError::Timeout`].
    pub request_timeout: Option<Duration>,
}

/// The authoritative client-side view of a remote collection.
///
/// ## Concurrency Model
///
/// Operations take `&self`, so several of them can be awaiting the remote at once. The
/// mirror sits behind a lock that is only held for the synchronous commit step and never
/// across an `.await`; a reader running while a call is in flight sees the state from
/// before that call.
///
/// Concurrent operations are not sequenced against each other. Two updates of the same
/// entity land in the mirror in the order their responses arrive, not the order they were
/// issued (last writer by completion wins).
///
/// Snapshots are published under a separate ordering lock, so every subscriber observes
/// them in the same order the mirror was mutated.
///
/// ## Operations
///
/// * **refresh**: replace the whole mirror with the remote listing.
/// * **add**: create remotely, then append the persisted entity.
/// * **update**: replace remotely, then swap the matching entity in place.
/// * **delete**: delete remotely, then drop every entity with that identifier.
/// * **get** / **fetch**: local lookup / remote lookup.
///
/// Each successful mutation publishes exactly one snapshot. A failed one leaves the mirror
/// as it was and publishes nothing.
pub struct ResourceStore<T, C> {
    remote: C,
    config: StoreConfig,
    mirror: Mutex<Vec<T>>,
    publish_order: Mutex<()>,
    notifier: ChangeNotifier<T>,
}

fn entity_type<T>() -> &'static str {
    // "Post" rather than "posts_app::model::post::Post"
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}

impl<T: SyncEntity, C: RemoteClient<T>> ResourceStore<T, C> {
    pub fn new(remote: C, config: StoreConfig) -> Self {
        Self {
            remote,
            config,
            mirror: Mutex::new(Vec::new()),
            publish_order: Mutex::new(()),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn remote(&self) -> &C {
        &self.remote
    }

    pub fn notifier(&self) -> &ChangeNotifier<T> {
        &self.notifier
    }

    /// Shorthand for `self.notifier().subscribe(handler)`.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Snapshot<T>) -> HandlerResult + Send + Sync + 'static,
    {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.notifier.unsubscribe(subscription)
    }

    /// Copy of the current mirror.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::from(self.mirror.lock().clone())
    }

    pub fn len(&self) -> usize {
        self.mirror.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirror.lock().is_empty()
    }

    /// Replaces the mirror with the remote collection and publishes it.
    ///
    /// A listing containing an entity without identifier, or two entities sharing one, is
    /// rejected as [`RemoteError::Malformed`] and the mirror keeps its last known good state.
    pub async fn refresh(&self) -> Result<Snapshot<T>, SyncError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, "Refresh");

        let items = self
            .call(self.remote.list())
            .await
            .and_then(check_listing)
            .inspect_err(|e| warn!(entity_type, error = %e, "Refresh failed"))?;

        let ((), snapshot) = self.commit(|mirror| *mirror = items);
        info!(entity_type, size = snapshot.len(), "Refreshed");
        Ok(snapshot)
    }

    /// Creates `draft` remotely and appends the persisted entity to the mirror.
    ///
    /// Nothing is added locally until the remote has assigned an identifier, so the
    /// returned entity always carries one.
    pub async fn add(&self, draft: T::Draft) -> Result<T, SyncError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, ?draft, "Add");

        let id = self
            .call(self.remote.create(&draft))
            .await
            .inspect_err(|e| warn!(entity_type, error = %e, "Add failed"))?;

        let mut entity = T::from_draft(draft);
        entity.assign_id(id.clone());

        let (_, snapshot) = self.commit(|mirror| {
            match mirror.iter_mut().find(|e| e.id() == Some(&id)) {
                // The remote reused an identifier we already hold; keep ids unique.
                Some(slot) => {
                    warn!(entity_type, %id, "Remote returned an identifier already mirrored");
                    *slot = entity.clone();
                }
                None => mirror.push(entity.clone()),
            }
        });
        info!(entity_type, %id, size = snapshot.len(), "Added");
        Ok(entity)
    }

    /// Applies `changes` to the mirrored entity `id`, remotely first.
    ///
    /// Fails with [`SyncError::NotFound`] without contacting the remote when `id` is not
    /// in the mirror.
    pub async fn update(&self, id: &T::Id, changes: T::Changes) -> Result<T, SyncError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, %id, ?changes, "Update");

        let mut candidate = self
            .get(id)
            .inspect_err(|_| warn!(entity_type, %id, "Not found"))?;
        candidate.apply(changes);

        self.call(self.remote.replace(id, &candidate))
            .await
            .inspect_err(|e| warn!(entity_type, %id, error = %e, "Update failed"))?;

        let (replaced, _) = self.commit(|mirror| {
            match mirror.iter_mut().find(|e| e.id() == Some(id)) {
                Some(slot) => {
                    *slot = candidate.clone();
                    true
                }
                None => false,
            }
        });
        if replaced {
            info!(entity_type, %id, "Updated");
        } else {
            debug!(entity_type, %id, "Updated remotely; entity left the mirror meanwhile");
        }
        Ok(candidate)
    }

    /// Deletes `id` remotely, then removes it from the mirror.
    pub async fn delete(&self, id: &T::Id) -> Result<(), SyncError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, %id, "Delete");

        self.call(self.remote.delete(id))
            .await
            .inspect_err(|e| warn!(entity_type, %id, error = %e, "Delete failed"))?;

        let (removed, snapshot) = self.commit(|mirror| {
            let before = mirror.len();
            mirror.retain(|e| e.id() != Some(id));
            before - mirror.len()
        });
        info!(entity_type, %id, removed, size = snapshot.len(), "Deleted");
        Ok(())
    }

    /// Looks `id` up in the mirror.
    pub fn get(&self, id: &T::Id) -> Result<T, SyncError> {
        self.mirror
            .lock()
            .iter()
            .find(|e| e.id() == Some(id))
            .cloned()
            .ok_or_else(|| SyncError::NotFound(id.to_string()))
    }

    /// Fetches `id` straight from the remote. The mirror is neither read nor modified.
    ///
    /// Use this when the mirror may not be populated yet, e.g. when opening a single entity
    /// directly.
    pub async fn fetch(&self, id: &T::Id) -> Result<T, SyncError> {
        let entity_type = entity_type::<T>();
        debug!(entity_type, %id, "Fetch");

        let entity = self
            .call(self.remote.get_one(id))
            .await
            .inspect_err(|e| warn!(entity_type, %id, error = %e, "Fetch failed"))?;
        Ok(entity)
    }

    async fn call<R>(
        &self,
        fut: impl Future<Output = Result<R, RemoteError>>,
    ) -> Result<R, RemoteError> {
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| RemoteError::Timeout(limit))?,
            None => fut.await,
        }
    }

    // Synchronous on purpose: no lock guard may live across an await point.
    fn commit<R>(&self, mutate: impl FnOnce(&mut Vec<T>) -> R) -> (R, Snapshot<T>) {
        let _order = self.publish_order.lock();
        let (result, snapshot) = {
            let mut mirror = self.mirror.lock();
            let result = mutate(&mut mirror);
            (result, Snapshot::from(mirror.clone()))
        };
        self.notifier.publish(&snapshot);
        (result, snapshot)
    }
}

fn check_listing<T: SyncEntity>(items: Vec<T>) -> Result<Vec<T>, RemoteError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        let id = item
            .id()
            .ok_or_else(|| RemoteError::Malformed("listed entity has no identifier".into()))?;
        if !seen.insert(id) {
            return Err(RemoteError::Malformed(format!(
                "identifier {id} listed more than once"
            )));
        }
    }
    Ok(items)
}
