//! # Change Notifier
//!
//! An explicit observer list. Handlers register with [`ChangeNotifier::subscribe`] and
//! receive every [`Snapshot`] published after that point, synchronously and in registration
//! order. There is no buffering: a late subscriber sees nothing until the next publication.
//!
//! A handler that returns an error or panics is logged and skipped; the remaining handlers
//! still receive the snapshot.

use parking_lot::Mutex;
use std::fmt;
use std::ops::Deref;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{trace, warn};

/// What a handler reports back to the notifier.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

type Handler<T> = Arc<dyn Fn(&Snapshot<T>) -> HandlerResult + Send + Sync>;

// Global so a handle issued by one notifier never matches a slot in another.
static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Immutable copy of the collection at the moment of a change.
///
/// Cheap to clone (shared slice). Use [`Snapshot::to_vec`] for an owned copy that can be
/// modified without affecting anyone else.
pub struct Snapshot<T> {
    items: Arc<[T]>,
}

impl<T> Snapshot<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Snapshot<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.to_vec()
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for Snapshot<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`].
///
/// `unsubscribe` takes the handle by value, so the same handle cannot be detached twice.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a Subscription leaves the handler attached with no way to detach it"]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Broadcast of "collection changed" snapshots to any number of handlers.
pub struct ChangeNotifier<T> {
    handlers: Mutex<Vec<(u64, Handler<T>)>>,
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Registers `handler` for every subsequent publication.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Snapshot<T>) -> HandlerResult + Send + Sync + 'static,
    {
        let id = NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed);
        let mut handlers = self.handlers.lock();
        handlers.push((id, Arc::new(handler)));
        trace!(subscription = id, count = handlers.len(), "Subscribed");
        Subscription { id }
    }

    /// Detaches the handler behind `subscription`.
    ///
    /// # Panics
    /// Panics if the handle was not issued by this notifier. That is a programming error,
    /// not a recoverable condition.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut handlers = self.handlers.lock();
        let Some(pos) = handlers.iter().position(|(id, _)| *id == subscription.id) else {
            panic!(
                "subscription {} is not registered with this notifier",
                subscription.id
            );
        };
        handlers.remove(pos);
        trace!(subscription = subscription.id, count = handlers.len(), "Unsubscribed");
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().len()
    }

    /// Delivers `snapshot` to every registered handler and returns how many accepted it.
    ///
    /// The handler list is copied before delivery, so handlers may subscribe or unsubscribe
    /// from inside a callback. Such changes take effect from the next publication.
    pub fn publish(&self, snapshot: &Snapshot<T>) -> usize {
        let handlers: Vec<(u64, Handler<T>)> = self.handlers.lock().clone();
        let mut delivered = 0;
        for (id, handler) in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(snapshot))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => warn!(subscription = id, error = %e, "Subscriber failed"),
                Err(_) => warn!(subscription = id, "Subscriber panicked"),
            }
        }
        trace!(size = snapshot.len(), delivered, "Published");
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (
        Arc<Mutex<Vec<Vec<u32>>>>,
        impl Fn(&Snapshot<u32>) -> HandlerResult + Send + Sync + 'static,
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |snap: &Snapshot<u32>| {
            sink.lock().push(snap.to_vec());
            Ok(())
        })
    }

    #[test]
    fn delivers_in_registration_order() {
        let notifier = ChangeNotifier::<u32>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            let _ = notifier.subscribe(move |_| {
                order.lock().push(tag);
                Ok(())
            });
        }

        assert_eq!(notifier.publish(&Snapshot::from(vec![1])), 3);
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_handlers_do_not_block_later_ones() {
        let notifier = ChangeNotifier::<u32>::new();
        let _failing = notifier.subscribe(|_| Err("render failed".into()));
        let _panicking = notifier.subscribe(|_| panic!("handler bug"));
        let (seen, handler) = recorder();
        let _ok = notifier.subscribe(handler);

        let delivered = notifier.publish(&Snapshot::from(vec![7, 8]));

        assert_eq!(delivered, 1);
        assert_eq!(*seen.lock(), vec![vec![7, 8]]);
    }

    #[test]
    fn late_subscribers_get_no_replay() {
        let notifier = ChangeNotifier::<u32>::new();
        notifier.publish(&Snapshot::from(vec![1]));

        let (seen, handler) = recorder();
        let _sub = notifier.subscribe(handler);
        assert!(seen.lock().is_empty());

        notifier.publish(&Snapshot::from(vec![1, 2]));
        assert_eq!(*seen.lock(), vec![vec![1, 2]]);
    }

    #[test]
    fn unsubscribed_handler_stops_receiving() {
        let notifier = ChangeNotifier::<u32>::new();
        let (seen, handler) = recorder();
        let sub = notifier.subscribe(handler);

        notifier.publish(&Snapshot::from(vec![1]));
        notifier.unsubscribe(sub);
        notifier.publish(&Snapshot::from(vec![2]));

        assert_eq!(*seen.lock(), vec![vec![1]]);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn foreign_handle_fails_fast() {
        let a = ChangeNotifier::<u32>::new();
        let b = ChangeNotifier::<u32>::new();
        let sub = a.subscribe(|_| Ok(()));
        b.unsubscribe(sub);
    }

    #[test]
    fn handler_can_subscribe_during_publish() {
        let notifier = Arc::new(ChangeNotifier::<u32>::new());
        let inner = notifier.clone();
        let _sub = notifier.subscribe(move |_| {
            let _ = inner.subscribe(|_| Ok(()));
            Ok(())
        });

        notifier.publish(&Snapshot::from(vec![]));
        assert_eq!(notifier.subscriber_count(), 2);
    }

    #[test]
    fn owned_copy_is_detached_from_snapshot() {
        let snapshot = Snapshot::from(vec![1, 2, 3]);
        let mut copy = snapshot.to_vec();
        copy.clear();
        assert_eq!(&snapshot[..], &[1, 2, 3]);
    }
}
