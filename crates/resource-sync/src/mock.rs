//! # Mock Remotes & Testing Guide
//!
//! Two ways to stand in for a real backend when testing code built on a
//! [`ResourceStore`](crate::ResourceStore).
//!
//! | Tool | Style | Use Case |
//! |------|-------|----------|
//! | [`MockRemote`] | Queue of expected calls with canned answers | Most store and facade tests |
//! | [`create_mock_remote`] + `expect_*` | Test receives each request and its responder | Controlling completion order |
//!
//! ## Fluent expectations
//!
//! ```rust
//! use resource_sync::mock::MockRemote;
//! use resource_sync::{RemoteError, ResourceStore, StoreConfig, SyncEntity, SyncError};
//!
//! #[derive(Clone, Debug)]
//! struct Tag { id: Option<u32>, label: String }
//!
//! impl SyncEntity for Tag {
//!     type Id = u32; type Draft = String; type Changes = String;
//!     fn id(&self) -> Option<&u32> { self.id.as_ref() }
//!     fn from_draft(label: String) -> Self { Self { id: None, label } }
//!     fn assign_id(&mut self, id: u32) { self.id = Some(id); }
//!     fn apply(&mut self, label: String) { self.label = label; }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockRemote::<Tag>::new();
//!     mock.expect_create().return_ok(1);
//!     mock.expect_delete(1).return_err(RemoteError::NotFound("1".into()));
//!
//!     let store = ResourceStore::new(mock.client(), StoreConfig::default());
//!     let tag = store.add("rust".into()).await.unwrap();
//!     assert_eq!(tag.id, Some(1));
//!
//!     // Simulate the server having already lost the record
//!     let err = store.delete(&1).await.unwrap_err();
//!     assert!(matches!(err, SyncError::NotFound(_)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Manual responders
//!
//! [`create_mock_remote`] hands back the receiving end of the request channel. Each
//! `expect_*` helper pops the next request and returns its payload together with the
//! oneshot responder, so the test decides when, and in which order, calls complete.

use crate::channel::ChannelRemote;
use crate::entity::SyncEntity;
use crate::error::RemoteError;
use crate::message::{RemoteRequest, Response};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected remote call and the answer to give it.
enum Expectation<T: SyncEntity> {
    List {
        response: Result<Vec<T>, RemoteError>,
    },
    Create {
        response: Result<T::Id, RemoteError>,
    },
    Replace {
        id: T::Id,
        response: Result<(), RemoteError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), RemoteError>,
    },
    GetOne {
        id: T::Id,
        response: Result<T, RemoteError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A remote with expectation tracking for fluent testing.
///
/// Calls are answered strictly in the order the expectations were registered. A call that
/// does not match the next expectation (wrong operation or wrong id) gets its responder
/// dropped, which the caller sees as a transport error, and is reported by [`verify`].
///
/// [`verify`]: MockRemote::verify
pub struct MockRemote<T: SyncEntity> {
    client: ChannelRemote<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: SyncEntity> Default for MockRemote<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SyncEntity> MockRemote<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<RemoteRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let failures = mismatches.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().pop_front();
                if let Err(reason) = answer(request, expectation) {
                    failures.lock().push(reason);
                }
            }
        });

        Self {
            client: ChannelRemote::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ChannelRemote<T> {
        self.client.clone()
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_replace(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Replace { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_get_one(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::GetOne { id, response })
    }

    /// Verifies that every expectation was consumed and no call was unexpected.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock();
        if !mismatches.is_empty() {
            panic!("Unexpected remote calls: {}", mismatches.join("; "));
        }
        let remaining = self.expectations.lock().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, RemoteError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

fn answer<T: SyncEntity>(
    request: RemoteRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), String> {
    fn reply<R>(respond_to: Response<R>, response: Result<R, RemoteError>) -> Result<(), String> {
        // The caller may have timed out and gone away; that is not a mismatch.
        let _ = respond_to.send(response);
        Ok(())
    }

    let operation = request.operation();
    match (request, expectation) {
        (RemoteRequest::List { respond_to }, Some(Expectation::List { response })) => {
            reply(respond_to, response)
        }
        (RemoteRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            reply(respond_to, response)
        }
        (
            RemoteRequest::Replace { id, respond_to, .. },
            Some(Expectation::Replace { id: expected, response }),
        ) if id == expected => reply(respond_to, response),
        (
            RemoteRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: expected, response }),
        ) if id == expected => reply(respond_to, response),
        (
            RemoteRequest::GetOne { id, respond_to },
            Some(Expectation::GetOne { id: expected, response }),
        ) if id == expected => reply(respond_to, response),
        (_, None) => Err(format!("{operation} with no expectation left")),
        (_, Some(_)) => Err(format!("{operation} did not match the next expectation")),
    }
}

/// Builder that completes one expectation with its answer.
pub struct ExpectationBuilder<T: SyncEntity, R> {
    make: Box<dyn FnOnce(Result<R, RemoteError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: SyncEntity, R> ExpectationBuilder<T, R> {
    /// Answers the call successfully with `value`.
    pub fn return_ok(self, value: R) {
        self.expectations.lock().push_back((self.make)(Ok(value)));
    }

    /// Answers the call with `error`.
    pub fn return_err(self, error: RemoteError) {
        self.expectations.lock().push_back((self.make)(Err(error)));
    }
}

impl<T: SyncEntity> ExpectationBuilder<T, ()> {
    /// Shorthand for `return_ok(())`.
    pub fn succeed(self) {
        self.return_ok(())
    }
}

// =============================================================================
// MANUAL RESPONDERS
// =============================================================================

/// Creates a remote and the receiver on which its requests arrive.
///
/// Nothing answers the requests until the test does. Useful to hold a call open, complete
/// calls out of order, or let one run into a timeout.
pub fn create_mock_remote<T: SyncEntity>(
    buffer_size: usize,
) -> (ChannelRemote<T>, mpsc::Receiver<RemoteRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelRemote::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<RemoteRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(RemoteRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<RemoteRequest<T>>,
) -> Option<(T::Draft, Response<T::Id>)> {
    match receiver.recv().await {
        Some(RemoteRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Replace request
pub async fn expect_replace<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<RemoteRequest<T>>,
) -> Option<(T::Id, T, Response<()>)> {
    match receiver.recv().await {
        Some(RemoteRequest::Replace {
            id,
            entity,
            respond_to,
        }) => Some((id, entity, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: SyncEntity>(
    receiver: &mut mpsc::Receiver<RemoteRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(RemoteRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
