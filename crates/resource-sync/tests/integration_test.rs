use parking_lot::Mutex;
use resource_sync::mock::{create_mock_remote, expect_list, expect_replace};
use resource_sync::{ResourceStore, StoreConfig, SyncEntity};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Card {
    id: Option<String>,
    body: String,
}

impl Card {
    fn stored(id: &str, body: &str) -> Self {
        Self {
            id: Some(id.into()),
            body: body.into(),
        }
    }
}

impl SyncEntity for Card {
    type Id = String;
    type Draft = String;
    type Changes = String;

    fn id(&self) -> Option<&String> {
        self.id.as_ref()
    }

    fn from_draft(body: String) -> Self {
        Self { id: None, body }
    }

    fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn apply(&mut self, body: String) {
        self.body = body;
    }
}

async fn seeded_store(
    cards: Vec<Card>,
) -> (
    Arc<ResourceStore<Card, resource_sync::ChannelRemote<Card>>>,
    tokio::sync::mpsc::Receiver<resource_sync::RemoteRequest<Card>>,
) {
    let (remote, mut receiver) = create_mock_remote::<Card>(16);
    let store = Arc::new(ResourceStore::new(remote, StoreConfig::default()));

    let refresh = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    expect_list(&mut receiver)
        .await
        .expect("Expected List request")
        .send(Ok(cards))
        .unwrap();
    refresh.await.unwrap().unwrap();

    (store, receiver)
}

/// Wrapper generic over the transport with no bounds of its own.
struct SharedStore<C> {
    store: Arc<ResourceStore<Card, C>>,
}

impl<C> Clone for SharedStore<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_can_be_held_by_unbounded_wrappers() {
    let (store, _receiver) = seeded_store(vec![Card::stored("c1", "shared")]).await;
    let shared = SharedStore { store };
    let other = shared.clone();

    assert_eq!(other.store.get(&"c1".to_string()).unwrap().body, "shared");
}

/// Two updates of the same card are in flight; the one issued first completes last and
/// therefore wins. Ordering follows completion, not issue.
#[tokio::test]
async fn test_same_id_updates_are_last_writer_by_completion() {
    let (store, mut receiver) = seeded_store(vec![Card::stored("c1", "draft")]).await;

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.update(&"c1".to_string(), "first".into()).await }
    });
    let (_, first_body, first_reply) = expect_replace(&mut receiver).await.unwrap();

    let second = tokio::spawn({
        let store = store.clone();
        async move { store.update(&"c1".to_string(), "second".into()).await }
    });
    let (_, second_body, second_reply) = expect_replace(&mut receiver).await.unwrap();

    assert_eq!(first_body.body, "first");
    assert_eq!(second_body.body, "second");

    // Complete in reverse issue order
    second_reply.send(Ok(())).unwrap();
    second.await.unwrap().unwrap();
    first_reply.send(Ok(())).unwrap();
    first.await.unwrap().unwrap();

    assert_eq!(store.get(&"c1".to_string()).unwrap().body, "first");
}

/// While a remote call is pending, readers see the mirror as it was before the call.
#[tokio::test]
async fn test_readers_see_pre_mutation_state_while_in_flight() {
    let (store, mut receiver) = seeded_store(vec![Card::stored("c1", "before")]).await;

    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.update(&"c1".to_string(), "after".into()).await }
    });
    let (_, _, reply) = expect_replace(&mut receiver).await.unwrap();

    assert_eq!(store.get(&"c1".to_string()).unwrap().body, "before");

    reply.send(Ok(())).unwrap();
    pending.await.unwrap().unwrap();
    assert_eq!(store.get(&"c1".to_string()).unwrap().body, "after");
}

/// Subscribers see snapshots in the order the mirror changed, even when operations on
/// different ids complete out of issue order.
#[tokio::test]
async fn test_snapshots_follow_mutation_order() {
    let (store, mut receiver) =
        seeded_store(vec![Card::stored("a", "a0"), Card::stored("b", "b0")]).await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let _sub = store.subscribe({
        let seen = seen.clone();
        move |snapshot| {
            let bodies: Vec<String> = snapshot.iter().map(|c| c.body.clone()).collect();
            seen.lock().push(bodies);
            Ok(())
        }
    });

    let update_a = tokio::spawn({
        let store = store.clone();
        async move { store.update(&"a".to_string(), "a1".into()).await }
    });
    let (_, _, reply_a) = expect_replace(&mut receiver).await.unwrap();
    let update_b = tokio::spawn({
        let store = store.clone();
        async move { store.update(&"b".to_string(), "b1".into()).await }
    });
    let (_, _, reply_b) = expect_replace(&mut receiver).await.unwrap();

    reply_b.send(Ok(())).unwrap();
    update_b.await.unwrap().unwrap();
    reply_a.send(Ok(())).unwrap();
    update_a.await.unwrap().unwrap();

    assert_eq!(
        *seen.lock(),
        vec![
            vec!["a0".to_string(), "b1".to_string()],
            vec!["a1".to_string(), "b1".to_string()],
        ]
    );
}

/// Mutating a received snapshot copy never reaches the store.
#[tokio::test]
async fn test_snapshot_copies_are_isolated() {
    let (store, _receiver) = seeded_store(vec![Card::stored("c1", "kept")]).await;

    let mut copy = store.snapshot().to_vec();
    copy[0].body = "tampered".into();
    copy.clear();

    assert_eq!(store.snapshot().to_vec(), vec![Card::stored("c1", "kept")]);
}
