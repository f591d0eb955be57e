use actor_store::{StoreActor, StoreError};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Credit {
    person: u32,
    movie: u32,
}

fn batch(writer: u32, size: u32) -> Vec<Credit> {
    (0..size)
        .map(|i| Credit {
            person: writer * 1_000 + i,
            movie: writer,
        })
        .collect()
}

/// 100 writers x 50 distinct elements each, merged concurrently from separate tasks.
/// Repeated so that a lost update would show up as a flaky count.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_merges_lose_nothing() {
    const WRITERS: u32 = 100;
    const PER_WRITER: u32 = 50;

    for _round in 0..10 {
        let (actor, client) = StoreActor::<Credit>::new(8);
        let actor_handle = tokio::spawn(actor.run());

        let mut handles = Vec::new();
        for writer in 0..WRITERS {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.merge(batch(writer, PER_WRITER)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let expected: HashSet<Credit> = (0..WRITERS).flat_map(|w| batch(w, PER_WRITER)).collect();
        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), (WRITERS * PER_WRITER) as usize);
        assert_eq!(snapshot, expected);

        drop(client);
        assert_eq!(actor_handle.await.unwrap(), expected);
    }
}

/// Overlapping batches from many writers still collapse to the plain union.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_concurrent_merges_union() {
    let (actor, client) = StoreActor::<u32>::new(4);
    tokio::spawn(actor.run());

    let mut handles = Vec::new();
    for writer in 0..50u32 {
        let client = client.clone();
        // Every writer covers a sliding window of 20 values, so neighbours overlap heavily.
        handles.push(tokio::spawn(async move {
            client.merge((writer..writer + 20).collect()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let expected: HashSet<u32> = (0..69).collect();
    assert_eq!(client.snapshot().await.unwrap(), expected);
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let (actor, client) = StoreActor::<u32>::new(4);
    tokio::spawn(actor.run());

    let once = client.merge(vec![1, 2, 3]).await.unwrap();
    let twice = client.merge(vec![1, 2, 3]).await.unwrap();

    assert_eq!(once.inserted, 3);
    assert_eq!(twice.inserted, 0);
    assert_eq!(twice.total, 3);
    assert_eq!(client.snapshot().await.unwrap(), HashSet::from([1, 2, 3]));
}

#[tokio::test]
async fn test_merge_order_does_not_matter() {
    let lists = vec![vec![1, 2], vec![2, 3, 4], vec![4, 5]];

    let (forward_actor, forward) = StoreActor::<u32>::new(4);
    tokio::spawn(forward_actor.run());
    for list in lists.iter().cloned() {
        forward.merge(list).await.unwrap();
    }

    let (backward_actor, backward) = StoreActor::<u32>::new(4);
    tokio::spawn(backward_actor.run());
    for list in lists.iter().rev().cloned() {
        backward.merge(list).await.unwrap();
    }

    assert_eq!(
        forward.snapshot().await.unwrap(),
        backward.snapshot().await.unwrap()
    );
}

#[tokio::test]
async fn test_empty_store_and_closed_actor() {
    let (actor, client) = StoreActor::<u32>::new(4);
    let handle = tokio::spawn(actor.run());

    assert!(client.is_empty().await.unwrap());
    assert!(client.snapshot().await.unwrap().is_empty());

    handle.abort();
    let _ = handle.await;

    assert_eq!(client.merge(vec![1]).await, Err(StoreError::ActorClosed));
}
