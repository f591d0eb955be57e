use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use popular_cast::model::{Actor, MovieId};
use popular_cast::source::fake::FakeSource;
use popular_cast::{Aggregator, AggregatorConfig, ApiKey, FailurePolicy, FetchError, RemoteError};

fn key() -> ApiKey {
    ApiKey::new("test-key").unwrap()
}

fn best_effort() -> AggregatorConfig {
    AggregatorConfig::default().with_policy(FailurePolicy::BestEffort)
}

/// Two movies share actor 10; the duplicate is merged away.
#[tokio::test]
async fn test_end_to_end_union() {
    let source = FakeSource::new()
        .with_movies([1, 2])
        .with_cast(1, vec![Actor::new(10, "A", 5.0)])
        .with_cast(
            2,
            vec![Actor::new(10, "A", 5.0), Actor::new(20, "B", 1.0)],
        );
    let aggregator = Aggregator::new(source, AggregatorConfig::default()).unwrap();

    let aggregate = aggregator.run(&key()).await.expect("Run failed");

    assert_eq!(
        aggregate.actors,
        HashSet::from([Actor::new(10, "A", 5.0), Actor::new(20, "B", 1.0)])
    );
    assert!(aggregate.is_complete());
    assert_eq!(aggregator.source().movie_calls(), 1);
    assert_eq!(aggregator.source().cast_calls(), 2);
}

/// Same id with a different popularity is a different actor.
#[tokio::test]
async fn test_same_id_different_popularity_is_distinct() {
    let source = FakeSource::new()
        .with_movies([1, 2])
        .with_cast(1, vec![Actor::new(10, "A", 5.0)])
        .with_cast(2, vec![Actor::new(10, "A", 6.0)]);
    let aggregator = Aggregator::new(source, AggregatorConfig::default()).unwrap();

    let aggregate = aggregator.run(&key()).await.unwrap();

    assert_eq!(aggregate.actors.len(), 2);
}

/// Completion order must not change the result.
#[tokio::test]
async fn test_union_is_independent_of_completion_order() {
    let ms = Duration::from_millis;
    let source = FakeSource::new()
        .with_movies([1, 2, 3, 4, 5])
        .with_delayed_cast(1, vec![Actor::new(1, "A", 1.0), Actor::new(2, "B", 2.0)], ms(40))
        .with_delayed_cast(2, vec![Actor::new(2, "B", 2.0)], ms(5))
        .with_delayed_cast(3, vec![Actor::new(3, "C", 3.0), Actor::new(1, "A", 1.0)], ms(25))
        .with_cast(4, vec![])
        .with_delayed_cast(5, vec![Actor::new(4, "D", 4.0), Actor::new(3, "C", 3.0)], ms(10));
    let aggregator = Aggregator::new(source, AggregatorConfig::default().with_concurrency(2)).unwrap();

    let aggregate = aggregator.run(&key()).await.unwrap();

    let ids: HashSet<u64> = aggregate.actors.iter().map(|a| a.id.0).collect();
    assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
    assert_eq!(aggregate.actors.len(), 4);
}

#[tokio::test]
async fn test_movies_failure_skips_credits() {
    let source = FakeSource::new().failing_movies("discover down");
    let aggregator = Aggregator::new(source, AggregatorConfig::default()).unwrap();

    let result = aggregator.run(&key()).await;

    match result {
        Err(FetchError::MoviesUnavailable(RemoteError::Unavailable(reason))) => {
            assert_eq!(reason, "discover down")
        }
        other => panic!("Expected MoviesUnavailable, got {other:?}"),
    }
    assert_eq!(aggregator.source().cast_calls(), 0);
}

#[tokio::test]
async fn test_fail_fast_reports_failing_movie() {
    let source = FakeSource::new()
        .with_movies([1, 2, 3])
        .with_cast(1, vec![Actor::new(10, "A", 5.0)])
        .failing_cast(2, "connection reset")
        .with_cast(3, vec![Actor::new(30, "C", 2.0)]);
    let aggregator = Aggregator::new(source, AggregatorConfig::default()).unwrap();

    let error = aggregator.run(&key()).await.unwrap_err();

    assert!(matches!(
        error,
        FetchError::CreditsUnavailable {
            movie_id: MovieId(2),
            ..
        }
    ));
    assert_eq!(error.movie_id(), Some(MovieId(2)));
}

#[tokio::test]
async fn test_best_effort_returns_partial_union() {
    let source = FakeSource::new()
        .with_movies([1, 2, 3])
        .with_cast(1, vec![Actor::new(10, "A", 5.0)])
        .failing_cast(2, "connection reset")
        .with_cast(3, vec![Actor::new(30, "C", 2.0)]);
    let aggregator = Aggregator::new(source, best_effort()).unwrap();

    let aggregate = aggregator.run(&key()).await.unwrap();

    assert_eq!(
        aggregate.actors,
        HashSet::from([Actor::new(10, "A", 5.0), Actor::new(30, "C", 2.0)])
    );
    assert_eq!(aggregate.failed_movie_ids, vec![MovieId(2)]);
    assert!(!aggregate.is_complete());
}

/// An empty actor set with every movie listed as failed, never a silent empty success.
#[tokio::test]
async fn test_best_effort_all_failed() {
    let source = FakeSource::new()
        .with_movies([3, 1, 2])
        .failing_cast(1, "timeout")
        .failing_cast(2, "timeout");
    // Movie 3 has no script and answers 404.
    let aggregator = Aggregator::new(source, best_effort()).unwrap();

    let aggregate = aggregator.run(&key()).await.unwrap();

    assert!(aggregate.actors.is_empty());
    assert_eq!(
        aggregate.failed_movie_ids,
        vec![MovieId(1), MovieId(2), MovieId(3)]
    );
}

#[tokio::test]
async fn test_concurrency_limit_is_respected() {
    let mut source = FakeSource::new().with_movies(1..=10);
    for id in 1..=10 {
        source = source.with_delayed_cast(
            id,
            vec![Actor::new(id, "X", 1.0)],
            Duration::from_millis(20),
        );
    }
    let source = Arc::new(source);
    let config = AggregatorConfig::default().with_concurrency(3);
    let aggregator = Aggregator::with_shared_source(source.clone(), config).unwrap();

    let aggregate = aggregator.run(&key()).await.unwrap();

    assert_eq!(aggregate.actors.len(), 10);
    assert_eq!(source.cast_calls(), 10);
    assert_eq!(source.max_in_flight(), 3);
}

/// The first failure must not wait for slow fetches to finish.
#[tokio::test]
async fn test_fail_fast_cancels_in_flight_fetches() {
    let slow = Duration::from_secs(30);
    let source = Arc::new(
        FakeSource::new()
            .with_movies([1, 2, 3])
            .with_delayed_cast(1, vec![Actor::new(10, "A", 5.0)], slow)
            .failing_cast_after(2, "boom", Duration::from_millis(10))
            .with_delayed_cast(3, vec![Actor::new(30, "C", 2.0)], slow),
    );
    let aggregator =
        Aggregator::with_shared_source(source.clone(), AggregatorConfig::default()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), aggregator.run(&key()))
        .await
        .expect("Fail-fast run did not cancel slow fetches");

    assert!(matches!(
        result,
        Err(FetchError::CreditsUnavailable {
            movie_id: MovieId(2),
            ..
        })
    ));
    assert_eq!(source.cast_calls(), 3);
}

#[tokio::test]
async fn test_empty_movie_list() {
    let source = FakeSource::new().with_movies(Vec::<u64>::new());
    let aggregator = Aggregator::new(source, AggregatorConfig::default()).unwrap();

    let aggregate = aggregator.run(&key()).await.unwrap();

    assert!(aggregate.actors.is_empty());
    assert!(aggregate.is_complete());
    assert_eq!(aggregator.source().cast_calls(), 0);
}

/// Each run starts from an empty store.
#[tokio::test]
async fn test_runs_are_independent() {
    let source = FakeSource::new()
        .with_movies([1])
        .with_cast(1, vec![Actor::new(10, "A", 5.0)]);
    let aggregator = Aggregator::new(source, AggregatorConfig::default()).unwrap();

    let first = aggregator.run(&key()).await.unwrap();
    let second = aggregator.run(&key()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second.actors.len(), 1);
    assert_eq!(aggregator.source().movie_calls(), 2);
}

/// A panicking source is a bug, not a remote failure: fatal even under best-effort.
#[tokio::test]
async fn test_panicking_credits_task_names_its_movie() {
    let source = FakeSource::new()
        .with_movies([1, 7])
        .with_cast(1, vec![Actor::new(10, "A", 5.0)])
        .panicking_cast(7);
    let aggregator = Aggregator::new(source, best_effort()).unwrap();

    let error = aggregator.run(&key()).await.unwrap_err();

    assert!(matches!(
        error,
        FetchError::TaskPanicked {
            movie_id: MovieId(7)
        }
    ));
    assert_eq!(error.movie_id(), Some(MovieId(7)));
}
