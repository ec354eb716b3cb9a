mod support;

use std::collections::HashSet;
use std::sync::Arc;

use metrics_util::debugging::DebuggingRecorder;

use catalog::cache::{
    METRIC_CACHE_ERROR, METRIC_CACHE_EVICTED, METRIC_CACHE_HIT, METRIC_CACHE_MISS,
};

use support::{FailingBackend, InMemoryProducts, facade, memory_backend, page};

#[tokio::test]
async fn listing_paths_emit_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let repo = Arc::new(InMemoryProducts::new());
    repo.seed("Rust in Action", 10.0, "BOOKS").await;

    // miss, then hit, then eviction
    let listings = facade(repo.clone(), memory_backend());
    listings.list_all(page(0, 10)).await.expect("miss");
    listings.list_all(page(0, 10)).await.expect("hit");
    assert_eq!(listings.invalidate_all().await, 1);

    // backend failures are counted, never surfaced
    let broken = facade(repo, Arc::new(FailingBackend::default()));
    broken.list_all(page(0, 10)).await.expect("fail-open read");

    let names: HashSet<String> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite_key, _, _, _)| composite_key.key().name().to_string())
        .collect();

    for metric in [
        METRIC_CACHE_HIT,
        METRIC_CACHE_MISS,
        METRIC_CACHE_ERROR,
        METRIC_CACHE_EVICTED,
    ] {
        assert!(names.contains(metric), "missing metric: {metric}");
    }
}
