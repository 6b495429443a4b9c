mod common;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use common::spawn_target;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strain::actors::http_requester::{HttpRequester, UNIT_HEADER};
use strain::analytics::aggregate::aggregate;
use strain::dispatcher::arrival::ArrivalPolicy;
use strain::dispatcher::Dispatcher;

type SeenUnits = Arc<Mutex<HashMap<u32, u32>>>;

async fn echo_unit(State(seen): State<SeenUnits>, headers: HeaderMap) -> String {
    let unit: u32 = headers
        .get(UNIT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap();
    // Uneven service times so completions arrive out of launch order.
    tokio::time::sleep(Duration::from_millis(u64::from((unit * 37) % 23))).await;
    *seen.lock().unwrap().entry(unit).or_default() += 1;
    unit.to_string()
}

fn requester(url: String, timeout: Duration) -> Arc<HttpRequester> {
    Arc::new(HttpRequester::new(&url, timeout, Duration::from_secs(2)).unwrap())
}

#[tokio::test]
async fn burst_should_collect_every_unit_exactly_once() {
    let seen = SeenUnits::default();
    let router = Router::new()
        .route("/echo", get(echo_unit))
        .with_state(seen.clone());
    let address = spawn_target(router).await;
    let dispatcher = Dispatcher::new(requester(
        format!("http://{address}/echo"),
        Duration::from_secs(10),
    ));

    let batch = dispatcher.dispatch(1, 500, &ArrivalPolicy::Burst).await.unwrap();

    assert_eq!(batch.len(), 500);
    for (slot, record) in batch.records().iter().enumerate() {
        assert_eq!(record.unit, slot as u32);
        assert_eq!(record.status_code, 200);
        assert_eq!(record.byte_size, slot.to_string().len() as u64);
    }
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 500);
    assert!(seen.values().all(|count| *count == 1));
}

#[tokio::test]
async fn ramp_should_collect_every_unit_exactly_once() {
    let seen = SeenUnits::default();
    let router = Router::new()
        .route("/echo", get(echo_unit))
        .with_state(seen.clone());
    let address = spawn_target(router).await;
    let dispatcher = Dispatcher::new(requester(
        format!("http://{address}/echo"),
        Duration::from_secs(10),
    ));
    let policy = ArrivalPolicy::InverseSqrtRamp {
        scale: Duration::from_millis(4),
        floor: Duration::from_micros(100),
    };

    let batch = dispatcher.dispatch(2, 120, &policy).await.unwrap();

    let units: Vec<u32> = batch.records().iter().map(|r| r.unit).collect();
    assert_eq!(units, (0..120).collect::<Vec<u32>>());
    assert_eq!(seen.lock().unwrap().len(), 120);
}

#[tokio::test]
async fn non_success_and_timeouts_should_be_recorded_not_raised() {
    let router = Router::new()
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "late"
            }),
        );
    let address = spawn_target(router).await;

    let missing = Dispatcher::new(requester(
        format!("http://{address}/missing"),
        Duration::from_secs(5),
    ));
    let aggregated = aggregate(missing.dispatch(1, 10, &ArrivalPolicy::Burst).await.unwrap());
    assert_eq!(aggregated.summary.non_success_count, 10);
    assert_eq!(aggregated.summary.transport_failures, 0);
    assert!(aggregated
        .records
        .iter()
        .all(|r| r.status_code == 404 && r.byte_size == 4));

    let slow = Dispatcher::new(requester(
        format!("http://{address}/slow"),
        Duration::from_millis(200),
    ));
    let aggregated = aggregate(slow.dispatch(1, 5, &ArrivalPolicy::Burst).await.unwrap());
    assert_eq!(aggregated.summary.transport_failures, 5);
    assert!(aggregated.records.iter().all(|r| r.status_code == 0
        && r.byte_size == 0
        && r.latency >= Duration::from_millis(200)));
}

#[tokio::test]
async fn large_bodies_should_be_counted_in_full() {
    let router = Router::new().route("/blob", get(|| async { vec![7u8; 256 * 1024] }));
    let address = spawn_target(router).await;
    let dispatcher = Dispatcher::new(requester(
        format!("http://{address}/blob"),
        Duration::from_secs(10),
    ));

    let aggregated = aggregate(dispatcher.dispatch(1, 4, &ArrivalPolicy::Burst).await.unwrap());

    assert_eq!(aggregated.summary.total_bytes, 4 * 256 * 1024);
    assert!(aggregated.records.iter().all(|r| r.is_success()));
    let throughput = aggregated.summary.throughput_rps;
    assert!(throughput > 0.0);
    assert!(aggregated.records.iter().all(|r| r.throughput == throughput));
}
