mod common;

use common::spawn_raw_target;
use std::time::Duration;
use strain::actors::http_requester::HttpRequester;
use strain::actors::Requester;

fn requester(address: std::net::SocketAddr) -> HttpRequester {
    HttpRequester::new(
        &format!("http://{address}/"),
        Duration::from_secs(5),
        Duration::from_secs(2),
    )
    .unwrap()
}

#[tokio::test]
async fn truncated_body_should_keep_status_and_drop_bytes() {
    let address = spawn_raw_target(
        b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\nConnection: close\r\n\r\n0123456789",
    )
    .await;

    let record = requester(address).request(0).await;

    assert_eq!(record.status_code, 200);
    assert_eq!(record.byte_size, 0);
    assert!(!record.is_transport_failure());
}

#[tokio::test]
async fn chunked_body_should_count_bytes_actually_read() {
    let address = spawn_raw_target(
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n\
          5\r\nhello\r\n6\r\n world\r\n0\r\n\r\n",
    )
    .await;

    let record = requester(address).request(1).await;

    assert_eq!(record.status_code, 200);
    assert_eq!(record.byte_size, 11);
    assert!(record.is_success());
}
