//! Concurrent client construction shares one transport per base URL

use std::sync::Arc;

use futures::future::join_all;
use sdkcore_http::{HttpClient, StaticEnvironment};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_hundred_concurrent_clients_share_one_transport() {
    let tasks = (0..100).map(|i| {
        // Alternate casing; the pool key is case-insensitive
        let base_url = if i % 2 == 0 {
            "http://shared-transport.invalid:3001"
        } else {
            "HTTP://Shared-Transport.INVALID:3001"
        };
        tokio::task::spawn_blocking(move || HttpClient::new(StaticEnvironment::new(base_url)))
    });

    let clients: Vec<HttpClient> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("client construction failed"))
        .collect();

    let first = clients[0].transport();
    assert!(clients.iter().all(|c| Arc::ptr_eq(c.transport(), first)));
}

#[test]
fn test_distinct_base_urls_do_not_share_transports() {
    let a = HttpClient::new(StaticEnvironment::new("http://shared-transport.invalid:3002"));
    let b = HttpClient::new(StaticEnvironment::new("http://shared-transport.invalid:3003"));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(!Arc::ptr_eq(a.transport(), b.transport()));
}
