use mockito::Matcher;
use proxy::client::Client;
use proxy::utils::{FUNCTION_KEY, METRICS_PATH, METRICS_WINDOW_KEY};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_query_metrics_ok() {
    let _mok = mockito::mock("GET", METRICS_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(FUNCTION_KEY.into(), "alexellis-figlet".into()),
            Matcher::UrlEncoded(METRICS_WINDOW_KEY.into(), "24".into()),
        ]))
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("Success: 10, Error: 0, Mean: 0.2s")
        .create();

    let client = Client::new(mockito::server_url().as_str(), None).unwrap();
    let res = client
        .query_metrics("alexellis-figlet", Duration::from_secs(24 * 60 * 60))
        .await;
    assert!(res.is_ok());
    assert_eq!(res.unwrap(), b"Success: 10, Error: 0, Mean: 0.2s".to_vec());
}

#[tokio::test]
async fn test_query_metrics_window_whole_hours() {
    let _mok = mockito::mock("GET", METRICS_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(FUNCTION_KEY.into(), "nodeinfo".into()),
            Matcher::UrlEncoded(METRICS_WINDOW_KEY.into(), "1".into()),
        ]))
        .with_status(200)
        .with_body("ok")
        .create();

    let client = Client::new(mockito::server_url().as_str(), None).unwrap();
    let res = client
        .query_metrics("nodeinfo", Duration::from_secs(90 * 60))
        .await;
    assert_eq!(res.unwrap(), b"ok".to_vec());
}

#[tokio::test]
async fn test_query_metrics_unreachable() {
    let client = Client::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
    let res = client.query_metrics("nodeinfo", Duration::from_secs(3600)).await;
    assert!(res.is_err());
    assert!(format!("{}", res.unwrap_err()).contains("can't query metrics from OpenFaaS"));
}

#[tokio::test]
async fn test_query_metrics_timeout_retried_once() {
    // accepts connections and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            open.push(socket);
        }
    });

    let client = Client::new(
        format!("http://{}", addr).as_str(),
        Some(Duration::from_millis(50)),
    )
    .unwrap();
    let res = client.query_metrics("nodeinfo", Duration::from_secs(3600)).await;
    assert!(res.is_err());
    assert!(format!("{}", res.unwrap_err()).contains("can't query metrics from OpenFaaS"));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}
