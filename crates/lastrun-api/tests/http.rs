use std::{fs, path::Path};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};
use tower::ServiceExt;

use lastrun_api::{HttpApi, ListenAddr, ServerError, bind, serve};
use lastrun_prometheus::ExporterMetrics;

const SUMMARY: &str = "resources:
  changed: 3
  corrective_change: 0
  failed: 1
  failed_to_restart: 0
  out_of_sync: 4
  restarted: 0
  scheduled: 4
  skipped: 0
  total: 12
";

fn router_for(path: &Path, endpoint: &str) -> Router {
    let metrics = ExporterMetrics::new(path).unwrap();
    HttpApi::new(metrics).router(endpoint).unwrap()
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

fn resource_lines(body: &str) -> Vec<&str> {
    body.lines()
        .filter(|l| l.starts_with("puppet_last_run_exporter_Resources"))
        .collect()
}

#[tokio::test]
async fn metrics_endpoint_serves_resource_gauges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_run_summary.yaml");
    fs::write(&path, SUMMARY).unwrap();

    let (status, content_type, body) = get(router_for(&path, "/metrics"), "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; version=0.0.4"));
    assert_eq!(resource_lines(&body).len(), 9);
    assert!(body.contains("puppet_last_run_exporter_ResourcesOutOfSync 4\n"));
    assert!(body.contains("puppet_last_run_exporter_ResourcesTotal 12\n"));
    assert!(body.contains("puppet_last_run_exporter_build_info{"));
}

#[tokio::test]
async fn missing_report_still_answers_ok() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_run_summary.yaml");

    let (status, _, body) = get(router_for(&path, "/metrics"), "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(resource_lines(&body).is_empty());
    assert!(body.contains("puppet_last_run_exporter_build_info{"));
}

#[tokio::test]
async fn malformed_report_still_answers_ok() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_run_summary.yaml");
    fs::write(&path, "resources:\n  changed: three\n").unwrap();

    let (status, _, body) = get(router_for(&path, "/metrics"), "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(resource_lines(&body).is_empty());
}

#[tokio::test]
async fn custom_endpoint_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_run_summary.yaml");
    fs::write(&path, SUMMARY).unwrap();
    let router = router_for(&path, "/puppet/metrics");

    let (status, _, body) = get(router.clone(), "/puppet/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resource_lines(&body).len(), 9);

    let (status, _, _) = get(router, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_paths_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_run_summary.yaml");

    let (status, _, _) = get(router_for(&path, "/metrics"), "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn relative_endpoint_is_rejected() {
    let metrics = ExporterMetrics::new("last_run_summary.yaml").unwrap();
    let err = HttpApi::new(metrics).router("metrics").unwrap_err();
    assert!(matches!(err, ServerError::InvalidEndpoint(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_see_one_file_version_each() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_run_summary.yaml");
    fs::write(&path, SUMMARY).unwrap();
    let router = router_for(&path, "/metrics");

    let writer = {
        let path = path.clone();
        tokio::task::spawn_blocking(move || {
            for version in 0..200 {
                let doc = format!(
                    "resources:\n  changed: {version}\n  failed: {version}\n  total: {version}\n"
                );
                let tmp = path.with_extension("tmp");
                fs::write(&tmp, doc).unwrap();
                fs::rename(&tmp, &path).unwrap();
            }
        })
    };

    let requests: Vec<_> = (0..50)
        .map(|_| tokio::spawn(get(router.clone(), "/metrics")))
        .collect();

    for request in requests {
        let (status, _, body) = request.await.unwrap();
        assert_eq!(status, StatusCode::OK);

        let value_of = |name: &str| {
            body.lines()
                .find_map(|l| l.strip_prefix(&format!("puppet_last_run_exporter_{name} ")))
                .map(str::to_string)
        };
        let changed = value_of("ResourcesChanged");
        assert!(changed.is_some(), "{body}");
        assert_eq!(changed, value_of("ResourcesFailed"), "{body}");
        assert_eq!(changed, value_of("ResourcesTotal"), "{body}");
    }

    writer.await.unwrap();
}

#[tokio::test]
async fn binds_the_requested_address() {
    let listener = bind(&"127.0.0.1:0".parse::<ListenAddr>().unwrap())
        .await
        .unwrap();
    let local = listener.local_addr().unwrap();

    assert!(local.ip().is_loopback());
    assert_ne!(local.port(), 0);
}

#[tokio::test]
async fn empty_host_binds_every_interface() {
    let listener = bind(&":0".parse::<ListenAddr>().unwrap()).await.unwrap();
    let local = listener.local_addr().unwrap();

    assert!(local.ip().is_unspecified(), "bound {local}");
    assert_ne!(local.port(), 0);

    // IPv4 clients reach the wildcard listener whichever family it ended up on.
    let client = TcpStream::connect(("127.0.0.1", local.port())).await;
    assert!(client.is_ok(), "{client:?}");
}

#[tokio::test]
async fn taken_address_fails_to_bind() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let err = bind(&ListenAddr::new("127.0.0.1", port)).await.unwrap_err();
    match err {
        ServerError::Bind { addr, .. } => assert_eq!(addr, format!("127.0.0.1:{port}")),
        other => panic!("expected bind error, got {other:?}"),
    }
}

#[tokio::test]
async fn serves_over_a_real_socket() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_run_summary.yaml");
    fs::write(&path, SUMMARY).unwrap();

    let listener = bind(&ListenAddr::new("127.0.0.1", 0)).await.unwrap();
    let local = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, router_for(&path, "/metrics")));

    let mut stream = TcpStream::connect(local).await.unwrap();
    stream
        .write_all(b"GET /metrics HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.contains("puppet_last_run_exporter_ResourcesChanged 3"));
}
