use std::net::TcpListener;
use std::time::Duration;

use rerank_probe::providers::RerankServiceProvider;
use rerank_probe::{
    ErrorKind, ProbeConfig, RerankError, RerankProvider, RerankServiceConfig, rerank,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reserve_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve addr");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr.to_string()
}

fn config_for(server: &MockServer) -> ProbeConfig {
    ProbeConfig::new(server.uri())
}

async fn report(config: &ProbeConfig) -> String {
    let mut buf = Vec::new();
    rerank(config, &mut buf).await.expect("write report");
    String::from_utf8(buf).expect("utf8 report")
}

async fn mount_success(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/rerank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn sends_demo_payload_as_json() {
    let server = MockServer::start().await;
    let config = config_for(&server);

    Mock::given(method("POST"))
        .and(path("/rerank"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "query": config.query,
            "documents": config.documents,
            "top_n": 10,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model": "bge"})))
        .expect(1)
        .mount(&server)
        .await;

    let text = report(&config).await;
    assert!(text.starts_with("rerank succeeded\n"), "{text}");
}

#[tokio::test]
async fn success_report_shows_rank_index_score_and_preview() {
    let server = MockServer::start().await;
    mount_success(
        &server,
        json!({
            "model": "test-model",
            "results": [
                {"index": 0, "relevance_score": 0.987},
                {"index": 2, "relevance_score": 0.5}
            ]
        }),
    )
    .await;

    let mut config = config_for(&server);
    config.documents = vec![
        format!("{}{}", "x".repeat(50), "tail that is cut"),
        "unused".to_string(),
        "线性回归是最简单的机器学习算法之一。".to_string(),
    ];

    let text = report(&config).await;
    let expected = format!(
        "rerank succeeded\n   model: test-model\n   results: 2\n   #1: doc 0, score 0.9870, text: {}...\n   #2: doc 2, score 0.5000, text: 线性回归是最简单的机器学习算法之一。...\n",
        "x".repeat(50)
    );
    assert_eq!(text, expected);
}

#[tokio::test]
async fn empty_success_body_reports_unknown_model_and_no_results() {
    let server = MockServer::start().await;
    mount_success(&server, json!({})).await;

    let text = report(&config_for(&server)).await;
    assert_eq!(text, "rerank succeeded\n   model: unknown\n   results: 0\n");
}

#[tokio::test]
async fn non_200_prints_status_and_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rerank"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let text = report(&config_for(&server)).await;
    assert_eq!(text, "rerank failed: 404\n   body: not found\n");
}

#[tokio::test]
async fn non_200_other_than_404_is_not_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rerank"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{\"model\":\"x\"}"))
        .mount(&server)
        .await;

    let text = report(&config_for(&server)).await;
    assert_eq!(text, "rerank failed: 201\n   body: {\"model\":\"x\"}\n");
}

#[tokio::test]
async fn unreachable_service_is_reported_not_raised() {
    let config = ProbeConfig::new(format!("http://{}", reserve_addr()));

    let text = report(&config).await;
    assert!(text.starts_with("rerank error (transport): transport error: "), "{text}");
    assert!(text.contains("/rerank"), "{text}");
    assert!(text.contains("tcp connect error"), "{text}");
    assert_eq!(text.lines().count(), 1);
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rerank"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let text = report(&config_for(&server)).await;
    assert!(text.starts_with("rerank error (decode): response decode error: "), "{text}");
}

#[tokio::test]
async fn array_bodies_are_decode_errors() {
    for body in [json!([]), json!(["fake-model", [[3, 0.75]]]), json!({"results": [[2, 0.5]]})] {
        let server = MockServer::start().await;
        mount_success(&server, body.clone()).await;

        let text = report(&config_for(&server)).await;
        assert!(
            text.starts_with("rerank error (decode): response decode error: "),
            "{body} -> {text}"
        );
        assert_eq!(text.lines().count(), 1, "{body} -> {text}");
    }
}

#[tokio::test]
async fn out_of_range_index_is_rejected_before_preview() {
    let server = MockServer::start().await;
    mount_success(
        &server,
        json!({
            "model": "test-model",
            "results": [
                {"index": 1, "relevance_score": 0.9},
                {"index": 7, "relevance_score": 0.2}
            ]
        }),
    )
    .await;

    let text = report(&config_for(&server)).await;
    assert_eq!(
        text,
        "rerank error (decode): rerank service returned invalid response: result index 7 out of range for 5 documents\n"
    );
}

#[tokio::test]
async fn repeated_probes_print_identical_reports() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rerank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model",
            "results": [
                {"index": 4, "relevance_score": 0.93},
                {"index": 0, "relevance_score": 0.81},
                {"index": 3, "relevance_score": 0.01}
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let first = report(&config).await;
    let second = report(&config).await;
    assert_eq!(first, second);
    assert!(first.contains("   #1: doc 4, score 0.9300, text: 线性回归是最简单的机器学习算法之一。..."));
    assert!(first.contains("   #3: doc 3, score 0.0100, text: 今天天气很好，适合户外运动。..."));
}

#[tokio::test]
async fn empty_documents_never_reach_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.documents.clear();

    let text = report(&config).await;
    assert_eq!(
        text,
        "rerank error (config): configuration error: rerank documents is empty\n"
    );
}

#[tokio::test]
async fn slow_service_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rerank"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut service = RerankServiceConfig::new(server.uri());
    service.timeout = Duration::from_millis(200);
    let provider = RerankServiceProvider::new(service).expect("build provider");
    let request = ProbeConfig::default().request();

    let err = provider.rerank(&request).await.expect_err("timeout");
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(&err, RerankError::Transport(e) if e.is_timeout()));
}
