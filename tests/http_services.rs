use scam_radar::{Config, RiskTier, ScamAnalyzer, ServiceKind, ServiceOrchestrator, ServiceStatus};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.services.base_url = server.uri();
    config.services.timeout_seconds = 1;
    config
}

async fn mount_classifier(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/scam/comprehensive"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_all_services_contribute() {
    let server = MockServer::start().await;
    let text = "Contact billing@example.com or pay at https://example.com/invoice";

    Mock::given(method("POST"))
        .and(path("/api/scam/comprehensive"))
        .and(body_json(json!({ "text": text })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "risk_score": 0.25,
            "indicators": ["Payment request from unknown sender"],
            "analysis": "Likely invoice fraud"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/breach/check"))
        .and(body_json(json!({ "emails": ["billing@example.com"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "breached_emails": ["billing@example.com"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/link/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analysis": {
                "urls": [{ "url": "https://example.com/invoice", "indicators": ["Newly registered domain"] }],
                "average_risk_score": 20
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = ScamAnalyzer::new(Arc::new(config_for(&server))).unwrap();
    let report = analyzer.analyze(text).await.unwrap();

    assert_eq!(report.total_score, 25.0 + 30.0 + 20.0);
    assert_eq!(report.risk_tier, RiskTier::High);
    assert_eq!(report.analysis, "Likely invoice fraud");
    assert_eq!(
        report.indicators,
        vec![
            "Payment request from unknown sender".to_string(),
            "Compromised emails detected: 1".to_string(),
            "Newly registered domain".to_string(),
        ]
    );
    assert!(report.services_used.iter().all(|s| s.available));
    assert_eq!(report.recommendations.len(), 4);
}

#[tokio::test]
async fn test_breach_outage_degrades_gracefully() {
    let server = MockServer::start().await;
    mount_classifier(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "risk_score": 0.1 })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/breach/check"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/link/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": {} })))
        .mount(&server)
        .await;

    let analyzer = ScamAnalyzer::new(Arc::new(config_for(&server))).unwrap();
    let report = analyzer
        .analyze("ping me at someone@example.com about https://example.com")
        .await
        .unwrap();

    let availability: Vec<(String, bool)> = report
        .services_used
        .iter()
        .map(|s| (s.name.clone(), s.available))
        .collect();
    assert_eq!(
        availability,
        vec![
            ("Scam Text Classifier".to_string(), true),
            ("Breach Check".to_string(), false),
            ("Link Analysis".to_string(), true),
        ]
    );
    assert_eq!(report.total_score, 10.0);
}

#[tokio::test]
async fn test_no_entities_only_calls_classifier() {
    let server = MockServer::start().await;
    mount_classifier(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "risk_score": 0.0 })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/breach/check"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/link/analyze"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = ServiceOrchestrator::from_config(&config_for(&server).services).unwrap();
    let results = orchestrator
        .call_services("see you tomorrow", &[], &[])
        .await;

    let statuses: Vec<(ServiceKind, ServiceStatus)> =
        results.iter().map(|r| (r.service, r.status)).collect();
    assert_eq!(
        statuses,
        vec![
            (ServiceKind::ScamClassifier, ServiceStatus::Ok),
            (ServiceKind::BreachCheck, ServiceStatus::Skipped),
            (ServiceKind::LinkReputation, ServiceStatus::Skipped),
        ]
    );
}

#[tokio::test]
async fn test_malformed_payload_is_an_error() {
    let server = MockServer::start().await;
    mount_classifier(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>Bad Gateway</html>"),
    )
    .await;

    let orchestrator = ServiceOrchestrator::from_config(&config_for(&server).services).unwrap();
    let results = orchestrator.call_services("hello", &[], &[]).await;

    assert_eq!(results[0].status, ServiceStatus::Error);
    assert!(results[0]
        .error_detail
        .as_deref()
        .unwrap_or_default()
        .contains("Malformed response"));
}

#[tokio::test]
async fn test_upstream_error_field_is_an_error() {
    let server = MockServer::start().await;
    mount_classifier(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "error": "Comprehensive analysis failed" })),
    )
    .await;

    let analyzer = ScamAnalyzer::new(Arc::new(config_for(&server))).unwrap();
    let report = analyzer.analyze("hello there").await.unwrap();

    assert!(!report.services_used[0].available);
    assert_eq!(report.total_score, 0.0);
    assert_eq!(report.risk_tier, RiskTier::Low);
}

#[tokio::test]
async fn test_hung_service_times_out() {
    let server = MockServer::start().await;
    mount_classifier(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "risk_score": 0.9 }))
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let analyzer = ScamAnalyzer::new(Arc::new(config_for(&server))).unwrap();
    let started = Instant::now();
    let report = analyzer.analyze("Your parcel is held").await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(!report.services_used[0].available);
    // delivery terms "parcel" and "held"
    assert_eq!(report.total_score, 30.0);
    assert_eq!(report.risk_tier, RiskTier::LowMedium);
}

async fn score_with_link_average(average: f64) -> (f64, bool, usize) {
    let server = MockServer::start().await;
    mount_classifier(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "risk_score": 0.0 })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/link/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analysis": {
                "urls": [{ "url": "https://example.com/x", "indicators": ["Self-signed certificate"] }],
                "average_risk_score": average
            }
        })))
        .mount(&server)
        .await;

    let analyzer = ScamAnalyzer::new(Arc::new(config_for(&server))).unwrap();
    let report = analyzer.analyze("see https://example.com/x").await.unwrap();
    (
        report.total_score,
        report.services_used[2].available,
        report.indicators.len(),
    )
}

#[tokio::test]
async fn test_link_average_above_hundred_still_counts() {
    let moderate = score_with_link_average(95.0).await;
    let severe = score_with_link_average(133.0).await;

    assert_eq!(moderate, (95.0, true, 1));
    assert_eq!(severe, (133.0, true, 1));
    assert!(severe.0 > moderate.0);
}
