mod helpers;

use std::time::Duration;

use modsys_lib::ModsysError;
use modsys_lib::descriptor::PerspectiveMode;
use modsys_lib::providers::{
    ApolloClient, OpenAIClient, PerspectiveClient, Provider, RestClient, ScamAdvisorClient,
    SightengineClient, TextRequest,
};
use modsys_lib::serde_json::json;
use wiremock::matchers;
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::*;

// ---------------------------------------------------------------------------
// Google Perspective
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_perspective_analyze_request() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1alpha1/comments:analyze"))
        .and(matchers::query_param("key", "perspective-key"))
        .and(matchers::body_json(json!({
            "comment": {"text": "You suck at this game."},
            "requestedAttributes": {"TOXICITY": {}},
            "languages": ["en"],
            "communityId": "gaming"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(perspective_scores("TOXICITY", 0.91)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PerspectiveClient::new(
        RestClient::new(),
        &mock_server.uri(),
        PerspectiveMode::Analyze,
        Some("perspective-key".to_string()),
    );
    let request = TextRequest {
        prompt: Some("You suck at this game.".to_string()),
        community_id: Some("gaming".to_string()),
        ..TextRequest::default()
    };
    let response = client.detect_text(&request).await.unwrap();
    assert_eq!(response["attributeScores"]["TOXICITY"]["summaryScore"]["value"], 0.91);
}

#[tokio::test]
async fn test_perspective_suggest_request() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1alpha1/comments:suggestscore"))
        .and(matchers::body_json(json!({
            "comment": {"text": "gg"},
            "attributeScores": {"TOXICITY": {"summaryScore": {"value": 0.05}}},
            "clientToken": "comment-17"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"clientToken": "comment-17"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PerspectiveClient::new(
        RestClient::new(),
        &mock_server.uri(),
        PerspectiveMode::Suggest,
        None,
    );
    let request = TextRequest {
        prompt: Some("gg".to_string()),
        content_id: Some("comment-17".to_string()),
        score: Some(0.05),
        ..TextRequest::default()
    };
    let response = client.detect_text(&request).await.unwrap();
    assert_eq!(response["clientToken"], "comment-17");
}

#[tokio::test]
async fn test_perspective_missing_prompt_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = PerspectiveClient::new(
        RestClient::new(),
        &mock_server.uri(),
        PerspectiveMode::Analyze,
        None,
    );
    let err = client.detect_text(&TextRequest::default()).await.unwrap_err();
    assert!(matches!(err, ModsysError::MissingArgument { ref argument, .. } if argument == "prompt"));
}

#[tokio::test]
async fn test_perspective_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(400).set_body_string("Attribute SPAM does not support request languages"))
        .mount(&mock_server)
        .await;

    let client = PerspectiveClient::new(
        RestClient::new(),
        &mock_server.uri(),
        PerspectiveMode::Analyze,
        None,
    );
    let err = client
        .detect_text(&TextRequest::prompt("hola"))
        .await
        .unwrap_err();
    match err {
        ModsysError::Http { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("SPAM"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Sightengine
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sightengine_check_request() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/1.0/check.json"))
        .and(matchers::query_param("url", "https://example.com/cat.jpg"))
        .and(matchers::query_param("models", "nudity,wad"))
        .and(matchers::query_param("api_user", "se-user"))
        .and(matchers::query_param("api_secret", "se-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "nudity": {"safe": 0.99},
            "weapon": 0.01
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SightengineClient::new(
        RestClient::new(),
        &mock_server.uri(),
        vec!["nudity".to_string(), "wad".to_string()],
        Some("se-secret".to_string()),
        Some("se-user".to_string()),
    );
    let response = client
        .detect_image("https://example.com/cat.jpg")
        .await
        .unwrap();
    assert_eq!(response["nudity"]["safe"], 0.99);
}

#[tokio::test]
async fn test_sightengine_failure_body() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failure",
            "error": {"type": "credentials_error", "code": 103, "message": "Incorrect API user or API secret"}
        })))
        .mount(&mock_server)
        .await;

    let client = SightengineClient::new(
        RestClient::new(),
        &mock_server.uri(),
        vec!["nudity".to_string()],
        None,
        None,
    );
    let err = client.detect_image("https://example.com/a.png").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Sightengine rejected the request: Incorrect API user or API secret"
    );
}

#[tokio::test]
async fn test_sightengine_has_no_text_detection() {
    let client = SightengineClient::new(
        RestClient::new(),
        "http://127.0.0.1:9",
        vec!["nudity".to_string()],
        None,
        None,
    );
    let err = client
        .detect_text(&TextRequest::prompt("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModsysError::NotImplemented(_)));
}

// ---------------------------------------------------------------------------
// ScamAdvisor, Apollo, OpenAI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_scam_advisor_domain_lookup() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v2/trust/single"))
        .and(matchers::query_param("domain", "example.com"))
        .and(matchers::query_param("apikey", "sa-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 87})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ScamAdvisorClient::new(
        RestClient::new(),
        &mock_server.uri(),
        Some("sa-key".to_string()),
    );
    let response = client
        .detect_text(&TextRequest::domain("example.com"))
        .await
        .unwrap();
    assert_eq!(response["score"], 87);
}

#[tokio::test]
async fn test_scam_advisor_requires_domain() {
    let client = ScamAdvisorClient::new(RestClient::new(), "http://127.0.0.1:9", None);
    let err = client
        .detect_text(&TextRequest::prompt("example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Scam Advisor requires argument 'domain'");
}

#[tokio::test]
async fn test_apollo_rule_request() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/rules"))
        .and(matchers::header("Authorization", "Bearer apollo-token"))
        .and(matchers::body_json(json!({"rule": "hate speech > 0.75"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"flagged": false})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApolloClient::new(
        RestClient::new(),
        &mock_server.uri(),
        "apollo-token".to_string(),
    );
    let response = client
        .detect_text(&TextRequest::rule("hate speech", ">", 0.75))
        .await
        .unwrap();
    assert_eq!(response["flagged"], false);
}

#[tokio::test]
async fn test_openai_completion_request() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/completions"))
        .and(matchers::header("Authorization", "Bearer sk-test"))
        .and(matchers::body_json(json!({
            "model": "text-davinci-003",
            "prompt": "Is this toxic: you suck"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"text": "Yes"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAIClient::new(
        RestClient::new(),
        &mock_server.uri(),
        Some("sk-test".to_string()),
        "text-davinci-003",
    );
    let response = client
        .detect_text(&TextRequest::prompt("Is this toxic: you suck"))
        .await
        .unwrap();
    assert_eq!(response["choices"][0]["text"], "Yes");
}

#[tokio::test]
async fn test_client_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"score": 1}))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&mock_server)
        .await;

    let rest = RestClient::with_timeout(Duration::from_millis(100)).unwrap();
    let client = ScamAdvisorClient::new(rest, &mock_server.uri(), None);
    let err = client
        .detect_text(&TextRequest::domain("slow.example"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModsysError::Timeout(_)));
}
