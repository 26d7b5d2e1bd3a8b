use school_core::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in(server_uri: String) -> ApiClient {
    let store = MemoryTokenStore::with_entries([(
        school_core::storage::credentials::TokenKey::AccessToken,
        "access-token".to_string(),
    )]);
    let session = SessionContext::load(Arc::new(store)).expect("load session");
    ApiClient::new(server_uri, session).expect("client")
}

async fn statement_error(response: ResponseTemplate) -> String {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/finance/students/7/statement"))
        .respond_with(response)
        .mount(&server)
        .await;

    let repo = FeeRepository::new(signed_in(server.uri()));
    repo.fee_statement(7)
        .await
        .error_message()
        .expect("operation should fail")
        .to_string()
}

#[tokio::test]
async fn unreachable_host_reports_network_error() {
    let repo = FeeRepository::new(signed_in("http://127.0.0.1:1".to_string()));
    let result = repo.fee_statement(7).await;
    assert_eq!(result.error_message(), Some(NETWORK_ERROR_MESSAGE));
}

#[tokio::test]
async fn detail_wins_over_message() {
    let message = statement_error(
        ResponseTemplate::new(400)
            .set_body_json(json!({"detail": "Student is archived", "message": "Bad request"})),
    )
    .await;
    assert_eq!(message, "Student is archived");
}

#[tokio::test]
async fn message_used_when_detail_missing() {
    let message = statement_error(
        ResponseTemplate::new(422).set_body_json(json!({"message": "Term is closed"})),
    )
    .await;
    assert_eq!(message, "Term is closed");
}

#[tokio::test]
async fn validation_detail_list_is_joined() {
    let message = statement_error(ResponseTemplate::new(422).set_body_json(json!({
        "detail": [{"msg": "field required"}, {"msg": "value is not a valid integer"}]
    })))
    .await;
    assert_eq!(message, "field required; value is not a valid integer");
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status() {
    let message = statement_error(ResponseTemplate::new(502)).await;
    assert_eq!(message, "Error: HTTP 502");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let message =
        statement_error(ResponseTemplate::new(500).set_body_string("<html>oops</html>")).await;
    assert_eq!(message, "Error: HTTP 500");
}

#[tokio::test]
async fn null_success_body_is_an_error() {
    let message = statement_error(ResponseTemplate::new(200).set_body_string("null")).await;
    assert_eq!(message, "No fee statement received");
}

#[tokio::test]
async fn error_messages_are_never_blank() {
    let message =
        statement_error(ResponseTemplate::new(400).set_body_json(json!({"detail": "   "}))).await;
    assert!(!message.trim().is_empty());
    assert_eq!(message, "Error: HTTP 400");
}
