use summarizer_core_sdk::{
    client::{FormSession, RelayClient},
    form::{FormEvent, SelectedFile},
    models::Provider,
    server::{self, RelayState},
};

const COMPLETION: &str = r#"{"id":"chatcmpl-7","object":"chat.completion","choices":[{"index":0,"message":{"role":"assistant","content":"- Launch moved to May"},"finish_reason":"stop"}]}"#;

async fn spawn_relay(upstream_url: String, api_key: &str) -> String {
    let app = server::app(RelayState::new(Provider::new(
        upstream_url,
        api_key,
        "llama3-8b-8192",
    )));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}", addr)
}

fn transcript_file(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_form_summarizes_through_relay() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer relay-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION)
        .create_async()
        .await;

    let relay_url = spawn_relay(upstream.url(), "relay-key").await;
    let file = transcript_file("PM: launch slips to May.");

    let mut session = FormSession::new(RelayClient::new(relay_url));
    session
        .dispatch(FormEvent::FileSelected(SelectedFile::from_path(file.path())))
        .await;
    session
        .dispatch(FormEvent::PromptChanged("One line.".to_string()))
        .await;
    session.dispatch(FormEvent::GenerateClicked).await;

    mock.assert_async().await;
    assert_eq!(session.state().summary, "- Launch moved to May");
    assert_eq!(session.state().error, None);
    assert!(!session.state().is_loading);
}

#[tokio::test]
async fn test_rejected_credential_surfaces_generic_error() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Invalid API Key","code":"invalid_api_key"}}"#)
        .create_async()
        .await;

    let relay_url = spawn_relay(upstream.url(), "").await;
    let file = transcript_file("notes");

    let mut session = FormSession::new(RelayClient::new(relay_url));
    session
        .dispatch(FormEvent::FileSelected(SelectedFile::from_path(file.path())))
        .await;
    session.dispatch(FormEvent::GenerateClicked).await;

    assert_eq!(session.state().summary, "");
    assert_eq!(session.state().error.as_deref(), Some("Server error"));
}
