//! End-to-end session tests against a mocked backend
//!
//! These drive `SessionState` through `QueryDispatcher` and the real
//! `HttpBackend`, covering agent loading, a successful exchange, a failed
//! exchange, and an empty submission.

use ai_search_core::api::HttpBackend;
use ai_search_core::{extract_citations, Config, QueryDispatcher, Sender, SessionState};
use mockito::{Matcher, Server, ServerGuard};
use serial_test::serial;

const AGENTS_PATH: &str = "/api/proxy/backend/api/agents";

async fn server_with_agents() -> (ServerGuard, mockito::Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", AGENTS_PATH)
        .with_status(200)
        .with_body(r#"{"data":[{"id":1,"agent_name":"A"},{"id":2,"agent_name":"B"}]}"#)
        .create_async()
        .await;
    (server, mock)
}

fn dispatcher_for(server: &ServerGuard) -> QueryDispatcher<HttpBackend> {
    QueryDispatcher::new(HttpBackend::new(Config::new(server.url())))
}

#[tokio::test]
#[serial]
async fn test_agents_load_selects_first() {
    let (server, mock) = server_with_agents().await;
    let dispatcher = dispatcher_for(&server);
    let mut state = SessionState::new();

    assert_eq!(dispatcher.load_agents(&mut state).await, 2);

    mock.assert_async().await;
    assert_eq!(state.selected_agent().unwrap().id, 1);
    assert!(!state.has_error());
}

#[tokio::test]
#[serial]
async fn test_agents_load_failure_sets_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", AGENTS_PATH)
        .with_status(500)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server);
    let mut state = SessionState::new();

    assert_eq!(dispatcher.load_agents(&mut state).await, 0);

    mock.assert_async().await;
    assert!(state.has_error());
    assert!(state.agents().is_empty());
    assert!(state.selected_agent().is_none());
}

#[tokio::test]
#[serial]
async fn test_successful_exchange() {
    let (mut server, agents_mock) = server_with_agents().await;
    let chat_mock = server
        .mock("POST", "/api/proxy/backend/api/agents/1/chat")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "query": "hello",
            "stream": false
        })))
        .with_status(200)
        .with_body(r#"{"text_content":"hi","search_metadata":[]}"#)
        .expect(1)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server);
    let mut state = SessionState::new();
    dispatcher.load_agents(&mut state).await;

    assert!(dispatcher.submit(&mut state, "hello").await.unwrap());

    agents_mock.assert_async().await;
    chat_mock.assert_async().await;
    let turns = state.conversation();
    assert_eq!(turns.len(), 2);
    assert_eq!((turns[0].sender, turns[0].text.as_str()), (Sender::User, "hello"));
    assert_eq!((turns[1].sender, turns[1].text.as_str()), (Sender::Bot, "hi"));
    assert!(turns[1].citations.is_empty());
    assert!(!state.is_loading());
    assert!(!state.has_error());
}

#[tokio::test]
#[serial]
async fn test_failed_exchange_leaves_turn_unanswered() {
    let (mut server, _agents_mock) = server_with_agents().await;
    let chat_mock = server
        .mock("POST", "/api/proxy/backend/api/agents/1/chat")
        .with_status(500)
        .with_body(r#"{"error":"internal"}"#)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server);
    let mut state = SessionState::new();
    dispatcher.load_agents(&mut state).await;

    assert!(!dispatcher.submit(&mut state, "hello").await.unwrap());

    chat_mock.assert_async().await;
    let turns = state.conversation();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].text, "hello");
    assert!(!state.is_loading());
    assert!(state.has_error());
}

#[tokio::test]
#[serial]
async fn test_empty_submission_sends_nothing() {
    let (mut server, _agents_mock) = server_with_agents().await;
    let chat_mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server);
    let mut state = SessionState::new();
    dispatcher.load_agents(&mut state).await;

    assert!(!dispatcher.submit(&mut state, "").await.unwrap());

    chat_mock.assert_async().await;
    assert!(state.conversation().is_empty());
    assert!(!state.is_loading());
}

#[tokio::test]
#[serial]
async fn test_citations_and_history_are_forwarded() {
    let (mut server, _agents_mock) = server_with_agents().await;
    let first = server
        .mock("POST", "/api/proxy/backend/api/agents/2/chat")
        .match_body(Matcher::PartialJson(serde_json::json!({"query": "install?"})))
        .with_status(200)
        .with_body(
            r#"{
                "text_content": "Use the installer.",
                "search_metadata": [
                    {"metadata": {"filename": "install.md"}, "page_content": "Run setup", "value": 0.91},
                    {"metadata": {"filename": "faq.md"}, "page_content": "FAQ", "value": 0.42}
                ]
            }"#,
        )
        .create_async()
        .await;
    let second = server
        .mock("POST", "/api/proxy/backend/api/agents/2/chat")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "query": "and then?",
            "prvMsgs": [
                {"text": "install?", "sender": "human"},
                {
                    "text": "Use the installer.",
                    "sender": "ai",
                    "search_metadata": [
                        {"metadata": {"filename": "install.md"}, "page_content": "Run setup", "value": 0.91},
                        {"metadata": {"filename": "faq.md"}, "page_content": "FAQ", "value": 0.42}
                    ]
                },
                {"text": "and then?", "sender": "human"}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"text_content":"Restart."}"#)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server);
    let mut state = SessionState::new();
    dispatcher.load_agents(&mut state).await;
    assert!(state.select_agent(2));

    assert!(dispatcher.submit(&mut state, "install?").await.unwrap());
    assert!(dispatcher.submit(&mut state, "and then?").await.unwrap());

    first.assert_async().await;
    second.assert_async().await;
    let answer = &state.conversation()[1];
    let titles: Vec<_> = extract_citations(Some(answer.citations.as_slice()))
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, vec!["install.md", "faq.md"]);
    assert!(state.conversation()[3].citations.is_empty());
}
