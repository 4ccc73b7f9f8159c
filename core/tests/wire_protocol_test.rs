//! Tests for the JSON shapes exchanged with the backend

use ai_search_core::api::{ChatRequest, ChatResponse, PriorMessage};
use ai_search_core::dispatch::ChatReply;
use ai_search_core::{Agent, SessionState};

#[test]
fn test_chat_request_from_dispatch() {
    let mut state = SessionState::new();
    state.agents_loaded(vec![Agent::new(5, "Docs")]);
    let request = state.append_user_turn("What is inScope?").unwrap().unwrap();

    let body = ChatRequest::from(&request);
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["query"], "What is inScope?");
    assert_eq!(json["stream"], false);
    assert_eq!(json["prvMsgs"][0]["text"], "What is inScope?");
    assert_eq!(json["prvMsgs"][0]["sender"], "human");
    // User turns carry no search metadata
    assert!(json["prvMsgs"][0].get("search_metadata").is_none());
}

#[test]
fn test_prior_message_serialization() {
    let message = PriorMessage {
        text: "hi".to_string(),
        sender: ai_search_core::Sender::Bot,
        search_metadata: Some(Vec::new()),
    };
    let json = serde_json::to_string(&message).unwrap();

    assert!(json.contains(r#""sender":"ai""#));
    assert!(json.contains(r#""search_metadata":[]"#));
}

#[test]
fn test_chat_response_to_reply() {
    let json = r#"{
        "text_content": "Answer",
        "search_metadata": [
            {"metadata": {"filename": "a.md", "page": 3}, "page_content": "A", "value": {"id": "x"}},
            {"metadata": {"filename": "b.md"}}
        ]
    }"#;
    let response: ChatResponse = serde_json::from_str(json).unwrap();
    let reply = ChatReply::from(response);

    assert_eq!(reply.text, "Answer");
    assert_eq!(reply.citations.len(), 2);
    assert_eq!(reply.citations[0].content, "A");
    assert_eq!(reply.citations[0].raw_value["id"], "x");
    assert_eq!(reply.citations[1].filename, "b.md");
    assert_eq!(reply.citations[1].content, "");
    assert!(reply.citations[1].raw_value.is_null());
}

#[test]
fn test_chat_response_missing_text_is_error() {
    let result = serde_json::from_str::<ChatResponse>(r#"{"search_metadata":[]}"#);
    assert!(result.is_err());
}

#[test]
fn test_history_resends_search_metadata_unchanged() {
    let json = r#"{
        "text_content": "Answer",
        "search_metadata": [{
            "metadata": {"filename": "a.md", "page": 3, "source": "http://x"},
            "page_content": "p",
            "value": 1,
            "id": "doc-7"
        }]
    }"#;
    let response: ChatResponse = serde_json::from_str(json).unwrap();

    let mut state = SessionState::new();
    state.agents_loaded(vec![Agent::new(1, "Docs")]);
    let first = state.append_user_turn("first").unwrap().unwrap();
    state.complete_query(first.turn_id, ChatReply::from(response));
    let second = state.append_user_turn("second").unwrap().unwrap();

    let body = serde_json::to_value(ChatRequest::from(&second)).unwrap();
    let resent = &body["prvMsgs"][1]["search_metadata"][0];

    assert_eq!(
        *resent,
        serde_json::json!({
            "metadata": {"filename": "a.md", "page": 3, "source": "http://x"},
            "page_content": "p",
            "value": 1,
            "id": "doc-7"
        })
    );
}
