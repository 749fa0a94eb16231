use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use kinabalu::application::ports::{ChatClient, ChatClientError, ChatMessage};
use kinabalu::application::services::{DialogueError, DialogueExtractor, RetryPolicy};
use kinabalu::domain::Transcript;

/// Chat client whose per-call results are scripted up front; records every
/// call's message list and token budget.
struct ScriptedChatClient {
    results: Mutex<VecDeque<Result<String, ChatClientError>>>,
    calls: Mutex<Vec<(Vec<ChatMessage>, u32)>>,
}

impl ScriptedChatClient {
    fn new(results: Vec<Result<String, ChatClientError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, ChatClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), max_tokens));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ChatClientError::RateLimited))
    }
}

fn extractor(chat: Arc<ScriptedChatClient>) -> DialogueExtractor<ScriptedChatClient> {
    DialogueExtractor::new(chat, RetryPolicy::remote_api())
}

#[tokio::test]
async fn given_fresh_transcript_when_extracting_then_system_and_user_turns_are_sent() {
    let chat = Arc::new(ScriptedChatClient::new(vec![Ok(
        "Speaker 1: hello\nSpeaker 2: hi".to_string()
    )]));
    let sut = extractor(Arc::clone(&chat));
    let transcript = Transcript::from_raw("hello\nhi there");

    let dialogue = sut.extract(&transcript, None).await.unwrap();

    assert_eq!(dialogue, "Speaker 1: hello\nSpeaker 2: hi");
    let calls = chat.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (messages, _) = &calls[0];
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "system");
    assert!(messages[0].content.contains("Speaker 1:"));
    assert_eq!(messages[1].role, "user");
    assert!(!messages[1].content.contains('\n'));
    assert_eq!(messages[1].content, "hellohi there");
}

#[tokio::test]
async fn given_short_transcript_when_extracting_then_generation_budget_is_capped() {
    let chat = Arc::new(ScriptedChatClient::new(vec![Ok("Speaker 1: ok".to_string())]));
    let sut = extractor(Arc::clone(&chat));

    sut.extract(&Transcript::from_raw("short"), None)
        .await
        .unwrap();

    let calls = chat.calls.lock().unwrap();
    assert_eq!(calls[0].1, 4096);
}

#[tokio::test]
async fn given_transcript_exceeding_the_context_budget_when_extracting_then_budget_floors_at_one() {
    let chat = Arc::new(ScriptedChatClient::new(vec![Ok("Speaker 1: ok".to_string())]));
    let sut = extractor(Arc::clone(&chat));
    let long_transcript = Transcript::from_raw("word ".repeat(10_000));

    sut.extract(&long_transcript, None).await.unwrap();

    let calls = chat.calls.lock().unwrap();
    assert_eq!(calls[0].1, 1);
}

#[tokio::test]
async fn given_rate_limit_with_history_when_extracting_then_oldest_history_turn_is_dropped() {
    let chat = Arc::new(ScriptedChatClient::new(vec![
        Err(ChatClientError::RateLimited),
        Ok("Speaker 1: done".to_string()),
    ]));
    let sut = extractor(Arc::clone(&chat));
    let history = vec![
        ChatMessage::system("diarize"),
        ChatMessage::user("old turn one"),
        ChatMessage::user("old turn two"),
    ];

    let dialogue = sut
        .extract(&Transcript::from_raw("new transcript"), Some(history))
        .await
        .unwrap();

    assert_eq!(dialogue, "Speaker 1: done");
    let calls = chat.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    // First call carries the whole history plus the new user turn.
    assert_eq!(calls[0].0.len(), 4);
    assert_eq!(calls[0].0[1].content, "old turn one");
    // Retry dropped the oldest conversational turn.
    assert_eq!(calls[1].0.len(), 3);
    assert_eq!(calls[1].0[1].content, "old turn two");
    assert_eq!(calls[1].0[2].content, "new transcript");
}

#[tokio::test]
async fn given_persistent_rate_limit_without_history_when_extracting_then_retries_are_bounded() {
    let chat = Arc::new(ScriptedChatClient::new(vec![]));
    let sut = extractor(Arc::clone(&chat));

    let error = sut
        .extract(&Transcript::from_raw("transcript"), None)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        DialogueError::RetriesExhausted { attempts: 7 }
    ));
    assert_eq!(chat.call_count(), 7);
}

#[tokio::test]
async fn given_non_rate_limit_failure_when_extracting_then_error_propagates_immediately() {
    let chat = Arc::new(ScriptedChatClient::new(vec![Err(
        ChatClientError::ApiRequestFailed("HTTP 500: boom".to_string()),
    )]));
    let sut = extractor(Arc::clone(&chat));

    let error = sut
        .extract(&Transcript::from_raw("transcript"), None)
        .await
        .unwrap_err();

    assert!(matches!(error, DialogueError::Chat(_)));
    assert_eq!(chat.call_count(), 1);
}
