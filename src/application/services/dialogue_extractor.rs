use std::sync::Arc;

use crate::application::ports::{ChatClient, ChatClientError, ChatMessage};
use crate::application::services::{RetryPolicy, count_tokens};
use crate::domain::Transcript;

const SYSTEM_PROMPT: &str = "Perform speaker diarization on the given text to identify and extract conversations involving multiple speakers. Present the dialogue in the following structured format:\nSpeaker 1:\nSpeaker 2:\nSpeaker 3:\n...";

/// Total context window shared between the prompt and the generation.
const CONTEXT_TOKEN_BUDGET: i64 = 8191;
/// Hard cap on the generation side of the budget.
const MAX_COMPLETION_TOKENS: i64 = 4096;
/// Fixed per-message serialization overhead in the chat wire format.
const TOKENS_PER_MESSAGE: i64 = 4;

/// Relabels a transcript into speaker-attributed dialogue via the remote
/// chat-completion service.
pub struct DialogueExtractor<C>
where
    C: ChatClient,
{
    chat: Arc<C>,
    retry: RetryPolicy,
}

impl<C> DialogueExtractor<C>
where
    C: ChatClient,
{
    pub fn new(chat: Arc<C>, retry: RetryPolicy) -> Self {
        Self { chat, retry }
    }

    /// Extract speaker-labeled dialogue from `transcript`, optionally
    /// continuing a prior conversation.
    ///
    /// On a rate-limit signal the oldest conversational turn (the message
    /// right after the system instruction) is dropped to shrink the prompt
    /// and the call is retried. Once the message list is down to the system
    /// instruction and the current user turn there is nothing left to shed
    /// and the call is retried as-is. Either way the retry policy bounds the
    /// total number of attempts.
    pub async fn extract(
        &self,
        transcript: &Transcript,
        history: Option<Vec<ChatMessage>>,
    ) -> Result<String, DialogueError> {
        let mut messages = history.unwrap_or_else(|| vec![ChatMessage::system(SYSTEM_PROMPT)]);
        messages.push(ChatMessage::user(transcript.as_str().replace('\n', "")));

        let mut attempt: u32 = 0;
        loop {
            let max_tokens = generation_budget(transcript, messages.len());
            match self.chat.complete(&messages, max_tokens).await {
                Ok(dialogue) => {
                    tracing::info!(
                        dialogue_chars = dialogue.len(),
                        "Dialogue extraction complete"
                    );
                    return Ok(dialogue.trim().to_string());
                }
                Err(ChatClientError::RateLimited) => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts() {
                        return Err(DialogueError::RetriesExhausted {
                            attempts: self.retry.max_attempts(),
                        });
                    }
                    // System instruction and the current user turn are the
                    // floor; only history above that floor can be shed.
                    if messages.len() > 2 {
                        messages.remove(1);
                        tracing::warn!(
                            attempt,
                            remaining_messages = messages.len(),
                            "Rate limited, dropped oldest history turn and retrying"
                        );
                    } else {
                        tracing::warn!(attempt, "Rate limited with no history to drop, retrying");
                    }
                    tokio::time::sleep(self.retry.pause()).await;
                }
                Err(e) => return Err(DialogueError::Chat(e)),
            }
        }
    }
}

/// Tokens left for generation once the prompt side of the context window is
/// accounted for, clamped to `[1, MAX_COMPLETION_TOKENS]`.
fn generation_budget(transcript: &Transcript, message_count: usize) -> u32 {
    let prompt_tokens = count_tokens(SYSTEM_PROMPT) as i64;
    let transcript_tokens = count_tokens(transcript.as_str()) as i64;
    let overhead_tokens = message_count as i64 * TOKENS_PER_MESSAGE + 3;
    let available = CONTEXT_TOKEN_BUDGET - (prompt_tokens + transcript_tokens + overhead_tokens);
    available.clamp(1, MAX_COMPLETION_TOKENS) as u32
}

#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("reached maximum number of retries ({attempts}) while rate limited")]
    RetriesExhausted { attempts: u32 },
    #[error("dialogue extraction failed: {0}")]
    Chat(#[from] ChatClientError),
}
