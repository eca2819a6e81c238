//! Transcript state behind the chat screen.

use crate::error::FetchError;
use crate::request::{Generation, RequestTag};
use strum_macros::Display;
use uuid::Uuid;

pub const GREETING: &str = "Hello! Ask me about Potato Leaf Diseases.";
pub const CHAT_FAILURE: &str = "Sorry, I encountered an error while processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Speaker {
    #[strum(serialize = "You")]
    User,
    #[strum(serialize = "Bot")]
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
    pub is_typing: bool,
}

impl Exchange {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), speaker, text: text.into(), is_typing: false }
    }

    fn typing() -> Self {
        Self { is_typing: true, ..Self::new(Speaker::Bot, "") }
    }

    fn greeting() -> Self {
        Self::new(Speaker::Bot, GREETING)
    }
}

/// Message the caller must post after a successful `send`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub tag: RequestTag,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ChatTranscript {
    exchanges: Vec<Exchange>,
    draft: String,
    is_loading: bool,
    generation: Generation,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self {
            exchanges: vec![Exchange::greeting()],
            draft: String::new(),
            is_loading: false,
            generation: Generation::default(),
        }
    }
}

impl ChatTranscript {
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn can_send(&self) -> bool {
        !self.is_loading && !self.draft.trim().is_empty()
    }

    /// Export is offered once there is more than the greeting to save.
    pub fn can_export(&self) -> bool {
        self.exchanges.len() > 1
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Appends the user message and a typing placeholder in one step.
    pub fn send(&mut self) -> Option<OutgoingMessage> {
        if self.is_loading {
            return None;
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.exchanges.push(Exchange::new(Speaker::User, text.clone()));
        self.exchanges.push(Exchange::typing());
        self.draft.clear();
        self.is_loading = true;

        let tag = self.generation.begin();
        log::info!("Sending chat message {}", tag);
        Some(OutgoingMessage { tag, text })
    }

    /// Replaces the typing placeholder with the reply, or with the fixed
    /// apology on failure. Returns false when the response was stale.
    pub fn resolve(&mut self, tag: RequestTag, outcome: Result<String, FetchError>) -> bool {
        if !self.generation.settle(tag) {
            log::debug!("Dropping stale chat response {}", tag);
            return false;
        }
        self.is_loading = false;

        let text = outcome.unwrap_or_else(|err| {
            log::error!("Chat request {} failed: {}", tag, err);
            CHAT_FAILURE.to_string()
        });

        match self.exchanges.iter_mut().rev().find(|e| e.is_typing) {
            Some(placeholder) => {
                placeholder.text = text;
                placeholder.is_typing = false;
            }
            None => {
                log::warn!("No typing placeholder for {}, appending reply", tag);
                self.exchanges.push(Exchange::new(Speaker::Bot, text));
            }
        }
        true
    }

    /// Back to the greeting alone. Any in-flight reply is discarded.
    pub fn clear(&mut self) {
        self.exchanges = vec![Exchange::greeting()];
        self.is_loading = false;
        self.generation.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing_count(transcript: &ChatTranscript) -> usize {
        transcript.exchanges().iter().filter(|e| e.is_typing).count()
    }

    #[test]
    fn starts_with_greeting() {
        let transcript = ChatTranscript::default();
        assert_eq!(transcript.exchanges().len(), 1);
        assert_eq!(transcript.exchanges()[0].speaker, Speaker::Bot);
        assert_eq!(transcript.exchanges()[0].text, GREETING);
        assert!(!transcript.can_export());
    }

    #[test]
    fn blank_draft_is_ignored() {
        let mut transcript = ChatTranscript::default();
        for draft in ["", "   ", "\n\t"] {
            transcript.set_draft(draft);
            assert!(transcript.send().is_none());
            assert_eq!(transcript.exchanges().len(), 1);
            assert!(!transcript.is_loading());
        }
    }

    #[test]
    fn send_appends_user_and_placeholder() {
        let mut transcript = ChatTranscript::default();
        transcript.set_draft("  What is late blight?  ");
        let outgoing = transcript.send().unwrap();

        assert_eq!(outgoing.text, "What is late blight?");
        assert_eq!(transcript.exchanges().len(), 3);
        assert_eq!(transcript.exchanges()[1].speaker, Speaker::User);
        assert_eq!(transcript.exchanges()[1].text, "What is late blight?");
        assert!(transcript.exchanges()[2].is_typing);
        assert_eq!(transcript.draft(), "");
        assert!(transcript.is_loading());
    }

    #[test]
    fn reply_replaces_placeholder_in_place() {
        let mut transcript = ChatTranscript::default();
        transcript.set_draft("What is late blight?");
        let outgoing = transcript.send().unwrap();
        let placeholder_id = transcript.exchanges()[2].id;

        assert!(transcript.resolve(outgoing.tag, Ok("A disease caused by *Phytophthora*.".into())));

        assert_eq!(transcript.exchanges().len(), 3);
        let reply = &transcript.exchanges()[2];
        assert_eq!(reply.id, placeholder_id);
        assert_eq!(reply.speaker, Speaker::Bot);
        assert!(!reply.is_typing);
        assert_eq!(typing_count(&transcript), 0);
        assert!(!transcript.is_loading());
    }

    #[test]
    fn failure_replaces_placeholder_with_apology() {
        let mut transcript = ChatTranscript::default();
        transcript.set_draft("hello");
        let outgoing = transcript.send().unwrap();
        transcript.resolve(outgoing.tag, Err(FetchError::ServerRejected { status: 500, body: String::new() }));

        assert_eq!(transcript.exchanges().len(), 3);
        assert_eq!(transcript.exchanges()[2].text, CHAT_FAILURE);
        assert_eq!(typing_count(&transcript), 0);
    }

    #[test]
    fn only_one_placeholder_while_loading() {
        let mut transcript = ChatTranscript::default();
        transcript.set_draft("first");
        transcript.send().unwrap();
        transcript.set_draft("second");

        assert!(!transcript.can_send());
        assert!(transcript.send().is_none());
        assert_eq!(typing_count(&transcript), 1);
        assert_eq!(transcript.draft(), "second");
    }

    #[test]
    fn clear_resets_to_greeting_and_drops_late_reply() {
        let mut transcript = ChatTranscript::default();
        transcript.set_draft("question");
        let outgoing = transcript.send().unwrap();
        transcript.clear();

        assert_eq!(transcript.exchanges().len(), 1);
        assert_eq!(transcript.exchanges()[0].text, GREETING);
        assert!(!transcript.is_loading());

        assert!(!transcript.resolve(outgoing.tag, Ok("late answer".into())));
        assert_eq!(transcript.exchanges().len(), 1);
    }

    #[test]
    fn speaker_labels() {
        assert_eq!(Speaker::User.to_string(), "You");
        assert_eq!(Speaker::Bot.to_string(), "Bot");
    }
}
