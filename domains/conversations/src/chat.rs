//! Chat session: a conversation log driven by a simulated reply action

use std::sync::{Arc, Mutex, MutexGuard};

use medai_common::{Config, Error, Result};
use medai_fixtures::{CannedResponse, FixtureStore};
use medai_sim::{ActionFailure, Completion, DelayedResponder, Responder, SimulatedAction};

use crate::domain::entities::Message;
use crate::domain::state::{ConversationEvent, ConversationState, ConversationStateMachine};
use crate::log::ConversationLog;

/// Action name used in logs and errors
pub const CHAT_REPLY_ACTION: &str = "chat_reply";

/// One user's chat with the assistant.
///
/// The user message is appended before the reply is requested and the reply
/// is appended by the action's completion callback, so every reply lands
/// directly after the message it answers.
#[derive(Debug)]
pub struct ChatSession {
    log: Arc<Mutex<ConversationLog>>,
    reply: SimulatedAction<String, String>,
}

impl ChatSession {
    pub fn new(responder: Arc<dyn Responder<String, String>>) -> Self {
        Self {
            log: Arc::new(Mutex::new(ConversationLog::new())),
            reply: SimulatedAction::new(CHAT_REPLY_ACTION, responder),
        }
    }

    /// Session whose replies are the canned follow-up after the configured delay
    pub fn simulated(config: &Config) -> Self {
        let responder = DelayedResponder::new(config.chat_reply_delay(), |_: String| {
            Ok(FixtureStore::global()
                .canned(CannedResponse::FollowUp)
                .to_string())
        })
        .with_config(config);
        Self::new(Arc::new(responder))
    }

    pub fn state(&self) -> ConversationState {
        self.reply.status().into()
    }

    /// Copy of the messages in order
    pub fn messages(&self) -> Result<Vec<Message>> {
        Ok(self.lock_log()?.messages().to_vec())
    }

    pub fn transcript_json(&self) -> Result<String> {
        self.lock_log()?.transcript_json()
    }

    /// Why the last reply request failed, if it did
    pub fn last_failure(&self) -> Option<ActionFailure> {
        self.reply.snapshot().ok().and_then(|result| result.error)
    }

    /// Send a user message and request the assistant's reply.
    ///
    /// The trimmed text is appended immediately. Rejected with `Conflict`
    /// while a reply is still pending, in which case nothing is appended.
    ///
    /// After a failed or cancelled reply the user message stays unanswered;
    /// `retry` asks again for it. Sending new text instead is allowed and
    /// leaves the earlier message unanswered in the history.
    pub fn respond_to(&self, user_text: &str) -> Result<Completion<String>> {
        let text = user_text.trim();
        let message = Message::new_user(text)?;
        self.ensure_can_send()?;

        tracing::info!(message_id = %message.id, "User message sent");

        let log = Arc::clone(&self.log);
        self.request_reply(text.to_string(), move || {
            lock(&log)?.append(message)
        })
    }

    /// Request a reply again for the trailing unanswered user message
    pub fn retry(&self) -> Result<Completion<String>> {
        let text = self
            .lock_log()?
            .unanswered()
            .map(|m| m.content.clone())
            .ok_or_else(|| Error::Conflict("There is no unanswered message to retry".to_string()))?;
        self.ensure_can_send()?;

        tracing::info!("Retrying chat reply");

        let log = Arc::clone(&self.log);
        self.request_reply(text, move || match lock(&log)?.unanswered() {
            Some(_) => Ok(()),
            None => Err(Error::Conflict(
                "There is no unanswered message to retry".to_string(),
            )),
        })
    }

    /// Discard a pending reply; the user message stays unanswered
    pub fn cancel(&self) -> Result<bool> {
        Ok(self.reply.cancel()?)
    }

    /// Discard all history, including any pending reply, and re-seed the greeting
    pub fn clear(&self) -> Result<()> {
        self.reply.cancel()?;
        self.reply.reset()?;
        self.lock_log()?.clear();
        Ok(())
    }

    fn ensure_can_send(&self) -> Result<()> {
        ConversationStateMachine::transition(self.state(), ConversationEvent::Send)
            .map(|_| ())
            .map_err(|e| Error::Conflict(e.to_string()))
    }

    fn request_reply<S>(&self, input: String, on_start: S) -> Result<Completion<String>>
    where
        S: FnOnce() -> Result<()>,
    {
        let log = Arc::clone(&self.log);
        self.reply.invoke_guarded(input, on_start, move |result| {
            let Some(reply) = result.value.as_ref() else {
                return;
            };
            let appended = Message::new_assistant(reply.as_str())
                .and_then(|message| lock(&log)?.append(message));
            if let Err(e) = appended {
                tracing::error!(error = %e, "Dropping assistant reply");
            }
        })
    }

    fn lock_log(&self) -> Result<MutexGuard<'_, ConversationLog>> {
        lock(&self.log)
    }
}

fn lock(log: &Mutex<ConversationLog>) -> Result<MutexGuard<'_, ConversationLog>> {
    log.lock()
        .map_err(|_| Error::Internal("Conversation lock poisoned".to_string()))
}
