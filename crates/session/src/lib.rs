//! Per-session chat history storage.
//!
//! Each session holds an append-only message log. Concurrent appends to
//! the same session are serialized through a per-session lock; distinct
//! sessions do not contend. The store also renders the `chat_history`
//! context value handlers read: the last N messages as role/content
//! pairs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mentora_core::error::SessionError;
use mentora_core::message::{Message, SessionId};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// How many trailing messages feed the `chat_history` context value by
/// default.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Storage abstraction for session transcripts.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// The unique name of this backend.
    fn name(&self) -> &str;

    /// Append a message to the session, creating it on first use.
    async fn append(&self, session: &SessionId, message: Message) -> Result<(), SessionError>;

    /// The session transcript, oldest first, truncated to the trailing
    /// `limit` messages when one is given. Unknown sessions read as
    /// `None`.
    async fn history(
        &self,
        session: &SessionId,
        limit: Option<usize>,
    ) -> Result<Option<Vec<Message>>, SessionError>;

    /// Render the `chat_history` context value: the last `n` messages as
    /// `{role, content}` pairs. Unknown sessions render an empty list.
    async fn context_window(
        &self,
        session: &SessionId,
        n: usize,
    ) -> Result<serde_json::Value, SessionError> {
        let messages = self.history(session, Some(n)).await?.unwrap_or_default();
        let entries: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role,
                    "content": m.content,
                })
            })
            .collect();
        Ok(serde_json::Value::Array(entries))
    }
}

type Transcript = Arc<Mutex<Vec<Message>>>;

/// The in-memory reference backend.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Transcript>>,
    history_window: usize,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_history_window(DEFAULT_HISTORY_WINDOW)
    }

    /// A store whose [`chat_history`](Self::chat_history) keeps the last
    /// `history_window` messages, typically `session.history_window` from
    /// the loaded configuration.
    pub fn with_history_window(history_window: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            history_window,
        }
    }

    /// The `chat_history` context value trimmed to this store's
    /// configured window.
    pub async fn chat_history(
        &self,
        session: &SessionId,
    ) -> Result<serde_json::Value, SessionError> {
        self.context_window(session, self.history_window).await
    }

    async fn transcript(&self, session: &SessionId) -> Transcript {
        if let Some(existing) = self.sessions.read().await.get(session) {
            return existing.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Vec::new())))
            .clone()
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionBackend for SessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn append(&self, session: &SessionId, message: Message) -> Result<(), SessionError> {
        let transcript = self.transcript(session).await;
        let mut messages = transcript.lock().await;
        messages.push(message);
        debug!(session = %session, len = messages.len(), "message appended");
        Ok(())
    }

    async fn history(
        &self,
        session: &SessionId,
        limit: Option<usize>,
    ) -> Result<Option<Vec<Message>>, SessionError> {
        let Some(transcript) = self.sessions.read().await.get(session).cloned() else {
            return Ok(None);
        };
        let messages = transcript.lock().await;
        let skip = limit
            .map(|l| messages.len().saturating_sub(l))
            .unwrap_or(0);
        Ok(Some(messages[skip..].to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_preserves_order() {
        let store = SessionStore::new();
        let session = SessionId::new();

        store.append(&session, Message::user("one")).await.unwrap();
        store
            .append(&session, Message::assistant("two"))
            .await
            .unwrap();
        store.append(&session, Message::user("three")).await.unwrap();

        let history = store.history(&session, None).await.unwrap().unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn limit_keeps_the_trailing_messages() {
        let store = SessionStore::new();
        let session = SessionId::new();
        for i in 0..15 {
            store
                .append(&session, Message::user(format!("m{i}")))
                .await
                .unwrap();
        }

        let history = store
            .history(&session, Some(DEFAULT_HISTORY_WINDOW))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].content, "m5");
        assert_eq!(history[9].content, "m14");
    }

    #[tokio::test]
    async fn unknown_session_reads_as_none() {
        let store = SessionStore::new();
        let history = store.history(&SessionId::new(), None).await.unwrap();
        assert!(history.is_none());
    }

    #[tokio::test]
    async fn context_window_renders_role_and_content() {
        let store = SessionStore::new();
        let session = SessionId::new();
        store
            .append(&session, Message::user("how are my grades?"))
            .await
            .unwrap();
        store
            .append(&session, Message::assistant("looking solid"))
            .await
            .unwrap();

        let window = store.context_window(&session, 10).await.unwrap();
        let entries = window.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["role"], "user");
        assert_eq!(entries[1]["content"], "looking solid");
    }

    #[tokio::test]
    async fn context_window_of_unknown_session_is_empty() {
        let store = SessionStore::new();
        let window = store.context_window(&SessionId::new(), 10).await.unwrap();
        assert!(window.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_appends_to_one_session_all_land() {
        let store = Arc::new(SessionStore::new());
        let session = SessionId::new();

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append(&session, Message::user(format!("m{i}")))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let history = store.history(&session, None).await.unwrap().unwrap();
        assert_eq!(history.len(), 20);
    }

    #[tokio::test]
    async fn chat_history_uses_the_configured_window() {
        let config = mentora_config::AppConfig::default();
        let store = SessionStore::with_history_window(config.session.history_window);
        let session = SessionId::new();
        for i in 0..15 {
            store
                .append(&session, Message::user(format!("m{i}")))
                .await
                .unwrap();
        }

        let window = store.chat_history(&session).await.unwrap();
        let entries = window.as_array().unwrap();
        assert_eq!(entries.len(), config.session.history_window);
        assert_eq!(entries[0]["content"], "m5");
        assert_eq!(entries[9]["content"], "m14");
    }

    #[tokio::test]
    async fn distinct_sessions_are_independent() {
        let store = SessionStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        store.append(&a, Message::user("for a")).await.unwrap();
        store.append(&b, Message::user("for b")).await.unwrap();

        assert_eq!(store.session_count().await, 2);
        let history_a = store.history(&a, None).await.unwrap().unwrap();
        assert_eq!(history_a.len(), 1);
        assert_eq!(history_a[0].content, "for a");
    }
}
