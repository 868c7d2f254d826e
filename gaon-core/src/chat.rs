//! Chat widget: a list of conversations with the portal assistant.

use std::future::Future;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::GaonResult;
use crate::storage::{CHAT_SESSIONS_KEY, SharedStorage, load_json, save_json};

pub const NEW_CHAT_TITLE: &str = "새로운 대화";
pub const GREETING: &str = "안녕하세요! 가온 AI입니다. 무엇을 도와드릴까요?";
pub const ERROR_REPLY: &str = "오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// Longest title kept before truncating with "...".
const TITLE_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
}

/// Anything that can answer a chat message.
pub trait ChatBackend {
    fn reply(&self, message: &str) -> impl Future<Output = GaonResult<String>> + Send;
}

/// Sessions are kept newest first; the first one is opened on load.
pub struct ChatWidget<B> {
    storage: SharedStorage,
    backend: B,
    sessions: Vec<ChatSession>,
    current: Option<String>,
}

impl<B: ChatBackend> ChatWidget<B> {
    /// Open the most recent stored session, or start a new one when there
    /// are none.
    pub fn load(storage: SharedStorage, backend: B) -> GaonResult<Self> {
        let sessions: Vec<ChatSession> =
            load_json(storage.as_ref(), CHAT_SESSIONS_KEY).unwrap_or_default();
        let current = sessions.first().map(|s| s.id.clone());

        let mut widget = ChatWidget {
            storage,
            backend,
            sessions,
            current,
        };

        if widget.current.is_none() {
            widget.start_new_chat()?;
        }

        Ok(widget)
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        let id = self.current.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// New session with the greeting, placed at the top and made current.
    pub fn start_new_chat(&mut self) -> GaonResult<&ChatSession> {
        let id = self.next_session_id();
        let mut sessions = self.sessions.clone();
        sessions.insert(
            0,
            ChatSession {
                id: id.clone(),
                title: NEW_CHAT_TITLE.to_string(),
                messages: vec![ChatMessage {
                    sender: Sender::Ai,
                    text: GREETING.to_string(),
                }],
            },
        );
        self.commit(sessions)?;
        self.current = Some(id);

        Ok(&self.sessions[0])
    }

    /// Switch to an existing session. Unknown ids leave the current one.
    pub fn load_session(&mut self, id: &str) -> Option<&ChatSession> {
        let index = self.sessions.iter().position(|s| s.id == id)?;
        self.current = Some(id.to_string());
        Some(&self.sessions[index])
    }

    /// Send `text` from the user and append the assistant's reply.
    ///
    /// Blank input is ignored and returns `None`. A failed request appends
    /// the generic error reply instead of propagating.
    pub async fn send_message(&mut self, text: &str) -> GaonResult<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.add_message(Sender::User, text)?;

        let reply = match self.backend.reply(text).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                ERROR_REPLY.to_string()
            }
        };

        self.add_message(Sender::Ai, &reply)?;
        Ok(Some(reply))
    }

    fn add_message(&mut self, sender: Sender, text: &str) -> GaonResult<()> {
        let Some(id) = self.current.clone() else {
            return Ok(());
        };
        let mut sessions = self.sessions.clone();
        let Some(session) = sessions.iter_mut().find(|s| s.id == id) else {
            return Ok(());
        };

        session.messages.push(ChatMessage {
            sender,
            text: text.to_string(),
        });

        // Welcome message plus the first user message
        if sender == Sender::User && session.messages.len() <= 2 {
            session.title = session_title(text);
        }

        self.commit(sessions)
    }

    /// Write `sessions` and adopt them; on failure the current list is kept.
    fn commit(&mut self, sessions: Vec<ChatSession>) -> GaonResult<()> {
        save_json(self.storage.as_ref(), CHAT_SESSIONS_KEY, &sessions)?;
        self.sessions = sessions;
        Ok(())
    }

    /// Millisecond timestamp, bumped past any id already in use.
    fn next_session_id(&self) -> String {
        let mut id = Utc::now().timestamp_millis();
        while self.sessions.iter().any(|s| s.id == id.to_string()) {
            id += 1;
        }
        id.to_string()
    }
}

fn session_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaonError;
    use crate::storage::{MemoryStorage, SharedStorage, Storage};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Storage that can be switched into refusing every write.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        broken: AtomicBool,
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> GaonResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> GaonResult<()> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(GaonError::Storage("disk full".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> GaonResult<()> {
            self.inner.remove(key)
        }
    }

    struct EchoBackend;

    impl ChatBackend for EchoBackend {
        async fn reply(&self, message: &str) -> GaonResult<String> {
            Ok(format!("echo: {message}"))
        }
    }

    struct DownBackend;

    impl ChatBackend for DownBackend {
        async fn reply(&self, _message: &str) -> GaonResult<String> {
            Err(GaonError::Api {
                status: 503,
                path: "/api/chat".to_string(),
            })
        }
    }

    #[test]
    fn empty_storage_starts_a_greeting_session() {
        let storage = Arc::new(MemoryStorage::new());
        let widget = ChatWidget::load(storage.clone(), EchoBackend).unwrap();

        let session = widget.current_session().unwrap();
        assert_eq!(session.title, NEW_CHAT_TITLE);
        assert_eq!(session.messages[0].sender, Sender::Ai);
        assert_eq!(session.messages[0].text, GREETING);
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn newest_session_is_first_and_reopened_on_reload() {
        let storage = Arc::new(MemoryStorage::new());
        let mut widget = ChatWidget::load(storage.clone(), EchoBackend).unwrap();
        let first_id = widget.current_session().unwrap().id.clone();
        let second_id = widget.start_new_chat().unwrap().id.clone();
        assert_ne!(first_id, second_id);

        let ids: Vec<_> = widget.sessions().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![second_id.clone(), first_id.clone()]);

        widget.load_session(&first_id).unwrap();

        let reloaded = ChatWidget::load(storage, EchoBackend).unwrap();
        assert_eq!(reloaded.current_session().unwrap().id, second_id);
        assert_eq!(reloaded.sessions().len(), 2);
    }

    #[test]
    fn load_session_ignores_unknown_id() {
        let mut widget = ChatWidget::load(Arc::new(MemoryStorage::new()), EchoBackend).unwrap();
        let id = widget.current_session().unwrap().id.clone();
        assert!(widget.load_session("missing").is_none());
        assert_eq!(widget.current_session().unwrap().id, id);
    }

    #[tokio::test]
    async fn first_user_message_becomes_title() {
        let mut widget = ChatWidget::load(Arc::new(MemoryStorage::new()), EchoBackend).unwrap();

        let reply = widget.send_message("  What is for lunch?  ").await.unwrap();
        assert_eq!(reply.as_deref(), Some("echo: What is for lunch?"));

        widget.send_message("And dinner?").await.unwrap();

        let session = widget.current_session().unwrap();
        assert_eq!(session.title, "What is for lunch?");
        assert_eq!(session.messages.len(), 5);
        assert_eq!(session.messages[4].text, "echo: And dinner?");
    }

    #[tokio::test]
    async fn long_first_message_is_truncated() {
        let mut widget = ChatWidget::load(Arc::new(MemoryStorage::new()), EchoBackend).unwrap();
        widget
            .send_message("Please summarise next week's exam schedule")
            .await
            .unwrap();
        assert_eq!(widget.current_session().unwrap().title, "Please summarise nex...");
    }

    #[tokio::test]
    async fn blank_message_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        let mut widget = ChatWidget::load(storage.clone(), EchoBackend).unwrap();
        assert!(widget.send_message("   ").await.unwrap().is_none());
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test]
    async fn failed_request_appends_error_reply() {
        let mut widget = ChatWidget::load(Arc::new(MemoryStorage::new()), DownBackend).unwrap();
        let reply = widget.send_message("hello").await.unwrap();
        assert_eq!(reply.as_deref(), Some(ERROR_REPLY));

        let last = widget.current_session().unwrap().messages.last().unwrap();
        assert_eq!(last.sender, Sender::Ai);
        assert_eq!(last.text, ERROR_REPLY);
    }

    #[test]
    fn failed_save_leaves_sessions_unchanged() {
        let storage = Arc::new(FlakyStorage::default());
        let shared: SharedStorage = storage.clone();
        let mut widget = ChatWidget::load(shared, EchoBackend).unwrap();
        let id = widget.current_session().unwrap().id.clone();

        storage.broken.store(true, Ordering::SeqCst);
        assert!(widget.start_new_chat().is_err());

        assert_eq!(widget.sessions().len(), 1);
        assert_eq!(widget.current_session().unwrap().id, id);
    }

    #[tokio::test]
    async fn failed_save_drops_unsent_message() {
        let storage = Arc::new(FlakyStorage::default());
        let shared: SharedStorage = storage.clone();
        let mut widget = ChatWidget::load(shared, EchoBackend).unwrap();

        storage.broken.store(true, Ordering::SeqCst);
        assert!(widget.send_message("hello").await.is_err());

        let session = widget.current_session().unwrap();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.title, NEW_CHAT_TITLE);
    }

    #[test]
    fn title_truncation_counts_characters() {
        assert_eq!(session_title("급식 메뉴 알려줘"), "급식 메뉴 알려줘");
        let long = "가".repeat(25);
        assert_eq!(session_title(&long), format!("{}...", "가".repeat(20)));
    }
}
