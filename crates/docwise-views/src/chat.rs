//! Chat panel for one session
//!
//! Sent messages appear immediately under a `temp-<millis>` id. A failed send
//! removes that message again; a successful one re-fetches the history so the
//! server's copy replaces it. A failed history fetch leaves the list empty.

use chrono::Utc;
use docwise_client::Actions;
use docwise_types::{ChatMessage, ChatRole, ChatSessionInfo};

use crate::state::{Toast, Toasts};

pub const DEFAULT_CHAT_TITLE: &str = "Chat";

pub struct ChatView {
    actions: Actions,
    session_id: String,
    initial_title: Option<String>,
    session: Option<ChatSessionInfo>,
    messages: Vec<ChatMessage>,
    loading: bool,
    sending: bool,
    error: Option<String>,
    pub toasts: Toasts,
}

impl ChatView {
    pub fn new(actions: Actions, session_id: impl Into<String>, initial_title: Option<String>) -> Self {
        Self {
            actions,
            session_id: session_id.into(),
            initial_title,
            session: None,
            messages: Vec::new(),
            loading: false,
            sending: false,
            error: None,
            toasts: Toasts::default(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Session title, then the title given at construction, then "Chat"
    pub fn title(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.title.as_str())
            .filter(|t| !t.trim().is_empty())
            .or(self.initial_title.as_deref())
            .unwrap_or(DEFAULT_CHAT_TITLE)
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.fetch_history().await;
        self.loading = false;
    }

    /// Send `text`; blank input or a send already in flight is ignored
    pub async fn send(&mut self, text: &str) -> bool {
        let content = text.trim();
        if content.is_empty() || self.sending {
            return false;
        }

        let now = Utc::now();
        let temp_id = format!("temp-{}", now.timestamp_millis());
        self.messages.push(ChatMessage {
            id: temp_id.clone(),
            role: ChatRole::User,
            content: content.to_string(),
            timestamp: now.to_rfc3339(),
            file_uri: None,
            file_mime_type: None,
        });
        self.sending = true;
        self.error = None;

        let outcome = self
            .actions
            .send_chat_message(&self.session_id, content)
            .await;

        let sent = match outcome.into_result() {
            Ok(()) => {
                // Reconcile without flipping the loading flag
                self.fetch_history().await;
                true
            }
            Err(message) => {
                self.messages.retain(|m| m.id != temp_id);
                self.toasts
                    .push(Toast::error("Error Sending Message", message.clone()));
                self.error = Some(message);
                false
            }
        };
        self.sending = false;
        sent
    }

    async fn fetch_history(&mut self) {
        match self.actions.chat_history(&self.session_id).await.into_result() {
            Ok(history) => {
                self.session = Some(history.session);
                self.messages = history.messages;
                self.error = None;
            }
            // The list only ever mirrors the server; a failed fetch empties it
            Err(message) => {
                self.session = None;
                self.messages.clear();
                self.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToastVariant;
    use docwise_client::{InMemoryApi, Operation};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const SESSION: &str = "demo-onboarding";

    async fn loaded(session: &str) -> (Arc<InMemoryApi>, ChatView) {
        let api = Arc::new(InMemoryApi::demo());
        let mut view = ChatView::new(Actions::new(api.clone()), session, Some("Onboarding".into()));
        view.load().await;
        (api, view)
    }

    #[tokio::test]
    async fn loads_history_and_title() {
        let (_, view) = loaded(SESSION).await;
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.title(), "New Client Onboarding Pack");
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn title_falls_back() {
        let (_, view) = loaded("missing").await;
        assert_eq!(view.title(), "Onboarding");
        assert_eq!(view.error(), Some("Chat session not found."));

        let bare = ChatView::new(Actions::new(Arc::new(InMemoryApi::new())), "x", None);
        assert_eq!(bare.title(), DEFAULT_CHAT_TITLE);
    }

    #[tokio::test]
    async fn send_reconciles_with_server() {
        let (_, mut view) = loaded(SESSION).await;
        assert!(view.send("Who signed page 2?").await);

        let contents: Vec<&str> = view.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1], "Who signed page 2?");
        assert!(view.messages().iter().all(|m| !m.id.starts_with("temp-")));
        assert!(!view.is_sending());
    }

    #[tokio::test]
    async fn failed_send_removes_optimistic_message() {
        let (api, mut view) = loaded(SESSION).await;
        api.fail_with(Operation::SendChatMessage, 500, Some("model offline"));

        assert!(!view.send("hello").await);
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.error(), Some("Failed to send message: model offline"));
        assert_eq!(view.toasts.take()[0].variant, ToastVariant::Destructive);
    }

    #[tokio::test]
    async fn failed_reload_clears_history() {
        let (api, mut view) = loaded(SESSION).await;
        api.fail_with(Operation::ChatHistory, 503, None);

        view.load().await;
        assert!(view.messages().is_empty());
        assert_eq!(view.title(), "Onboarding");
        assert_eq!(
            view.error(),
            Some("Failed to fetch chat history: Service Unavailable")
        );
    }

    #[tokio::test]
    async fn failed_reconcile_drops_optimistic_message() {
        let (api, mut view) = loaded(SESSION).await;
        api.fail_with(Operation::ChatHistory, 500, None);

        assert!(view.send("Who signed?").await);
        assert!(view.messages().iter().all(|m| !m.id.starts_with("temp-")));
        assert!(view.error().is_some());
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let (api, mut view) = loaded(SESSION).await;
        let calls = api.call_count();
        assert!(!view.send("   ").await);
        assert_eq!(api.call_count(), calls);
        assert_eq!(view.messages().len(), 1);
    }
}
