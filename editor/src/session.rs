use chrono::{DateTime, Utc};
use serde::Serialize;

use common::entities::letter::Letter;

use crate::api::LettersApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Mounted, block editor still loading.
    Initializing,
    Ready,
    Saving,
    Destroyed,
}

/// Everything the editor holds between saves: the block document plus the
/// side-panel fields (delivery date, audience, contact email).
#[derive(Debug, Clone, Default)]
pub struct LetterDraft {
    pub title: Option<String>,
    pub blocks: Option<serde_json::Value>,
    pub email: Option<String>,
    pub future_send_date: Option<DateTime<Utc>>,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
    pub email: Option<String>,
    pub future_send_date: Option<DateTime<Utc>>,
    pub public: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed(String),
}

/// One editing session over one letter, mirroring the letter form's
/// lifecycle: mount, editor-ready, save loop, unmount.
pub struct EditorSession {
    letter_id: String,
    published: bool,
    state: SessionState,
    draft: LetterDraft,
}

impl EditorSession {
    /// Binds a session to the letter's existing title and content.
    pub fn mount(letter: &Letter<String>) -> Self {
        Self {
            letter_id: letter.id.clone(),
            published: letter.published,
            state: SessionState::Initializing,
            draft: LetterDraft {
                title: Some(letter.title.clone()),
                blocks: letter.content.clone(),
                email: None,
                future_send_date: None,
                public: letter.public,
            },
        }
    }

    /// The block editor finished loading.
    pub fn editor_ready(&mut self) {
        if self.state == SessionState::Initializing {
            self.state = SessionState::Ready;
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn letter_id(&self) -> &str {
        &self.letter_id
    }

    pub fn status_label(&self) -> &'static str {
        if self.published {
            "Published"
        } else {
            "Draft"
        }
    }

    pub fn draft(&self) -> &LetterDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut LetterDraft {
        &mut self.draft
    }

    /// Serializes the current blocks merged with the side-panel fields.
    pub fn payload(&self) -> SavePayload {
        SavePayload {
            title: self.draft.title.clone(),
            content: self.draft.blocks.clone(),
            email: self.draft.email.clone(),
            future_send_date: self.draft.future_send_date,
            public: self.draft.public,
        }
    }

    /// One save round trip. A failure leaves the draft exactly as typed.
    pub async fn save(&mut self, api: &LettersApi) -> SaveOutcome {
        if self.state != SessionState::Ready {
            return SaveOutcome::Failed("Editor is not ready".to_string());
        }

        self.state = SessionState::Saving;
        let payload = self.payload();
        let result = api.save(&self.letter_id, &payload).await;
        self.state = SessionState::Ready;

        match result {
            Ok(()) => SaveOutcome::Saved,
            Err(err) => {
                log::warn!("Letter {} was not saved: {}", self.letter_id, err);
                SaveOutcome::Failed(err.to_string())
            }
        }
    }

    /// Tears the editor down and releases the block document.
    pub fn unmount(&mut self) {
        self.draft.blocks = None;
        self.state = SessionState::Destroyed;
    }
}

#[cfg(test)]
mod test {
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    use common::{auth::Auth, entities::letter::Letter};

    use crate::api::LettersApi;

    use super::{EditorSession, SaveOutcome, SessionState};

    fn letter() -> Letter<String> {
        Letter {
            id: ObjectId::new().to_hex(),
            title: "Hello".to_string(),
            content: Some(json!({
                "blocks": [
                    { "type": "paragraph", "data": { "text": "Dear future me" } }
                ]
            })),
            published: false,
            future_send_date: None,
            public: false,
            sent_to_future: false,
            author_id: ObjectId::new().to_hex(),
            created_at: 0,
        }
    }

    #[test]
    fn mount_binds_existing_title_and_content() {
        let letter = letter();
        let session = EditorSession::mount(&letter);

        assert_eq!(session.state(), SessionState::Initializing);
        assert_eq!(session.letter_id(), letter.id);
        assert_eq!(session.draft().title.as_deref(), Some("Hello"));
        assert_eq!(session.draft().blocks, letter.content);
        assert_eq!(session.status_label(), "Draft");
    }

    #[test]
    fn editor_ready_arms_the_session() {
        let mut session = EditorSession::mount(&letter());
        session.editor_ready();
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn payload_carries_the_full_editor_form() {
        let mut session = EditorSession::mount(&letter());
        session.editor_ready();
        session.draft_mut().email = Some("me@example.com".to_string());
        session.draft_mut().public = true;

        let value = serde_json::to_value(session.payload()).unwrap();

        assert_eq!(value["title"], "Hello");
        assert_eq!(value["email"], "me@example.com");
        assert_eq!(value["public"], true);
        // camelCase on the wire, like the rest of the API.
        assert!(value.get("futureSendDate").is_some());
        assert!(value["content"]["blocks"].is_array());
    }

    #[test]
    fn unmount_releases_the_block_document() {
        let mut session = EditorSession::mount(&letter());
        session.editor_ready();
        session.unmount();

        assert_eq!(session.state(), SessionState::Destroyed);
        assert!(session.draft().blocks.is_none());
    }

    #[tokio::test]
    async fn failed_save_keeps_the_draft_as_typed() {
        std::env::set_var("JWT_SECRET", "editor-test-secret");

        let api = LettersApi::new(
            "http://127.0.0.1:9".to_string(),
            Auth::User(ObjectId::new()),
        );

        let mut session = EditorSession::mount(&letter());
        session.editor_ready();
        session.draft_mut().title = Some("Edited but unsaved".to_string());

        let outcome = session.save(&api).await;

        assert!(matches!(outcome, SaveOutcome::Failed(_)));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.draft().title.as_deref(), Some("Edited but unsaved"));
    }

    #[tokio::test]
    async fn save_before_the_editor_is_ready_fails() {
        std::env::set_var("JWT_SECRET", "editor-test-secret");

        let api = LettersApi::new(
            "http://127.0.0.1:9".to_string(),
            Auth::User(ObjectId::new()),
        );

        let mut session = EditorSession::mount(&letter());
        let outcome = session.save(&api).await;

        assert!(matches!(outcome, SaveOutcome::Failed(_)));
        assert_eq!(session.state(), SessionState::Initializing);
    }
}
