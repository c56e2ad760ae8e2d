use chrono::{DateTime, Utc};
use common::{
    access_rules::{AccessRules, Delete, Edit, Read},
    context::GeneralContext,
    entities::letter::{CreatedLetter, Letter, LetterOverview},
    error::{self, AddCode, ServiceError},
};
use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLetter {
    pub title: String,
    pub content: Option<serde_json::Value>,
}

/// The full payload the editor submits. Only `title` and `content` are
/// persisted; the remaining fields are accepted and validated but go
/// nowhere.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LetterChange {
    #[validate(length(min = 3, max = 128))]
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
    #[validate(email)]
    pub email: Option<String>,
    pub future_send_date: Option<DateTime<Utc>>,
    pub public: Option<bool>,
}

pub struct LetterService {
    context: GeneralContext,
}

impl LetterService {
    pub fn new(context: GeneralContext) -> Self {
        Self { context }
    }

    pub async fn create(&self, letter: CreateLetter) -> error::Result<CreatedLetter> {
        let auth = self.context.auth();
        let Some(author_id) = auth.id() else {
            return Err(anyhow::anyhow!("Unauthorized").code(403));
        };

        let letters = self.context.try_get_repository::<Letter<ObjectId>>()?;

        let letter = Letter {
            id: ObjectId::new(),
            title: letter.title,
            content: letter.content,
            published: false,
            future_send_date: None,
            public: false,
            sent_to_future: false,
            author_id,
            created_at: Utc::now().timestamp_micros(),
        };

        letters.insert(&letter).await?;

        Ok(CreatedLetter {
            id: letter.id.to_hex(),
        })
    }

    pub async fn my_letters(&self) -> error::Result<Vec<LetterOverview>> {
        let auth = self.context.auth();
        let Some(author_id) = auth.id() else {
            return Err(anyhow::anyhow!("Unauthorized").code(403));
        };

        let letters = self.context.try_get_repository::<Letter<ObjectId>>()?;

        let letters = letters
            .find_many("authorId", &Bson::ObjectId(author_id))
            .await?;

        Ok(letters.into_iter().map(Letter::overview).collect())
    }

    pub async fn find(&self, id: ObjectId) -> error::Result<Letter<String>> {
        let auth = self.context.auth();
        if auth.id().is_none() {
            return Err(anyhow::anyhow!("Unauthorized").code(403));
        }

        let letters = self.context.try_get_repository::<Letter<ObjectId>>()?;

        let Some(letter) = letters.find("id", &Bson::ObjectId(id)).await? else {
            return Err(anyhow::anyhow!("Letter not found").code(404));
        };

        if !Read.get_access(&auth, &letter) {
            // A foreign letter looks exactly like a missing one.
            return Err(anyhow::anyhow!("Letter not found").code(404));
        }

        Ok(letter.stringify())
    }

    pub async fn change(&self, id: ObjectId, change: LetterChange) -> error::Result<()> {
        let auth = self.context.auth();

        let letters = self.context.try_get_repository::<Letter<ObjectId>>()?;

        let Some(mut letter) = letters.find("id", &Bson::ObjectId(id)).await? else {
            return Err(anyhow::anyhow!("User is not available to change this letter").code(403));
        };

        if !Edit.get_access(&auth, &letter) {
            return Err(anyhow::anyhow!("User is not available to change this letter").code(403));
        }

        change.validate().map_err(ServiceError::validation)?;

        if let Some(title) = change.title {
            letter.title = title;
        }

        if let Some(content) = change.content {
            letter.content = Some(content);
        }

        letters.delete("id", &id).await?;
        letters.insert(&letter).await?;

        Ok(())
    }

    pub async fn delete(&self, id: ObjectId) -> error::Result<()> {
        let auth = self.context.auth();

        let letters = self.context.try_get_repository::<Letter<ObjectId>>()?;

        let Some(letter) = letters.find("id", &Bson::ObjectId(id)).await? else {
            return Err(anyhow::anyhow!("User is not available to delete this letter").code(403));
        };

        if !Delete.get_access(&auth, &letter) {
            return Err(anyhow::anyhow!("User is not available to delete this letter").code(403));
        }

        letters.delete("id", &id).await?;

        Ok(())
    }
}
