use std::str::FromStr;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::repository::Entity;

/// A letter a user writes to their future self. `content` is the block
/// document produced by the editor, stored verbatim and never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Letter<Id> {
    pub id: Id,
    pub title: String,
    pub content: Option<serde_json::Value>,
    pub published: bool,
    pub future_send_date: Option<DateTime<Utc>>,
    pub public: bool,
    pub sent_to_future: bool,
    pub author_id: Id,
    pub created_at: i64,
}

impl Letter<String> {
    pub fn parse(self) -> Letter<ObjectId> {
        Letter {
            id: ObjectId::from_str(&self.id).unwrap(),
            title: self.title,
            content: self.content,
            published: self.published,
            future_send_date: self.future_send_date,
            public: self.public,
            sent_to_future: self.sent_to_future,
            author_id: ObjectId::from_str(&self.author_id).unwrap(),
            created_at: self.created_at,
        }
    }
}

impl Letter<ObjectId> {
    pub fn stringify(self) -> Letter<String> {
        Letter {
            id: self.id.to_hex(),
            title: self.title,
            content: self.content,
            published: self.published,
            future_send_date: self.future_send_date,
            public: self.public,
            sent_to_future: self.sent_to_future,
            author_id: self.author_id.to_hex(),
            created_at: self.created_at,
        }
    }

    pub fn overview(self) -> LetterOverview {
        LetterOverview {
            id: self.id.to_hex(),
            title: self.title,
            published: self.published,
            created_at: self.created_at,
            future_send_date: self.future_send_date,
            sent_to_future: self.sent_to_future,
        }
    }
}

impl Entity for Letter<ObjectId> {
    fn id(&self) -> ObjectId {
        self.id
    }
}

/// Listing projection: everything the overview page shows, content omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LetterOverview {
    pub id: String,
    pub title: String,
    pub published: bool,
    pub created_at: i64,
    pub future_send_date: Option<DateTime<Utc>>,
    pub sent_to_future: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedLetter {
    pub id: String,
}
