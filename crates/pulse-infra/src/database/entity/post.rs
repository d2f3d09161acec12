//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pulse_core::domain::{Comment, Post, PostDraft, Topic};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub topics: Vec<String>,
    pub owner_name: String,
    pub expires_at: DateTimeWithTimeZone,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain post from its row and its comment rows.
    pub fn into_post(self, comments: Vec<Comment>) -> Post {
        let topics = self
            .topics
            .iter()
            .filter_map(|t| match t.parse::<Topic>() {
                Ok(topic) => Some(topic),
                Err(e) => {
                    tracing::warn!(post_id = %self.id, error = %e, "Skipping unknown stored topic");
                    None
                }
            })
            .collect();

        Post {
            id: self.id,
            title: self.title,
            body: self.body,
            topics,
            owner_name: self.owner_name,
            expires_at: self.expires_at.into(),
            likes: self.likes.max(0) as u64,
            dislikes: self.dislikes.max(0) as u64,
            comments,
            created_at: self.created_at.into(),
        }
    }
}

impl ActiveModel {
    /// A fresh row for `draft` with counters at zero.
    pub fn from_draft(id: Uuid, draft: PostDraft) -> Self {
        Self {
            id: Set(id),
            title: Set(draft.title),
            body: Set(draft.body),
            topics: Set(draft.topics.iter().map(|t| t.as_str().to_string()).collect()),
            owner_name: Set(draft.owner_name),
            expires_at: Set(draft.expires_at.into()),
            likes: Set(0),
            dislikes: Set(0),
            created_at: Set(draft.created_at.into()),
        }
    }
}
