//! Comment entity for SeaORM.
//!
//! The BIGSERIAL id doubles as the chronological order of a post's comments.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use pulse_core::domain::Comment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub post_id: Uuid,
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            user: model.author,
            comment: model.body,
            timestamp: model.created_at.into(),
        }
    }
}

impl ActiveModel {
    pub fn for_post(post_id: Uuid, comment: Comment) -> Self {
        Self {
            id: NotSet,
            post_id: Set(post_id),
            author: Set(comment.user),
            body: Set(comment.comment),
            created_at: Set(comment.timestamp.into()),
        }
    }
}
