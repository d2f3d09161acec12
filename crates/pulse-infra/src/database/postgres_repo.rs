//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use pulse_core::domain::{Comment, Post, PostDraft, Reaction, Topic, User};
use pulse_core::error::RepoError;
use pulse_core::ports::{PostStore, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Map write failures: a unique violation is a constraint error, a dangling
/// foreign key means the parent row is gone.
fn write_err(e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => RepoError::NotFound,
        _ => RepoError::Query(e.to_string()),
    }
}

/// PostgreSQL post store.
///
/// Counters are bumped with `UPDATE ... SET likes = likes + 1 RETURNING`
/// and comments are single-row inserts, so concurrent writers never
/// overwrite each other.
pub struct PostgresPostStore {
    pub(crate) db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn comments_for(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Load the comments of many posts in one query and stitch them on.
    async fn with_comments(&self, posts: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.is_in(ids))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let mut by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in rows {
            by_post.entry(row.post_id).or_default().push(row.into());
        }

        Ok(posts
            .into_iter()
            .map(|p| {
                let comments = by_post.remove(&p.id).unwrap_or_default();
                p.into_post(comments)
            })
            .collect())
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from_draft(Uuid::new_v4(), draft)
            .insert(&self.db)
            .await
            .map_err(write_err)?;

        Ok(model.into_post(Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let comments = self.comments_for(id).await?;
        Ok(Some(model.into_post(comments)))
    }

    async fn find_by_topic(&self, topic: Topic) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(%topic, "Finding posts by topic");

        let posts = PostEntity::find()
            .filter(Expr::cust_with_values("? = ANY(topics)", [topic.as_str()]))
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        self.with_comments(posts).await
    }

    async fn increment_counter(&self, id: Uuid, reaction: Reaction) -> Result<u64, RepoError> {
        let column = match reaction {
            Reaction::Like => post::Column::Likes,
            Reaction::Dislike => post::Column::Dislikes,
        };

        let updated = PostEntity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(query_err)?;

        let row = updated.into_iter().next().ok_or(RepoError::NotFound)?;
        let value = match reaction {
            Reaction::Like => row.likes,
            Reaction::Dislike => row.dislikes,
        };

        Ok(value.max(0) as u64)
    }

    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Vec<Comment>, RepoError> {
        comment::ActiveModel::for_post(id, comment)
            .insert(&self.db)
            .await
            .map_err(write_err)?;

        self.comments_for(id).await
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    pub(crate) db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(write_err)?;

        Ok(model.into())
    }
}
