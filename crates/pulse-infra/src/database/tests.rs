use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use pulse_core::domain::{Comment, Reaction, Topic, User};
use pulse_core::ports::{PostStore, UserRepository};

use crate::database::entity::{comment, post, user};
use crate::database::postgres_repo::{PostgresPostStore, PostgresUserRepository};

fn post_row(id: Uuid, likes: i64, dislikes: i64) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        body: "Content".to_owned(),
        topics: vec!["Tech".to_owned(), "Sport".to_owned()],
        owner_name: "alice".to_owned(),
        expires_at: (now + Duration::hours(1)).into(),
        likes,
        dislikes,
        created_at: now.into(),
    }
}

fn comment_row(id: i64, post_id: Uuid, author: &str) -> comment::Model {
    comment::Model {
        id,
        post_id,
        author: author.to_owned(),
        body: format!("comment {id}"),
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id_with_comments() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(post_id, 2, 1)]])
        .append_query_results([vec![
            comment_row(1, post_id, "bob"),
            comment_row(2, post_id, "carol"),
        ]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let post = store.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!((post.likes, post.dislikes), (2, 1));
    assert!(post.has_topic(Topic::Tech) && post.has_topic(Topic::Sport));
    let authors: Vec<&str> = post.comments.iter().map(|c| c.user.as_str()).collect();
    assert_eq!(authors, vec!["bob", "carol"]);
}

#[tokio::test]
async fn test_find_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);
    assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_topic_stitches_comments_onto_their_posts() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(first, 0, 0), post_row(second, 3, 0)]])
        .append_query_results([vec![
            comment_row(1, second, "bob"),
            comment_row(2, first, "carol"),
            comment_row(3, second, "dave"),
        ]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let posts = store.find_by_topic(Topic::Sport).await.unwrap();

    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first, second]);

    let authors = |i: usize| -> Vec<String> {
        posts[i].comments.iter().map(|c| c.user.clone()).collect()
    };
    assert_eq!(authors(0), vec!["carol"]);
    assert_eq!(authors(1), vec!["bob", "dave"]);
    assert_eq!(posts[1].comments[1].comment, "comment 3");

    let PostgresPostStore { db } = store;
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("= ANY(topics)"), "topic filter missing from {log}");
    assert!(log.contains("\"Sport\""), "topic value missing from {log}");
}

#[tokio::test]
async fn test_find_by_topic_without_posts_skips_comment_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);
    assert!(store.find_by_topic(Topic::Politics).await.unwrap().is_empty());

    let PostgresPostStore { db } = store;
    assert_eq!(db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn test_increment_returns_updated_counter() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(post_id, 0, 5)]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let dislikes = store
        .increment_counter(post_id, Reaction::Dislike)
        .await
        .unwrap();

    assert_eq!(dislikes, 5);
}

#[tokio::test]
async fn test_increment_on_missing_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let result = store.increment_counter(Uuid::new_v4(), Reaction::Like).await;

    assert!(matches!(result, Err(pulse_core::RepoError::NotFound)));
}

#[tokio::test]
async fn test_append_comment_returns_full_sequence() {
    let post_id = Uuid::new_v4();
    let inserted = comment_row(2, post_id, "dave");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![inserted.clone()]])
        .append_query_results([vec![comment_row(1, post_id, "bob"), inserted]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let comments = store
        .append_comment(
            post_id,
            Comment {
                user: "dave".to_owned(),
                comment: "comment 2".to_owned(),
                timestamp: Utc::now(),
            },
        )
        .await
        .unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments.last().unwrap().user, "dave");
}

#[tokio::test]
async fn test_find_user_by_username() {
    let now = Utc::now();
    let row = user::Model {
        id: Uuid::new_v4(),
        username: "alice".to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let found: Option<User> = repo.find_by_username("alice").await.unwrap();

    assert_eq!(found.unwrap().id, row.id);
}
