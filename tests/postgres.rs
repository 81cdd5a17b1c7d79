//! Round trip against a real database. Run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored` on a disposable database.

use std::time::Duration;

use chrono::Utc;
use dotenv::dotenv;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use taskboard::models::{Comment, Task, TaskInput, TaskPriority, TaskStatus, User};
use taskboard::store::{PgStore, StoreError, TaskStore, UserStore};

async fn connect() -> PgStore {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let store = PgStore::connect(&database_url, 2, Duration::from_secs(5))
        .await
        .expect("Failed to connect to test DB");
    store.migrate().await.expect("Failed to migrate test DB");
    store
}

#[ignore]
#[actix_rt::test]
async fn test_user_round_trip_and_unique_email() {
    let store = connect().await;
    let email = format!("pg-{}@example.com", Uuid::new_v4());
    let user = User::new(email.clone(), "$2b$12$hash".to_string(), "Pg".to_string());

    store.insert_user(&user).await.unwrap();
    let found = store.find_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.password_hash, user.password_hash);

    let twin = User::new(email, "$2b$12$other".to_string(), "Twin".to_string());
    assert!(matches!(
        store.insert_user(&twin).await,
        Err(StoreError::Duplicate(_))
    ));
}

#[ignore]
#[actix_rt::test]
async fn test_task_round_trip() {
    let store = connect().await;
    let assignee = Uuid::new_v4();

    let task = Task::new(TaskInput {
        title: "Postgres task".to_string(),
        description: None,
        status: None,
        priority: TaskPriority::High,
        assigned_to: vec![assignee],
        due_date: None,
    });
    store.insert_task(&task).await.unwrap();

    let assigned = store.list_tasks_assigned_to(assignee).await.unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].id, task.id);

    assert!(store
        .update_task_status(task.id, TaskStatus::InProgress, Utc::now())
        .await
        .unwrap());

    let comment = Comment {
        user_id: assignee,
        text: "on it".to_string(),
        created_at: Utc::now(),
    };
    assert!(store.append_comment(task.id, &comment).await.unwrap());

    let stored = store.find_task(task.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TaskStatus::InProgress);
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].text, "on it");

    assert!(store.delete_task(task.id).await.unwrap());
    assert!(!store.delete_task(task.id).await.unwrap());
    assert!(store.find_task(task.id).await.unwrap().is_none());
}
