#![allow(dead_code)]

use std::time::Duration;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use taskboard::auth::{SessionTokens, SESSION_COOKIE};
use taskboard::llm::{LlmClient, DEFAULT_MODEL};
use taskboard::models::{Comment, Task, TaskInput, TaskStatus, User};
use taskboard::store::{Store, StoreResult, TaskStore, UserStore};
use taskboard::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Builds the full route table around `$state`, the way `main` does minus
/// logging and CORS.
macro_rules! test_app {
    ($state:expr) => {{
        let state: taskboard::AppState = $state;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(|cfg| state.configure(cfg)),
        )
        .await
    }};
}

fn offline_llm() -> LlmClient {
    LlmClient::new("http://127.0.0.1:9/v1/chat/completions", None, DEFAULT_MODEL)
        .expect("llm client")
}

pub fn memory_state() -> AppState {
    state_with_store(Store::in_memory())
}

pub fn state_with_store(store: Store) -> AppState {
    AppState::new(store, SessionTokens::new(TEST_SECRET), offline_llm())
}

pub fn state_with_llm(llm: LlmClient) -> AppState {
    AppState::new(Store::in_memory(), SessionTokens::new(TEST_SECRET), llm)
}

/// A session cookie for `user_id` signed with the test secret.
pub fn cookie_for(user_id: Uuid) -> Cookie<'static> {
    let issued = SessionTokens::new(TEST_SECRET)
        .issue(user_id)
        .expect("issue token");
    Cookie::new(SESSION_COOKIE, issued.token)
}

pub async fn register<S, B>(app: &S, email: &str, password: &str, name: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "email": email, "password": password, "name": name }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Logs in and returns the status, the JSON body and the session cookie, if any.
pub async fn login<S, B>(
    app: &S,
    email: &str,
    password: &str,
) -> (StatusCode, Value, Option<Cookie<'static>>)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned());
    let body: Value = test::read_body_json(resp).await;
    (status, body, cookie)
}

/// Registers a fresh user and logs them in. Returns their id and session cookie.
pub async fn signed_in_user<S, B>(app: &S, email: &str) -> (Uuid, Cookie<'static>)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, _) = register(app, email, "correct horse", "Test User").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body, cookie) = login(app, email, "correct horse").await;
    assert_eq!(status, StatusCode::OK);
    let id = body["user"]["id"]
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .expect("user id in login response");
    (id, cookie.expect("session cookie"))
}

/// Backend whose every call outlives any reasonable deadline.
pub struct StalledStore {
    pub delay: Duration,
}

impl StalledStore {
    async fn stall(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl UserStore for StalledStore {
    async fn find_user_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        self.stall().await;
        Ok(None)
    }

    async fn insert_user(&self, _user: &User) -> StoreResult<()> {
        self.stall().await;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for StalledStore {
    async fn insert_task(&self, _task: &Task) -> StoreResult<()> {
        self.stall().await;
        Ok(())
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.stall().await;
        Ok(Vec::new())
    }

    async fn list_tasks_assigned_to(&self, _user_id: Uuid) -> StoreResult<Vec<Task>> {
        self.stall().await;
        Ok(Vec::new())
    }

    async fn find_task(&self, _id: Uuid) -> StoreResult<Option<Task>> {
        self.stall().await;
        Ok(None)
    }

    async fn update_task(
        &self,
        _id: Uuid,
        _input: &TaskInput,
        _updated_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        self.stall().await;
        Ok(false)
    }

    async fn update_task_status(
        &self,
        _id: Uuid,
        _status: TaskStatus,
        _updated_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        self.stall().await;
        Ok(false)
    }

    async fn append_comment(&self, _id: Uuid, _comment: &Comment) -> StoreResult<bool> {
        self.stall().await;
        Ok(false)
    }

    async fn delete_task(&self, _id: Uuid) -> StoreResult<bool> {
        self.stall().await;
        Ok(false)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.stall().await;
        Ok(())
    }
}

pub fn stalled_store() -> Store {
    Store::new(
        StalledStore {
            delay: Duration::from_secs(5),
        },
        Duration::from_millis(50),
    )
}
