//! # タスクハンドラ
//!
//! タスクの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /tasks` - タスク一覧（ID 降順）
//! - `POST /tasks` - タスク作成
//! - `PUT /tasks/{id}` - 完了状態の更新
//! - `DELETE /tasks/{id}` - タスク削除
//!
//! 各ハンドラはリポジトリを高々 1 回呼び出す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tasks_domain::task::{TASK_TEXT_REQUIRED, Task, TaskId, TaskText};
use tasks_infra::repository::TaskRepository;
use tasks_shared::MessageBody;

use crate::error::{ApiError, TaskOperation};

/// 完了状態が真偽値でないときのメッセージ
const COMPLETED_MUST_BE_BOOLEAN: &str = "Task completed flag must be a boolean";

/// パスの ID が整数でないときのメッセージ
const INVALID_TASK_ID: &str = "Task id must be an integer";

/// タスク API の共有状態
///
/// 起動時に構築したリポジトリを保持する。リクエスト間で共有される状態はこれだけ。
pub struct TaskState {
    pub repository: Arc<dyn TaskRepository>,
}

// --- リクエスト/レスポンス型 ---

/// タスク作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub text: Option<String>,
}

/// 完了状態更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub completed: Option<bool>,
}

/// タスク DTO
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDto {
    pub id:        i32,
    pub text:      String,
    pub completed: bool,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id:        task.id().as_i32(),
            text:      task.text().as_str().to_string(),
            completed: task.completed(),
        }
    }
}

fn parse_task_id(path: Result<Path<i32>, PathRejection>) -> Result<TaskId, ApiError> {
    let Path(id) = path.map_err(|_| ApiError::Validation(INVALID_TASK_ID.to_string()))?;
    Ok(TaskId::from_i32(id))
}

// --- ハンドラ ---

/// GET /tasks
///
/// 全タスクを ID 降順で取得する。
///
/// ## レスポンス
///
/// - `200 OK`: タスクの配列（0 件なら空配列）
/// - `500 Internal Server Error`: ストレージ障害
#[tracing::instrument(skip_all)]
pub async fn list_tasks(
    State(state): State<Arc<TaskState>>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = state
        .repository
        .list()
        .await
        .map_err(ApiError::storage(TaskOperation::List))?;

    let items: Vec<TaskDto> = tasks.iter().map(TaskDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// POST /tasks
///
/// タスクを作成する。
///
/// ## レスポンス
///
/// - `201 Created`: 作成されたタスク（`completed` は `false`）
/// - `400 Bad Request`: `text` が未指定・空、またはストレージ障害
#[tracing::instrument(skip_all)]
pub async fn create_task(
    State(state): State<Arc<TaskState>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // 本文が読めない場合も text 未指定と同じ扱い
    let text = payload
        .ok()
        .and_then(|Json(req)| req.text)
        .ok_or_else(|| ApiError::Validation(TASK_TEXT_REQUIRED.to_string()))?;
    let text = TaskText::new(text)?;

    let task = state
        .repository
        .create(&text)
        .await
        .map_err(ApiError::storage(TaskOperation::Create))?;

    tracing::info!(task_id = %task.id(), "タスクを作成しました");
    Ok((StatusCode::CREATED, Json(TaskDto::from(&task))))
}

/// PUT /tasks/{id}
///
/// タスクの完了状態を更新する。`text` は変更できない。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後のタスク
/// - `400 Bad Request`: ID が整数でない、`completed` が真偽値でない、またはストレージ障害
/// - `404 Not Found`: タスクが見つからない
#[tracing::instrument(skip_all)]
pub async fn update_task(
    State(state): State<Arc<TaskState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_task_id(path)?;
    let completed = payload
        .ok()
        .and_then(|Json(req)| req.completed)
        .ok_or_else(|| ApiError::Validation(COMPLETED_MUST_BE_BOOLEAN.to_string()))?;

    let task = state
        .repository
        .set_completion(id, completed)
        .await
        .map_err(ApiError::storage(TaskOperation::Update))?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, Json(TaskDto::from(&task))))
}

/// DELETE /tasks/{id}
///
/// タスクを削除する。該当するタスクがなくても成功を返す。
///
/// ## レスポンス
///
/// - `200 OK`: `{"message": "Task deleted"}`
/// - `400 Bad Request`: ID が整数でない、またはストレージ障害
#[tracing::instrument(skip_all)]
pub async fn delete_task(
    State(state): State<Arc<TaskState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_task_id(path)?;

    state
        .repository
        .delete(id)
        .await
        .map_err(ApiError::storage(TaskOperation::Delete))?;

    Ok((StatusCode::OK, Json(MessageBody::new("Task deleted"))))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde::de::DeserializeOwned;
    use tasks_infra::fake::FakeTaskRepository;
    use tasks_shared::ErrorBody;
    use tower::ServiceExt;

    use super::*;
    use crate::build_router;

    // --- テストヘルパー ---

    fn create_test_app(repo: FakeTaskRepository) -> Router {
        let state = Arc::new(TaskState {
            repository: Arc::new(repo),
        });
        build_router(state)
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_body<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed(repo: &FakeTaskRepository, texts: &[&str]) -> Vec<Task> {
        let mut tasks = Vec::new();
        for text in texts {
            tasks.push(repo.create(&TaskText::new(*text).unwrap()).await.unwrap());
        }
        tasks
    }

    // --- GET /tasks ---

    #[tokio::test]
    async fn test_get_tasks_空の場合は200で空配列が返る() {
        let sut = create_test_app(FakeTaskRepository::new());

        let response = sut.oneshot(empty_request(Method::GET, "/tasks")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<TaskDto> = response_body(response).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_get_tasks_id降順で返る() {
        let repo = FakeTaskRepository::new();
        seed(&repo, &["A", "B", "C"]).await;
        let sut = create_test_app(repo);

        let response = sut.oneshot(empty_request(Method::GET, "/tasks")).await.unwrap();

        let body: Vec<TaskDto> = response_body(response).await;
        let texts: Vec<&str> = body.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_get_tasks_ストレージ障害で500が返る() {
        let sut = create_test_app(FakeTaskRepository::failing());

        let response = sut.oneshot(empty_request(Method::GET, "/tasks")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Server Error"));
    }

    // --- POST /tasks ---

    #[tokio::test]
    async fn test_post_tasks_201で作成したタスクが返る() {
        let repo = FakeTaskRepository::new();
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/tasks",
                serde_json::json!({ "text": "buy milk" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: TaskDto = response_body(response).await;
        assert_eq!(
            body,
            TaskDto {
                id:        1,
                text:      "buy milk".to_string(),
                completed: false,
            }
        );
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[rstest]
    #[case::textが空(serde_json::json!({ "text": "" }))]
    #[case::textがない(serde_json::json!({}))]
    #[case::textがnull(serde_json::json!({ "text": null }))]
    #[case::textが文字列でない(serde_json::json!({ "text": 42 }))]
    #[tokio::test]
    async fn test_post_tasks_textが不正なら400で何も保存しない(#[case] body: serde_json::Value) {
        let repo = FakeTaskRepository::new();
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(json_request(Method::POST, "/tasks", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Task text is required"));
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_post_tasks_ボディがjsonでなければ400が返る() {
        let repo = FakeTaskRepository::new();
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(empty_request(Method::POST, "/tasks"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Task text is required"));
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_post_tasks_ストレージ障害で400が返る() {
        let sut = create_test_app(FakeTaskRepository::failing());

        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/tasks",
                serde_json::json!({ "text": "a" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Error saving task"));
    }

    // --- PUT /tasks/{id} ---

    #[tokio::test]
    async fn test_put_tasks_completedのみ更新される() {
        let repo = FakeTaskRepository::new();
        let tasks = seed(&repo, &["write report"]).await;
        let sut = create_test_app(repo);

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                &format!("/tasks/{}", tasks[0].id()),
                serde_json::json!({ "completed": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: TaskDto = response_body(response).await;
        assert_eq!(
            body,
            TaskDto {
                id:        tasks[0].id().as_i32(),
                text:      "write report".to_string(),
                completed: true,
            }
        );
    }

    #[tokio::test]
    async fn test_put_tasks_存在しないidで404が返り何も変更しない() {
        let repo = FakeTaskRepository::new();
        seed(&repo, &["a"]).await;
        let before = repo.snapshot();
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/tasks/999",
                serde_json::json!({ "completed": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Task not found"));
        assert_eq!(repo.snapshot(), before);
    }

    #[rstest]
    #[case::completedがない(serde_json::json!({}))]
    #[case::completedが文字列(serde_json::json!({ "completed": "yes" }))]
    #[tokio::test]
    async fn test_put_tasks_completedが不正なら400が返る(#[case] body: serde_json::Value) {
        let repo = FakeTaskRepository::new();
        seed(&repo, &["a"]).await;
        let before = repo.snapshot();
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(json_request(Method::PUT, "/tasks/1", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Task completed flag must be a boolean"));
        assert_eq!(repo.snapshot(), before);
    }

    #[tokio::test]
    async fn test_put_tasks_idが整数でなければ400が返る() {
        let sut = create_test_app(FakeTaskRepository::new());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/tasks/abc",
                serde_json::json!({ "completed": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Task id must be an integer"));
    }

    #[tokio::test]
    async fn test_put_tasks_ストレージ障害で400が返る() {
        let sut = create_test_app(FakeTaskRepository::failing());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/tasks/1",
                serde_json::json!({ "completed": false }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Error updating task"));
    }

    // --- DELETE /tasks/{id} ---

    #[tokio::test]
    async fn test_delete_tasks_既存タスクを削除して200が返る() {
        let repo = FakeTaskRepository::new();
        let tasks = seed(&repo, &["keep", "remove"]).await;
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/tasks/{}", tasks[1].id()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageBody = response_body(response).await;
        assert_eq!(body, MessageBody::new("Task deleted"));
        assert_eq!(repo.snapshot(), vec![tasks[0].clone()]);
    }

    #[tokio::test]
    async fn test_delete_tasks_存在しないidでも200が返り何も変更しない() {
        let repo = FakeTaskRepository::new();
        seed(&repo, &["a"]).await;
        let before = repo.snapshot();
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(empty_request(Method::DELETE, "/tasks/42"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageBody = response_body(response).await;
        assert_eq!(body, MessageBody::new("Task deleted"));
        assert_eq!(repo.snapshot(), before);
    }

    #[tokio::test]
    async fn test_delete_tasks_ストレージ障害で400が返る() {
        let sut = create_test_app(FakeTaskRepository::failing());

        let response = sut
            .oneshot(empty_request(Method::DELETE, "/tasks/1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = response_body(response).await;
        assert_eq!(body, ErrorBody::new("Error deleting task"));
    }

    // --- GET / ---

    #[tokio::test]
    async fn test_get_root_プレーンテキストの挨拶が返る() {
        let sut = create_test_app(FakeTaskRepository::new());

        let response = sut.oneshot(empty_request(Method::GET, "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            crate::handler::health::GREETING
        );
    }
}
