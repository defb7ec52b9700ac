//! # Tasks API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! エラー種別から HTTP ステータスとボディへの変換は
//! [`ApiError::status`] と [`ApiError::body`] の一箇所に集約する。
//!
//! | エラー種別 | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `Validation` | 400 | `{"error": <メッセージ>}` |
//! | `NotFound` | 404 | `{"error": "Task not found"}` |
//! | `Storage`（一覧） | 500 | `{"error": "Server Error"}` |
//! | `Storage`（作成・更新・削除） | 400 | `{"error": "Error saving task"}` など |
//!
//! ストレージ障害が 500 になるのは一覧のみ。作成・更新・削除は 400 を返す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasks_domain::DomainError;
use tasks_infra::InfraError;
use tasks_shared::ErrorBody;
use thiserror::Error;

/// 失敗したタスク操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOperation {
    List,
    Create,
    Update,
    Delete,
}

impl TaskOperation {
    /// ストレージ障害時にクライアントへ返すステータス
    fn storage_failure_status(self) -> StatusCode {
        match self {
            TaskOperation::List => StatusCode::INTERNAL_SERVER_ERROR,
            TaskOperation::Create | TaskOperation::Update | TaskOperation::Delete => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// ストレージ障害時にクライアントへ返す汎用メッセージ
    fn storage_failure_message(self) -> &'static str {
        match self {
            TaskOperation::List => "Server Error",
            TaskOperation::Create => "Error saving task",
            TaskOperation::Update => "Error updating task",
            TaskOperation::Delete => "Error deleting task",
        }
    }
}

/// Tasks API 層で発生するエラー
///
/// `IntoResponse` を実装しているため、axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値の検証失敗（400 Bad Request）
    #[error("{0}")]
    Validation(String),

    /// タスクが見つからない（404 Not Found）
    #[error("Task not found")]
    NotFound,

    /// 永続化層の障害
    #[error("{operation:?} の実行に失敗しました: {source}")]
    Storage {
        operation: TaskOperation,
        #[source]
        source:    InfraError,
    },
}

impl ApiError {
    /// `map_err` に渡すための変換関数を返す
    ///
    /// ```rust,ignore
    /// state.repository.list().await.map_err(ApiError::storage(TaskOperation::List))?;
    /// ```
    pub fn storage(operation: TaskOperation) -> impl FnOnce(InfraError) -> Self {
        move |source| ApiError::Storage { operation, source }
    }

    /// HTTP ステータスコード
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { operation, .. } => operation.storage_failure_status(),
        }
    }

    /// クライアントに返すボディ
    ///
    /// ストレージ障害の詳細は含めない。
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(msg) => ErrorBody::new(msg.clone()),
            ApiError::NotFound => ErrorBody::new("Task not found"),
            ApiError::Storage { operation, .. } => {
                ErrorBody::new(operation.storage_failure_message())
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage { operation, source } = &self {
            // セキュリティ: 内部エラー詳細はログのみ
            tracing::error!(?operation, error = ?source, "ストレージエラー");
        }

        (self.status(), Json(self.body())).into_response()
    }
}
