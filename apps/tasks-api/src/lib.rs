//! # Tasks API ライブラリ
//!
//! ハンドラ、エラー変換、設定、ルーター構築を公開する。
//! バイナリ（`main.rs`）と統合テストの両方から使用する。

pub mod config;
pub mod error;
pub mod handler;
pub mod shutdown;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use config::ApiConfig;
use handler::{
    TaskState,
    create_task,
    delete_task,
    greeting,
    health_check,
    list_tasks,
    update_task,
};
use tasks_infra::{
    InfraError,
    db::{self, SchemaInitPolicy},
    repository::PostgresTaskRepository,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// ルーターを構築する
///
/// すべてのオリジンからのクロスオリジンリクエストを許可し、
/// すべての HTTP リクエストをトレーシングする。
pub fn build_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_check))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// 設定から接続プール・スキーマ・リポジトリを準備し、ルーターを返す
///
/// データベースに到達できない場合でも、[`SchemaInitPolicy::BestEffort`] なら
/// ルーターを返す。エラーになるのは接続 URL が不正な場合と、
/// `schema_init_strict` でスキーマ初期化に失敗した場合のみ。
pub async fn build_app(config: &ApiConfig) -> Result<Router, InfraError> {
    let pool = db::create_pool(
        &config.database_url,
        config.max_connections,
        config.acquire_timeout,
    )?;

    db::ensure_schema(
        &pool,
        SchemaInitPolicy::from_strict(config.schema_init_strict),
    )
    .await?;

    let state = Arc::new(TaskState {
        repository: Arc::new(PostgresTaskRepository::new(pool)),
    });
    Ok(build_router(state))
}
