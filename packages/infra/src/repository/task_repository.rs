//! # TaskRepository
//!
//! タスクの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **パラメータ化クエリのみ**: ユーザー入力は必ず `$n` でバインドし、SQL 文字列に連結しない
//! - **1 操作 1 ステートメント**: トランザクションは使用せず、各操作は単一文で完結する
//! - **冪等な削除**: 該当行がなくても成功として扱う

use async_trait::async_trait;
use sqlx::PgPool;
use tasks_domain::task::{Task, TaskId, TaskText};

use crate::error::InfraError;

/// タスクリポジトリトレイト
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 全タスクを ID 降順（新しい順）で取得する
    ///
    /// 0 件の場合は空の Vec を返す。
    async fn list(&self) -> Result<Vec<Task>, InfraError>;

    /// タスクを作成する
    ///
    /// `completed` は `false` で作成され、採番された ID を含むタスクを返す。
    async fn create(&self, text: &TaskText) -> Result<Task, InfraError>;

    /// タスクの完了状態を更新する
    ///
    /// 該当するタスクが存在しない場合は `None` を返す。
    async fn set_completion(
        &self,
        id: TaskId,
        completed: bool,
    ) -> Result<Option<Task>, InfraError>;

    /// タスクを削除する
    ///
    /// 該当するタスクが存在しない場合も成功とする。
    async fn delete(&self, id: TaskId) -> Result<(), InfraError>;
}

/// DB の tasks テーブルの行を表す中間構造体
///
/// `completed` は NOT NULL 制約のない既存テーブルにも対応するため `Option` で受け取る。
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id:        i32,
    text:      String,
    completed: Option<bool>,
}

impl TryFrom<TaskRow> for Task {
    type Error = InfraError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let text = TaskText::new(row.text).map_err(|e| {
            InfraError::unexpected(format!("不正なタスク本文 (id={}): {e}", row.id))
        })?;
        Ok(Task::from_db(
            TaskId::from_i32(row.id),
            text,
            row.completed.unwrap_or(false),
        ))
    }
}

/// PostgreSQL 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn list(&self) -> Result<Vec<Task>, InfraError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, text, completed
            FROM tasks
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, text: &TaskText) -> Result<Task, InfraError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (text, completed)
            VALUES ($1, $2)
            RETURNING id, text, completed
            "#,
        )
        .bind(text.as_str())
        .bind(false)
        .fetch_one(&self.pool)
        .await?;

        Task::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, completed))]
    async fn set_completion(
        &self,
        id: TaskId,
        completed: bool,
    ) -> Result<Option<Task>, InfraError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET completed = $1
            WHERE id = $2
            RETURNING id, text, completed
            "#,
        )
        .bind(completed)
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: TaskId) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .execute(&self.pool)
        .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "タスクを削除しました");
        Ok(())
    }
}
