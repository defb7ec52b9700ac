//! # Tasks インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **スキーマ初期化**: 起動時の `CREATE TABLE IF NOT EXISTS`
//! - **リポジトリ実装**: タスクの永続化
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!   ↘          ↗
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プールとスキーマ初期化
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - `fake` - インメモリ実装（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! use tasks_infra::{db, repository::PostgresTaskRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/tasks", 10, Duration::from_secs(30))?;
//!     db::init_schema(&pool).await?;
//!     let repository = PostgresTaskRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod fake;

pub use error::InfraError;
