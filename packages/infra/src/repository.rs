//! # リポジトリ実装
//!
//! タスクの永続化を担当するリポジトリトレイトと、その具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由で差し替え可能な設計（`fake` モジュール参照）

pub mod task_repository;

pub use task_repository::{PostgresTaskRepository, TaskRepository};
