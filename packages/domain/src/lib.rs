//! # Tasks ドメイン層
//!
//! タスク管理のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - インフラ層・API 層に依存しない純粋なモデルのみを配置
//! - 値オブジェクト（[`task::TaskText`]）の生成時に不変条件を検証する
//!
//! ## モジュール構成
//!
//! - [`task`] - タスクエンティティと値オブジェクト
//! - [`error`] - ドメイン層エラー定義

pub mod error;
pub mod task;

pub use error::DomainError;
