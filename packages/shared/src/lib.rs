//! # Tasks 共有ユーティリティ
//!
//! API 層とテストで共通に使用するユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は API 層の責務）

pub mod observability;
pub mod response;

pub use response::{ErrorBody, MessageBody};
