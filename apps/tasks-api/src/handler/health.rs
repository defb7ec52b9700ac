//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! - `GET /` - プレーンテキストの挨拶（ブラウザでの動作確認用）
//! - `GET /health` - JSON の稼働状態（ロードバランサー・コンテナの死活監視用）

use axum::Json;
use serde::{Deserialize, Serialize};

/// `GET /` が返す挨拶文
pub const GREETING: &str = "Backend is Working! 🚀 Check /tasks for data.";

/// ヘルスチェックレスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

/// GET /
pub async fn greeting() -> &'static str {
    GREETING
}

/// GET /health
///
/// データベースには問い合わせない。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
