//! # レスポンスボディ
//!
//! タスク API が返す JSON ボディのうち、エンティティ以外の形状を定義する。
//!
//! | 型 | JSON | 用途 |
//! |----|------|------|
//! | [`ErrorBody`] | `{"error": "..."}` | すべてのエラーレスポンス |
//! | [`MessageBody`] | `{"message": "..."}` | 削除完了などの通知 |

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// ## 使用例
///
/// ```
/// use tasks_shared::ErrorBody;
///
/// let body = ErrorBody::new("Task not found");
/// assert_eq!(body.error, "Task not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// メッセージレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
