//! # タスク
//!
//! To-Do 項目を表すドメインモデル。システムが扱う唯一のエンティティ。
//!
//! ## ライフサイクル
//!
//! ```text
//! 作成（id 採番, completed = false）
//!   → 一覧取得
//!   → 完了状態の更新（completed のみ変更可能）
//!   → 物理削除
//! ```
//!
//! `id` はデータベース（`SERIAL`）が採番するため、アプリケーション側では生成しない。
//! `text` は作成後に変更されない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tasks_domain::task::{Task, TaskId, TaskText};
//!
//! let text = TaskText::new("buy milk")?;
//! let task = Task::from_db(TaskId::from_i32(1), text, false);
//!
//! let done = task.with_completion(true);
//! assert!(done.completed());
//! assert_eq!(done.text().as_str(), "buy milk");
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::Deserialize;

use crate::DomainError;

// =========================================================================
// TaskId（タスク ID）
// =========================================================================

/// タスクの一意識別子
///
/// `tasks.id`（`SERIAL PRIMARY KEY`）に対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(i32);

impl TaskId {
    /// データベースやパスパラメータの整数値から ID を作成する
    pub fn from_i32(value: i32) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得する
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// TaskText（タスク本文）
// =========================================================================

/// タスク本文が未入力のときのメッセージ
pub const TASK_TEXT_REQUIRED: &str = "Task text is required";

/// タスク本文（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列ではない
///
/// 存在チェックのみを行い、トリミングや文字種の制限はしない。
/// 空白のみの文字列も有効な本文として受け入れる。
///
/// デシリアライズも [`TaskText::new`] を経由するため、空文字列は拒否される。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct TaskText(String);

impl TaskText {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(TASK_TEXT_REQUIRED.to_string()));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for TaskText {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for TaskText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// Task（タスクエンティティ）
// =========================================================================

/// タスクエンティティ
///
/// 永続化された 1 行を表す。API 層はリクエストの間だけこの値を保持し、
/// 正となるレコードは常にデータベース側にある。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id:        TaskId,
    text:      TaskText,
    completed: bool,
}

impl Task {
    /// データベースの行からタスクを復元する
    pub fn from_db(id: TaskId, text: TaskText, completed: bool) -> Self {
        Self {
            id,
            text,
            completed,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &TaskText {
        &self.text
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// 完了状態のみを変更した新しいタスクを返す
    ///
    /// `id` と `text` は変更されない。
    pub fn with_completion(self, completed: bool) -> Self {
        Self { completed, ..self }
    }
}
