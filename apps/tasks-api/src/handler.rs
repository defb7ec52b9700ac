//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供

pub mod health;
pub mod task;

pub use health::{greeting, health_check};
pub use task::{TaskDto, TaskState, create_task, delete_task, list_tasks, update_task};
