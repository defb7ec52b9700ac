//! # テスト用インメモリリポジトリ
//!
//! ハンドラテストで使用する [`TaskRepository`] のインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tasks-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! ID の採番（1 から連番）、ID 降順の一覧、冪等な削除など、
//! PostgreSQL 実装と同じ振る舞いを再現する。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tasks_domain::task::{Task, TaskId, TaskText};

use crate::{error::InfraError, repository::TaskRepository};

#[derive(Debug)]
struct FakeStore {
    tasks:   Vec<Task>,
    next_id: i32,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            tasks:   Vec::new(),
            next_id: 1,
        }
    }
}

/// インメモリの TaskRepository
///
/// `Clone` したインスタンスは同じストアを共有する。
#[derive(Debug, Clone, Default)]
pub struct FakeTaskRepository {
    store:   Arc<Mutex<FakeStore>>,
    failing: Arc<AtomicBool>,
}

impl FakeTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての操作がデータベースエラーを返すリポジトリを作成する
    pub fn failing() -> Self {
        let repo = Self::new();
        repo.set_failing(true);
        repo
    }

    /// 以降の操作をデータベースエラーにするかどうかを切り替える
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 格納されているタスクを ID 昇順で返す
    pub fn snapshot(&self) -> Vec<Task> {
        let mut tasks = self.store.lock().unwrap().tasks.clone();
        tasks.sort_by_key(Task::id);
        tasks
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FakeTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, InfraError> {
        self.check_available()?;
        let mut tasks = self.store.lock().unwrap().tasks.clone();
        tasks.sort_by_key(|t| std::cmp::Reverse(t.id()));
        Ok(tasks)
    }

    async fn create(&self, text: &TaskText) -> Result<Task, InfraError> {
        self.check_available()?;
        let mut store = self.store.lock().unwrap();
        let task = Task::from_db(TaskId::from_i32(store.next_id), text.clone(), false);
        store.next_id += 1;
        store.tasks.push(task.clone());
        Ok(task)
    }

    async fn set_completion(
        &self,
        id: TaskId,
        completed: bool,
    ) -> Result<Option<Task>, InfraError> {
        self.check_available()?;
        let mut store = self.store.lock().unwrap();
        let Some(slot) = store.tasks.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_completion(completed);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: TaskId) -> Result<(), InfraError> {
        self.check_available()?;
        self.store.lock().unwrap().tasks.retain(|t| t.id() != id);
        Ok(())
    }
}
