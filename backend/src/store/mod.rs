//! Document store access.
//!
//! Handlers only see [`TodoStore`]; the concrete backend is picked once at
//! startup and shared behind an `Arc` for the life of the process.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use todo_shared::{TodoChanges, TodoTask};

use crate::config::{Config, StoreMode};

pub mod memory;
pub mod redis;

pub use self::memory::InMemoryTodoStore;
pub use self::redis::RedisTodoStore;

pub const DATABASE_NAME: &str = "todo";
pub const COLLECTION_NAME: &str = "todos";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("a todo with id {0} already exists")]
    DuplicateId(String),

    #[error("no connection URL configured for the document store")]
    MissingConnectionUrl,
}

/// Collection-level operations on stored todos.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Round-trips to the backend to prove the connection is usable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Every stored record, in whatever order the backend yields them.
    async fn find_all(&self) -> Result<Vec<TodoTask>, StoreError>;

    async fn find_one(&self, id: &str) -> Result<Option<TodoTask>, StoreError>;

    /// Fails with [`StoreError::DuplicateId`] if the id is taken.
    async fn insert_one(&self, task: &TodoTask) -> Result<(), StoreError>;

    /// Sets the present fields of `changes` on the record with `id`.
    /// Returns `false` without writing anything when no record matches.
    async fn update_one(&self, id: &str, changes: TodoChanges) -> Result<bool, StoreError>;

    /// Returns whether a record was actually removed.
    async fn delete_one(&self, id: &str) -> Result<bool, StoreError>;
}

pub type SharedStore = Arc<dyn TodoStore>;

/// Opens the configured backend and checks it answers before handing it out.
pub async fn open_store(config: &Config) -> Result<SharedStore, StoreError> {
    let store: SharedStore = match config.store_mode {
        StoreMode::InMemory => Arc::new(InMemoryTodoStore::new()),
        StoreMode::Redis => {
            let url = config
                .connection_url
                .as_deref()
                .ok_or(StoreError::MissingConnectionUrl)?;
            Arc::new(RedisTodoStore::connect(url).await?)
        }
    };

    store.ping().await?;
    Ok(store)
}
