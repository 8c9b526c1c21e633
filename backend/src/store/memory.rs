use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_shared::{TodoChanges, TodoTask};

use super::{StoreError, TodoStore};

/// Process-local store for development runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    records: Arc<RwLock<HashMap<String, TodoTask>>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoTask>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn find_one(&self, id: &str) -> Result<Option<TodoTask>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn insert_one(&self, task: &TodoTask) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&task.id) {
            return Err(StoreError::DuplicateId(task.id.clone()));
        }
        records.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn update_one(&self, id: &str, changes: TodoChanges) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(task) => {
                task.apply(changes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.remove(id).is_some())
    }
}
