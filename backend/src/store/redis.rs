//! Redis-backed document store.
//!
//! # Key Design
//!
//! - Record: `todo:todos:{id}` -> JSON serialized `TodoTask`
//! - Collection index: `todo:todos` -> SET of ids
//!
//! A single multiplexed connection is opened at startup; every call clones
//! the handle, which shares the underlying socket.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, ExistenceCheck, SetOptions};
use todo_shared::{TodoChanges, TodoTask};
use tracing::warn;

use super::{StoreError, TodoStore, COLLECTION_NAME, DATABASE_NAME};

fn collection_key() -> String {
    format!("{DATABASE_NAME}:{COLLECTION_NAME}")
}

fn record_key(id: &str) -> String {
    format!("{DATABASE_NAME}:{COLLECTION_NAME}:{id}")
}

#[derive(Clone)]
pub struct RedisTodoStore {
    connection: MultiplexedConnection,
}

impl RedisTodoStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl TodoStore for RedisTodoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut connection)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoTask>, StoreError> {
        let mut connection = self.connection.clone();
        let ids: Vec<String> = connection.smembers(collection_key()).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| record_key(id)).collect();
        let documents: Vec<Option<String>> = connection.mget(&keys).await?;

        // Ids whose record vanished between SMEMBERS and MGET are skipped,
        // as are records that no longer decode.
        let todos: Vec<TodoTask> = ids
            .iter()
            .zip(documents)
            .filter_map(|(id, document)| {
                let json = document?;
                match serde_json::from_str::<TodoTask>(&json) {
                    Ok(task) => Some(task),
                    Err(error) => {
                        warn!(%id, %error, "skipping undecodable todo");
                        None
                    }
                }
            })
            .collect();
        Ok(todos)
    }

    async fn find_one(&self, id: &str) -> Result<Option<TodoTask>, StoreError> {
        let mut connection = self.connection.clone();
        let document: Option<String> = connection.get(record_key(id)).await?;
        document
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn insert_one(&self, task: &TodoTask) -> Result<(), StoreError> {
        let json = serde_json::to_string(task)?;
        let mut connection = self.connection.clone();

        // Record and index entry land together or not at all.
        let (inserted,): (bool,) = redis::pipe()
            .atomic()
            .set_nx(record_key(&task.id), json)
            .sadd(collection_key(), &task.id)
            .ignore()
            .query_async(&mut connection)
            .await?;
        if !inserted {
            return Err(StoreError::DuplicateId(task.id.clone()));
        }
        Ok(())
    }

    async fn update_one(&self, id: &str, changes: TodoChanges) -> Result<bool, StoreError> {
        let key = record_key(id);
        let mut connection = self.connection.clone();

        let document: Option<String> = connection.get(&key).await?;
        let Some(json) = document else {
            return Ok(false);
        };
        if changes.is_empty() {
            return Ok(true);
        }

        let mut task: TodoTask = serde_json::from_str(&json)?;
        task.apply(changes);
        let json = serde_json::to_string(&task)?;

        // XX: a record deleted since the read stays deleted.
        let options = SetOptions::default().conditional_set(ExistenceCheck::XX);
        let written: Option<String> = connection.set_options(&key, json, options).await?;
        Ok(written.is_some())
    }

    async fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        let mut connection = self.connection.clone();
        let (removed,): (usize,) = redis::pipe()
            .atomic()
            .del(record_key(id))
            .srem(collection_key(), id)
            .ignore()
            .query_async(&mut connection)
            .await?;
        Ok(removed > 0)
    }
}
