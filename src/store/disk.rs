use super::SessionStore;
use crate::core::error::{AppError, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const SESSION_PARTITION: &str = "session";

fn store_error(e: fjall::Error) -> AppError {
    AppError::Session(e.to_string())
}

/// Session store persisted in a fjall keyspace.
pub struct DiskSessionStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskSessionStore {
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening session store at {}", path.display());
        let keyspace = Config::new(path).open().map_err(store_error)?;
        let partition = keyspace
            .open_partition(SESSION_PARTITION, PartitionCreateOptions::default())
            .map_err(store_error)?;
        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(store_error)
    }
}

#[async_trait]
impl SessionStore for DiskSessionStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.partition.get(key).map_err(store_error)?;
        debug!(
            "Session {} for key: {}",
            if value.is_some() { "HIT" } else { "MISS" },
            key
        );
        Ok(value.map(|slice| slice.to_vec()))
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.partition.insert(key, value).map_err(store_error)?;
        self.persist()
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.partition.remove(key).map_err(store_error)?;
        self.persist()
    }
}
