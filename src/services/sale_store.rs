use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use log::{info, debug};
use tokio::sync::{Mutex, RwLock};

use crate::models::{SaleRecord, StoreError};

pub type SaleHandle = Arc<Mutex<SaleRecord>>;

/// Keyed sale store. Each sale sits behind its own mutex, and when a data
/// directory is configured each record is mirrored to `<data_dir>/<id>.json`.
pub struct SaleStore {
    data_dir: Option<PathBuf>,
    sales: RwLock<HashMap<String, SaleHandle>>,
}

impl SaleStore {
    pub fn in_memory() -> Self {
        Self {
            data_dir: None,
            sales: RwLock::new(HashMap::new()),
        }
    }

    /// Opens (creating if needed) `data_dir` and loads every record in it.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let mut sales = HashMap::new();
        for entry in std::fs::read_dir(&data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            debug!("Loading sale record from {}", path.display());
            let bytes = std::fs::read(&path)?;
            let record: SaleRecord = serde_json::from_slice(&bytes)?;
            sales.insert(record.id.clone(), Arc::new(Mutex::new(record)));
        }

        info!("Loaded {} sale(s) from {}", sales.len(), data_dir.display());
        Ok(Self {
            data_dir: Some(data_dir),
            sales: RwLock::new(sales),
        })
    }

    /// Writes `record` to disk. The previous file is replaced atomically.
    pub async fn persist(&self, record: &SaleRecord) -> Result<(), StoreError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        let json = serde_json::to_vec_pretty(record)?;
        let path = dir.join(format!("{}.json", record.id));
        let tmp = dir.join(format!("{}.json.tmp", record.id));

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!("Persisted sale {} to {}", record.id, path.display());
        Ok(())
    }

    pub async fn insert(&self, record: SaleRecord) {
        let id = record.id.clone();
        self.sales.write().await.insert(id, Arc::new(Mutex::new(record)));
    }

    pub async fn get(&self, id: &str) -> Option<SaleHandle> {
        self.sales.read().await.get(id).cloned()
    }

    pub async fn handles(&self) -> Vec<SaleHandle> {
        self.sales.read().await.values().cloned().collect()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sales.read().await.len()
    }
}
