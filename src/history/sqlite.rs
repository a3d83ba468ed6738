use super::{decode_log, encode_log, HistoryRecord, HistoryStore};
use crate::error::Result;
use crate::storage::Database;

/// History store that keeps the whole log under one key in SQLite
pub struct SqliteHistoryStore {
    db: Database,
    key: String,
}

impl SqliteHistoryStore {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn get_all(&self) -> Result<Vec<HistoryRecord>> {
        match self.db.get(&self.key)? {
            Some(text) => decode_log(&text),
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, record: HistoryRecord) -> Result<()> {
        let mut records = self.get_all()?;
        records.insert(0, record);
        self.db.set(&self.key, &encode_log(&records)?)
    }
}
