use super::{decode_log, encode_log, HistoryRecord, HistoryStore};
use crate::error::Result;
use anyhow::anyhow;
use std::sync::Mutex;

/// History store that keeps the encoded log in memory.
///
/// The log is held as JSON text, like the persisted stores, so records go
/// through the same encode/decode path.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    log: Mutex<Option<String>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get_all(&self) -> Result<Vec<HistoryRecord>> {
        let guard = self
            .log
            .lock()
            .map_err(|_| anyhow!("History store lock poisoned"))?;

        match guard.as_deref() {
            Some(text) => decode_log(text),
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, record: HistoryRecord) -> Result<()> {
        let mut guard = self
            .log
            .lock()
            .map_err(|_| anyhow!("History store lock poisoned"))?;

        let mut records = match guard.as_deref() {
            Some(text) => decode_log(text)?,
            None => Vec::new(),
        };
        records.insert(0, record);
        *guard = Some(encode_log(&records)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewIqError;
    use crate::history::tests::result_with_score;
    use std::sync::Arc;

    #[test]
    fn test_empty() {
        let store = InMemoryHistoryStore::new();
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_most_recent_first() {
        let store = InMemoryHistoryStore::new();
        for name in ["first", "second", "third"] {
            store
                .append(HistoryRecord::new(name, 1, result_with_score(50.0)))
                .unwrap();
        }

        let names: Vec<String> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|r| r.business_name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_poisoned_lock() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.log.lock().unwrap();
            panic!("writer crashed");
        })
        .join();

        assert!(matches!(store.get_all(), Err(ReviewIqError::Other(_))));
        assert!(matches!(
            store.append(HistoryRecord::new("Shop", 1, result_with_score(1.0))),
            Err(ReviewIqError::Other(_))
        ));
    }
}
