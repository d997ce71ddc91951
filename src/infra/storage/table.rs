use opendal::{ErrorKind, Operator};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, instrument};

use crate::shared::errors::Fault;

/// A row that can live in a [`JsonTable`], keyed by its primary key.
pub trait Row: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn key(&self) -> &str;
}

/// Reads a whole JSON document from `path`, or `None` when it doesn't exist yet.
pub(crate) async fn read_document<T: DeserializeOwned>(
    op: &Operator,
    path: &str,
) -> Result<Option<T>, Fault> {
    match op.read(path).await {
        Ok(buffer) => Ok(Some(serde_json::from_slice(&buffer.to_vec())?)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn write_document<T: Serialize>(op: &Operator, path: &str, value: &T) -> Result<(), Fault> {
    let bytes = serde_json::to_vec_pretty(value)?;
    op.write(path, bytes).await?;
    Ok(())
}

/// One entity table stored as a JSON array document.
///
/// Rows are mirrored in a watch channel so observers get the current content
/// on subscription and every later change. Writes are serialized.
pub struct JsonTable<T: Row> {
    op: Operator,
    path: String,
    rows: watch::Sender<Vec<T>>,
    write_lock: Mutex<()>,
}

impl<T: Row> JsonTable<T> {
    #[instrument(name = "open_table", skip_all, fields(path = %path))]
    pub async fn open(op: Operator, path: String) -> Result<Self, Fault> {
        let rows: Vec<T> = read_document(&op, &path).await?.unwrap_or_default();
        info!(rows = rows.len(), "Opened local table.");
        let (rows, _) = watch::channel(rows);
        Ok(Self { op, path, rows, write_lock: Mutex::new(()) })
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.rows.borrow().clone()
    }

    /// Current rows first, then every committed change.
    pub fn watch(&self) -> WatchStream<Vec<T>> {
        WatchStream::new(self.rows.subscribe())
    }

    /// Inserts new rows and replaces existing ones with the same key.
    #[instrument(name = "upsert_rows", skip(self, rows), fields(path = %self.path, count = rows.len()))]
    pub async fn upsert(&self, rows: Vec<T>) -> Result<(), Fault> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.snapshot();
        for row in rows {
            match next.iter_mut().find(|known| known.key() == row.key()) {
                Some(known) => *known = row,
                None => next.push(row),
            }
        }
        write_document(&self.op, &self.path, &next).await?;
        debug!(rows = next.len(), "Committed table.");
        self.rows.send_replace(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use opendal::services;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Row for Note {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note { id: id.into(), text: text.into() }
    }

    fn memory() -> anyhow::Result<Operator> {
        Ok(Operator::new(services::Memory::default())?.finish())
    }

    #[tokio::test]
    async fn missing_document_opens_empty() -> anyhow::Result<()> {
        let table: JsonTable<Note> = JsonTable::open(memory()?, "notes/notes.json".into()).await?;
        assert!(table.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn upsert_replaces_by_key_and_persists() -> anyhow::Result<()> {
        let op = memory()?;
        let table: JsonTable<Note> = JsonTable::open(op.clone(), "notes/notes.json".into()).await?;
        table.upsert(vec![note("1", "first"), note("2", "second")]).await?;
        table.upsert(vec![note("2", "edited"), note("3", "third")]).await?;

        let expected = vec![note("1", "first"), note("2", "edited"), note("3", "third")];
        assert_eq!(table.snapshot(), expected);

        let reopened: JsonTable<Note> = JsonTable::open(op, "notes/notes.json".into()).await?;
        assert_eq!(reopened.snapshot(), expected);
        Ok(())
    }

    #[tokio::test]
    async fn watchers_see_current_rows_then_changes() -> anyhow::Result<()> {
        let table: JsonTable<Note> = JsonTable::open(memory()?, "notes/notes.json".into()).await?;
        table.upsert(vec![note("1", "first")]).await?;

        let mut watch = table.watch();
        assert_eq!(watch.next().await, Some(vec![note("1", "first")]));

        table.upsert(vec![note("1", "changed")]).await?;
        assert_eq!(watch.next().await, Some(vec![note("1", "changed")]));
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_document_is_a_decode_fault() -> anyhow::Result<()> {
        let op = memory()?;
        op.write("notes/notes.json", b"not json".to_vec()).await?;
        let opened = JsonTable::<Note>::open(op, "notes/notes.json".into()).await;
        assert!(matches!(opened, Err(Fault::Decode(_))));
        Ok(())
    }
}
