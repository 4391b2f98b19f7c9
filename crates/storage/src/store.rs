//! SQLite slot store implementation.

use crate::{Error, Event, Result, SlotKey, Word};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// SQLite-backed account state: keyed 32-byte slots plus the event log.
pub struct SlotStore {
    conn: Connection,
}

impl SlotStore {
    /// Open or create a slot store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory slot store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS slots (
                key BLOB PRIMARY KEY,
                value BLOB NOT NULL
            );
            CREATE TABLE IF NOT EXISTS events (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                account TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                kind TEXT NOT NULL,
                data TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_events_kind
                ON events(kind, seq);
            "#,
        )?;
        Ok(())
    }

    /// Read a raw slot. Slots never written read as zero.
    pub fn read_slot(&self, key: SlotKey) -> Result<Word> {
        let value: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                [key.0.as_slice()],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            None => Ok(Word::ZERO),
            Some(bytes) => {
                let raw: [u8; 32] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| Error::CorruptSlot {
                        key: key.to_string(),
                        len: bytes.len(),
                    })?;
                Ok(Word(raw))
            }
        }
    }

    /// Overwrite a raw slot.
    pub fn write_slot(&self, key: SlotKey, value: Word) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key.0.as_slice(), value.0.as_slice()],
        )?;
        Ok(())
    }

    /// Append an event to the log.
    pub fn append(&self, event: &Event) -> Result<()> {
        self.conn.execute(
            "INSERT INTO events (id, account, timestamp, kind, data) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id.to_string(),
                event.account.to_string(),
                event.timestamp.to_rfc3339(),
                event.kind.name(),
                serde_json::to_string(&event.kind)?,
            ],
        )?;
        Ok(())
    }

    /// Load events in emission order, optionally restricted to one kind.
    pub fn load_events(&self, kind: Option<&str>) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, account, timestamp, data FROM events
             WHERE ?1 IS NULL OR kind = ?1 ORDER BY seq",
        )?;

        let rows = stmt
            .query_map([kind], |row| {
                let id: String = row.get(0)?;
                let account: String = row.get(1)?;
                let timestamp: String = row.get(2)?;
                let data: String = row.get(3)?;
                Ok((id, account, timestamp, data))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, account, timestamp, data)| {
                Ok(Event {
                    id: id.parse().map_err(|_| Error::CorruptEvent(id.clone()))?,
                    account: account.parse().map_err(|_| Error::CorruptEvent(id.clone()))?,
                    timestamp: timestamp
                        .parse()
                        .map_err(|_| Error::CorruptEvent(id.clone()))?,
                    kind: serde_json::from_str(&data)?,
                })
            })
            .collect()
    }

    /// Run `f` as one all-or-nothing unit.
    ///
    /// Slot writes and appended events made inside `f` are kept only if it
    /// returns `Ok`. Scopes nest: an inner failure rolls back the inner
    /// scope alone.
    pub fn atomic<T, E>(&self, f: impl FnOnce() -> std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        E: From<Error>,
    {
        let savepoint = Savepoint::begin(&self.conn)?;
        match f() {
            Ok(value) => {
                savepoint.release()?;
                Ok(value)
            }
            Err(e) => {
                savepoint.rollback()?;
                Err(e)
            }
        }
    }
}

/// An open `SAVEPOINT atomic`.
///
/// Rolled back on drop unless released, so a panic inside an atomic scope
/// does not leave the connection inside an open transaction.
struct Savepoint<'conn> {
    conn: &'conn Connection,
    finished: bool,
}

impl<'conn> Savepoint<'conn> {
    fn begin(conn: &'conn Connection) -> Result<Self> {
        conn.execute_batch("SAVEPOINT atomic")?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    fn release(mut self) -> Result<()> {
        self.finished = true;
        self.conn.execute_batch("RELEASE atomic")?;
        Ok(())
    }

    fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.undo()
    }

    fn undo(&self) -> Result<()> {
        self.conn
            .execute_batch("ROLLBACK TO atomic; RELEASE atomic")
            .map_err(|e| {
                tracing::error!(error = %e, "failed to roll back atomic scope");
                Error::from(e)
            })
    }
}

impl Drop for Savepoint<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.undo();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventKind, GUARD_SLOT};
    use guard::Address;

    #[test]
    fn unwritten_slot_reads_zero() {
        let store = SlotStore::in_memory().unwrap();
        assert_eq!(store.read_slot(*GUARD_SLOT).unwrap(), Word::ZERO);
    }

    #[test]
    fn slots_are_isolated_by_key() {
        let store = SlotStore::in_memory().unwrap();
        let other = SlotKey::derive("some.other.state");
        store
            .write_slot(*GUARD_SLOT, Word::from_address(Address([9; 20])))
            .unwrap();
        store.write_slot(other, Word::from_u64(7)).unwrap();
        store.write_slot(other, Word::from_u64(8)).unwrap();

        assert_eq!(
            store.read_slot(*GUARD_SLOT).unwrap().to_address(),
            Some(Address([9; 20]))
        );
        assert_eq!(store.read_slot(other).unwrap().to_u64(), 8);
    }

    #[test]
    fn events_load_in_order_with_filter() {
        let store = SlotStore::in_memory().unwrap();
        let account = Address([1; 20]);
        store
            .append(&Event::changed_guard(account, Some(Address([2; 20]))))
            .unwrap();
        store
            .append(&Event::new(
                account,
                EventKind::ExecutionSuccess {
                    tx_hash: Default::default(),
                },
            ))
            .unwrap();
        store.append(&Event::changed_guard(account, None)).unwrap();

        assert_eq!(store.load_events(None).unwrap().len(), 3);

        let changes = store.load_events(Some("changed_guard")).unwrap();
        let guards: Vec<_> = changes
            .iter()
            .map(|e| match &e.kind {
                EventKind::ChangedGuard { guard } => *guard,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(guards, vec![Some(Address([2; 20])), None]);
        assert!(changes.iter().all(|e| e.account == account));
    }

    #[test]
    fn atomic_rolls_back_on_error() {
        let store = SlotStore::in_memory().unwrap();
        let key = SlotKey::derive("counter");

        let result: std::result::Result<(), Error> = store.atomic(|| {
            store.write_slot(key, Word::from_u64(1))?;
            store.append(&Event::changed_guard(Address([1; 20]), None))?;
            Err(Error::CorruptEvent("forced".into()))
        });

        assert!(result.is_err());
        assert_eq!(store.read_slot(key).unwrap(), Word::ZERO);
        assert!(store.load_events(None).unwrap().is_empty());
    }

    #[test]
    fn atomic_scopes_nest() {
        let store = SlotStore::in_memory().unwrap();
        let outer = SlotKey::derive("outer");
        let inner = SlotKey::derive("inner");

        store
            .atomic(|| -> Result<()> {
                store.write_slot(outer, Word::from_u64(1))?;
                let failed: Result<()> = store.atomic(|| {
                    store.write_slot(inner, Word::from_u64(2))?;
                    Err(Error::CorruptEvent("inner".into()))
                });
                assert!(failed.is_err());
                Ok(())
            })
            .unwrap();

        assert_eq!(store.read_slot(outer).unwrap().to_u64(), 1);
        assert_eq!(store.read_slot(inner).unwrap(), Word::ZERO);
    }

    #[test]
    fn atomic_rolls_back_when_scope_panics() {
        let store = SlotStore::in_memory().unwrap();
        let key = SlotKey::derive("counter");

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<()> = store.atomic(|| {
                store.write_slot(key, Word::from_u64(1))?;
                panic!("hook panicked");
            });
        }));

        assert!(unwound.is_err());
        assert!(store.conn.is_autocommit());
        assert_eq!(store.read_slot(key).unwrap(), Word::ZERO);

        store
            .atomic(|| store.write_slot(key, Word::from_u64(2)))
            .unwrap();
        assert!(store.conn.is_autocommit());
        assert_eq!(store.read_slot(key).unwrap().to_u64(), 2);
    }
}
