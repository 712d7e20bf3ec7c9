use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

/// A single pool table with its live feed and optional replay clip.
///
/// Serialized field names are camelCase to match the JSON API shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: u32,
    pub name: String,
    pub is_live: bool,
    pub has_replay: bool,
    /// Milliseconds since epoch of the last completed replay, None until the
    /// first trigger completes
    pub last_replay_timestamp: Option<i64>,
    pub stream_url: String,
    /// None until the first trigger completes, then always set
    pub replay_url: Option<String>,
}

/// Unknown table id, the only failure the store can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableNotFound(pub u32);

impl fmt::Display for TableNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table {} not found", self.0)
    }
}

impl std::error::Error for TableNotFound {}

/// In-memory source of truth for table state.
///
/// Seeded once at startup with ids 1..=N and held for the process lifetime.
/// Callers get cloned snapshots; all mutation goes through
/// `mark_replay_ready` so the replay fields can only change together.
pub struct TableStore {
    tables: Mutex<Vec<Table>>,
}

impl TableStore {
    pub fn new(table_count: u32, stream_url: &str) -> Self {
        let tables = (1..=table_count)
            .map(|id| Table {
                id,
                name: format!("Mesa {}", id),
                is_live: true,
                has_replay: false,
                last_replay_timestamp: None,
                stream_url: stream_url.to_string(),
                replay_url: None,
            })
            .collect();
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Snapshot of all tables in id order
    pub fn list(&self) -> Vec<Table> {
        self.tables.lock().unwrap().clone()
    }

    /// Snapshot of one table, or None when the id is unknown
    pub fn get(&self, id: u32) -> Option<Table> {
        self.tables
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Whether a table with this id exists
    pub fn contains(&self, id: u32) -> bool {
        self.tables.lock().unwrap().iter().any(|t| t.id == id)
    }

    /// Mark a replay as available on a table.
    ///
    /// Overwrites `last_replay_timestamp` and `replay_url` on every call;
    /// `has_replay` stays true once set. Overlapping triggers therefore land
    /// in completion order, with the last one winning the timestamp.
    pub fn mark_replay_ready(
        &self,
        id: u32,
        timestamp_ms: i64,
        replay_url: &str,
    ) -> Result<(), TableNotFound> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TableNotFound(id))?;
        table.has_replay = true;
        table.last_replay_timestamp = Some(timestamp_ms);
        table.replay_url = Some(replay_url.to_string());
        Ok(())
    }
}

/// Current wall-clock time in milliseconds since epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whether a replay should still carry the "new" badge in the list view
pub fn replay_is_fresh(last_replay_timestamp: Option<i64>, now_ms: i64, window_ms: i64) -> bool {
    match last_replay_timestamp {
        Some(ts) => now_ms - ts < window_ms,
        None => false,
    }
}
