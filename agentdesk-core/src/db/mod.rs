//! SQLite database layer for Agentdesk.
//!
//! Provides persistent storage for:
//! - Provider configurations (API keys, endpoints, model lists)
//! - Agent model assignments (selected model, parameters, reasoning effort)

mod migrations;

use std::cell::RefCell;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::store::{store_event_channel, StoreEvent, StoreEventReceiver, StoreEventSender};

/// Database connection wrapper.
///
/// Provides a high-level API for interacting with the SQLite database.
/// Automatically handles connection setup, migrations, and file permissions.
pub struct Database {
    conn: Connection,
    subscribers: RefCell<Vec<StoreEventSender>>,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Default path: `~/.local/share/agentdesk/agentdesk.db`
    pub fn open() -> anyhow::Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    /// Open the database at a specific path.
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 0600 on Unix (contains API keys).
    pub fn open_at(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
            {
                tracing::warn!(path = %path.display(), error = %e, "Failed to set database file permissions");
            }
        }

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self {
            conn,
            subscribers: RefCell::new(Vec::new()),
        })
    }

    /// Get the default database path.
    ///
    /// Returns `~/.local/share/agentdesk/agentdesk.db` (or platform equivalent).
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(data_dir.join("agentdesk").join("agentdesk.db"))
    }

    /// Run database migrations.
    ///
    /// Safe to call multiple times - migrations are tracked and only run once.
    pub fn migrate(&self) -> anyhow::Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get a reference to the underlying connection.
    ///
    /// Use sparingly - prefer the store methods when possible.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // =========================================================================
    // Change Notifications
    // =========================================================================

    /// Register a new change subscriber.
    pub(crate) fn add_subscriber(&self) -> StoreEventReceiver {
        let (tx, rx) = store_event_channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Notify every live subscriber. Closed receivers are dropped.
    pub(crate) fn notify(&self, event: StoreEvent) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|tx| tx.send(event).is_ok());
        tracing::trace!(?event, subscribers = subscribers.len(), "Store change published");
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::open_at(db_path).unwrap();
        db.migrate().unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_open_and_migrate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.db");
        let db = Database::open_at(path).unwrap();
        db.migrate().unwrap();
    }

    #[test]
    fn test_open_at_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let nested_path = tmp.path().join("deep").join("nested").join("test.db");

        assert!(!nested_path.parent().unwrap().exists());

        let _db = Database::open_at(nested_path.clone()).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_default_path_returns_valid_path() {
        if let Ok(path) = Database::default_path() {
            assert!(path.ends_with("agentdesk/agentdesk.db"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_open_at_sets_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("secure.db");

        let _db = Database::open_at(path.clone()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Database should have 0600 permissions");
    }

    #[test]
    fn test_notify_reaches_subscribers() {
        let (_temp, db) = setup_test_db();
        let mut rx = db.add_subscriber();

        db.notify(StoreEvent::ProvidersChanged);

        assert_eq!(rx.try_recv().unwrap(), StoreEvent::ProvidersChanged);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_notify_prunes_closed_subscribers() {
        let (_temp, db) = setup_test_db();
        let rx = db.add_subscriber();
        let _kept = db.add_subscriber();
        assert_eq!(db.subscriber_count(), 2);

        drop(rx);
        db.notify(StoreEvent::AgentModelsChanged);

        assert_eq!(db.subscriber_count(), 1);
    }
}
