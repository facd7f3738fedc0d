//! The storage module persists client preferences (API base URL, theme) in a
//! small SQLite database.

use anyhow::{Context, Result};
use log::warn;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

use crate::Theme;
use crate::constants::{PREF_API_BASE_URL, PREF_THEME};

/// Key/value preference store surviving across sessions.
pub struct Preferences {
    /// The underlying SQLite connection wrapped in Mutex<> to make it shareable
    conn: Mutex<Connection>,
}

impl Preferences {
    /// Opens the preference database at the specified path, creating the file and
    /// its parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the database cannot be created
    pub fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create {}", parent.display()))?;
        }
        let conn = Connection::open(database_path).with_context(|| {
            format!("Unable to open preferences at {}", database_path.display())
        })?;

        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Initializes the database schema with the preferences table if it doesn't exist.
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            params![],
        )?;

        Ok(())
    }

    /// Gets the stored value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("Preferences mutex poisoned");
        let mut stmt = conn.prepare("SELECT value FROM preferences WHERE key = ?1")?;
        let value: Result<Option<String>, rusqlite::Error> =
            stmt.query_row([key], |row| row.get(0)).optional();

        value.map_err(|e| e.into())
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("Preferences mutex poisoned");
        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub fn api_base_url(&self) -> Result<Option<String>> {
        self.get(PREF_API_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub fn set_api_base_url(&self, url: &str) -> Result<()> {
        self.set(PREF_API_BASE_URL, url)
    }

    /// Persisted theme, `dark` when none is stored or the stored value is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub fn theme(&self) -> Result<Theme> {
        let Some(stored) = self.get(PREF_THEME)? else {
            return Ok(Theme::default());
        };

        Ok(stored.parse().unwrap_or_else(|e| {
            warn!("{e}, falling back to {}", Theme::default());
            Theme::default()
        }))
    }

    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.set(PREF_THEME, theme.as_str())
    }
}
