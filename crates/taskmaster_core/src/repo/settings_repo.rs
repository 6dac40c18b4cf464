//! Settings document repository.
//!
//! # Invariants
//! - At most one settings row exists (`id = 1`).
//! - A missing row reads as `Settings::default()`.

use super::{ensure_table, RepoResult};
use crate::model::settings::Settings;
use rusqlite::{Connection, OptionalExtension};

const SETTINGS_ROW_ID: i64 = 1;

pub trait SettingsRepository {
    fn load_settings(&self) -> RepoResult<Settings>;
    /// Replaces the stored document wholesale.
    fn save_settings(&self, settings: &Settings) -> RepoResult<()>;
}

pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "settings")?;
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load_settings(&self) -> RepoResult<Settings> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM settings WHERE id = ?1;",
                [SETTINGS_ROW_ID],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            Some(document) => Ok(Settings::from_json(&document)?),
            None => Ok(Settings::default()),
        }
    }

    fn save_settings(&self, settings: &Settings) -> RepoResult<()> {
        settings.validate()?;
        let document = settings.to_json()?;
        self.conn.execute(
            "INSERT INTO settings (id, document) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET
                document = excluded.document,
                updated_at = (strftime('%s', 'now') * 1000);",
            rusqlite::params![SETTINGS_ROW_ID, document],
        )?;
        Ok(())
    }
}
