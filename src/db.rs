use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::ops::Deref;
use std::path::Path;
use std::time::Duration;

const SCHEMA: &str = include_str!("schema.sql");

const BUSY_TIMEOUT_MS: u64 = 5000;

pub struct Database {
    db: LibsqlDatabase,
    turso_url: Option<String>,
    turso_auth_token: Option<String>,
}

/// A connection scoped to a single request. Dropping it closes the connection.
pub struct Session {
    conn: Connection,
}

impl Deref for Session {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::trace!("[db] session released");
    }
}

impl Database {
    pub fn is_replica(turso_url: &Option<String>, turso_auth_token: &Option<String>) -> bool {
        turso_url.is_some() && turso_auth_token.is_some()
    }

    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(cfg.app.get_db());
        let turso_url = cfg.app.turso_url.clone();
        let turso_auth_token = cfg.app.turso_auth_token.clone();

        let db = match (&turso_url, &turso_auth_token) {
            (Some(url), Some(token)) => {
                tracing::info!("[db] running in synced database mode (offline writes)");
                let sync_interval = Duration::from_secs(cfg.app.sync_interval_seconds);
                Builder::new_synced_database(&path, url.clone(), token.clone())
                    .sync_interval(sync_interval)
                    .build()
                    .await?
            }
            _ => {
                tracing::info!(path = ?path, "[db] running in local database mode");
                Builder::new_local(&path).build().await?
            }
        };

        let database = Database {
            db,
            turso_url,
            turso_auth_token,
        };
        database.sync().await?;
        database.bootstrap().await?;
        Ok(database)
    }

    /// Opens a plain local database file, creating the schema if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new_local(path.as_ref()).build().await?;
        let database = Database {
            db,
            turso_url: None,
            turso_auth_token: None,
        };
        database.bootstrap().await?;
        Ok(database)
    }

    pub async fn sync(&self) -> Result<()> {
        if Self::is_replica(&self.turso_url, &self.turso_auth_token) {
            self.db
                .sync()
                .await
                .map_err(|e| anyhow::anyhow!("sync failed: {}", e))?;
        }
        Ok(())
    }

    async fn bootstrap(&self) -> Result<()> {
        let session = self.session().await?;
        session
            .execute_batch(SCHEMA)
            .await
            .map_err(|e| anyhow::anyhow!("failed to create schema: {e}"))?;
        tracing::debug!("[db] schema ready");
        Ok(())
    }

    pub async fn session(&self) -> Result<Session> {
        let conn = self.db.connect()?;
        conn.query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
            .await?;
        tracing::trace!("[db] session acquired");
        Ok(Session { conn })
    }
}
