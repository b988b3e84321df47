use anyhow::{Error, Result};
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

/// Open a connection to the conversation database at `db_path`,
/// creating the file if it doesn't exist.
pub async fn async_db(db_path: &str) -> Result<Connection, Error> {
    let db = Connection::open(db_path).await?;
    Ok(db)
}

/// Create the conversation collection. Safe to run on every startup.
pub fn initialize_db(conn: &mut SyncConnection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS conversation (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        ",
    )
}

/// Open the database and make sure the schema exists.
pub async fn migrated_db(db_path: &str) -> Result<Connection, Error> {
    let db = async_db(db_path).await?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    Ok(db)
}
