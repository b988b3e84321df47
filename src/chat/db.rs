use anyhow::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_rusqlite::{Connection, params};

/// A single question and the response the model gave for it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ConversationRecord {
    pub question: String,
    pub response: String,
}

impl ConversationRecord {
    pub fn new(question: &str, response: &str) -> Self {
        Self {
            question: question.to_string(),
            response: response.to_string(),
        }
    }
}

/// Append-only collection of conversation records.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Every stored question in the order it was inserted.
    async fn fetch_all_questions(&self) -> Result<Vec<String>, Error>;

    /// The last `limit` records, oldest first.
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<ConversationRecord>, Error>;

    async fn append(&self, record: &ConversationRecord) -> Result<(), Error>;
}

/// Stores each record as a JSON document in the `conversation`
/// table. Insertion order is tracked by the autoincrement id.
#[derive(Clone)]
pub struct SqliteConversationStore {
    db: Connection,
}

impl SqliteConversationStore {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn fetch_all_questions(&self) -> Result<Vec<String>, Error> {
        let questions = self
            .db
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT json_extract(data, '$.question') FROM conversation ORDER BY id ASC",
                )?;
                let rows = stmt
                    .query_map([], |row| row.get::<_, Option<String>>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows.into_iter().flatten().collect::<Vec<String>>())
            })
            .await?;
        Ok(questions)
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<ConversationRecord>, Error> {
        let rows = self
            .db
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT data FROM (
                        SELECT id, data FROM conversation
                        ORDER BY id DESC
                        LIMIT ?1
                    )
                    ORDER BY id ASC
                    "#,
                )?;
                let rows = stmt
                    .query_map(params![limit as i64], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        let records = rows
            .iter()
            .map(|data| serde_json::from_str::<ConversationRecord>(data))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn append(&self, record: &ConversationRecord) -> Result<(), Error> {
        let data = json!(record).to_string();
        self.db
            .call(move |conn| {
                let mut stmt = conn.prepare("INSERT INTO conversation (data) VALUES (?)")?;
                stmt.execute([data])?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}
