use anyhow::Result;

use crate::chat::{ConversationStore, SqliteConversationStore};
use crate::core::{AppConfig, db::migrated_db};

pub async fn run(config: AppConfig, limit: usize) -> Result<()> {
    let db = migrated_db(&config.db_path).await?;
    let store = SqliteConversationStore::new(db);
    let records = store.fetch_recent(limit).await?;

    if records.is_empty() {
        println!("No conversations stored in {}", config.db_path);
    }

    for record in records {
        println!(">>> {}\n{}\n", record.question, record.response);
    }

    Ok(())
}
