use std::sync::{Arc, RwLock};

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::api::AppState;
use crate::chat::{ChatError, respond};
use crate::core::AppConfig;

pub async fn run(config: AppConfig, model: Option<String>) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let state = Arc::new(RwLock::new(AppState::from_config(&config).await?));
    let mut model = model;

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                // The model only needs to be selected once, it sticks
                // for the rest of the session
                match respond(&state, Some(line.as_str()), model.take().as_deref()).await {
                    Ok(resp) => println!("{}", resp),
                    Err(ChatError::BadRequest) => continue,
                    Err(err) => println!("Error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
