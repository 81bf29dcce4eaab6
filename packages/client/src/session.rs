//! WebSocket client session management.

use std::sync::{Arc, RwLock};

use futures_util::{SinkExt, StreamExt};
use hiroba_shared::protocol::ClientMessage;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    domain::{InputCommand, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::{prompt, redisplay_prompt},
};

/// Display name shared between the input thread and the session tasks
type SharedName = Arc<RwLock<String>>;

fn current_name(name: &SharedName) -> String {
    name.read().map(|n| n.clone()).unwrap_or_default()
}

/// Run the WebSocket client session
///
/// The session ends when the user quits (`Ok`) or the connection drops
/// (`Err(ClientError::ConnectionLost)`). There is no reconnection.
pub async fn run_client_session(url: &str, user: String) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to {}", url);
    print!("{}", MessageFormatter::format_status(true));
    println!(
        "You are '{}'. Type messages and press Enter to send. /name <new name> to rename, /quit to exit.\n",
        user
    );

    let name: SharedName = Arc::new(RwLock::new(user));
    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming frames
    let name_for_read = name.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let formatted = match message {
                Ok(Message::Text(text)) => MessageFormatter::format_frame(text.as_str()),
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => continue,
            };
            print!("{}", formatted);
            redisplay_prompt(&current_name(&name_for_read));
        }
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let (editor_err_tx, mut editor_err_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let name_for_prompt = name.clone();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                let _ = editor_err_tx.send(e.to_string());
                return;
            }
        };

        loop {
            match rl.readline(&prompt(&current_name(&name_for_prompt))) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn input lines into chat frames
    let name_for_write = name.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            match parse_input(&line) {
                InputCommand::Send(text) => {
                    let msg = ClientMessage {
                        user: Some(current_name(&name_for_write)),
                        text: Some(text),
                    };
                    let json = match serde_json::to_string(&msg) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize message: {}", e);
                            continue;
                        }
                    };
                    if let Err(e) = write.send(Message::Text(json.into())).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return Err(ClientError::ConnectionLost);
                    }
                }
                InputCommand::Rename(new_name) => {
                    if let Ok(mut current) = name_for_write.write() {
                        *current = new_name;
                    }
                }
                InputCommand::Usage(usage) => println!("{}", usage),
                InputCommand::Quit => break,
                InputCommand::Ignore => {}
            }
        }

        // Leaving on purpose (quit, Ctrl+C, Ctrl+D)
        let _ = write.send(Message::Close(None)).await;
        Ok(())
    });

    // If any one of the tasks completes, abort the other
    let result = tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
            Err(ClientError::ConnectionLost)
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(Err(ClientError::ConnectionLost))
        }
        Some(e) = editor_err_rx.recv() => {
            read_task.abort();
            write_task.abort();
            Err(ClientError::Readline(e))
        }
    };

    if matches!(result, Err(ClientError::ConnectionLost)) {
        print!("{}", MessageFormatter::format_status(false));
    }

    result
}
