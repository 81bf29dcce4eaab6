//! WebSocket connection handlers.

use std::{borrow::Cow, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, ConnectionId},
    ui::state::AppState,
};

use super::http::health_check;

/// Entry point for every request on the relay port.
///
/// WebSocket upgrades join the relay; anything else gets the plain-text
/// health response.
pub async fn entry_handler(
    State(state): State<Arc<AppState>>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    match upgrade {
        Ok(ws) => ws.on_upgrade(move |socket| handle_socket(socket, state)),
        Err(rejection) => {
            tracing::debug!("Not a WebSocket upgrade ({}), serving health text", rejection);
            health_check().await.into_response()
        }
    }
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the channel is closed or the socket refuses a frame.
/// Dropping `rx` at that point is what marks the connection as closed for
/// the registry.
///
/// # Arguments
///
/// * `rx` - Outbound queue of this connection
/// * `sender` - WebSocket sink to send frames to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection = Connection::new(ConnectionId::generate(), tx);
    let connection_id = connection.id();

    // The welcome frame is queued and the connection registered before the
    // pusher starts, so a client that has seen the welcome is already a
    // broadcast target.
    if let Err(e) = state
        .connect_client_usecase
        .execute(connection.clone())
        .await
    {
        tracing::warn!("Failed to open connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' opened", connection_id);

    // Spawn a task to push queued frames (welcome, echoes, broadcasts) to this client
    let mut send_task = pusher_loop(rx, sender);

    let relay_message_usecase = state.relay_message_usecase.clone();

    // Spawn a task to receive frames from this client and relay them
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection.id(), e);
                    break;
                }
            };

            let raw: Cow<'_, str> = match &msg {
                Message::Text(text) => Cow::Borrowed(text.as_str()),
                Message::Binary(data) => String::from_utf8_lossy(data),
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    continue;
                }
                Message::Close(_) => {
                    // The next poll flushes the close reply and then ends the stream
                    tracing::info!("Connection '{}' requested close", connection.id());
                    continue;
                }
            };
            tracing::debug!("Received frame from '{}': {}", connection.id(), raw);

            if let Err(e) = relay_message_usecase.execute(&connection, &raw).await {
                tracing::warn!("Failed to relay frame from '{}': {}", connection.id(), e);
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let remaining = state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
    tracing::info!(
        "Connection '{}' closed and removed from registry ({} open)",
        connection_id,
        remaining
    );
}
