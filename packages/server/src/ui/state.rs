//! Server state shared by every handler.

use std::sync::Arc;

use crate::usecase::{ConnectClientUseCase, DisconnectClientUseCase, RelayMessageUseCase};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
}
