//! UseCase layer
//!
//! 接続・切断・メッセージ中継の 3 つのユースケースを提供します。
//! 各ユースケースは domain 層の trait（ConnectionRegistry など）にのみ依存します。

mod connect_client;
mod disconnect_client;
mod error;
mod relay_message;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, RelayError};
pub use relay_message::{RelayMessageUseCase, RelayOutcome};
