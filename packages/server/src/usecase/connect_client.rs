//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - ウェルカムメッセージの送信と Registry への登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続にのみウェルカムメッセージが届く
//! - 異常系：送信キューが既に閉じている接続

use std::sync::Arc;

use crate::{
    domain::{Connection, ConnectionRegistry},
    infrastructure::dto::websocket::ServerMessage,
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// ConnectionRegistry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// クライアント接続を実行
    ///
    /// ウェルカムメッセージを当該コネクションの送信キューに積んでから登録する。
    /// 登録前に積むため、ウェルカムメッセージは常にそのコネクションが受け取る最初のフレームになる。
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 接続成功
    /// * `Err(ConnectError)` - ウェルカムメッセージを送れなかった（登録はしない）
    pub async fn execute(&self, connection: Connection) -> Result<(), ConnectError> {
        let welcome = ServerMessage::welcome().to_json()?;
        connection.push(&welcome)?;

        self.registry.register(connection).await;

        Ok(())
    }
}
