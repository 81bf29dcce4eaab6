//! UseCase: クライアント切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// ConnectionRegistry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// クライアント切断を実行
    ///
    /// 切断理由（正常終了・ネットワークエラー・シャットダウン）に関わらず同じ処理を行う。
    /// 既に登録解除済みでもエラーにはならない。
    ///
    /// # Returns
    ///
    /// 切断後に残っている接続数
    pub async fn execute(&self, id: &ConnectionId) -> usize {
        self.registry.unregister(id).await;
        self.registry.len().await
    }
}
