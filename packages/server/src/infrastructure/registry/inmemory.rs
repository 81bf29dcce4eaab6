//! InMemory ConnectionRegistry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! `tokio::sync::Mutex<HashMap>` をコネクション集合として使用します。
//!
//! ## 走査中の変更について
//!
//! `for_each_except` はロックを保持したままスナップショットを取り、
//! ロックを解放してからコールバックを適用します（copy-on-iterate）。
//! 走査中に `register` / `unregister` が走っても走査には影響せず、
//! 既に閉じたコネクションは `is_open()` で除外されます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry};

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// 接続中のコネクション
    ///
    /// Key: ConnectionId
    /// Value: Connection
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 除外対象以外のコネクションのスナップショットを取得
    async fn snapshot_except(&self, exclude: &ConnectionId) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        connections
            .values()
            .filter(|connection| connection.id() != *exclude)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Connection) {
        let id = connection.id();
        let mut connections = self.connections.lock().await;
        connections.insert(id, connection);
        tracing::debug!("Connection '{}' registered ({} open)", id, connections.len());
    }

    async fn unregister(&self, id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(id).is_some() {
            tracing::debug!("Connection '{}' unregistered ({} open)", id, connections.len());
        }
    }

    async fn for_each_except(
        &self,
        exclude: &ConnectionId,
        f: &(dyn for<'c> Fn(&'c Connection) + Send + Sync),
    ) -> usize {
        let snapshot = self.snapshot_except(exclude).await;

        let mut visited = 0;
        for connection in snapshot.iter().filter(|connection| connection.is_open()) {
            f(connection);
            visited += 1;
        }
        visited
    }

    async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }
}
