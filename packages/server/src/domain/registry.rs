//! ConnectionRegistry trait 定義
//!
//! 接続中のコネクション集合へのインターフェース。
//! UseCase 層はこの trait に依存し、具体的な実装（InMemory など）には依存しない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Connection, ConnectionId};

/// Outbound queue of one connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// The live set of open connections.
///
/// Implementations must allow `register`/`unregister` to run concurrently with
/// `for_each_except` without panicking and without visiting a connection twice.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Track a newly upgraded connection.
    async fn register(&self, connection: Connection);

    /// Stop tracking a connection. Removing an absent connection is a no-op.
    async fn unregister(&self, id: &ConnectionId);

    /// Apply `f` to every registered, still-open connection except `exclude`.
    ///
    /// Returns the number of connections `f` was applied to. Order is unspecified.
    async fn for_each_except(
        &self,
        exclude: &ConnectionId,
        f: &(dyn for<'c> Fn(&'c Connection) + Send + Sync),
    ) -> usize;

    /// Number of registered connections.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
