//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 正規メッセージの生成（id / ts はサーバーが付与）
//! - 送信者へのエコー（self: true）と他の接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 中継はこのサーバーの中核となる処理
//! - クライアントが送った id / ts を信用してはならない
//! - 1 つの宛先への送信失敗が他の宛先への配信を止めてはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 接続のうち 1 つが送信し、残り 2 つに届く
//! - フォールバック：JSON でないフレーム
//! - エッジケース：送信者のみ接続、閉じた接続が混在、送信者自身が閉じている

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use hiroba_shared::time::Clock;

use crate::{
    domain::{ChatMessage, Connection, ConnectionRegistry, MessageIdGenerator, Timestamp},
    infrastructure::dto::websocket::{ServerMessage, parse_inbound},
};

use super::error::RelayError;

/// Result of relaying one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// The canonical message that was relayed.
    pub message: ChatMessage,
    /// Whether the echo reached the sender's queue.
    pub echoed: bool,
    /// Number of other connections the broadcast copy was queued for.
    pub delivered: usize,
    /// Number of other connections that were visited but could not take the frame.
    pub skipped: usize,
}

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// ConnectionRegistry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// Clock（ts の付与に使用）
    clock: Arc<dyn Clock>,
    /// MessageIdGenerator（id の採番に使用）
    id_generator: Arc<dyn MessageIdGenerator>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        clock: Arc<dyn Clock>,
        id_generator: Arc<dyn MessageIdGenerator>,
    ) -> Self {
        Self {
            registry,
            clock,
            id_generator,
        }
    }

    /// 受信したフレームを中継する
    ///
    /// 1. フレームを解釈する（失敗時はフレーム全体を本文とする）
    /// 2. id / ts を付与した正規メッセージを作る
    /// 3. 送信者に `self: true` 付きで返す
    /// 4. 送信者以外の開いている全接続に `self` なしで送る
    ///
    /// # Arguments
    ///
    /// * `sender` - フレームを送ってきた接続
    /// * `raw` - 受信したフレーム（UTF-8 テキスト）
    ///
    /// # Returns
    ///
    /// * `Ok(RelayOutcome)` - 中継結果（配信できなかった宛先はスキップされる）
    /// * `Err(RelayError)` - メッセージのエンコードに失敗
    pub async fn execute(
        &self,
        sender: &Connection,
        raw: &str,
    ) -> Result<RelayOutcome, RelayError> {
        let payload = parse_inbound(raw);
        let message = ChatMessage::from_inbound(
            payload,
            self.id_generator.generate(),
            Timestamp::new(self.clock.now_millis()),
        );

        let broadcast = ServerMessage::from(message.clone());
        let echo_json = broadcast.as_echo().to_json()?;
        let broadcast_json = broadcast.to_json()?;

        let echoed = match sender.push(&echo_json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Echo not delivered: {}", e);
                false
            }
        };

        let delivered = AtomicUsize::new(0);
        let visited = self
            .registry
            .for_each_except(&sender.id(), &|recipient: &Connection| {
                match recipient.push(&broadcast_json) {
                    Ok(()) => {
                        delivered.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => tracing::warn!("Skipping recipient during broadcast: {}", e),
                }
            })
            .await;
        let delivered = delivered.into_inner();

        tracing::debug!(
            "Relayed message '{}' from '{}' to {} connection(s)",
            message.id.as_str(),
            sender.id(),
            delivered
        );

        Ok(RelayOutcome {
            message,
            echoed,
            delivered,
            skipped: visited - delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, MessageId, id_generator::MockMessageIdGenerator},
        infrastructure::registry::InMemoryConnectionRegistry,
    };
    use hiroba_shared::time::FixedClock;
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    const NOW: i64 = 1_700_000_000_000;

    struct TestClient {
        connection: Connection,
        rx: mpsc::UnboundedReceiver<String>,
    }

    impl TestClient {
        fn new() -> Self {
            let (tx, rx) = mpsc::unbounded_channel();
            Self {
                connection: Connection::new(ConnectionId::generate(), tx),
                rx,
            }
        }

        fn frames(&mut self) -> Vec<Value> {
            let mut frames = Vec::new();
            while let Ok(raw) = self.rx.try_recv() {
                frames.push(serde_json::from_str(&raw).unwrap());
            }
            frames
        }
    }

    fn id_generator_returning(id: &'static str) -> Arc<MockMessageIdGenerator> {
        let mut generator = MockMessageIdGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .return_const(MessageId::new(id));
        Arc::new(generator)
    }

    async fn setup(
        clients: &[&TestClient],
        id: &'static str,
    ) -> (Arc<InMemoryConnectionRegistry>, RelayMessageUseCase) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        for client in clients {
            registry.register(client.connection.clone()).await;
        }
        let usecase = RelayMessageUseCase::new(
            registry.clone(),
            Arc::new(FixedClock::new(NOW)),
            id_generator_returning(id),
        );
        (registry, usecase)
    }

    #[tokio::test]
    async fn test_relay_echoes_to_sender_and_broadcasts_to_others() {
        // テスト項目: A の送信が A には self: true 付きで、B と C には self なしで届く
        // given (前提条件):
        let mut alice = TestClient::new();
        let mut bob = TestClient::new();
        let mut charlie = TestClient::new();
        let (_registry, usecase) = setup(&[&alice, &bob, &charlie], "msg-1").await;

        // when (操作):
        let outcome = usecase
            .execute(&alice.connection, r#"{"user":"alice","text":"hi"}"#)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(outcome.echoed);
        assert_eq!(outcome.delivered, 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(
            alice.frames(),
            vec![json!({
                "type": "chat", "id": "msg-1", "user": "alice", "text": "hi", "ts": NOW, "self": true
            })]
        );
        let expected = json!({"type": "chat", "id": "msg-1", "user": "alice", "text": "hi", "ts": NOW});
        assert_eq!(bob.frames(), vec![expected.clone()]);
        assert_eq!(charlie.frames(), vec![expected]);
    }

    #[tokio::test]
    async fn test_relay_ignores_client_supplied_id_and_ts() {
        // テスト項目: クライアントが送った id / ts / type は無視され、サーバーの値が使われる
        // given (前提条件):
        let mut alice = TestClient::new();
        let mut bob = TestClient::new();
        let (_registry, usecase) = setup(&[&alice, &bob], "server-id").await;

        // when (操作):
        let outcome = usecase
            .execute(
                &alice.connection,
                r#"{"type":"system","id":"forged","ts":1,"user":"alice","text":"x"}"#,
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.message.id.as_str(), "server-id");
        assert_eq!(outcome.message.ts.value(), NOW);
        let received = bob.frames();
        assert_eq!(received[0]["type"], json!("chat"));
        assert_eq!(received[0]["id"], json!("server-id"));
        assert_eq!(received[0]["ts"], json!(NOW));
        assert_eq!(alice.frames()[0]["id"], json!("server-id"));
    }

    #[tokio::test]
    async fn test_relay_plain_text_falls_back_to_anonymous() {
        // テスト項目: JSON でない "hello" は text="hello", user="Anonymous" になる
        // given (前提条件):
        let mut alice = TestClient::new();
        let (_registry, usecase) = setup(&[&alice], "msg-1").await;

        // when (操作):
        let outcome = usecase.execute(&alice.connection, "hello").await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome.message.text.as_str(), "hello");
        assert_eq!(outcome.message.user.as_str(), "Anonymous");
        let echo = alice.frames();
        assert_eq!(echo[0]["user"], json!("Anonymous"));
        assert_eq!(echo[0]["text"], json!("hello"));
    }

    #[tokio::test]
    async fn test_relay_empty_user_becomes_anonymous() {
        // テスト項目: 空のユーザー名は Anonymous として中継される
        // given (前提条件):
        let mut alice = TestClient::new();
        let mut bob = TestClient::new();
        let (_registry, usecase) = setup(&[&alice, &bob], "msg-1").await;

        // when (操作):
        usecase
            .execute(&alice.connection, r#"{"user":"","text":"hi"}"#)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(alice.frames()[0]["user"], json!("Anonymous"));
        assert_eq!(bob.frames()[0]["user"], json!("Anonymous"));
    }

    #[tokio::test]
    async fn test_relay_with_only_sender_connected() {
        // テスト項目: 送信者のみ接続している場合、エコーのみが届く
        // given (前提条件):
        let mut alice = TestClient::new();
        let (_registry, usecase) = setup(&[&alice], "msg-1").await;

        // when (操作):
        let outcome = usecase
            .execute(&alice.connection, r#"{"text":"alone"}"#)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.delivered, 0);
        assert_eq!(alice.frames().len(), 1);
    }

    #[tokio::test]
    async fn test_relay_skips_closed_connection() {
        // テスト項目: 閉じた接続はスキップされ、残りの接続への配信は成功する
        // given (前提条件):
        let alice = TestClient::new();
        let mut bob = TestClient::new();
        let mut charlie = TestClient::new();
        let (_registry, usecase) = setup(&[&alice, &bob, &charlie], "msg-1").await;
        drop(alice.rx);

        // when (操作): bob が送信
        let outcome = usecase
            .execute(&bob.connection, r#"{"user":"bob","text":"still here?"}"#)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(bob.frames().len(), 1);
        assert_eq!(charlie.frames().len(), 1);
    }

    #[tokio::test]
    async fn test_relay_skips_unregistered_connection() {
        // テスト項目: 登録解除された接続には配信されない
        // given (前提条件):
        let mut alice = TestClient::new();
        let mut bob = TestClient::new();
        let mut charlie = TestClient::new();
        let (registry, usecase) = setup(&[&alice, &bob, &charlie], "msg-1").await;
        registry.unregister(&alice.connection.id()).await;

        // when (操作):
        let outcome = usecase
            .execute(&bob.connection, r#"{"text":"hi"}"#)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome.delivered, 1);
        assert!(alice.frames().is_empty());
        assert_eq!(charlie.frames().len(), 1);
    }

    #[tokio::test]
    async fn test_relay_continues_when_sender_is_closed() {
        // テスト項目: 送信者自身が閉じていてもブロードキャストは継続される
        // given (前提条件):
        let alice = TestClient::new();
        let mut bob = TestClient::new();
        let (_registry, usecase) = setup(&[&alice, &bob], "msg-1").await;
        let sender = alice.connection.clone();
        drop(alice);

        // when (操作):
        let outcome = usecase.execute(&sender, r#"{"text":"bye"}"#).await.unwrap();

        // then (期待する結果):
        assert!(!outcome.echoed);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(bob.frames()[0]["text"], json!("bye"));
    }
}
