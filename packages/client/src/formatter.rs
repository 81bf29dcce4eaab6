//! Message formatting utilities for client display.

use chrono::Local;
use hiroba_shared::protocol::ServerMessage;
use hiroba_shared::time::format_time_of_day;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the connectivity status line
    pub fn format_status(connected: bool) -> String {
        if connected {
            "[Connected]\n".to_string()
        } else {
            "\n[Disconnected]\n".to_string()
        }
    }

    /// Format one text frame received from the server
    ///
    /// Frames that are not a known server message are shown as raw text.
    pub fn format_frame(text: &str) -> String {
        match serde_json::from_str::<ServerMessage>(text) {
            Ok(ServerMessage::System { text }) => Self::format_system_message(&text),
            Ok(ServerMessage::Chat {
                user,
                text,
                ts,
                is_self,
                ..
            }) => Self::format_chat_message(&user, &text, ts, is_self),
            Err(_) => Self::format_raw_message(text),
        }
    }

    /// Format a system notice
    pub fn format_system_message(text: &str) -> String {
        format!("\n* {}\n", text)
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `user` - Display name of the sender
    /// * `text` - The message text
    /// * `ts` - Server timestamp (milliseconds)
    /// * `is_self` - Whether this is the echo of our own message
    pub fn format_chat_message(user: &str, text: &str, ts: i64, is_self: bool) -> String {
        let from = if is_self {
            "You"
        } else if user.is_empty() {
            "Anonymous"
        } else {
            user
        };
        format!(
            "\n[{}] {}: {}\n",
            format_time_of_day(ts, &Local),
            from,
            text
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_frame_system_message() {
        // テスト項目: system メッセージはお知らせとして表示される
        // when (操作):
        let result =
            MessageFormatter::format_frame(r#"{"type":"system","text":"Welcome to the chat!"}"#);

        // then (期待する結果):
        assert_eq!(result, "\n* Welcome to the chat!\n");
    }

    #[test]
    fn test_format_frame_own_echo_shows_you() {
        // テスト項目: 自分のメッセージのエコーは "You" として表示される
        // when (操作):
        let result = MessageFormatter::format_frame(
            r#"{"type":"chat","id":"1","user":"alice","text":"hi","ts":1672498800000,"self":true}"#,
        );

        // then (期待する結果):
        assert!(result.contains("You: hi"));
        assert!(!result.contains("alice"));
    }

    #[test]
    fn test_format_frame_other_user_shows_name() {
        // テスト項目: 他の参加者のメッセージは送信者名付きで表示される
        // when (操作):
        let result = MessageFormatter::format_frame(
            r#"{"type":"chat","id":"1","user":"bob","text":"hello","ts":1672498800000}"#,
        );

        // then (期待する結果):
        assert!(result.contains("bob: hello"));
    }

    #[test]
    fn test_format_chat_message_empty_user_is_anonymous() {
        // テスト項目: 送信者名が空の場合は Anonymous と表示される
        // when (操作):
        let result = MessageFormatter::format_chat_message("", "hi", 0, false);

        // then (期待する結果):
        assert!(result.contains("Anonymous: hi"));
    }

    #[test]
    fn test_format_frame_unknown_is_raw() {
        // テスト項目: 解釈できないフレームはそのまま表示される
        // when (操作):
        let result = MessageFormatter::format_frame("not json");

        // then (期待する結果):
        assert_eq!(result, "\n← Received: not json\n");
    }

    #[test]
    fn test_format_status() {
        // テスト項目: 接続状態が表示される
        // then (期待する結果):
        assert!(MessageFormatter::format_status(true).contains("Connected"));
        assert!(MessageFormatter::format_status(false).contains("Disconnected"));
    }
}
