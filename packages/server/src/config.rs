//! Server configuration from the command line and environment.

use clap::Parser;

/// Port used when neither `--port` nor `WS_PORT` is given.
pub const DEFAULT_PORT: u16 = 3001;

/// Environment variable that selects the listening port.
pub const PORT_ENV: &str = "WS_PORT";

/// Bind on every interface by default.
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket chat relay: every message is echoed to its sender and broadcast to everyone else", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for logging and error messages.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_defaults_without_arguments() {
        // テスト項目: 引数なしの場合は既定のホストとポートが使われる
        // given (前提条件):
        if std::env::var_os(PORT_ENV).is_some() {
            // WS_PORT が設定された環境では既定値を検証できない
            return;
        }

        // when (操作):
        let config = ServerConfig::try_parse_from(["hiroba-server"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn test_port_flag_overrides_default() {
        // テスト項目: --port と --host で既定値を上書きできる
        // when (操作):
        let config =
            ServerConfig::try_parse_from(["hiroba-server", "-H", "127.0.0.1", "--port", "4000"])
                .unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        // テスト項目: 数値でないポートは起動エラーになる
        // when (操作):
        let result = ServerConfig::try_parse_from(["hiroba-server", "--port", "not-a-port"]);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_port_reads_ws_port_env() {
        // テスト項目: --port は環境変数 WS_PORT から上書きできる
        // given (前提条件):
        let command = ServerConfig::command();

        // when (操作):
        let port = command
            .get_arguments()
            .find(|arg| arg.get_id() == "port")
            .expect("port argument should exist");

        // then (期待する結果):
        assert_eq!(port.get_env(), Some(OsStr::new("WS_PORT")));
    }
}
