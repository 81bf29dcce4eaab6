//! WebSocket chat relay server.
//!
//! Receives messages from clients, echoes them back to the sender and
//! broadcasts them to all other connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! WS_PORT=4000 cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 127.0.0.1 --port 3001
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    config::ServerConfig,
    infrastructure::{id_generator::UuidMessageIdGenerator, registry::InMemoryConnectionRegistry},
    ui::Server,
    usecase::{ConnectClientUseCase, DisconnectClientUseCase, RelayMessageUseCase},
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCases
    // 3. Server

    // 1. Create Registry (in-memory connection set)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(registry.clone()));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(registry.clone()));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        registry.clone(),
        Arc::new(SystemClock),
        Arc::new(UuidMessageIdGenerator),
    ));

    // 3. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        relay_message_usecase,
    );
    if let Err(e) = server.run(&config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
