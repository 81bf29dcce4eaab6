//! Terminal chat client for the Hiroba relay.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod session;
pub mod ui;

pub use session::run_client_session;
