//! Message pusher implementations.
//!
//! Concrete implementations of the `MessagePusher` trait; currently only the
//! WebSocket-backed one.

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
