//! Data Transfer Objects for the signaling server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: signaling events exchanged over the WebSocket
//! - `http`: HTTP API response DTOs
//! - `conversion`: domain model to DTO mapping

pub mod conversion;
pub mod http;
pub mod websocket;
