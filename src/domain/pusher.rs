//! Message pusher trait definition.
//!
//! Abstracts the per-connection push primitive the transport layer provides,
//! so the usecase layer can relay payloads without knowing the connections
//! are WebSockets.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::ids::ConnectionId;

/// Channel used to push serialized events to one connection
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Per-connection push primitive.
///
/// Registration follows the transport lifetime (register at connect,
/// unregister at disconnect), independent of room membership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's outbound channel
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Drop a connection's outbound channel
    async fn unregister_connection(&self, connection_id: ConnectionId);

    /// Push a serialized event to a single connection
    async fn push_to(
        &self,
        connection_id: ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
