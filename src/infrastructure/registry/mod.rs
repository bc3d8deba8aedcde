//! Room registry implementations.
//!
//! Currently only the in-memory store. The registry trait is the natural
//! boundary to swap for a shared external store if multi-instance scaling is
//! ever required; the atomicity contract stays the same.

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
