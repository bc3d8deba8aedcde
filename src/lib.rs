//! WebRTC signaling server for telehealth video consultations.
//!
//! This library brokers peer-to-peer video calls between exactly two
//! participants (one doctor, one patient) per appointment room: it tracks
//! room membership, decides which side initiates the offer/answer handshake,
//! and relays SDP/ICE payloads verbatim between the two connections. Media
//! never touches this process.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
