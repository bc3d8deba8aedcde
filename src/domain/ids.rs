//! Identifier and timestamp value objects.

use std::fmt;

use uuid::Uuid;

use super::error::DomainError;

/// Stable identifier of a signaling room, scoped to one appointment.
///
/// Derived deterministically from the appointment identifier so both
/// participants of an appointment always land in the same room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// Create a RoomId from a raw string
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    /// Derive the room id for an appointment.
    ///
    /// The mapping is stable: the same appointment always yields the same
    /// room, which is what lets a participant rejoin after a network drop.
    pub fn for_appointment(appointment_id: &str) -> Result<Self, DomainError> {
        if appointment_id.trim().is_empty() {
            return Err(DomainError::EmptyAppointmentId);
        }
        Ok(Self(format!("consult-{appointment_id}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identity of a call participant (the surrounding session's user id).
///
/// Survives reconnects; a participant that reconnects keeps its
/// `ParticipantId` but gets a fresh [`ConnectionId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyParticipantId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of one live transport connection.
///
/// Allocated at connect time, invalidated at disconnect. Never reused: a
/// reconnecting participant is assigned a new one and the old one is dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Allocate a fresh connection id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human-readable participant name, relayed for UI attribution only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unix timestamp in milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_rejects_empty_string() {
        // given / when:
        let result = RoomId::new("  ".to_string());

        // then:
        assert_eq!(result, Err(DomainError::EmptyRoomId));
    }

    #[test]
    fn test_room_id_for_appointment_is_deterministic() {
        // given:
        let appointment_id = "apt-42";

        // when:
        let first = RoomId::for_appointment(appointment_id).unwrap();
        let second = RoomId::for_appointment(appointment_id).unwrap();

        // then:
        assert_eq!(first, second);
        assert_eq!(first.as_str(), "consult-apt-42");
    }

    #[test]
    fn test_room_id_for_appointment_rejects_empty_appointment() {
        // given / when:
        let result = RoomId::for_appointment("");

        // then:
        assert_eq!(result, Err(DomainError::EmptyAppointmentId));
    }

    #[test]
    fn test_participant_id_rejects_empty_string() {
        // given / when:
        let result = ParticipantId::new(String::new());

        // then:
        assert_eq!(result, Err(DomainError::EmptyParticipantId));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // given / when:
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then:
        assert_ne!(a, b);
    }
}
