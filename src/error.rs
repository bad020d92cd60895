use std::fmt;


// Inbound frame could not be turned into an event. Always recoverable: the frame is dropped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ProtocolError {
    // Not JSON, or JSON without the `payload` envelope.
    Malformed(String),
    UnknownEvent(String),
    BadPayload { event: String, reason: String },
    DuplicatePlayer(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RosterError {
    UnknownPlayer { name: String },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    Protocol(ProtocolError),
    Roster(RosterError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(reason) => write!(f, "Malformed frame: {}", reason),
            ProtocolError::UnknownEvent(event) => write!(f, "Unknown event: '{}'", event),
            ProtocolError::BadPayload { event, reason } => {
                write!(f, "Bad {} payload: {}", event, reason)
            }
            ProtocolError::DuplicatePlayer(name) => {
                write!(f, "Player '{}' appears in the roster twice", name)
            }
        }
    }
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::UnknownPlayer { name } => {
                write!(f, "Did not find player '{}' in the roster", name)
            }
        }
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::Protocol(err) => err.fmt(f),
            EventError::Roster(err) => err.fmt(f),
        }
    }
}

impl From<ProtocolError> for EventError {
    fn from(err: ProtocolError) -> Self { EventError::Protocol(err) }
}

impl From<RosterError> for EventError {
    fn from(err: RosterError) -> Self { EventError::Roster(err) }
}
