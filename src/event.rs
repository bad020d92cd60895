// Wire format. Inbound frames are wrapped:
//   {"payload": {"event": "TICK", "message": <event-specific>}}
// Outbound events are not:
//   {"event": "JOIN_ROOM", "message": "alice"}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::board::Board;
use crate::error::ProtocolError;
use crate::player::Player;
use crate::roster::Roster;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Start,
    End,
    GameBoard,
    Tick,
    JoinUser,
    LoadMap,
    UserReady,
    UserNotReady,
}

#[derive(Clone, Debug)]
pub enum ServerEvent {
    // Game has started: switch to the board view.
    Start,
    // Game is over. `message` is meant to be shown to the user as is.
    End { message: String },
    GameBoard(Board),
    // Periodic authoritative board snapshot.
    Tick(Board),
    JoinUser { players: Roster },
    LoadMap(Board),
    UserReady(Player),
    UserNotReady(Player),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "event", content = "message", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientEvent {
    JoinRoom(String),
}


#[derive(Deserialize)]
struct Envelope {
    payload: RawEvent,
}

#[derive(Deserialize)]
struct RawEvent {
    event: String,
    #[serde(default)]
    message: serde_json::Value,
}

#[derive(Deserialize)]
struct JoinUserMessage {
    players: Vec<Player>,
}

impl ServerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ServerEvent::Start => EventKind::Start,
            ServerEvent::End { .. } => EventKind::End,
            ServerEvent::GameBoard(_) => EventKind::GameBoard,
            ServerEvent::Tick(_) => EventKind::Tick,
            ServerEvent::JoinUser { .. } => EventKind::JoinUser,
            ServerEvent::LoadMap(_) => EventKind::LoadMap,
            ServerEvent::UserReady(_) => EventKind::UserReady,
            ServerEvent::UserNotReady(_) => EventKind::UserNotReady,
        }
    }

    pub fn from_frame(frame: &str) -> Result<Self, ProtocolError> {
        let Envelope { payload: RawEvent { event, message } } =
            serde_json::from_str(frame).map_err(|err| ProtocolError::Malformed(err.to_string()))?;
        let kind: EventKind =
            event.parse().map_err(|_| ProtocolError::UnknownEvent(event.clone()))?;
        Ok(match kind {
            EventKind::Start => ServerEvent::Start,
            EventKind::End => ServerEvent::End { message: notice_text(message) },
            EventKind::GameBoard => ServerEvent::GameBoard(parse_message(kind, message)?),
            EventKind::Tick => ServerEvent::Tick(parse_message(kind, message)?),
            EventKind::JoinUser => {
                let JoinUserMessage { players } = parse_message(kind, message)?;
                ServerEvent::JoinUser { players: Roster::from_players(players)? }
            }
            EventKind::LoadMap => ServerEvent::LoadMap(parse_message(kind, message)?),
            EventKind::UserReady => ServerEvent::UserReady(parse_message(kind, message)?),
            EventKind::UserNotReady => ServerEvent::UserNotReady(parse_message(kind, message)?),
        })
    }
}

fn parse_message<T: DeserializeOwned>(
    kind: EventKind, message: serde_json::Value,
) -> Result<T, ProtocolError> {
    serde_json::from_value(message).map_err(|err| ProtocolError::BadPayload {
        event: <&'static str>::from(kind).to_owned(),
        reason: err.to_string(),
    })
}

fn notice_text(message: serde_json::Value) -> String {
    match message {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
