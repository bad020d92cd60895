use std::collections::HashSet;
use std::ops;
use std::rc::Rc;

use serde::Serialize;

use crate::error::{ProtocolError, RosterError};
use crate::player::Player;


// Immutable roster snapshot. Updates build a new snapshot, so views holding an older one are
// never affected.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Roster {
    players: Rc<[Player]>,
}

impl Roster {
    pub fn empty() -> Self { Self::default() }

    pub fn from_players(players: Vec<Player>) -> Result<Self, ProtocolError> {
        let mut names = HashSet::new();
        for p in &players {
            if !names.insert(p.name.as_str()) {
                return Err(ProtocolError::DuplicatePlayer(p.name.clone()));
            }
        }
        Ok(Roster { players: players.into() })
    }

    // Replaces the player with the same name, keeping everybody else in place.
    pub fn with_updated_player(&self, changed: Player) -> Result<Roster, RosterError> {
        let Some(idx) = self.players.iter().position(|p| p.name == changed.name) else {
            return Err(RosterError::UnknownPlayer { name: changed.name });
        };
        let mut players = self.players.to_vec();
        players[idx] = changed;
        Ok(Roster { players: players.into() })
    }
}

impl ops::Deref for Roster {
    type Target = [Player];
    fn deref(&self) -> &Self::Target { &self.players }
}
