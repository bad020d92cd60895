use std::rc::Rc;

use crate::board::Board;
use crate::coord::{Coord, Direction};
use crate::dirty::Dirty;
use crate::error::RosterError;
use crate::player::Player;
use crate::premove::PremoveQueue;
use crate::roster::Roster;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum View {
    #[default]
    Lobby,
    Game,
}

// Everything a view needs to draw itself. Cheap to clone: board and roster are shared.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StoreSnapshot {
    pub view: View,
    pub board: Rc<Board>,
    pub roster: Roster,
    pub premoves: PremoveQueue,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StoreChanges {
    pub view: bool,
    pub board: bool,
    pub roster: bool,
    pub premoves: bool,
}

impl StoreChanges {
    pub fn any(self) -> bool { self.view || self.board || self.roster || self.premoves }
}

// Client-side game state. Only mutated via the typed setters below.
#[derive(Debug, Default)]
pub struct Store {
    view: Dirty<View>,
    board: Dirty<Rc<Board>>,
    roster: Dirty<Roster>,
    premoves: Dirty<PremoveQueue>,
}

impl Store {
    pub fn new() -> Self { Self::default() }

    pub fn view(&self) -> View { *self.view }
    pub fn board(&self) -> &Rc<Board> { &self.board }
    pub fn roster(&self) -> &Roster { &self.roster }
    pub fn premoves(&self) -> &PremoveQueue { &self.premoves }
    pub fn selection(&self) -> Option<Coord> { self.premoves.selection() }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            view: *self.view,
            board: Rc::clone(&self.board),
            roster: (*self.roster).clone(),
            premoves: (*self.premoves).clone(),
        }
    }

    // Reports what changed since the previous call.
    pub fn take_changes(&self) -> StoreChanges {
        StoreChanges {
            view: self.view.take_dirt(),
            board: self.board.take_dirt(),
            roster: self.roster.take_dirt(),
            premoves: self.premoves.take_dirt(),
        }
    }

    pub fn set_view(&mut self, view: View) { self.view.set(view); }

    // Premoves survive board updates; the server validates each one on execution.
    pub fn replace_board(&mut self, board: Board) { self.board.replace(Rc::new(board)); }

    pub fn replace_roster(&mut self, roster: Roster) { self.roster.replace(roster); }

    pub fn update_player(&mut self, player: Player) -> Result<(), RosterError> {
        let roster = self.roster.with_updated_player(player)?;
        self.roster.replace(roster);
        Ok(())
    }

    pub fn push_premove(&mut self, direction: Direction) -> bool {
        let board_shape = self.board.shape();
        self.premoves.modify(|q| q.push_direction(direction, board_shape))
    }

    pub fn cancel_premoves(&mut self) {
        self.premoves.modify(|q| {
            let had_premoves = !q.is_empty();
            q.cancel();
            had_premoves
        });
    }

    pub fn select(&mut self, coord: Coord) -> bool {
        let board_shape = self.board.shape();
        let mut accepted = false;
        self.premoves.modify(|q| {
            let before = q.clone();
            accepted = q.select(coord, board_shape);
            *q != before
        });
        accepted
    }
}
