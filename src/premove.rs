use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Coord, Direction};


// A move queued locally and not yet confirmed by the server.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Premove {
    pub from: Coord,
    pub to: Coord,
    pub direction: Direction,
}

// Selection plus the chain of premoves leading out of it.
//
// Invariant: premoves form a connected path: every `from` equals the previous `to`, and the
// last `to` is the current selection.
//
// Improvement potential. Premoves are never sent to the server. Submitting them requires
// a protocol event that the server doesn't accept yet.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PremoveQueue {
    selection: Option<Coord>,
    premoves: Vec<Premove>,
}

impl PremoveQueue {
    pub fn new() -> Self { Self::default() }

    pub fn selection(&self) -> Option<Coord> { self.selection }
    pub fn premoves(&self) -> &[Premove] { &self.premoves }
    pub fn is_empty(&self) -> bool { self.premoves.is_empty() }

    // Returns whether the premove was queued. Moves off the board and moves without
    // a selection are silently ignored.
    pub fn push_direction(&mut self, direction: Direction, board_shape: BoardShape) -> bool {
        let Some(from) = self.selection else {
            return false;
        };
        let to = from.step(direction);
        if !board_shape.contains_coord(to) {
            return false;
        }
        self.premoves.push(Premove { from, to, direction });
        self.selection = Some(to);
        true
    }

    // Drops all premoves. Selection stays where it was.
    pub fn cancel(&mut self) { self.premoves.clear(); }

    // Pointer selection. Starting a path from a different cell discards the old path, otherwise
    // the queue would stop being connected. The web client kept the old path around instead,
    // leaving the queue disjoint from the selection.
    pub fn select(&mut self, coord: Coord, board_shape: BoardShape) -> bool {
        if !board_shape.contains_coord(coord) {
            return false;
        }
        if self.selection != Some(coord) {
            self.premoves.clear();
            self.selection = Some(coord);
        }
        true
    }

    // Directions of premoves leaving `coord`, in queue order, without repetitions.
    pub fn directions_from(&self, coord: Coord) -> Vec<Direction> {
        self.premoves
            .iter()
            .filter(|p| p.from == coord)
            .map(|p| p.direction)
            .unique()
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    const SHAPE: BoardShape = BoardShape { num_rows: 4, num_cols: 5 };

    fn queue_at(coord: Coord) -> PremoveQueue {
        let mut queue = PremoveQueue::new();
        assert!(queue.select(coord, SHAPE));
        queue
    }

    fn is_connected(queue: &PremoveQueue) -> bool {
        queue.premoves().iter().tuple_windows().all(|(a, b)| a.to == b.from)
            && queue.premoves().last().is_none_or(|p| Some(p.to) == queue.selection())
    }

    #[test]
    fn each_direction_from_inside() {
        let start = Coord::new(2, 2);
        for direction in Direction::iter() {
            let mut queue = queue_at(start);
            assert!(queue.push_direction(direction, SHAPE));
            let expected_to = start + direction.offset();
            assert_eq!(queue.selection(), Some(expected_to));
            assert_eq!(queue.premoves(), &[Premove { from: start, to: expected_to, direction }]);
        }
    }

    #[test]
    fn blocked_at_border() {
        let cases = [
            (Coord::new(0, 2), Direction::Up),
            (Coord::new(3, 2), Direction::Down),
            (Coord::new(1, 0), Direction::Left),
            (Coord::new(1, 4), Direction::Right),
        ];
        for (start, direction) in cases {
            let mut queue = queue_at(start);
            let before = queue.clone();
            assert!(!queue.push_direction(direction, SHAPE));
            assert_eq!(queue, before);
        }
        let mut queue = queue_at(Coord::new(0, 0));
        assert!(!queue.push_direction(Direction::Up, SHAPE));
        assert!(!queue.push_direction(Direction::Left, SHAPE));
        assert_eq!(queue.selection(), Some(Coord::new(0, 0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn nothing_selected() {
        let mut queue = PremoveQueue::new();
        assert!(!queue.push_direction(Direction::Down, SHAPE));
        assert_eq!(queue, PremoveQueue::new());
    }

    #[test]
    fn no_board() {
        let mut queue = PremoveQueue::new();
        assert!(!queue.select(Coord::new(0, 0), BoardShape::default()));
        assert_eq!(queue.selection(), None);
    }

    #[test]
    fn path_stays_connected() {
        let mut queue = queue_at(Coord::new(1, 1));
        use Direction::*;
        for direction in [Right, Right, Down, Left, Up, Up, Up] {
            queue.push_direction(direction, SHAPE);
        }
        // The last `Up` would leave the board.
        assert_eq!(queue.premoves().len(), 6);
        assert_eq!(queue.selection(), Some(Coord::new(0, 2)));
        assert!(is_connected(&queue));
    }

    #[test]
    fn cancel_keeps_selection_and_is_idempotent() {
        let mut queue = queue_at(Coord::new(1, 1));
        queue.cancel();
        assert!(queue.is_empty());
        queue.push_direction(Direction::Down, SHAPE);
        queue.push_direction(Direction::Down, SHAPE);
        queue.cancel();
        assert!(queue.is_empty());
        assert_eq!(queue.selection(), Some(Coord::new(3, 1)));
        let once = queue.clone();
        queue.cancel();
        assert_eq!(queue, once);
    }

    #[test]
    fn reselect() {
        let mut queue = queue_at(Coord::new(1, 1));
        queue.push_direction(Direction::Right, SHAPE);
        assert!(queue.select(Coord::new(1, 2), SHAPE));
        assert_eq!(queue.premoves().len(), 1);
        assert!(queue.select(Coord::new(3, 3), SHAPE));
        assert!(queue.is_empty());
        assert!(!queue.select(Coord::new(4, 0), SHAPE));
        assert_eq!(queue.selection(), Some(Coord::new(3, 3)));
    }

    #[test]
    fn directions_from_tile() {
        let mut queue = queue_at(Coord::new(1, 1));
        use Direction::*;
        for direction in [Right, Left, Right, Down] {
            queue.push_direction(direction, SHAPE);
        }
        assert_eq!(queue.directions_from(Coord::new(1, 1)), vec![Right]);
        assert_eq!(queue.directions_from(Coord::new(1, 2)), vec![Left, Down]);
        assert_eq!(queue.directions_from(Coord::new(3, 3)), vec![]);
    }
}
