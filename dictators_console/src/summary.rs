// Plain-text state dump for the console client. Not a board renderer: just enough to see what
// the client believes the state is.

use dictators_client::board::Board;
use dictators_client::connection::ConnectionState;
use dictators_client::coord::{Coord, Direction};
use dictators_client::premove::PremoveQueue;
use dictators_client::store::StoreSnapshot;
use itertools::Itertools;


pub fn render(snapshot: &StoreSnapshot, connection: ConnectionState, cursor: Option<Coord>) -> String {
    let mut lines = vec![
        format!("Connection: {:?}    View: {:?}", connection, snapshot.view),
        format!(
            "Players: {}",
            snapshot.roster.iter().map(|p| format!("{} ({})", p.name, p.color)).join(", ")
        ),
    ];
    if !snapshot.board.shape().is_empty() {
        lines.push(String::new());
        lines.extend(render_board(&snapshot.board, &snapshot.premoves, cursor));
        lines.push(String::new());
    }
    let selection = match snapshot.premoves.selection() {
        Some(c) => format!("({}, {})", c.row, c.col),
        None => format!("{:?}", Coord::NONE_SENTINEL),
    };
    lines.push(format!(
        "Selected: {}    Premoves: {}",
        selection,
        snapshot.premoves.premoves().len()
    ));
    lines.join("\n")
}

// One cell per tile: marker followed by the army. Markers: '*' selection, '+' cursor, arrow for
// the first premove leaving the tile.
fn render_board(board: &Board, premoves: &PremoveQueue, cursor: Option<Coord>) -> Vec<String> {
    let shape = board.shape();
    if shape.is_empty() {
        return Vec::new();
    }
    shape
        .coords()
        .chunks(shape.num_cols)
        .into_iter()
        .map(|row| {
            row.map(|coord| {
                let marker = if premoves.selection() == Some(coord) {
                    '*'
                } else if cursor == Some(coord) {
                    '+'
                } else {
                    premoves.directions_from(coord).first().map_or(' ', |d| arrow(*d))
                };
                format!("{}{:>3}", marker, board[coord].army)
            })
            .join(" ")
        })
        .collect()
}

fn arrow(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}


#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use dictators_client::board::Tile;
    use dictators_client::coord::BoardShape;
    use dictators_client::player::Player;
    use dictators_client::roster::Roster;
    use dictators_client::store::View;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lobby_without_board() {
        let snapshot = StoreSnapshot {
            view: View::Lobby,
            board: Rc::new(Board::empty()),
            roster: Roster::from_players(vec![Player::new("a", "red"), Player::new("b", "blue")])
                .unwrap(),
            premoves: PremoveQueue::new(),
        };
        assert_eq!(
            render(&snapshot, ConnectionState::Disconnected, None),
            "Connection: Disconnected    View: Lobby\n\
             Players: a (red), b (blue)\n\
             Selected: (-1, -1)    Premoves: 0"
        );
    }

    #[test]
    fn board_markers() {
        let board = Board::from_rows(vec![
            vec![Tile { army: 5, ..Tile::default() }, Tile::default()],
            vec![Tile::default(), Tile { army: 12, ..Tile::default() }],
        ])
        .unwrap();
        let shape = BoardShape { num_rows: 2, num_cols: 2 };
        let mut premoves = PremoveQueue::new();
        premoves.select(Coord::new(0, 0), shape);
        premoves.push_direction(Direction::Right, shape);
        let lines = render_board(&board, &premoves, Some(Coord::new(1, 1)));
        assert_eq!(lines, vec![">  5 *  0", "   0 + 12"]);
    }
}
