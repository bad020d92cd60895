use std::fmt;
use std::ops;

use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Coord};


// Fog-of-war tiles arrive as `{}` and tiles with zero army omit `army`, hence the defaults.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Tile {
    #[serde(default)]
    pub army: i64,
    // Some server versions send the owner's color under `color`.
    #[serde(default, alias = "color")]
    pub owner: String,
    #[serde(default)]
    pub terrain: String,
}


// Server-side board snapshot. Shape is fixed for a game, but every snapshot is taken as is:
// the client never reconciles two snapshots.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Board {
    data: Array2<Tile>,
}

impl Board {
    pub fn empty() -> Self { Board { data: Array2::default((0, 0)) } }

    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, String> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |row| row.len());
        if let Some((idx, row)) = rows.iter().find_position(|row| row.len() != num_cols) {
            return Err(format!(
                "Ragged board: row {} has {} tiles, expected {}",
                idx,
                row.len(),
                num_cols
            ));
        }
        if i32::try_from(num_rows).is_err() || i32::try_from(num_cols).is_err() {
            return Err(format!("Board too large: {}x{}", num_rows, num_cols));
        }
        let tiles = rows.into_iter().flatten().collect_vec();
        let data = Array2::from_shape_vec((num_rows, num_cols), tiles)
            .map_err(|err| format!("Invalid board shape: {}", err))?;
        Ok(Board { data })
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.data.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn shape(&self) -> BoardShape {
        BoardShape {
            num_rows: self.data.nrows(),
            num_cols: self.data.ncols(),
        }
    }

    pub fn contains_coord(&self, coord: Coord) -> bool { self.shape().contains_coord(coord) }

    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        let index = coord_to_index(coord)?;
        self.data.get(index)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.shape().coords().zip(self.data.iter())
    }
}

impl Default for Board {
    fn default() -> Self { Self::empty() }
}

impl TryFrom<Vec<Vec<Tile>>> for Board {
    type Error = String;
    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, Self::Error> { Self::from_rows(rows) }
}

impl From<Board> for Vec<Vec<Tile>> {
    fn from(board: Board) -> Self { board.to_rows() }
}

impl ops::Index<Coord> for Board {
    type Output = Tile;
    #[track_caller]
    fn index(&self, coord: Coord) -> &Self::Output {
        self.get(coord).unwrap_or_else(|| panic!("{}", out_of_bound_message(coord, self.shape())))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.shape();
        write!(f, "Board {}x{} ", shape.num_rows, shape.num_cols)?;
        f.debug_map()
            .entries(
                self.tiles()
                    .filter(|(_, tile)| !tile.owner.is_empty() || tile.army != 0)
                    .map(|(coord, tile)| (coord, (tile.army, &tile.owner))),
            )
            .finish()
    }
}

fn coord_to_index(coord: Coord) -> Option<[usize; 2]> {
    Some([usize::try_from(coord.row).ok()?, usize::try_from(coord.col).ok()?])
}

fn out_of_bound_message(coord: Coord, shape: BoardShape) -> String {
    format!(
        "Coord ({}, {}) is out of bound for {}x{} board",
        coord.row, coord.col, shape.num_rows, shape.num_cols
    )
}
