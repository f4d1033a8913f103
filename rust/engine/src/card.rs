use std::fmt;

use serde::{Deserialize, Serialize};

use crate::called::CalledSet;
use crate::errors::CardError;

pub type CardId = u32;

/// Side length of a bingo card.
pub const GRID_SIZE: usize = 5;

/// Row of the free space inside the N column.
pub const FREE_ROW: usize = 2;

/// One of the five lettered columns of a card. Each column owns a fixed range of
/// fifteen numbers, which is also the category a call is announced under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Column {
    /// 1..=15
    B,
    /// 16..=30
    I,
    /// 31..=45
    N,
    /// 46..=60
    G,
    /// 61..=75
    O,
}

impl Column {
    pub fn index(self) -> usize {
        match self {
            Column::B => 0,
            Column::I => 1,
            Column::N => 2,
            Column::G => 3,
            Column::O => 4,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Column::B => 'B',
            Column::I => 'I',
            Column::N => 'N',
            Column::G => 'G',
            Column::O => 'O',
        }
    }

    /// Inclusive number range for this column.
    pub fn range(self) -> std::ops::RangeInclusive<u8> {
        let lo = self.index() as u8 * 15 + 1;
        lo..=lo + 14
    }

    pub fn for_number(n: u8) -> Option<Column> {
        match n {
            1..=15 => Some(Column::B),
            16..=30 => Some(Column::I),
            31..=45 => Some(Column::N),
            46..=60 => Some(Column::G),
            61..=75 => Some(Column::O),
            _ => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub fn all_columns() -> [Column; 5] {
    [Column::B, Column::I, Column::N, Column::G, Column::O]
}

/// A cell position on the 5x5 grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A bingo card as supplied by a card catalog.
///
/// Columns are stored in B, I, N, G, O order; `None` marks the free space.
/// Construction validates the record, so a `BingoCard` in hand is always playable.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCard", into = "RawCard")]
pub struct BingoCard {
    card_id: CardId,
    columns: [[Option<u8>; GRID_SIZE]; GRID_SIZE],
}

impl BingoCard {
    pub fn new(
        card_id: CardId,
        columns: [[Option<u8>; GRID_SIZE]; GRID_SIZE],
    ) -> Result<Self, CardError> {
        if card_id == 0 {
            return Err(CardError::InvalidId);
        }
        for column in all_columns() {
            for (row, cell) in columns[column.index()].iter().enumerate() {
                match cell {
                    None if column == Column::N && row == FREE_ROW => {}
                    None => {
                        return Err(CardError::MisplacedFreeSpace {
                            card_id,
                            column: column.letter(),
                            row,
                        });
                    }
                    Some(v) if !(1..=75).contains(v) => {
                        return Err(CardError::ValueOutOfRange {
                            card_id,
                            column: column.letter(),
                            value: u32::from(*v),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self { card_id, columns })
    }

    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn column(&self, column: Column) -> &[Option<u8>; GRID_SIZE] {
        &self.columns[column.index()]
    }

    /// Row-major projection of the card: `grid.cell(row, col)` reads row `row` of column `col`.
    pub fn grid(&self) -> CardGrid {
        let mut cells = [[None; GRID_SIZE]; GRID_SIZE];
        for (row, cells_row) in cells.iter_mut().enumerate() {
            for (col, cell) in cells_row.iter_mut().enumerate() {
                *cell = self.columns[col][row];
            }
        }
        CardGrid { cells }
    }
}

/// Row-major 5x5 view of a card. Purely derived from [`BingoCard`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CardGrid {
    cells: [[Option<u8>; GRID_SIZE]; GRID_SIZE],
}

impl CardGrid {
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.cells[row][col]
    }

    pub fn at(&self, coord: Coord) -> Option<u8> {
        self.cells[coord.row][coord.col]
    }

    pub fn rows(&self) -> &[[Option<u8>; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn is_marked_at(&self, coord: Coord, called: &CalledSet) -> bool {
        is_marked(self.at(coord), called)
    }

    /// Coordinates of every marked cell in row-major order.
    pub fn marked_coords(&self, called: &CalledSet) -> Vec<Coord> {
        let mut v = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let c = Coord::new(row, col);
                if self.is_marked_at(c, called) {
                    v.push(c);
                }
            }
        }
        v
    }
}

/// A cell is marked when it is the free space or its number has been called.
pub fn is_marked(cell: Option<u8>, called: &CalledSet) -> bool {
    match cell {
        None => true,
        Some(n) => called.contains(n),
    }
}

/// Wire shape of a card record: `{"card_id": 7, "B": [...], "I": [...], ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCard {
    card_id: CardId,
    #[serde(rename = "B")]
    b: Vec<Option<u32>>,
    #[serde(rename = "I")]
    i: Vec<Option<u32>>,
    #[serde(rename = "N")]
    n: Vec<Option<u32>>,
    #[serde(rename = "G")]
    g: Vec<Option<u32>>,
    #[serde(rename = "O")]
    o: Vec<Option<u32>>,
}

impl TryFrom<RawCard> for BingoCard {
    type Error = CardError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        if raw.card_id == 0 {
            return Err(CardError::InvalidId);
        }
        let mut columns = [[None; GRID_SIZE]; GRID_SIZE];
        let raw_columns = [&raw.b, &raw.i, &raw.n, &raw.g, &raw.o];
        for (column, values) in all_columns().into_iter().zip(raw_columns) {
            if values.len() != GRID_SIZE {
                return Err(CardError::ColumnLength {
                    card_id: raw.card_id,
                    column: column.letter(),
                    found: values.len(),
                });
            }
            for (row, value) in values.iter().enumerate() {
                columns[column.index()][row] = match value {
                    None => None,
                    Some(v) => match u8::try_from(*v) {
                        Ok(n) => Some(n),
                        Err(_) => {
                            return Err(CardError::ValueOutOfRange {
                                card_id: raw.card_id,
                                column: column.letter(),
                                value: *v,
                            });
                        }
                    },
                };
            }
        }
        BingoCard::new(raw.card_id, columns)
    }
}

impl From<BingoCard> for RawCard {
    fn from(card: BingoCard) -> Self {
        let widen = |c: &[Option<u8>; GRID_SIZE]| c.iter().map(|v| v.map(u32::from)).collect();
        RawCard {
            card_id: card.card_id,
            b: widen(&card.columns[0]),
            i: widen(&card.columns[1]),
            n: widen(&card.columns[2]),
            g: widen(&card.columns[3]),
            o: widen(&card.columns[4]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ranges_cover_1_to_75() {
        for n in 1..=75u8 {
            let col = Column::for_number(n).expect("in range");
            assert!(col.range().contains(&n));
        }
        assert_eq!(Column::for_number(0), None);
        assert_eq!(Column::for_number(76), None);
        assert_eq!(Column::O.range(), 61..=75);
    }

    #[test]
    fn free_space_outside_centre_is_rejected() {
        let mut cols = [[Some(1u8); 5]; 5];
        cols[0][0] = None;
        let err = BingoCard::new(3, cols).unwrap_err();
        assert_eq!(
            err,
            CardError::MisplacedFreeSpace {
                card_id: 3,
                column: 'B',
                row: 0
            }
        );
    }

    #[test]
    fn short_column_is_rejected_at_load() {
        let json = r#"{"card_id":1,"B":[1,2,3,4],"I":[16,17,18,19,20],
            "N":[31,32,null,34,35],"G":[46,47,48,49,50],"O":[61,62,63,64,65]}"#;
        let err = serde_json::from_str::<BingoCard>(json).unwrap_err();
        assert!(err.to_string().contains("column B has 4 values"));
    }
}
