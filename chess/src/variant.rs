//! Variants and initial layouts

use crate::geometry::MAX_SIDE;
use crate::types::{Cell, Coord, Orientation};

use std::fmt::{self, Display};
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Error parsing a [`Layout`] from its FEN-style placement string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Row is longer than the first one
    #[error("too many items in row {0}")]
    RowOverflow(usize),
    /// Row is shorter than the first one
    #[error("not enough items in row {0}")]
    RowUnderflow(usize),
    /// More than eight rows or columns
    #[error("layout is larger than 8x8")]
    TooLarge,
    /// Empty layout
    #[error("layout is empty")]
    Empty,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Variant`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("unknown variant {0:?}")]
pub struct VariantParseError(pub String);

/// Placement of pieces on a rectangular board
///
/// The layout is always written from White's perspective: row 0 is the top row as seen by a
/// player sitting on the White side. Use [`Layout::oriented()`] to get the placement for another
/// viewpoint.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Layout {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Layout {
    /// Creates an empty layout of size `rows` x `cols`
    ///
    /// # Panics
    ///
    /// The function panics if any of the dimensions is zero or larger than eight.
    pub fn empty(rows: usize, cols: usize) -> Layout {
        assert!(rows > 0 && rows <= MAX_SIDE, "bad number of rows: {}", rows);
        assert!(cols > 0 && cols <= MAX_SIDE, "bad number of cols: {}", cols);
        Layout {
            rows,
            cols,
            cells: vec![Cell::EMPTY; rows * cols],
        }
    }

    /// Creates a layout from signed piece codes, one slice per row
    ///
    /// Returns `None` if rows have different lengths or some code is invalid.
    pub fn from_codes(rows: &[&[i8]]) -> Option<Layout> {
        let cols = rows.first()?.len();
        if rows.len() > MAX_SIDE || cols == 0 || cols > MAX_SIDE {
            return None;
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return None;
            }
            for &code in row.iter() {
                cells.push(Cell::from_code(code)?);
            }
        }
        Some(Layout {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.row() * self.cols + c.col()]
    }

    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        assert!(c.row() < self.rows && c.col() < self.cols);
        self.cells[c.row() * self.cols + c.col()] = cell;
    }

    /// Returns the layout as seen with orientation `o`
    ///
    /// For [`Orientation::BlackBottom`] both the rows and the cells inside each row are reversed.
    pub fn oriented(&self, o: Orientation) -> Layout {
        let mut res = self.clone();
        if o == Orientation::BlackBottom {
            res.cells.reverse();
        }
        res
    }

    /// Shuffles the cells of the first and the last row, independently of each other
    pub fn shuffle_back_ranks<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let cols = self.cols;
        let last = (self.rows - 1) * cols;
        self.cells[..cols].shuffle(rng);
        self.cells[last..last + cols].shuffle(rng);
    }

    /// Iterates over occupied cells
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells.iter().enumerate().filter(|(_, c)| c.is_occupied()).map(move |(i, &c)| {
            (Coord::from_parts(i / self.cols, i % self.cols), c)
        })
    }
}

impl FromStr for Layout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Layout, Self::Err> {
        type Error = LayoutParseError;

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for (row, src) in s.split('/').enumerate() {
            if row >= MAX_SIDE {
                return Err(Error::TooLarge);
            }
            let mut cells = Vec::new();
            for b in src.bytes() {
                match b {
                    b'1'..=b'8' => {
                        let add = (b - b'0') as usize;
                        cells.extend((0..add).map(|_| Cell::EMPTY));
                    }
                    _ => {
                        cells.push(Cell::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?);
                    }
                }
                if cells.len() > MAX_SIDE {
                    return Err(Error::TooLarge);
                }
            }
            if let Some(first) = rows.first() {
                if cells.len() > first.len() {
                    return Err(Error::RowOverflow(row));
                }
                if cells.len() < first.len() {
                    return Err(Error::RowUnderflow(row));
                }
            } else if cells.is_empty() {
                return Err(Error::Empty);
            }
            rows.push(cells);
        }

        Ok(Layout {
            rows: rows.len(),
            cols: rows[0].len(),
            cells: rows.concat(),
        })
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (idx, row) in self.cells.chunks(self.cols).enumerate() {
            if idx != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for cell in row {
                if cell.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}

const STANDARD: [[i8; 8]; 8] = [
    [-5, -4, -3, -2, -1, -3, -4, -5],
    [-6, -6, -6, -6, -6, -6, -6, -6],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [5, 4, 3, 2, 1, 3, 4, 5],
];

const HORDE: [[i8; 8]; 8] = [
    [-5, -4, -3, -2, -1, -3, -4, -5],
    [-6, -6, -6, -6, -6, -6, -6, -6],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 6, 6, 0, 0, 6, 6, 0],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [6, 6, 6, 6, 6, 6, 6, 6],
    [6, 6, 6, 6, 6, 6, 6, 6],
];

fn template(codes: &[[i8; 8]; 8]) -> Layout {
    let rows: Vec<&[i8]> = codes.iter().map(|r| &r[..]).collect();
    Layout::from_codes(&rows).expect("built-in templates are valid")
}

/// Named initial setup of the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Classical initial position
    #[default]
    Standard,
    /// White has 36 pawns and no king, Black wins by capturing all of them
    Horde,
    /// Standard position with each back rank shuffled at random
    ///
    /// The shuffle is unconstrained, so bishops may end up on the same color and the king is
    /// not necessarily between the rooks.
    Chess960,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Standard, Variant::Horde, Variant::Chess960];

    pub fn name(&self) -> &'static str {
        match *self {
            Variant::Standard => "standard",
            Variant::Horde => "horde",
            Variant::Chess960 => "chess960",
        }
    }

    /// Returns the template layout, before any shuffle
    pub fn template(&self) -> Layout {
        match *self {
            Variant::Standard | Variant::Chess960 => template(&STANDARD),
            Variant::Horde => template(&HORDE),
        }
    }

    pub fn shuffles_back_ranks(&self) -> bool {
        matches!(*self, Variant::Chess960)
    }

    /// Produces the initial placement as seen with orientation `o`
    pub fn placement<R: Rng + ?Sized>(&self, o: Orientation, rng: &mut R) -> Layout {
        let mut layout = self.template().oriented(o);
        if self.shuffles_back_ranks() {
            layout.shuffle_back_ranks(rng);
        }
        layout
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.name().fmt(f)
    }
}

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Variant, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| VariantParseError(s.to_string()))
    }
}
