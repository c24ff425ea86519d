use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

use crate::geometry::MAX_SIDE;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown promote piece {0:?}")]
pub struct PromotePieceParseError(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns `1` for White and `-1` for Black
    ///
    /// This is the sign used for the piece codes in variant templates.
    pub const fn sign(&self) -> isize {
        match *self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [Color::White, Color::Black].into_iter()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

/// Kind of a chess piece
///
/// The discriminants are the magnitudes used in signed-code variant templates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 1,
    Queen = 2,
    Bishop = 3,
    Knight = 4,
    Rook = 5,
    Pawn = 6,
}

impl PieceKind {
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    pub const fn from_code(code: u8) -> Option<PieceKind> {
        match code {
            1 => Some(PieceKind::King),
            2 => Some(PieceKind::Queen),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Knight),
            5 => Some(PieceKind::Rook),
            6 => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (1..=6).filter_map(PieceKind::from_code)
    }

    /// Lowercase letter of the piece, as used in FEN and in UCI promotions
    pub fn as_char(&self) -> char {
        match *self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Rook => 'r',
            PieceKind::Pawn => 'p',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'r' => Some(PieceKind::Rook),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Piece a pawn can be promoted to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PromotePiece {
    Queen,
    Knight,
    Rook,
    Bishop,
}

impl PromotePiece {
    /// All the choices, in the order they are offered to the player
    pub const ALL: [PromotePiece; 4] = [
        PromotePiece::Queen,
        PromotePiece::Knight,
        PromotePiece::Rook,
        PromotePiece::Bishop,
    ];

    pub fn as_char(&self) -> char {
        PieceKind::from(*self).as_char()
    }

    pub fn from_char(c: char) -> Option<PromotePiece> {
        match c {
            'q' => Some(PromotePiece::Queen),
            'n' => Some(PromotePiece::Knight),
            'r' => Some(PromotePiece::Rook),
            'b' => Some(PromotePiece::Bishop),
            _ => None,
        }
    }
}

impl From<PromotePiece> for PieceKind {
    fn from(p: PromotePiece) -> PieceKind {
        match p {
            PromotePiece::Queen => PieceKind::Queen,
            PromotePiece::Knight => PieceKind::Knight,
            PromotePiece::Rook => PieceKind::Rook,
            PromotePiece::Bishop => PieceKind::Bishop,
        }
    }
}

impl TryFrom<PieceKind> for PromotePiece {
    type Error = PieceKind;

    fn try_from(kind: PieceKind) -> Result<PromotePiece, PieceKind> {
        match kind {
            PieceKind::Queen => Ok(PromotePiece::Queen),
            PieceKind::Knight => Ok(PromotePiece::Knight),
            PieceKind::Rook => Ok(PromotePiece::Rook),
            PieceKind::Bishop => Ok(PromotePiece::Bishop),
            other => Err(other),
        }
    }
}

impl FromStr for PromotePiece {
    type Err = PromotePieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "q" | "queen" => Ok(PromotePiece::Queen),
            "n" | "knight" => Ok(PromotePiece::Knight),
            "r" | "rook" => Ok(PromotePiece::Rook),
            "b" | "bishop" => Ok(PromotePiece::Bishop),
            _ => Err(PromotePieceParseError(s.to_string())),
        }
    }
}

/// Which side of the board faces the viewer
///
/// With [`Orientation::WhiteBottom`], row `0` is Black's back rank.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    WhiteBottom,
    BlackBottom,
}

impl Orientation {
    pub const fn sign(&self) -> isize {
        match *self {
            Orientation::WhiteBottom => 1,
            Orientation::BlackBottom => -1,
        }
    }
}

/// Address of a cell on the board, as seen by the viewer
///
/// Row `0` is the top row on the screen and column `0` is the leftmost one. The coordinate is packed
/// into a single byte with a fixed stride of [`MAX_SIDE`], so boards smaller than 8x8 share the
/// same indexing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(u8);

impl Coord {
    pub const COUNT: usize = MAX_SIDE * MAX_SIDE;

    pub const fn from_index(val: usize) -> Coord {
        assert!(val < Self::COUNT, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn from_parts(row: usize, col: usize) -> Coord {
        assert!(row < MAX_SIDE && col < MAX_SIDE, "row and column must be less than 8");
        Coord((row * MAX_SIDE + col) as u8)
    }

    pub const fn row(&self) -> usize {
        self.0 as usize / MAX_SIDE
    }

    pub const fn col(&self) -> usize {
        self.0 as usize % MAX_SIDE
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Shifts the coordinate, returning `None` if it leaves the `rows` x `cols` rectangle
    pub fn try_shift(self, delta_row: isize, delta_col: isize, rows: usize, cols: usize) -> Option<Coord> {
        let new_row = self.row().wrapping_add(delta_row as usize);
        let new_col = self.col().wrapping_add(delta_col as usize);
        if new_row >= rows || new_col >= cols {
            return None;
        }
        Some(Coord::from_parts(new_row, new_col))
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Coord({}, {})", self.row(), self.col())
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Square in algebraic notation, always from White's perspective
///
/// Both `file` and `rank` are zero-based, so `a1` is `Square { file: 0, rank: 0 }`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub const fn new(file: u8, rank: u8) -> Square {
        assert!(
            (file as usize) < MAX_SIDE && (rank as usize) < MAX_SIDE,
            "file and rank must be less than 8"
        );
        Square { file, rank }
    }

    pub fn file_char(&self) -> char {
        (b'a' + self.file) as char
    }

    pub fn rank_char(&self) -> char {
        (b'1' + self.rank) as char
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(SquareParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let file = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a',
            b => return Err(SquareParseError::UnexpectedFileChar(b as char)),
        };
        let rank = match bytes[1] {
            b @ b'1'..=b'8' => b - b'1',
            b => return Err(SquareParseError::UnexpectedRankChar(b as char)),
        };
        Ok(Square { file, rank })
    }
}

/// Contents of a single cell: either empty or a piece of some color
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const MAX_INDEX: usize = 13;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const fn from_parts(c: Color, k: PieceKind) -> Cell {
        Cell(match c {
            Color::White => k as u8,
            Color::Black => 6 + k as u8,
        })
    }

    /// Builds the cell from a signed template code (magnitude = kind, sign = color, zero = empty)
    pub const fn from_code(code: i8) -> Option<Cell> {
        if code == 0 {
            return Some(Cell::EMPTY);
        }
        let color = if code > 0 { Color::White } else { Color::Black };
        match PieceKind::from_code(code.unsigned_abs()) {
            Some(k) => Some(Cell::from_parts(color, k)),
            None => None,
        }
    }

    pub const fn code(&self) -> i8 {
        match self.0 {
            0 => 0,
            1..=6 => self.0 as i8,
            _ => -((self.0 - 6) as i8),
        }
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn kind(&self) -> Option<PieceKind> {
        match self.0 {
            0 => None,
            1..=6 => PieceKind::from_code(self.0),
            _ => PieceKind::from_code(self.0 - 6),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::MAX_INDEX as u8).map(Cell)
    }

    pub fn as_char(&self) -> char {
        b".KQBNRPkqbnrp"[self.0 as usize] as char
    }

    pub fn as_utf8_char(&self) -> char {
        [
            '.', '♔', '♕', '♗', '♘', '♖', '♙', '♚', '♛', '♝', '♞', '♜', '♟',
        ][self.0 as usize]
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Cell::from_parts(color, PieceKind::from_char(c)?))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if (self.0 as usize) < Self::MAX_INDEX {
            return write!(f, "Cell({})", self.as_char());
        }
        write!(f, "Cell(?{:?})", self.0)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(CellParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Cell::from_char(ch).ok_or(CellParseError::UnexpectedChar(ch))
    }
}

/// State of the game
///
/// Once the game leaves [`GameResult::InProgress`], the result never changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameResult {
    #[default]
    InProgress,
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameResult {
    pub const fn win(c: Color) -> GameResult {
        match c {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub const fn winner(&self) -> Option<Color> {
        match *self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            _ => None,
        }
    }

    pub const fn is_finished(&self) -> bool {
        !matches!(*self, GameResult::InProgress)
    }
}

impl Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            GameResult::InProgress => write!(f, "in progress"),
            GameResult::WhiteWins => write!(f, "White wins"),
            GameResult::BlackWins => write!(f, "Black wins"),
            GameResult::Stalemate => write!(f, "Stalemate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for row in 0..MAX_SIDE {
            for col in 0..MAX_SIDE {
                let coord = Coord::from_parts(row, col);
                assert_eq!(coord.row(), row);
                assert_eq!(coord.col(), col);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_coord_shift() {
        let c = Coord::from_parts(6, 4);
        assert_eq!(c.try_shift(-2, 0, 8, 8), Some(Coord::from_parts(4, 4)));
        assert_eq!(c.try_shift(2, 0, 8, 8), None);
        assert_eq!(c.try_shift(0, 3, 8, 8), Some(Coord::from_parts(6, 7)));
        assert_eq!(c.try_shift(0, 3, 8, 7), None);
        assert_eq!(c.try_shift(0, -5, 8, 8), None);
    }

    #[test]
    fn test_cell() {
        assert_eq!(Cell::EMPTY.color(), None);
        assert_eq!(Cell::EMPTY.kind(), None);
        let mut cells = vec![Cell::EMPTY];
        for color in Color::iter() {
            for kind in PieceKind::iter() {
                let cell = Cell::from_parts(color, kind);
                assert_eq!(cell.color(), Some(color));
                assert_eq!(cell.kind(), Some(kind));
                assert_eq!(Cell::from_code(cell.code()), Some(cell));
                assert_eq!(cell.code(), color.sign() as i8 * kind.code() as i8);
                cells.push(cell);
            }
        }
        assert_eq!(cells, Cell::iter().collect::<Vec<_>>());
        assert_eq!(Cell::from_code(7), None);
        assert_eq!(Cell::from_code(-9), None);
    }

    #[test]
    fn test_cell_str() {
        for cell in Cell::iter() {
            let s = cell.to_string();
            assert_eq!(Cell::from_str(&s), Ok(cell));
        }
        assert_eq!(Cell::from_str("x"), Err(CellParseError::UnexpectedChar('x')));
        assert_eq!(Cell::from_str("KQ"), Err(CellParseError::BadLength));
    }

    #[test]
    fn test_square_str() {
        assert_eq!(Square::new(1, 3).to_string(), "b4");
        assert_eq!(Square::new(0, 0).to_string(), "a1");
        assert_eq!(Square::from_str("a1"), Ok(Square::new(0, 0)));
        assert_eq!(Square::from_str("h8"), Ok(Square::new(7, 7)));
        assert_eq!(
            Square::from_str("h9"),
            Err(SquareParseError::UnexpectedRankChar('9'))
        );
        assert_eq!(
            Square::from_str("i4"),
            Err(SquareParseError::UnexpectedFileChar('i'))
        );
        assert_eq!(Square::from_str("e"), Err(SquareParseError::BadLength));
    }

    #[test]
    fn test_promote_piece() {
        for p in PromotePiece::ALL {
            let kind = PieceKind::from(p);
            assert_eq!(PromotePiece::try_from(kind), Ok(p));
            assert_eq!(PromotePiece::from_char(p.as_char()), Some(p));
        }
        assert_eq!(PromotePiece::try_from(PieceKind::King), Err(PieceKind::King));
        assert_eq!(PromotePiece::from_str("Queen"), Ok(PromotePiece::Queen));
        assert!(PromotePiece::from_str("pawn").is_err());
    }

    #[test]
    fn test_result() {
        assert!(!GameResult::InProgress.is_finished());
        assert!(GameResult::Stalemate.is_finished());
        assert_eq!(GameResult::win(Color::Black), GameResult::BlackWins);
        assert_eq!(GameResult::WhiteWins.winner(), Some(Color::White));
        assert_eq!(GameResult::Stalemate.winner(), None);
    }
}
