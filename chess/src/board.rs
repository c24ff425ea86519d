//! Board and related things

use crate::cellset::CellSet;
use crate::geometry;
use crate::notation::CoordMove;
use crate::piece::{self, Destination, Destinations, Piece};
use crate::rules::{Captured, MoveRule, Secondary};
use crate::types::{Cell, Color, Coord, GameResult, Orientation, PieceKind, PromotePiece, Square};
use crate::variant::{Layout, Variant};

use std::fmt::{self, Display};

use arrayvec::ArrayVec;
use log::{debug, info};
use rand::Rng;
use thiserror::Error;

/// Error applying a [`CoordMove`] to the board
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PushError {
    /// The game is already over
    #[error("game is already finished: {0}")]
    Finished(GameResult),
    /// The previous move is waiting for a promotion choice
    #[error("promotion is pending")]
    PromotionPending,
    /// Square does not exist on this board
    #[error("square {0} is outside the board")]
    OffBoard(Square),
    /// Move is not legal in the current position
    #[error("illegal move {0}")]
    Illegal(CoordMove),
    /// Pawn reaches the last row, but the move doesn't say what to promote to
    #[error("move {0} must specify a promotion")]
    MissingPromotion(CoordMove),
    /// Move specifies a promotion, but it doesn't promote anything
    #[error("move {0} does not promote")]
    UnexpectedPromotion(CoordMove),
    /// Promotion was rejected
    #[error("cannot promote: {0}")]
    Promote(#[from] PromoteError),
}

/// Error applying a promotion choice
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PromoteError {
    /// No pawn is waiting for promotion
    #[error("no promotion is pending")]
    NotPending,
    /// Promotion is pending on another cell
    #[error("promotion is pending on {expected}, not on {actual}")]
    WrongCell { expected: Coord, actual: Coord },
    /// A pawn cannot become a piece of this kind
    #[error("cannot promote to {0:?}")]
    BadKind(PieceKind),
}

/// Record of a completed move, as stored in the board history
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub rule: MoveRule,
    /// Piece which made the move
    pub piece: Cell,
    pub captured: Option<Captured>,
    pub secondary: Option<Secondary>,
}

/// Pawn waiting to be promoted
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PromotionRequest {
    pub coord: Coord,
    pub color: Color,
}

impl PromotionRequest {
    /// Kinds the pawn can be promoted to
    pub fn choices(&self) -> [PromotePiece; 4] {
        PromotePiece::ALL
    }
}

/// Everything a presentation layer needs to redraw after a move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveDelta {
    pub record: MoveRecord,
    /// Set if the moved pawn must be promoted before the game continues
    pub promotion: Option<PromotionRequest>,
}

/// Chess board
///
/// The board owns the pieces, tracks whose turn it is, keeps the move history and decides when
/// the game is over. It also holds the current selection, as moves are made in two steps: first
/// [`Board::select()`] a piece, then [`Board::execute_move()`] to one of its destinations.
///
/// Cells are addressed by [`Coord`], i.e. by row and column as they appear on screen. Use
/// [`Board::square_of()`] and [`Board::cell_of()`] to translate to and from [`Square`].
#[derive(Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    orientation: Orientation,
    cells: [Option<Piece>; Coord::COUNT],
    turn: Color,
    ply: u32,
    history: Vec<MoveRecord>,
    threats: CellSet,
    checkers: CellSet,
    result: GameResult,
    selected: Option<Coord>,
    pending: Option<PromotionRequest>,
    generation: u64,
}

impl Board {
    /// Creates the initial position of variant `v`
    ///
    /// Chess960 back ranks are shuffled with the thread-local random generator.
    pub fn new(v: Variant, o: Orientation) -> Board {
        Self::with_rng(v, o, &mut rand::thread_rng())
    }

    /// Creates the initial position of variant `v`, shuffling with `rng` if required
    pub fn with_rng<R: Rng + ?Sized>(v: Variant, o: Orientation, rng: &mut R) -> Board {
        let board = Self::place(&v.placement(o, rng), o, Color::White);
        debug!("created {} board: {}", v, board);
        board
    }

    /// Creates a board from an arbitrary layout with `turn` to move
    ///
    /// The layout is written from White's perspective and is rotated according to `o`. All the
    /// pieces are considered never moved.
    pub fn from_layout(layout: &Layout, o: Orientation, turn: Color) -> Board {
        Self::place(&layout.oriented(o), o, turn)
    }

    fn place(layout: &Layout, o: Orientation, turn: Color) -> Board {
        let mut cells: [Option<Piece>; Coord::COUNT] = std::array::from_fn(|_| None);
        for (c, cell) in layout.occupied() {
            if let (Some(color), Some(kind)) = (cell.color(), cell.kind()) {
                cells[c.index()] = Some(Piece::new(kind, color, c, o));
            }
        }
        let mut b = Board {
            rows: layout.rows(),
            cols: layout.cols(),
            orientation: o,
            cells,
            turn,
            ply: 1,
            history: Vec::new(),
            threats: CellSet::EMPTY,
            checkers: CellSet::EMPTY,
            result: GameResult::InProgress,
            selected: None,
            pending: None,
            generation: 0,
        };
        b.detect_check();
        b.evaluate_result();
        b
    }

    /// Returns an independent copy used to try a move without touching this board
    ///
    /// The copy has an empty history and no selection. Its generation differs from the one of
    /// this board, so no cached destinations are reused.
    pub(crate) fn simulation(&self) -> Board {
        Board {
            rows: self.rows,
            cols: self.cols,
            orientation: self.orientation,
            cells: self.cells.clone(),
            turn: self.turn,
            ply: self.ply,
            history: Vec::new(),
            threats: self.threats,
            checkers: self.checkers,
            result: self.result,
            selected: None,
            pending: None,
            generation: self.generation.wrapping_add(1),
        }
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
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Side to move
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Number of the current ply, starting from 1
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Cells the side not to move could capture into
    #[inline]
    pub fn threats(&self) -> CellSet {
        self.threats
    }

    /// Cells of the pieces giving check to the side to move
    #[inline]
    pub fn checkers(&self) -> CellSet {
        self.checkers
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.checkers.is_nonempty()
    }

    /// Cells to highlight as alerts: the checked king and its attackers
    pub fn alerts(&self) -> CellSet {
        match self.king(self.turn) {
            Some(k) if self.is_check() => self.checkers.with(k),
            _ => CellSet::EMPTY,
        }
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[inline]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<PromotionRequest> {
        self.pending
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row() < self.rows && c.col() < self.cols
    }

    #[inline]
    pub fn piece(&self, c: Coord) -> Option<&Piece> {
        self.cells[c.index()].as_ref()
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.piece(c).map_or(Cell::EMPTY, Piece::cell)
    }

    #[inline]
    pub fn color_at(&self, c: Coord) -> Option<Color> {
        self.piece(c).map(Piece::color)
    }

    #[inline]
    pub fn is_free(&self, c: Coord) -> bool {
        self.cells[c.index()].is_none()
    }

    /// Shifts `c` by the given deltas, returning `None` if the result is outside the board
    #[inline]
    pub fn shift(&self, c: Coord, delta_row: isize, delta_col: isize) -> Option<Coord> {
        c.try_shift(delta_row, delta_col, self.rows, self.cols)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color() == color)
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Returns the king position of color `color`, if it has a king
    pub fn king(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|p| p.kind() == PieceKind::King)
            .map(Piece::coord)
    }

    /// Returns the current placement, written from White's perspective
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::empty(self.rows, self.cols);
        for p in self.pieces() {
            layout.put(p.coord(), p.cell());
        }
        layout.oriented(self.orientation)
    }

    /// Translates a cell into a square in White's notation
    ///
    /// # Panics
    ///
    /// The function panics if `c` is outside the board.
    pub fn square_of(&self, c: Coord) -> Square {
        assert!(self.contains(c), "cell {} is outside the board", c);
        let (file, rank) = match self.orientation {
            Orientation::WhiteBottom => (c.col(), self.rows - 1 - c.row()),
            Orientation::BlackBottom => (self.cols - 1 - c.col(), c.row()),
        };
        Square::new(file as u8, rank as u8)
    }

    /// Translates a square in White's notation into a cell, returning `None` if the square is
    /// outside the board
    pub fn cell_of(&self, s: Square) -> Option<Coord> {
        let (file, rank) = (s.file as usize, s.rank as usize);
        if file >= self.cols || rank >= self.rows {
            return None;
        }
        Some(match self.orientation {
            Orientation::WhiteBottom => Coord::from_parts(self.rows - 1 - rank, file),
            Orientation::BlackBottom => Coord::from_parts(rank, self.cols - 1 - file),
        })
    }

    /// Converts a history record into coordinate notation
    ///
    /// Promotions are not stored in the history, so the result never has a promotion suffix.
    pub fn coord_move(&self, r: &MoveRecord) -> CoordMove {
        CoordMove::new(self.square_of(r.from), self.square_of(r.to))
    }

    /// Returns the legal destinations of the piece on `c`
    ///
    /// The result is cached in the piece until the next move, so asking twice is cheap.
    pub fn destinations(&mut self, c: Coord) -> Destinations {
        let generation = self.generation;
        match self.piece(c) {
            None => return Destinations::new(),
            Some(p) => {
                if let Some(d) = p.cached(generation) {
                    return d.clone();
                }
            }
        }
        let dests = piece::collect_destinations(self, c, false);
        if let Some(p) = self.cells[c.index()].as_mut() {
            p.store(generation, dests.clone());
        }
        dests
    }

    /// Computes the legal destinations of the piece on `c` without touching the cache
    pub fn legal_destinations(&self, c: Coord) -> Destinations {
        piece::collect_destinations(self, c, false)
    }

    /// Computes the destinations of the piece on `c`, ignoring own king safety
    pub fn pseudo_destinations(&self, c: Coord) -> Destinations {
        piece::collect_destinations(self, c, true)
    }

    /// Returns all the legal moves of the side to move
    pub fn legal_moves(&mut self) -> Vec<(Coord, Destination)> {
        let mut res = Vec::new();
        for c in self.own_coords() {
            res.extend(self.destinations(c).iter().map(|d| (c, *d)));
        }
        res
    }

    pub fn has_legal_moves(&mut self) -> bool {
        self.own_coords()
            .into_iter()
            .any(|c| !self.destinations(c).is_empty())
    }

    fn own_coords(&self) -> ArrayVec<Coord, { Coord::COUNT }> {
        self.pieces_of(self.turn).map(Piece::coord).collect()
    }

    /// Selects the piece on `c` and returns its legal destinations
    ///
    /// Selecting the already selected cell deselects it. Selecting an empty cell or a piece of
    /// the wrong color clears the selection. In all these cases, as well as when the game is
    /// over or a promotion is pending, the returned set is empty.
    pub fn select(&mut self, c: Coord) -> Destinations {
        let prev = self.selected.take();
        if self.result.is_finished() || self.pending.is_some() || !self.contains(c) {
            return Destinations::new();
        }
        if prev == Some(c) || self.color_at(c) != Some(self.turn) {
            return Destinations::new();
        }
        self.selected = Some(c);
        self.destinations(c)
    }

    /// Moves the selected piece to `to`
    ///
    /// Returns `None` and leaves the board intact if the game is over, a promotion is pending,
    /// nothing is selected, or `to` is not a legal destination of the selected piece.
    pub fn execute_move(&mut self, to: Coord) -> Option<MoveDelta> {
        if self.result.is_finished() || self.pending.is_some() || !self.contains(to) {
            return None;
        }
        let from = self.selected?;
        let rule = self.destinations(from).rule(to)?;
        self.selected = None;

        let (cell, forward) = {
            let p = self.piece(from)?;
            (p.cell(), p.forward())
        };
        self.stamp(from);
        let effect = rule.execute(self, from, to);
        let record = MoveRecord {
            from,
            to,
            rule,
            piece: cell,
            captured: effect.captured,
            secondary: effect.secondary,
        };
        self.history.push(record);
        debug!(
            "ply {}: {} {} {} ({})",
            self.ply,
            cell,
            self.square_of(from),
            self.square_of(to),
            rule
        );

        self.ply += 1;
        self.turn = self.turn.inv();
        self.invalidate();

        let promotion = match cell.kind() {
            Some(PieceKind::Pawn) if to.row() == geometry::promotion_row(forward, self.rows) => {
                Some(PromotionRequest {
                    coord: to,
                    color: self.turn.inv(),
                })
            }
            _ => None,
        };
        self.pending = promotion;
        self.detect_check();
        if promotion.is_none() {
            self.evaluate_result();
        }

        #[cfg(feature = "selftest")]
        self.selftest();

        Some(MoveDelta { record, promotion })
    }

    /// Replaces the pawn waiting for promotion on `c` with a piece of kind `kind`
    pub fn try_promote(&mut self, c: Coord, kind: PieceKind) -> Result<(), PromoteError> {
        let req = self.pending.ok_or(PromoteError::NotPending)?;
        if req.coord != c {
            return Err(PromoteError::WrongCell {
                expected: req.coord,
                actual: c,
            });
        }
        PromotePiece::try_from(kind).map_err(PromoteError::BadKind)?;
        let promoted = self.piece(c).ok_or(PromoteError::NotPending)?.promoted(kind);
        debug!("promote {} to {}", self.square_of(c), promoted.cell());
        self.cells[c.index()] = Some(promoted);
        self.pending = None;
        self.invalidate();
        self.detect_check();
        self.evaluate_result();

        #[cfg(feature = "selftest")]
        self.selftest();

        Ok(())
    }

    /// Replaces the pawn waiting for promotion on `c` with a piece of kind `kind`
    ///
    /// # Panics
    ///
    /// The function panics if no promotion is pending on `c`, or if `kind` is a king or a pawn.
    pub fn promote(&mut self, c: Coord, kind: PieceKind) {
        if let Err(e) = self.try_promote(c, kind) {
            panic!("bad promotion: {}", e);
        }
    }

    /// Applies a move given in coordinate notation
    ///
    /// Unlike [`Board::execute_move()`], the move is validated and the reason of rejection is
    /// returned. If the move promotes a pawn, the promotion is applied as well, so the board
    /// never stays with a pending promotion.
    pub fn push_coord_move(&mut self, mv: CoordMove) -> Result<MoveDelta, PushError> {
        if self.result.is_finished() {
            return Err(PushError::Finished(self.result));
        }
        if self.pending.is_some() {
            return Err(PushError::PromotionPending);
        }
        let from = self.cell_of(mv.src).ok_or(PushError::OffBoard(mv.src))?;
        let to = self.cell_of(mv.dst).ok_or(PushError::OffBoard(mv.dst))?;
        if self.color_at(from) != Some(self.turn) || !self.destinations(from).contains(to) {
            return Err(PushError::Illegal(mv));
        }
        match (self.is_promoting(from, to), mv.promote) {
            (true, None) => return Err(PushError::MissingPromotion(mv)),
            (false, Some(_)) => return Err(PushError::UnexpectedPromotion(mv)),
            _ => {}
        }
        self.selected = Some(from);
        let delta = self.execute_move(to).ok_or(PushError::Illegal(mv))?;
        if let (Some(req), Some(p)) = (delta.promotion, mv.promote) {
            self.try_promote(req.coord, p.into())?;
        }
        Ok(delta)
    }

    fn is_promoting(&self, from: Coord, to: Coord) -> bool {
        match self.piece(from) {
            Some(p) if p.kind() == PieceKind::Pawn => {
                to.row() == geometry::promotion_row(p.forward(), self.rows)
            }
            _ => false,
        }
    }

    /// Returns the cells attacked by `attacker`
    ///
    /// Only capturing rules are taken into account, and own king safety is disregarded.
    pub fn threats_of(&self, attacker: Color) -> CellSet {
        let mut res = CellSet::EMPTY;
        self.attacks(attacker, |_, to| res.set(to));
        res
    }

    fn attacks(&self, attacker: Color, mut visit: impl FnMut(Coord, Coord)) {
        for p in self.pieces_of(attacker) {
            for &rule in p.rules().iter().filter(|r| r.is_checkable()) {
                let mut dests = Destinations::new();
                rule.enumerate(self, p, true, &mut dests);
                for d in &dests {
                    visit(p.coord(), d.to);
                }
            }
        }
    }

    /// Recomputes the threat table for `color`'s opponent and tells whether `color`'s king is
    /// attacked
    pub(crate) fn is_king_attacked(&mut self, color: Color) -> bool {
        self.threats = self.threats_of(color.inv());
        match self.king(color) {
            Some(k) => self.threats.has(k),
            None => false,
        }
    }

    pub(crate) fn stamp(&mut self, c: Coord) {
        let ply = self.ply;
        if let Some(p) = self.cells[c.index()].as_mut() {
            p.stamp(ply);
        }
    }

    /// Moves the piece from `from` to `to`, returning the piece previously standing on `to`
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let captured = self.cells[to.index()].take();
        if let Some(mut p) = self.cells[from.index()].take() {
            p.set_coord(to);
            self.cells[to.index()] = Some(p);
        }
        captured
    }

    pub(crate) fn remove(&mut self, c: Coord) -> Option<Piece> {
        self.cells[c.index()].take()
    }

    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn detect_check(&mut self) {
        let attacker = self.turn.inv();
        self.threats = self.threats_of(attacker);
        self.checkers = CellSet::EMPTY;
        if let Some(king) = self.king(self.turn) {
            if self.threats.has(king) {
                let mut checkers = CellSet::EMPTY;
                self.attacks(attacker, |from, to| {
                    if to == king {
                        checkers.set(from);
                    }
                });
                self.checkers = checkers;
            }
        }
    }

    fn evaluate_result(&mut self) {
        if self.result.is_finished() {
            return;
        }
        let white = self.piece_count(Color::White);
        let black = self.piece_count(Color::Black);
        let result = match (white, black) {
            (0, 0) => GameResult::Stalemate,
            (_, 0) => GameResult::WhiteWins,
            (0, _) => GameResult::BlackWins,
            _ => {
                if self.has_legal_moves() {
                    return;
                }
                if self.is_check() {
                    GameResult::win(self.turn.inv())
                } else {
                    GameResult::Stalemate
                }
            }
        };
        info!("game finished on ply {}: {}", self.ply, result);
        self.result = result;
    }

    #[cfg(feature = "selftest")]
    fn selftest(&self) {
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces_of(color)
                .filter(|p| p.kind() == PieceKind::King)
                .count();
            assert!(kings <= 1, "{} has {} kings", color, kings);
        }
        for c in Coord::iter() {
            if let Some(p) = self.piece(c) {
                assert!(self.contains(c), "piece outside the board at {}", c);
                assert_eq!(p.coord(), c, "piece coord mismatch");
            }
        }
        assert_eq!(self.history.len() as u32 + 1, self.ply, "ply and history mismatch");
    }

    /// Wraps the board to allow pretty-printing with the given style
    ///
    /// # Example
    ///
    /// ```
    /// # use varchess::board::{Board, PrettyStyle};
    /// # use varchess::types::Orientation;
    /// # use varchess::variant::Variant;
    /// #
    /// let b = Board::new(Variant::Standard, Orientation::WhiteBottom);
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string(), res[1..]);
    /// ```
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

/// Formats the placement from White's perspective followed by the side to move, e.g.
/// `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b`
impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.layout(), self.turn.as_char())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn cell(c: Cell) -> char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..b.rows() {
            let label = b.square_of(Coord::from_parts(row, 0)).rank_char();
            write!(f, "{}{}", label, Self::VERT_FRAME)?;
            for col in 0..b.cols() {
                write!(f, "{}", Self::cell(b.get(Coord::from_parts(row, col))))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in 0..b.cols() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(b.turn()), Self::VERT_FRAME)?;
        for col in 0..b.cols() {
            write!(f, "{}", b.square_of(Coord::from_parts(0, col)).file_char())?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
