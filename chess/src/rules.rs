//! Movement rules
//!
//! Each piece kind is described by a fixed list of [`MoveRule`]s. A rule can enumerate the
//! destinations it reaches from a given cell, and can execute a move to one of them, possibly
//! touching a secondary piece (the rook in castling, or the pawn captured en passant).

use crate::board::Board;
use crate::geometry::{self, DIAGONAL_DIRS, KNIGHT_DELTAS, STEP_DELTAS, STRAIGHT_DIRS};
use crate::piece::{Destination, Destinations, Piece};
use crate::types::{Cell, Color, Coord, PieceKind};

use std::fmt;

/// Movement rule
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveRule {
    /// Single step in any of the eight directions
    Step,
    /// Slide along a row or a column until blocked
    SlideStraight,
    /// Slide along a diagonal until blocked
    SlideDiagonal,
    /// Knight jump, blockers are ignored
    KnightJump,
    /// Single pawn step onto an empty cell
    PawnForward,
    /// Double pawn step from the initial row
    PawnDoubleForward,
    /// Diagonal pawn capture
    PawnCapture,
    /// En passant capture of a pawn which has just made a double step
    EnPassant,
    /// Castling with a rook which never moved
    Castling,
}

const KING_RULES: [MoveRule; 2] = [MoveRule::Step, MoveRule::Castling];
const QUEEN_RULES: [MoveRule; 2] = [MoveRule::SlideStraight, MoveRule::SlideDiagonal];
const BISHOP_RULES: [MoveRule; 1] = [MoveRule::SlideDiagonal];
const KNIGHT_RULES: [MoveRule; 1] = [MoveRule::KnightJump];
const ROOK_RULES: [MoveRule; 1] = [MoveRule::SlideStraight];
const PAWN_RULES: [MoveRule; 4] = [
    MoveRule::PawnForward,
    MoveRule::PawnDoubleForward,
    MoveRule::PawnCapture,
    MoveRule::EnPassant,
];

/// Returns the rules registered for piece kind `k`, in registration order
pub const fn rules_for(k: PieceKind) -> &'static [MoveRule] {
    match k {
        PieceKind::King => &KING_RULES,
        PieceKind::Queen => &QUEEN_RULES,
        PieceKind::Bishop => &BISHOP_RULES,
        PieceKind::Knight => &KNIGHT_RULES,
        PieceKind::Rook => &ROOK_RULES,
        PieceKind::Pawn => &PAWN_RULES,
    }
}

impl MoveRule {
    /// Returns `true` if this rule contributes to the threat table
    ///
    /// Non-capturing pawn moves, en passant and castling never attack anything.
    pub const fn is_checkable(&self) -> bool {
        matches!(
            *self,
            MoveRule::Step
                | MoveRule::SlideStraight
                | MoveRule::SlideDiagonal
                | MoveRule::KnightJump
                | MoveRule::PawnCapture
        )
    }

    pub fn name(&self) -> &'static str {
        match *self {
            MoveRule::Step => "step",
            MoveRule::SlideStraight => "slide straight",
            MoveRule::SlideDiagonal => "slide diagonal",
            MoveRule::KnightJump => "knight jump",
            MoveRule::PawnForward => "pawn forward",
            MoveRule::PawnDoubleForward => "pawn double forward",
            MoveRule::PawnCapture => "pawn capture",
            MoveRule::EnPassant => "en passant",
            MoveRule::Castling => "castling",
        }
    }

    /// Adds the destinations reachable by `piece` under this rule to `out`
    ///
    /// Unless `disregard_check` is set, destinations which leave the mover's king attacked are
    /// skipped.
    pub fn enumerate(self, b: &Board, piece: &Piece, disregard_check: bool, out: &mut Destinations) {
        let mut c = Collector {
            board: b,
            piece,
            rule: self,
            disregard_check,
            out,
        };
        let from = piece.coord();
        let color = piece.color();
        let fwd = piece.forward();
        match self {
            MoveRule::Step => c.jumps(&STEP_DELTAS),
            MoveRule::KnightJump => c.jumps(&KNIGHT_DELTAS),
            MoveRule::SlideStraight => c.slides(&STRAIGHT_DIRS),
            MoveRule::SlideDiagonal => c.slides(&DIAGONAL_DIRS),
            MoveRule::PawnForward => {
                if let Some(to) = b.shift(from, fwd, 0) {
                    if b.is_free(to) {
                        c.push(to);
                    }
                }
            }
            MoveRule::PawnDoubleForward => {
                let start = geometry::double_step_row(fwd, b.rows());
                if !piece.never_moved() || start != Some(from.row()) {
                    return;
                }
                let mid = match b.shift(from, fwd, 0) {
                    Some(mid) if b.is_free(mid) => mid,
                    _ => return,
                };
                if let Some(to) = b.shift(mid, fwd, 0) {
                    if b.is_free(to) {
                        c.push(to);
                    }
                }
            }
            MoveRule::PawnCapture => {
                for dc in [-1, 1] {
                    if let Some(to) = b.shift(from, fwd, dc) {
                        if b.color_at(to) == Some(color.inv()) {
                            c.push(to);
                        }
                    }
                }
            }
            MoveRule::EnPassant => {
                for dc in [-1, 1] {
                    if let Some(to) = b.shift(from, fwd, dc) {
                        if b.is_free(to) && is_enpassant_victim(b, color, Coord::from_parts(from.row(), to.col())) {
                            c.push(to);
                        }
                    }
                }
            }
            MoveRule::Castling => {
                if !piece.never_moved() || !(from.col() == 3 || from.col() == 4) {
                    return;
                }
                for dc in [-2, 2] {
                    let to = match b.shift(from, 0, dc) {
                        Some(to) => to,
                        None => continue,
                    };
                    let rook = castling_rook(b, from, to);
                    if is_castling_rook(b, color, rook) && is_path_clear(b, from, rook) {
                        c.push(to);
                    }
                }
            }
        }
    }

    /// Moves the piece from `from` to `to` on `b` according to this rule
    ///
    /// Only the grid is changed. Ply, turn and history bookkeeping belong to the caller.
    pub(crate) fn execute(self, b: &mut Board, from: Coord, to: Coord) -> Effect {
        match self {
            MoveRule::EnPassant => {
                let victim = Coord::from_parts(from.row(), to.col());
                let captured = b.remove(victim).map(|p| Captured {
                    coord: victim,
                    cell: p.cell(),
                });
                b.relocate(from, to);
                Effect {
                    captured,
                    secondary: Some(Secondary::Removal(victim)),
                }
            }
            MoveRule::Castling => {
                let rook_from = castling_rook(b, from, to);
                let rook_to = castling_rook_dst(from, to);
                b.relocate(rook_from, rook_to);
                b.relocate(from, to);
                Effect {
                    captured: None,
                    secondary: Some(Secondary::Relocation {
                        from: rook_from,
                        to: rook_to,
                    }),
                }
            }
            _ => {
                let captured = b.relocate(from, to).map(|p| Captured {
                    coord: to,
                    cell: p.cell(),
                });
                Effect {
                    captured,
                    secondary: None,
                }
            }
        }
    }

    /// Returns `true` if moving `piece` to `to` leaves its king attacked
    ///
    /// The move is played on a simulation clone, so `b` is never touched. A side without a king
    /// cannot be in check.
    pub fn exposes_king(self, b: &Board, piece: &Piece, to: Coord) -> bool {
        let mut sim = b.simulation();
        let from = piece.coord();
        sim.stamp(from);
        self.execute(&mut sim, from, to);
        sim.is_king_attacked(piece.color())
    }
}

impl fmt::Display for MoveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// Piece removed from the board by a move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Captured {
    pub coord: Coord,
    pub cell: Cell,
}

/// Board change made by a move besides relocating the moving piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Secondary {
    /// Another piece was moved (the rook in castling)
    Relocation { from: Coord, to: Coord },
    /// A piece was removed from a cell other than the destination (en passant)
    Removal(Coord),
}

/// Outcome of [`MoveRule::execute`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Effect {
    pub captured: Option<Captured>,
    pub secondary: Option<Secondary>,
}

struct Collector<'a> {
    board: &'a Board,
    piece: &'a Piece,
    rule: MoveRule,
    disregard_check: bool,
    out: &'a mut Destinations,
}

impl Collector<'_> {
    fn push(&mut self, to: Coord) {
        if self.disregard_check || !self.rule.exposes_king(self.board, self.piece, to) {
            self.out.push(Destination { to, rule: self.rule });
        }
    }

    fn can_land(&self, to: Coord) -> bool {
        self.board.color_at(to) != Some(self.piece.color())
    }

    fn jumps(&mut self, deltas: &[(isize, isize)]) {
        let from = self.piece.coord();
        for &(dr, dc) in deltas {
            if let Some(to) = self.board.shift(from, dr, dc) {
                if self.can_land(to) {
                    self.push(to);
                }
            }
        }
    }

    fn slides(&mut self, dirs: &[(isize, isize)]) {
        let from = self.piece.coord();
        for &(dr, dc) in dirs {
            let mut cur = from;
            while let Some(to) = self.board.shift(cur, dr, dc) {
                match self.board.color_at(to) {
                    None => self.push(to),
                    Some(c) if c == self.piece.color() => break,
                    Some(_) => {
                        self.push(to);
                        break;
                    }
                }
                cur = to;
            }
        }
    }
}

fn is_enpassant_victim(b: &Board, color: Color, victim: Coord) -> bool {
    let piece = match b.piece(victim) {
        Some(p) => p,
        None => return false,
    };
    if piece.color() == color || piece.kind() != PieceKind::Pawn {
        return false;
    }
    if piece.last_moved() != b.ply().checked_sub(1) {
        return false;
    }
    matches!(
        b.history().last(),
        Some(r) if r.rule == MoveRule::PawnDoubleForward && r.to == victim
    )
}

fn castling_rook(b: &Board, from: Coord, to: Coord) -> Coord {
    let col = if to.col() > from.col() { b.cols() - 1 } else { 0 };
    Coord::from_parts(from.row(), col)
}

fn castling_rook_dst(from: Coord, to: Coord) -> Coord {
    if to.col() > from.col() {
        Coord::from_parts(from.row(), to.col() - 1)
    } else {
        Coord::from_parts(from.row(), to.col() + 1)
    }
}

fn is_castling_rook(b: &Board, color: Color, rook: Coord) -> bool {
    matches!(
        b.piece(rook),
        Some(p) if p.color() == color && p.kind() == PieceKind::Rook && p.never_moved()
    )
}

fn is_path_clear(b: &Board, king: Coord, rook: Coord) -> bool {
    let (lo, hi) = if king.col() < rook.col() {
        (king.col(), rook.col())
    } else {
        (rook.col(), king.col())
    };
    (lo + 1..hi).all(|col| b.is_free(Coord::from_parts(king.row(), col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::{Color, Orientation, Square};
    use crate::variant::Layout;

    fn board(fen: &str, turn: Color) -> Board {
        let layout: Layout = fen.parse().unwrap();
        Board::from_layout(&layout, Orientation::WhiteBottom, turn)
    }

    fn coord(b: &Board, s: &str) -> Coord {
        b.cell_of(s.parse::<Square>().unwrap()).unwrap()
    }

    fn pseudo(b: &Board, s: &str, rule: MoveRule) -> Vec<String> {
        let from = coord(b, s);
        let mut out = Destinations::new();
        rule.enumerate(b, b.piece(from).unwrap(), true, &mut out);
        let mut res: Vec<String> = out.iter().map(|d| b.square_of(d.to).to_string()).collect();
        res.sort();
        res
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(rules_for(PieceKind::King), &[MoveRule::Step, MoveRule::Castling]);
        assert_eq!(rules_for(PieceKind::Knight), &[MoveRule::KnightJump]);
        assert_eq!(rules_for(PieceKind::Pawn).len(), 4);
        let checkable: Vec<_> = PieceKind::iter()
            .flat_map(|k| rules_for(k).iter().copied())
            .filter(|r| r.is_checkable())
            .collect();
        assert!(!checkable.contains(&MoveRule::PawnForward));
        assert!(!checkable.contains(&MoveRule::EnPassant));
        assert!(!checkable.contains(&MoveRule::Castling));
        assert!(checkable.contains(&MoveRule::PawnCapture));
    }

    #[test]
    fn test_slides() {
        let b = board("8/8/8/3p4/8/3R1P2/8/K6k", Color::White);
        assert_eq!(
            pseudo(&b, "d3", MoveRule::SlideStraight),
            vec!["a3", "b3", "c3", "d1", "d2", "d4", "d5", "e3"]
        );
        assert_eq!(
            pseudo(&b, "d3", MoveRule::SlideDiagonal),
            vec!["a6", "b1", "b5", "c2", "c4", "e2", "e4", "f1", "f5", "g6", "h7"]
        );
    }

    #[test]
    fn test_jumps() {
        let b = board("8/8/8/8/8/8/3P4/1N2K2k", Color::White);
        assert_eq!(pseudo(&b, "b1", MoveRule::KnightJump), vec!["a3", "c3"]);
        assert_eq!(pseudo(&b, "e1", MoveRule::Step), vec!["d1", "e2", "f1", "f2"]);
    }

    #[test]
    fn test_pawns() {
        let b = board("8/8/8/8/3p4/8/4P3/K6k", Color::White);
        assert_eq!(pseudo(&b, "e2", MoveRule::PawnForward), vec!["e3"]);
        assert_eq!(pseudo(&b, "e2", MoveRule::PawnDoubleForward), vec!["e4"]);
        assert!(pseudo(&b, "e2", MoveRule::PawnCapture).is_empty());
        assert_eq!(pseudo(&b, "d4", MoveRule::PawnForward), vec!["d3"]);
        assert!(pseudo(&b, "d4", MoveRule::PawnDoubleForward).is_empty());

        let b = board("8/8/8/8/8/4p3/4P3/K6k", Color::White);
        assert!(pseudo(&b, "e2", MoveRule::PawnForward).is_empty());
        assert!(pseudo(&b, "e2", MoveRule::PawnDoubleForward).is_empty());

        let b = board("8/8/8/8/4p3/8/4P3/K6k", Color::White);
        assert_eq!(pseudo(&b, "e2", MoveRule::PawnForward), vec!["e3"]);
        assert!(pseudo(&b, "e2", MoveRule::PawnDoubleForward).is_empty());

        let b = board("8/8/8/8/8/3n1b2/4P3/K6k", Color::White);
        assert_eq!(pseudo(&b, "e2", MoveRule::PawnCapture), vec!["d3", "f3"]);
    }

    #[test]
    fn test_castling_conditions() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
        assert_eq!(pseudo(&b, "e1", MoveRule::Castling), vec!["c1", "g1"]);
        assert_eq!(pseudo(&b, "e8", MoveRule::Castling), vec!["c8", "g8"]);

        let b = board("8/8/8/8/8/8/8/RN2K1NR", Color::White);
        assert!(pseudo(&b, "e1", MoveRule::Castling).is_empty());

        // king outside the two central files
        let b = board("8/8/8/8/8/8/8/R1K4R", Color::White);
        assert!(pseudo(&b, "c1", MoveRule::Castling).is_empty());

        // the rook must be of the same color
        let b = board("8/8/8/8/8/8/8/r3K2R", Color::White);
        assert_eq!(pseudo(&b, "e1", MoveRule::Castling), vec!["g1"]);
    }

    #[test]
    fn test_execute_castling() {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
        let (e1, g1) = (coord(&b, "e1"), coord(&b, "g1"));
        let effect = MoveRule::Castling.execute(&mut b, e1, g1);
        assert_eq!(effect.captured, None);
        assert_eq!(
            effect.secondary,
            Some(Secondary::Relocation {
                from: coord(&b, "h1"),
                to: coord(&b, "f1"),
            })
        );
        assert_eq!(b.get(coord(&b, "f1")), Cell::from_parts(Color::White, PieceKind::Rook));
        assert_eq!(b.get(g1), Cell::from_parts(Color::White, PieceKind::King));
        assert!(b.get(coord(&b, "h1")).is_empty());

        let (e8, c8) = (coord(&b, "e8"), coord(&b, "c8"));
        MoveRule::Castling.execute(&mut b, e8, c8);
        assert_eq!(b.get(coord(&b, "d8")), Cell::from_parts(Color::Black, PieceKind::Rook));
        assert!(b.get(coord(&b, "a8")).is_empty());
    }
}
