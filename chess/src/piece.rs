//! Pieces and their cached legal destinations

use crate::board::Board;
use crate::cellset::CellSet;
use crate::rules::{self, MoveRule};
use crate::types::{Cell, Color, Coord, Orientation, PieceKind};
use crate::geometry;

use std::ops::Deref;
use std::slice;

use arrayvec::ArrayVec;

/// Upper bound on the number of destinations of a single piece on an 8x8 board
///
/// A queen in the center has 27, and a king has 8 steps plus 2 castlings.
pub const MAX_DESTINATIONS: usize = 32;

/// Destination cell of a piece, together with the rule which reaches it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub to: Coord,
    pub rule: MoveRule,
}

/// Set of destinations of a single piece
///
/// Each cell appears at most once. When two rules reach the same cell, the first registered
/// rule wins.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Destinations(ArrayVec<Destination, MAX_DESTINATIONS>);

impl Destinations {
    pub fn new() -> Destinations {
        Destinations(ArrayVec::new())
    }

    pub(crate) fn push(&mut self, d: Destination) {
        if !self.contains(d.to) {
            self.0.push(d);
        }
    }

    /// Returns the rule which reaches `to`, if any
    pub fn rule(&self, to: Coord) -> Option<MoveRule> {
        self.0.iter().find(|d| d.to == to).map(|d| d.rule)
    }

    pub fn contains(&self, to: Coord) -> bool {
        self.0.iter().any(|d| d.to == to)
    }

    /// Returns the destination cells as a [`CellSet`], suitable for highlighting
    pub fn cells(&self) -> CellSet {
        self.0.iter().map(|d| d.to).collect()
    }
}

impl Deref for Destinations {
    type Target = ArrayVec<Destination, MAX_DESTINATIONS>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Destinations {
    type Item = &'a Destination;
    type IntoIter = slice::Iter<'a, Destination>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone)]
struct Cache {
    generation: u64,
    dests: Destinations,
}

/// Piece standing on the board
///
/// Besides its identity, the piece remembers its move history flags and caches its legal
/// destinations. The cache is tagged with the board generation it was built for, so any move on
/// the board invalidates it.
#[derive(Debug, Clone)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    coord: Coord,
    forward: isize,
    never_moved: bool,
    last_moved: Option<u32>,
    cache: Option<Cache>,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, coord: Coord, orientation: Orientation) -> Piece {
        Piece {
            kind,
            color,
            coord,
            forward: geometry::pawn_forward(orientation, color),
            never_moved: true,
            last_moved: None,
            cache: None,
        }
    }

    /// Returns a fresh piece of kind `kind` replacing this one on its cell
    pub(crate) fn promoted(&self, kind: PieceKind) -> Piece {
        Piece {
            kind,
            color: self.color,
            coord: self.coord,
            forward: self.forward,
            never_moved: false,
            last_moved: self.last_moved,
            cache: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Row direction in which this piece advances if it is a pawn
    #[inline]
    pub fn forward(&self) -> isize {
        self.forward
    }

    #[inline]
    pub fn never_moved(&self) -> bool {
        self.never_moved
    }

    /// Ply on which this piece moved last time
    #[inline]
    pub fn last_moved(&self) -> Option<u32> {
        self.last_moved
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::from_parts(self.color, self.kind)
    }

    /// Movement rules of this piece, in registration order
    #[inline]
    pub fn rules(&self) -> &'static [MoveRule] {
        rules::rules_for(self.kind)
    }

    pub(crate) fn set_coord(&mut self, coord: Coord) {
        self.coord = coord;
        self.never_moved = false;
    }

    pub(crate) fn stamp(&mut self, ply: u32) {
        self.last_moved = Some(ply);
    }

    pub(crate) fn cached(&self, generation: u64) -> Option<&Destinations> {
        match &self.cache {
            Some(c) if c.generation == generation => Some(&c.dests),
            _ => None,
        }
    }

    pub(crate) fn store(&mut self, generation: u64, dests: Destinations) {
        self.cache = Some(Cache { generation, dests });
    }
}

/// Unions the destinations of every rule registered for the piece on `from`
///
/// With `disregard_check`, the destinations are pseudo-legal, otherwise the ones exposing the
/// mover's king are filtered out.
pub(crate) fn collect_destinations(b: &Board, from: Coord, disregard_check: bool) -> Destinations {
    let mut dests = Destinations::new();
    if let Some(piece) = b.piece(from) {
        for &rule in piece.rules() {
            rule.enumerate(b, piece, disregard_check, &mut dests);
        }
    }
    dests
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward() {
        let c = Coord::from_parts(6, 0);
        let p = Piece::new(PieceKind::Pawn, Color::White, c, Orientation::WhiteBottom);
        assert_eq!(p.forward(), -1);
        let p = Piece::new(PieceKind::Pawn, Color::White, c, Orientation::BlackBottom);
        assert_eq!(p.forward(), 1);
        let p = Piece::new(PieceKind::Pawn, Color::Black, c, Orientation::WhiteBottom);
        assert_eq!(p.forward(), 1);
    }

    #[test]
    fn test_promoted() {
        let c = Coord::from_parts(0, 3);
        let mut pawn = Piece::new(PieceKind::Pawn, Color::White, c, Orientation::WhiteBottom);
        pawn.stamp(7);
        let queen = pawn.promoted(PieceKind::Queen);
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert_eq!(queen.color(), Color::White);
        assert_eq!(queen.coord(), c);
        assert_eq!(queen.forward(), pawn.forward());
        assert!(!queen.never_moved());
        assert_eq!(queen.last_moved(), Some(7));
    }

    #[test]
    fn test_cache_generation() {
        let c = Coord::from_parts(7, 1);
        let mut p = Piece::new(PieceKind::Knight, Color::White, c, Orientation::WhiteBottom);
        assert!(p.cached(0).is_none());
        let mut dests = Destinations::new();
        dests.push(Destination {
            to: Coord::from_parts(5, 2),
            rule: MoveRule::KnightJump,
        });
        p.store(3, dests.clone());
        assert_eq!(p.cached(3), Some(&dests));
        assert!(p.cached(4).is_none());
    }

    #[test]
    fn test_destinations_dedup() {
        let to = Coord::from_parts(5, 5);
        let mut dests = Destinations::new();
        dests.push(Destination {
            to,
            rule: MoveRule::SlideStraight,
        });
        dests.push(Destination {
            to,
            rule: MoveRule::SlideDiagonal,
        });
        assert_eq!(dests.len(), 1);
        assert_eq!(dests.rule(to), Some(MoveRule::SlideStraight));
        assert_eq!(dests.cells(), CellSet::from_coord(to));
    }
}
