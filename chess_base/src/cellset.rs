use crate::geometry::MAX_SIDE;
use crate::types::Coord;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// Set of cells, one bit per [`Coord`]
///
/// Used for every per-cell boolean table on the board: threat tables, legal destination
/// highlights and check alerts.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct CellSet(u64);

impl CellSet {
    pub const EMPTY: CellSet = CellSet(0);

    pub const fn from_coord(coord: Coord) -> CellSet {
        CellSet(1_u64 << coord.index())
    }

    pub const fn with(self, coord: Coord) -> CellSet {
        CellSet(self.0 | (1_u64 << coord.index()))
    }

    pub fn set(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    pub const fn has(&self, coord: Coord) -> bool {
        ((self.0 >> coord.index()) & 1) != 0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }
}

impl FromIterator<Coord> for CellSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> CellSet {
        iter.into_iter().fold(CellSet::EMPTY, CellSet::with)
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "CellSet({})", self)
    }
}

/// Prints the rows from top to bottom, separated with `/`
impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..MAX_SIDE {
            if row != 0 {
                write!(f, "/")?;
            }
            for col in 0..MAX_SIDE {
                let bit = self.has(Coord::from_parts(row, col));
                write!(f, "{}", if bit { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        Some(Coord::from_index(bit as usize))
    }
}

impl IntoIterator for CellSet {
    type Item = Coord;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter() {
        let set = CellSet::EMPTY
            .with(Coord::from_parts(4, 0))
            .with(Coord::from_parts(6, 4))
            .with(Coord::from_parts(5, 5));
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec![
                Coord::from_parts(4, 0),
                Coord::from_parts(5, 5),
                Coord::from_parts(6, 4)
            ],
        );
        assert_eq!(set.into_iter().collect::<CellSet>(), set);
    }

    #[test]
    fn test_bitops() {
        let ca = Coord::from_parts(4, 0);
        let cb = Coord::from_parts(6, 4);
        let cc = Coord::from_parts(5, 5);

        let s1 = CellSet::EMPTY.with(ca).with(cb);
        let s2 = CellSet::EMPTY.with(cb).with(cc);
        assert_eq!(s1 & s2, CellSet::EMPTY.with(cb));
        assert_eq!(s1 | s2, CellSet::EMPTY.with(ca).with(cb).with(cc));
        assert_eq!(s1 ^ s2, CellSet::EMPTY.with(ca).with(cc));

        assert_eq!((!s1).into_iter().count(), 62);
        assert_eq!((!s1).len(), 62);

        let s3 = s1 & !CellSet::from_coord(ca);
        assert!(!s3.has(ca));
        assert!(s3.has(cb));
    }

    #[test]
    fn test_format() {
        let set = CellSet::EMPTY
            .with(Coord::from_parts(0, 7))
            .with(Coord::from_parts(4, 0))
            .with(Coord::from_parts(6, 4));
        assert_eq!(
            set.to_string(),
            "00000001/00000000/00000000/00000000/10000000/00000000/00001000/00000000"
        );
    }
}
